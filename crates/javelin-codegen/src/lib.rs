//! Java to Ruby translation driver.
//!
//! [`translate`] runs both passes over one compilation unit: the declaration builder
//! (with [`RubyPeer`] matching statements and expressions) produces the module graph,
//! then the renderer normalizes each pending body and writes the Ruby source. Any
//! error aborts the unit; no partial output is returned.

mod error;
mod expr;
mod peer;
mod render;

use javelin_config::TranslateConfig;
use javelin_emit::{EmitConfig, Emitter};
use javelin_hir::build_compilation_unit;
use javelin_syntax::ParseNode;
use tracing::debug;

pub use crate::error::TranslateError;
pub use crate::peer::RubyPeer;

use crate::render::{RenderOptions, Renderer};

/// Translates one `compilationUnit` tree into Ruby source.
pub fn translate(tree: &ParseNode, config: &TranslateConfig) -> Result<String, TranslateError> {
    let mut graph = build_compilation_unit(tree, &RubyPeer)?;

    let mut out = Emitter::new(EmitConfig {
        indent_width: config.indent_width,
        ..EmitConfig::default()
    });
    let options = RenderOptions {
        flow: config.flow(),
        emit_comments: config.emit_comments,
    };
    Renderer::new(&mut graph, options).render_unit(&mut out)?;

    let source = out.finish();
    debug!(
        modules = graph.len(),
        bytes = source.len(),
        "translated compilation unit"
    );
    Ok(source)
}

/// Like [`translate`], for a tree serialized by the front-end.
pub fn translate_json(json: &str, config: &TranslateConfig) -> Result<String, TranslateError> {
    let tree = ParseNode::from_json(json)?;
    translate(&tree, config)
}
