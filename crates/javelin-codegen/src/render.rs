//! Second pass: walks the module graph and writes Ruby source.
//!
//! Pending bodies are taken out of the graph, normalized and rendered exactly once.
//! A module body is laid out as mixins, loose comments, nested modules, the
//! constructor, methods and finally static members in source order.

use javelin_emit::Emitter;
use javelin_flow::{normalize_body, CaseBranch, CaseLabel, Expression, FlowConfig, Stmt};
use javelin_hir::{
    initialization_plan, Constructor, InitStep, JavaModule, MethodBody, ModuleGraph, ModuleId,
    Param, StaticMember,
};
use javelin_types::capitalize;
use tracing::debug;

use crate::TranslateError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderOptions {
    pub(crate) flow: FlowConfig,
    pub(crate) emit_comments: bool,
}

pub(crate) struct Renderer<'g> {
    graph: &'g mut ModuleGraph,
    options: RenderOptions,
}

impl<'g> Renderer<'g> {
    pub(crate) fn new(graph: &'g mut ModuleGraph, options: RenderOptions) -> Self {
        Self { graph, options }
    }

    /// Unit comments, imports as comments, then every top-level module wrapped in
    /// one `module` per package segment.
    pub(crate) fn render_unit(&mut self, out: &mut Emitter) -> Result<(), TranslateError> {
        write_comments(out, &self.graph.comments, self.options);
        if !self.graph.imports.is_empty() {
            out.blank_line();
            for import in &self.graph.imports {
                out.line(format!("# {import}"));
            }
        }
        out.blank_line();
        let package = self.graph.package.clone();
        self.render_package(&package, out)
    }

    fn render_package(&mut self, package: &[String], out: &mut Emitter) -> Result<(), TranslateError> {
        if let Some((segment, rest)) = package.split_first() {
            out.line(format!("module {}", capitalize(segment)));
            out.indented(|out| self.render_package(rest, out))?;
            out.line("end");
            return Ok(());
        }

        let roots = self.graph.roots().to_vec();
        for (idx, id) in roots.into_iter().enumerate() {
            if idx > 0 {
                out.blank_line();
            }
            self.render_module(id, out)?;
        }
        Ok(())
    }

    fn render_module(&mut self, id: ModuleId, out: &mut Emitter) -> Result<(), TranslateError> {
        let module = &self.graph[id];
        debug!(module = %module.name, kind = ?module.kind, "rendering module");
        write_comments(out, &module.comments, self.options);

        let name = module.ruby_name();
        let header = if module.is_interface() {
            format!("module {name}")
        } else {
            match &module.superclass {
                Some(superclass) => format!("class {name} < {}", superclass.class_reference()),
                None => format!("class {name}"),
            }
        };
        out.line(header);
        out.indented(|out| self.render_module_body(id, out))?;
        out.line("end");
        Ok(())
    }

    fn render_module_body(&mut self, id: ModuleId, out: &mut Emitter) -> Result<(), TranslateError> {
        let mut sections = Sections::default();
        let module = &self.graph[id];

        if !module.interfaces.is_empty() {
            sections.start(out);
            for interface in &module.interfaces {
                out.line(format!("include {}", interface.class_reference()));
            }
        }
        if self.options.emit_comments && !module.body_comments.is_empty() {
            sections.start(out);
            write_comments(out, &module.body_comments, self.options);
        }

        let nested = module.nested.clone();
        for child in nested {
            sections.start(out);
            self.render_module(child, out)?;
        }

        if !self.graph[id].constructors.is_empty() {
            sections.start(out);
            self.render_constructors(id, out)?;
        }

        for idx in 0..self.graph[id].methods.len() {
            sections.start(out);
            self.render_method(id, idx, out)?;
        }

        if !self.graph[id].static_order.is_empty() {
            sections.start(out);
            self.render_statics(id, out)?;
        }
        Ok(())
    }

    fn render_method(&mut self, id: ModuleId, idx: usize, out: &mut Emitter) -> Result<(), TranslateError> {
        let owner = format!("{}#{}", self.graph[id].name, self.graph[id].methods[idx].name);
        let body = match &mut self.graph[id].methods[idx].body {
            MethodBody::Pending(pending) => Some(take_body(pending.take(), owner, self.options)?),
            _ => None,
        };

        let options = self.options;
        let method = &self.graph[id].methods[idx];
        write_comments(out, &method.comments, options);
        let receiver = if method.is_static { "self." } else { "" };
        out.line(format!("def {receiver}{}{}", method.name, param_list(&method.params)));
        out.indented(|out| match (&method.body, body) {
            (_, Some(stmts)) if method.is_synchronized => {
                out.line("synchronized(self) do");
                out.indented(|out| render_stmts(out, &stmts, options));
                out.line("end");
            }
            (_, Some(stmts)) => render_stmts(out, &stmts, options),
            (MethodBody::Abstract, None) => out.line("raise NotImplementedError"),
            (MethodBody::Native, None) => out.line(format!(
                "raise NotImplementedError, \"native method {}\"",
                method.name
            )),
            (MethodBody::Synthesized(lines), None) => {
                for line in lines {
                    out.line(line);
                }
            }
            (MethodBody::Pending(_), None) => {}
        });
        out.line("end");
        Ok(())
    }

    /// Ruby has a single `initialize`; several constructors are dispatched on the
    /// number of arguments.
    fn render_constructors(&mut self, id: ModuleId, out: &mut Emitter) -> Result<(), TranslateError> {
        let owner = format!("{}#initialize", self.graph[id].name);
        let options = self.options;
        let mut bodies = Vec::new();
        for ctor in &mut self.graph[id].constructors {
            bodies.push(take_body(ctor.body.take(), owner.clone(), options)?);
        }

        let module = &self.graph[id];
        // Bodies are rendered out of line; their placement depends on the overload set.
        let rendered: Vec<String> = module
            .constructors
            .iter()
            .zip(&bodies)
            .map(|(ctor, body)| {
                out.buffered(|buf| render_constructor_body(buf, module, ctor, body, options))
                    .0
            })
            .collect();

        if let ([ctor], [body]) = (module.constructors.as_slice(), rendered.as_slice()) {
            write_comments(out, &ctor.comments, options);
            out.line(format!("def initialize{}", param_list(&ctor.params)));
            out.indented(|out| out.splice(body));
            out.line("end");
            return Ok(());
        }
        render_overloads(out, module, &rendered, options)
    }

    fn render_statics(&mut self, id: ModuleId, out: &mut Emitter) -> Result<(), TranslateError> {
        let options = self.options;
        let order = self.graph[id].static_order.clone();
        for member in order {
            match member {
                StaticMember::Field(idx) => {
                    let Some(field) = self.graph[id].static_fields.get(idx) else {
                        continue;
                    };
                    write_comments(out, &field.comments, options);
                    let value = field
                        .initializer
                        .as_ref()
                        .map_or(field.ty.default_value(), Expression::as_str);
                    out.line(format!("{} = {value}", field.cvar()));
                }
                StaticMember::Constant(idx) => {
                    let Some(constant) = self.graph[id].constants.get(idx) else {
                        continue;
                    };
                    write_comments(out, &constant.comments, options);
                    out.line(format!("{} = {}", constant.ruby_name(), constant.value));
                }
                StaticMember::Block(idx) => {
                    let owner = format!("{}#static", self.graph[id].name);
                    let Some(block) = self.graph[id].static_blocks.get_mut(idx) else {
                        continue;
                    };
                    let body = take_body(block.body.take(), owner, options)?;
                    write_comments(out, &block.comments, options);
                    render_stmts(out, &body, options);
                }
            }
        }
        Ok(())
    }
}

/// Blank lines between the sections of a module body, never right after its header.
#[derive(Default)]
struct Sections {
    started: bool,
}

impl Sections {
    fn start(&mut self, out: &mut Emitter) {
        if self.started {
            out.blank_line();
        }
        self.started = true;
    }
}

fn take_body(
    stmts: Option<Vec<Stmt>>,
    owner: String,
    options: RenderOptions,
) -> Result<Vec<Stmt>, TranslateError> {
    let stmts = stmts.ok_or(TranslateError::BodyAlreadyRendered { owner })?;
    Ok(normalize_body(stmts, options.flow)?)
}

/// Several constructors share one `initialize(*args)`; each rendered body goes under
/// the arm for its arity, the variadic one under `else`.
fn render_overloads(
    out: &mut Emitter,
    module: &JavaModule,
    bodies: &[String],
    options: RenderOptions,
) -> Result<(), TranslateError> {
    let mut fixed: Vec<(&Constructor, &str)> = Vec::new();
    let mut variadic: Option<(&Constructor, &str)> = None;
    for (ctor, body) in module.constructors.iter().zip(bodies) {
        let body = body.as_str();
        if ctor.params.last().is_some_and(|param| param.variadic) {
            if variadic.replace((ctor, body)).is_some() {
                return Err(TranslateError::unsupported(format!(
                    "more than one variadic constructor in {}",
                    module.name
                )));
            }
        } else if fixed.iter().any(|(other, _)| other.params.len() == ctor.params.len()) {
            return Err(TranslateError::unsupported(format!(
                "constructors of {} overloaded on parameter types",
                module.name
            )));
        } else {
            fixed.push((ctor, body));
        }
    }

    for ctor in &module.constructors {
        write_comments(out, &ctor.comments, options);
    }
    out.line("def initialize(*args)");
    out.indented(|out| {
        out.line("case args.size");
        for (ctor, body) in &fixed {
            out.line(format!("when {}", ctor.params.len()));
            out.indented(|out| {
                bind_arguments(out, &ctor.params);
                out.splice(body);
            });
        }
        out.line("else");
        out.indented(|out| match variadic {
            Some((ctor, body)) => {
                bind_arguments(out, &ctor.params);
                out.splice(body);
            }
            None => out.line("raise ArgumentError, \"wrong number of arguments (given #{args.size})\""),
        });
        out.line("end");
    });
    out.line("end");
    Ok(())
}

fn bind_arguments(out: &mut Emitter, params: &[Param]) {
    match params {
        [] => {}
        [param] if param.variadic => out.line(format!("{} = args", param.name)),
        [param] => out.line(format!("{} = args[0]", param.name)),
        params => {
            let names: Vec<String> = params.iter().map(param_name).collect();
            out.line(format!("{} = args", names.join(", ")));
        }
    }
}

fn render_constructor_body(
    out: &mut Emitter,
    module: &JavaModule,
    ctor: &Constructor,
    body: &[Stmt],
    options: RenderOptions,
) {
    for step in initialization_plan(module, &ctor.invocation) {
        out.line(match step {
            InitStep::Default(field) => format!("{} = {}", field.ivar(), field.ty.default_value()),
            InitStep::Initialize(field) => format!(
                "{} = {}",
                field.ivar(),
                field
                    .initializer
                    .as_ref()
                    .map_or(field.ty.default_value(), Expression::as_str)
            ),
            InitStep::Super(arguments) => format!("super{arguments}"),
            InitStep::Delegate(arguments) => format!("initialize{arguments}"),
        });
    }
    render_stmts(out, body, options);
}

fn param_name(param: &Param) -> String {
    if param.variadic {
        format!("*{}", param.name)
    } else {
        param.name.clone()
    }
}

fn param_list(params: &[Param]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<String> = params.iter().map(param_name).collect();
    format!("({})", names.join(", "))
}

/// `// text` becomes `# text`.
fn ruby_comment(text: &str) -> String {
    match text.strip_prefix("//") {
        Some(rest) => format!("#{rest}"),
        None => format!("# {text}"),
    }
}

fn write_comments(out: &mut Emitter, comments: &[String], options: RenderOptions) {
    if !options.emit_comments {
        return;
    }
    for comment in comments {
        out.line(ruby_comment(comment));
    }
}

pub(crate) fn render_stmts(out: &mut Emitter, stmts: &[Stmt], options: RenderOptions) {
    for stmt in stmts {
        render_stmt(out, stmt, options);
    }
}

fn render_stmt(out: &mut Emitter, stmt: &Stmt, options: RenderOptions) {
    match stmt {
        Stmt::Comment(text) => {
            if options.emit_comments {
                out.line(ruby_comment(text));
            }
        }
        Stmt::Other(text) => out.line(text.as_str()),
        Stmt::Block(body) => render_stmts(out, body, options),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => render_if(out, condition, then_branch, else_branch.as_ref(), options),
        Stmt::While { condition, body } => {
            out.line(format!("while {condition}"));
            out.indented(|out| render_stmts(out, body, options));
            out.line("end");
        }
        Stmt::Labeled { label, body } => {
            out.line(format!("catch(:{}) do", break_tag(label)));
            out.indented(|out| render_stmts(out, body, options));
            out.line("end");
        }
        Stmt::Case { value, branches } => render_case(out, value, branches, options),
        Stmt::Break { label: None } => out.line("break"),
        Stmt::Break { label: Some(label) } => out.line(format!("throw :{}", break_tag(label))),
        Stmt::Return(None) => out.line("return"),
        Stmt::Return(Some(value)) => out.line(format!("return {value}")),
        Stmt::Raise(value) => out.line(format!("raise {value}")),
    }
}

/// Labeled statements are left with `throw`, caught by the matching `catch`.
fn break_tag(label: &str) -> String {
    format!("break_{label}")
}

/// `else { if ... }` chains collapse into `elsif`.
fn render_if(
    out: &mut Emitter,
    condition: &Expression,
    then_branch: &[Stmt],
    else_branch: Option<&Vec<Stmt>>,
    options: RenderOptions,
) {
    out.line(format!("if {condition}"));
    out.indented(|out| render_stmts(out, then_branch, options));

    let mut else_branch = else_branch;
    while let Some(branch) = else_branch {
        if let [Stmt::If {
            condition,
            then_branch,
            else_branch: next,
        }] = branch.as_slice()
        {
            out.line(format!("elsif {condition}"));
            out.indented(|out| render_stmts(out, then_branch, options));
            else_branch = next.as_ref();
        } else {
            out.line("else");
            out.indented(|out| render_stmts(out, branch, options));
            break;
        }
    }
    out.line("end");
}

fn render_case(out: &mut Emitter, value: &Expression, branches: &[CaseBranch], options: RenderOptions) {
    out.line(format!("case {value}"));
    for branch in branches {
        let values: Vec<&str> = branch
            .labels
            .iter()
            .filter_map(|label| match label {
                CaseLabel::Value(value) => Some(value.as_str()),
                CaseLabel::Default => None,
            })
            .collect();
        if values.is_empty() {
            out.line("else");
        } else {
            out.line(format!("when {}", values.join(", ")));
        }
        out.indented(|out| render_stmts(out, &branch.body, options));
    }
    out.line("end");
}
