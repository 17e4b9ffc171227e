use javelin_codegen::{translate, TranslateError};
use javelin_config::TranslateConfig;
use javelin_test_utils::compilation_unit;
use javelin_syntax::ParseNode;

pub fn try_ruby(types: Vec<ParseNode>) -> Result<String, TranslateError> {
    translate(&compilation_unit(None, &[], types), &TranslateConfig::default())
}

pub fn ruby(types: Vec<ParseNode>) -> String {
    try_ruby(types).expect("unit should translate")
}
