use thiserror::Error;

use crate::parser::KEYWORD;

/// Everything that can stop a source file from becoming a module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelloError {
    #[error("cannot open source file '{path}': {reason}")]
    FileError { path: String, reason: String },

    #[error("syntax error: expected '{expected}', found '{found}'")]
    SyntaxError { expected: String, found: String },

    #[error("module verification failed: {0}")]
    VerificationFailed(String),

    #[error("compilation failed: {0}")]
    CompileError(String),

    #[error("cannot write '{path}': {reason}")]
    WriteError { path: String, reason: String },
}

impl HelloError {
    pub(crate) fn syntax(found: impl Into<String>) -> Self {
        HelloError::SyntaxError {
            expected: KEYWORD.to_string(),
            found: found.into(),
        }
    }
}

pub type HelloResult<T> = Result<T, HelloError>;

/// Found-token text used when the stripped source is empty
pub const END_OF_FILE: &str = "end of file";

/// Get a helpful suggestion for common errors
pub fn get_error_suggestion(error: &HelloError) -> Option<&'static str> {
    match error {
        HelloError::SyntaxError { found, .. } => {
            if found == END_OF_FILE {
                Some("the source file is empty; write 'hello' in it")
            } else if found.eq_ignore_ascii_case(KEYWORD) {
                Some("keywords are case-sensitive; write 'hello' in lower case")
            } else if found.starts_with(KEYWORD) {
                Some("a program is exactly one 'hello'; remove everything after it")
            } else if found.contains(KEYWORD) {
                Some("a program is exactly one 'hello'; remove everything around it")
            } else {
                None
            }
        }
        HelloError::FileError { .. } => Some("check that the path exists and is readable"),
        HelloError::VerificationFailed(_) => {
            Some("this is a compiler bug; the generated module should always verify")
        }
        _ => None,
    }
}
