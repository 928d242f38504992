//! Acceptance check for hellolang sources
//!
//! A program is the single word `hello`. Whitespace is insignificant
//! everywhere, including inside the word, so the check strips it and
//! compares what remains.

use log::debug;

use crate::error::{HelloError, HelloResult, END_OF_FILE};

/// The only token the language has
pub const KEYWORD: &str = "hello";

/// Longest slice of a rejected token quoted back in diagnostics
const MAX_FOUND_CHARS: usize = 32;

/// Whitespace as C's `isspace` sees it in the "C" locale.
/// `u8::is_ascii_whitespace` misses vertical tab, so the set is spelled out.
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Remove every whitespace byte, keeping everything else in order
pub fn strip_whitespace(source: &[u8]) -> Vec<u8> {
    source.iter().copied().filter(|b| !is_space(*b)).collect()
}

/// Accept the source iff it is `hello` once whitespace is gone
pub fn check(source: &[u8]) -> HelloResult<()> {
    let token = strip_whitespace(source);
    debug!(
        "stripped {} whitespace bytes, {} bytes remain",
        source.len() - token.len(),
        token.len()
    );

    if token == KEYWORD.as_bytes() {
        Ok(())
    } else {
        Err(HelloError::syntax(describe_found(&token)))
    }
}

fn describe_found(token: &[u8]) -> String {
    if token.is_empty() {
        return END_OF_FILE.to_string();
    }

    let text = String::from_utf8_lossy(token);
    if text.chars().count() > MAX_FOUND_CHARS {
        let head: String = text.chars().take(MAX_FOUND_CHARS).collect();
        format!("{}...", head)
    } else {
        text.into_owned()
    }
}
