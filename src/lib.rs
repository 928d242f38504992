//! hellolang - a language with exactly one program
//!
//! A source file is accepted when, ignoring whitespace, it reads `hello`.
//! Accepted sources compile to a fixed LLVM module that prints
//! "Hello, World!" and exits with status 0.

use std::fs;
use std::path::Path;

use log::debug;

pub mod error;
pub mod parser;

// LLVM backend (optional, requires llvm feature)
#[cfg(feature = "llvm")]
pub mod llvm;

// Re-export commonly used types
pub use error::{HelloError, HelloResult};
pub use parser::{check, KEYWORD};

// LLVM compiler re-export
#[cfg(feature = "llvm")]
pub use llvm::LLVMCompiler;

/// Read a source file as raw bytes
///
/// Sources are not required to be UTF-8; anything that is not whitespace
/// takes part in the comparison byte for byte.
pub fn read_source(path: &Path) -> HelloResult<Vec<u8>> {
    debug!("reading {}", path.display());
    fs::read(path).map_err(|e| HelloError::FileError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Check hellolang source and compile it to LLVM IR
#[cfg(feature = "llvm")]
pub fn compile_to_llvm_ir(source: &[u8]) -> HelloResult<String> {
    check(source)?;
    let compiler = llvm::LLVMCompiler::new();
    compiler.compile_to_ir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_source_returns_raw_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prog.hello");
        fs::write(&path, b"hel\xfflo\n").unwrap();

        assert_eq!(read_source(&path).unwrap(), b"hel\xfflo\n".to_vec());
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.hello");

        let err = read_source(&path).unwrap_err();
        match err {
            HelloError::FileError { path: p, reason } => {
                assert!(p.ends_with("nope.hello"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected FileError, got {:?}", other),
        }
    }

    #[test]
    fn test_read_source_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_source(dir.path()),
            Err(HelloError::FileError { .. })
        ));
    }

    #[cfg(feature = "llvm")]
    #[test]
    fn test_compile_to_llvm_ir_smoke() {
        let ir = compile_to_llvm_ir(b"  hello\n").unwrap();
        assert!(ir.contains("define i32 @main()"));
        assert!(ir.contains("Hello, World!"));
    }

    #[cfg(feature = "llvm")]
    #[test]
    fn test_compile_to_llvm_ir_rejects_before_codegen() {
        let err = compile_to_llvm_ir(b"goodbye").unwrap_err();
        assert!(matches!(err, HelloError::SyntaxError { .. }));
    }
}
