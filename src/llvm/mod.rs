//! LLVM Backend for hellolang
//!
//! Emits the fixed Hello, World! module through inkwell, a safe Rust
//! wrapper around the LLVM C API.

pub mod codegen;
pub mod compiler;

// Re-export main types
pub use codegen::{CodeGen, GREETING, MODULE_NAME};
pub use compiler::LLVMCompiler;
