//! Main LLVM compiler interface
//!
//! Provides high-level API for turning an accepted hellolang source into
//! LLVM IR, object files, and native executables.

use std::path::Path;
use std::process::Command;

use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::passes::PassManager;
use inkwell::targets::{
    CodeModel, FileType, InitializationConfig, RelocMode, Target, TargetMachine,
};
use inkwell::values::FunctionValue;
use inkwell::OptimizationLevel;
use log::{debug, info, warn};

use crate::error::HelloError;

use super::codegen::{CodeGen, MODULE_NAME};

/// LLVM Compiler for hellolang
pub struct LLVMCompiler {
    opt_level: OptimizationLevel,
}

impl LLVMCompiler {
    #[inline]
    fn llvm_compile_error<E: std::fmt::Display>(e: E) -> HelloError {
        HelloError::CompileError(e.to_string())
    }

    pub fn new() -> Self {
        LLVMCompiler {
            opt_level: OptimizationLevel::Default,
        }
    }

    /// Set optimization level (0-3)
    pub fn with_optimization(mut self, level: u8) -> Self {
        self.opt_level = match level {
            0 => OptimizationLevel::None,
            1 => OptimizationLevel::Less,
            2 => OptimizationLevel::Default,
            _ => OptimizationLevel::Aggressive,
        };
        self
    }

    /// Run the LLVM verifier over a module
    pub fn verify_module(module: &Module) -> Result<(), HelloError> {
        module
            .verify()
            .map_err(|e| HelloError::VerificationFailed(e.to_string()))
    }

    fn build<'ctx>(&self, context: &'ctx Context) -> Result<CodeGen<'ctx>, HelloError> {
        debug!("generating module {}", MODULE_NAME);
        let mut codegen = CodeGen::new(context, MODULE_NAME);
        codegen.compile()?;

        Self::verify_module(codegen.get_module())?;
        debug!("module {} verified", MODULE_NAME);
        Ok(codegen)
    }

    /// Compile to LLVM IR (text format)
    pub fn compile_to_ir(&self) -> Result<String, HelloError> {
        let context = Context::create();
        let codegen = self.build(&context)?;

        Ok(codegen.get_module().print_to_string().to_string())
    }

    /// Compile to object file
    pub fn compile_to_object(&self, output_path: &Path) -> Result<(), HelloError> {
        let context = Context::create();
        let codegen = self.build(&context)?;
        let module = codegen.get_module();

        // Initialize native target
        Target::initialize_native(&InitializationConfig::default())
            .map_err(Self::llvm_compile_error)?;

        let target_triple = TargetMachine::get_default_triple();
        let target = Target::from_triple(&target_triple).map_err(Self::llvm_compile_error)?;

        let target_machine = target
            .create_target_machine(
                &target_triple,
                "generic",
                "",
                self.opt_level,
                RelocMode::PIC, // Use PIC for PIE executables
                CodeModel::Default,
            )
            .ok_or_else(|| {
                HelloError::CompileError("failed to create target machine".to_string())
            })?;

        module.set_triple(&target_triple);
        module.set_data_layout(&target_machine.get_target_data().get_data_layout());

        self.run_optimization_passes(module)?;

        info!("writing object file {}", output_path.display());
        target_machine
            .write_to_file(module, FileType::Object, output_path)
            .map_err(Self::llvm_compile_error)?;

        Ok(())
    }

    /// Compile to native executable
    ///
    /// The intermediate object lives in a private temporary directory, so
    /// nothing next to `output_path` is written or removed besides the
    /// executable itself.
    pub fn compile_to_native(&self, output_path: &Path) -> Result<(), HelloError> {
        let obj_dir = tempfile::Builder::new()
            .prefix("hellolang-")
            .tempdir()
            .map_err(Self::llvm_compile_error)?;
        let obj_path = obj_dir.path().join("main.o");
        self.compile_to_object(&obj_path)?;

        info!("linking {}", output_path.display());
        let link_status = Command::new("cc")
            .arg(&obj_path)
            .arg("-o")
            .arg(output_path)
            .status()
            .map_err(Self::llvm_compile_error)?;

        if let Err(e) = obj_dir.close() {
            warn!("could not remove temporary object directory: {}", e);
        }

        if link_status.success() {
            Ok(())
        } else {
            Err(HelloError::CompileError(format!(
                "linker failed with exit code: {:?}",
                link_status.code()
            )))
        }
    }

    /// Run LLVM optimization passes
    fn run_optimization_passes(&self, module: &Module) -> Result<(), HelloError> {
        Self::verify_module(module)?;

        let opt_level = self.opt_level;

        // Skip optimization if level is None
        if matches!(opt_level, OptimizationLevel::None) {
            debug!("skipping optimizations");
            return Ok(());
        }

        let fpm: PassManager<FunctionValue> = PassManager::create(module);

        fpm.add_instruction_combining_pass();
        fpm.add_cfg_simplification_pass();
        if !matches!(opt_level, OptimizationLevel::Less) {
            fpm.add_gvn_pass();
            fpm.add_dead_store_elimination_pass();
        }
        if matches!(opt_level, OptimizationLevel::Aggressive) {
            fpm.add_aggressive_dce_pass();
        }

        fpm.initialize();

        for func in module.get_functions() {
            fpm.run_on(&func);
        }

        fpm.finalize();

        Ok(())
    }
}

impl Default for LLVMCompiler {
    fn default() -> Self {
        Self::new()
    }
}
