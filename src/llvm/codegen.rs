//! LLVM Code Generation
//!
//! Builds the one module hellolang can produce: a `main` that hands
//! "Hello, World!" to libc's `puts` and returns 0.

use inkwell::builder::Builder;
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::values::FunctionValue;
use inkwell::AddressSpace;

use crate::error::HelloError;

/// Text printed by every compiled program
pub const GREETING: &str = "Hello, World!";

/// Name given to the module by the driver
pub const MODULE_NAME: &str = "HelloLangModule";

pub struct CodeGen<'ctx> {
    context: &'ctx Context,
    module: Module<'ctx>,
    builder: Builder<'ctx>,
}

impl<'ctx> CodeGen<'ctx> {
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        let module = context.create_module(module_name);
        let builder = context.create_builder();

        CodeGen {
            context,
            module,
            builder,
        }
    }

    /// Get the compiled module
    pub fn get_module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// `int puts(const char *)`, reused if something already declared it
    fn declare_puts(&self) -> FunctionValue<'ctx> {
        if let Some(puts) = self.module.get_function("puts") {
            return puts;
        }

        let i8_ptr = self.context.i8_type().ptr_type(AddressSpace::default());
        let puts_type = self.context.i32_type().fn_type(&[i8_ptr.into()], false);
        self.module
            .add_function("puts", puts_type, Some(Linkage::External))
    }

    /// Emit `main` into the module
    pub fn compile(&mut self) -> Result<(), HelloError> {
        let i32_type = self.context.i32_type();

        let main_fn_type = i32_type.fn_type(&[], false);
        let main_fn = self
            .module
            .add_function("main", main_fn_type, Some(Linkage::External));
        let entry = self.context.append_basic_block(main_fn, "entry");
        self.builder.position_at_end(entry);

        let greeting = self
            .builder
            .build_global_string_ptr(GREETING, "")
            .map_err(|e| HelloError::CompileError(format!("failed to build greeting: {}", e)))?;

        let puts = self.declare_puts();
        self.builder
            .build_call(puts, &[greeting.as_pointer_value().into()], "")
            .map_err(|e| HelloError::CompileError(format!("failed to build call to puts: {}", e)))?;

        self.builder
            .build_return(Some(&i32_type.const_int(0, false)))
            .map_err(|e| HelloError::CompileError(format!("failed to build return: {}", e)))?;

        Ok(())
    }
}
