#[cfg(feature = "llvm")]
use std::fs;
#[cfg(feature = "llvm")]
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser, Subcommand};
use colored::*;

use hellolang::error::get_error_suggestion;
use hellolang::{check, read_source, HelloError};

/// hellolang - say hello, get Hello, World!
#[derive(Parser)]
#[command(name = "hellolang")]
#[command(version)]
#[command(about = "Compile a hellolang source to LLVM IR", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Compile a source file and print its LLVM IR to stdout
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Show debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit LLVM IR
    Ir {
        /// The source file to compile
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a source file without generating code
    Check {
        /// The source file to check
        file: PathBuf,
    },

    /// Build a native executable using LLVM
    Build {
        /// The source file to compile
        file: PathBuf,

        /// Output file (defaults to <input> without extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optimization level (0-3)
        #[arg(short = 'O', long, default_value = "2", value_parser = clap::value_parser!(u8).range(0..=3))]
        opt_level: u8,

        /// Emit LLVM IR instead of native binary
        #[arg(long, conflicts_with = "emit_obj")]
        emit_llvm: bool,

        /// Emit an object file instead of native binary
        #[arg(long)]
        emit_obj: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Ir { file, output }) => emit_ir(&file, output.as_deref()),
        Some(Commands::Check { file }) => check_file(&file),
        Some(Commands::Build {
            file,
            output,
            opt_level,
            emit_llvm,
            emit_obj,
        }) => build_native(&file, output, opt_level, emit_llvm, emit_obj),
        None => match cli.file {
            Some(file) => emit_ir(&file, None),
            None => print_usage().and(Err("no source file given".to_string())),
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn print_usage() -> Result<(), String> {
    Cli::command().print_help().map_err(|e| {
        format_error(&HelloError::WriteError {
            path: "<stdout>".to_string(),
            reason: e.to_string(),
        })
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn check_file(path: &Path) -> Result<(), String> {
    let source = read_source(path).map_err(|e| format_error(&e))?;
    check(&source).map_err(|e| format_error(&e))?;

    println!("{} {} says hello", "✓".green(), path.display());
    Ok(())
}

#[cfg(not(feature = "llvm"))]
fn emit_ir(path: &Path, _output: Option<&Path>) -> Result<(), String> {
    let source = read_source(path).map_err(|e| format_error(&e))?;
    check(&source).map_err(|e| format_error(&e))?;
    llvm_unavailable()
}

#[cfg(feature = "llvm")]
fn emit_ir(path: &Path, output: Option<&Path>) -> Result<(), String> {
    let source = read_source(path).map_err(|e| format_error(&e))?;
    let ir = hellolang::compile_to_llvm_ir(&source).map_err(|e| format_error(&e))?;

    match output {
        Some(output_path) => write_output(output_path, &ir),
        None => io::stdout()
            .write_all(ir.as_bytes())
            .and_then(|_| io::stdout().flush())
            .map_err(|e| {
                format_error(&HelloError::WriteError {
                    path: "<stdout>".to_string(),
                    reason: e.to_string(),
                })
            }),
    }
}

#[cfg(not(feature = "llvm"))]
fn build_native(
    path: &Path,
    _output: Option<PathBuf>,
    _opt_level: u8,
    _emit_llvm: bool,
    _emit_obj: bool,
) -> Result<(), String> {
    let source = read_source(path).map_err(|e| format_error(&e))?;
    check(&source).map_err(|e| format_error(&e))?;
    llvm_unavailable()
}

#[cfg(not(feature = "llvm"))]
fn llvm_unavailable() -> Result<(), String> {
    eprintln!("{}", "LLVM code generation is not available".yellow().bold());
    eprintln!();
    eprintln!("This build of hellolang was compiled without the 'llvm' feature.");
    eprintln!("The source was checked and is valid, but no code can be generated.");
    eprintln!();
    eprintln!("{}", "To enable code generation:".cyan().bold());
    eprintln!(
        "  1. Install LLVM: {}",
        "sudo apt install llvm-15 libpolly-15-dev libzstd-dev".green()
    );
    eprintln!(
        "  2. Rebuild:      {}",
        "cargo build --release --features llvm".green()
    );
    eprintln!();
    Err("LLVM support not available".to_string())
}

#[cfg(feature = "llvm")]
fn build_native(
    path: &Path,
    output: Option<PathBuf>,
    opt_level: u8,
    emit_llvm: bool,
    emit_obj: bool,
) -> Result<(), String> {
    let source = read_source(path).map_err(|e| format_error(&e))?;
    check(&source).map_err(|e| format_error(&e))?;

    let compiler = hellolang::LLVMCompiler::new().with_optimization(opt_level);
    let extension = if emit_llvm {
        "ll"
    } else if emit_obj {
        "o"
    } else {
        ""
    };
    let output_path = output.unwrap_or_else(|| default_output(path, extension));

    if emit_llvm {
        let ir = compiler.compile_to_ir().map_err(|e| format_error(&e))?;
        write_output(&output_path, &ir)?;
        println!(
            "{} Compiled {} to LLVM IR",
            "Done!".green().bold(),
            path.display()
        );
    } else if emit_obj {
        compiler
            .compile_to_object(&output_path)
            .map_err(|e| format_error(&e))?;
        println!(
            "{} Compiled {} to an object file",
            "Done!".green().bold(),
            path.display()
        );
    } else {
        compiler
            .compile_to_native(&output_path)
            .map_err(|e| format_error(&e))?;
        println!(
            "{} Built native executable from {}",
            "Done!".green().bold(),
            path.display()
        );
    }
    println!("  {} {}", "Output:".dimmed(), output_path.display());

    Ok(())
}

/// `<input>.<extension>`, never the input itself
#[cfg(feature = "llvm")]
fn default_output(path: &Path, extension: &str) -> PathBuf {
    let mut p = path.to_path_buf();
    p.set_extension(extension);
    if p == path {
        p.set_extension("out");
    }
    p
}

#[cfg(feature = "llvm")]
fn write_output(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|e| {
        format_error(&HelloError::WriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })
}

fn format_error(error: &HelloError) -> String {
    let mut msg = format!("{}", error);

    // Add helpful suggestion if available
    if let Some(suggestion) = get_error_suggestion(error) {
        msg.push('\n');
        msg.push_str(&format!("{}: {}", "help".cyan().bold(), suggestion));
    }

    msg
}
