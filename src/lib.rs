//! MiniJava compiler front end (mjc)
//!
//! Turns MiniJava source text into a verified, annotated abstract syntax
//! tree, ready for a later code-generation stage.
//!
//! ## Architecture
//!
//! - **parser**: lexical analysis (logos-backed scanner) and recursive
//!   descent parsing into the AST
//! - **ast**: the tree itself plus a pretty printer
//! - **elab**: semantic elaboration — class-table construction (Enter)
//!   followed by type checking and annotation (Check)
//! - **bin**: command-line interface
//!
//! ## Pipeline
//!
//! ```text
//! source → Lexer → tokens → Parser → AST → Enter → Check → annotated AST
//! ```
//!
//! Lexical and syntax errors are fatal on first occurrence; semantic
//! violations accumulate across the whole checking pass and fail the run
//! with a final count.

pub mod ast;
pub mod config;
pub mod elab;
pub mod error;
pub mod parser;

pub use config::Config;
pub use error::{Error, Result};

/// Run the full front end over source text: parse, then elaborate.
/// Returns the annotated AST.
pub fn check_source(source: &str, config: &Config) -> Result<ast::Program> {
    log::debug!("front end: parsing");
    let mut program = parser::parse(source, config)?;
    if config.dump_ast {
        print!("{}", ast::pretty(&program));
    }

    log::debug!("front end: elaborating");
    elab::elaborate(&mut program, config)?;
    Ok(program)
}

/// Run the full front end over a source file.
pub fn check_file(path: &str, config: &Config) -> Result<ast::Program> {
    let source = std::fs::read_to_string(path)?;
    check_source(&source, config)
}

/// Check several source files in order, stopping at the first failure.
pub fn check_files(paths: &[String], config: &Config) -> Result<()> {
    for path in paths {
        check_file(path, config)?;
    }
    Ok(())
}
