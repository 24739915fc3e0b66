//! Semantic elaboration: the two analysis passes that run between
//! parsing and any later back end.
//!
//! - `enter`: class-table construction and hierarchy validation
//! - `check`: type checking, violation accumulation, AST annotation
//!
//! Pass 1 fully completes before pass 2 starts, so bodies may reference
//! classes and methods declared later in the source. Elaboration is meant
//! to run exactly once per tree: the annotation slots it writes are
//! write-once.

pub mod check;
pub mod enter;
pub mod symbols;

pub use check::Check;
pub use enter::Enter;
pub use symbols::{ClassBinding, ClassTable, MethodTable, MethodType};

use crate::ast::Program;
use crate::config::Config;
use crate::error::Result;

/// Two-pass elaborator: Enter then Check.
pub struct Elaborator {
    pub enter: Enter,
    config: Config,
}

impl Elaborator {
    pub fn new(config: &Config) -> Self {
        Self {
            enter: Enter::new(),
            config: config.clone(),
        }
    }

    /// Run both passes over a parsed program, annotating it in place.
    pub fn elaborate(&mut self, program: &mut Program) -> Result<()> {
        self.enter.process(program)?;
        if self.config.dump_class_table {
            self.enter.class_table.dump();
        }

        let mut check = Check::new(&self.enter.class_table, &self.config);
        check.process(program)?;

        println!("type checking successful");
        Ok(())
    }

    /// The class table built by pass 1.
    pub fn class_table(&self) -> &ClassTable {
        &self.enter.class_table
    }
}

/// Elaborate a program with a fresh elaborator.
pub fn elaborate(program: &mut Program, config: &Config) -> Result<()> {
    Elaborator::new(config).elaborate(program)
}
