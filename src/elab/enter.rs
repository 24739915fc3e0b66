//! Pass 1: class-table construction.
//!
//! Builds one binding per class before any type checking runs, so method
//! bodies may freely reference classes and methods declared later in the
//! source. The main class is entered first, parentless and memberless.
//! Once every class is entered, the hierarchy is validated: duplicate
//! class names, cyclic `extends` chains, and subclass fields shadowing an
//! ancestor's field are all fatal before pass 2 starts.

use std::collections::HashSet;

use super::symbols::{ClassBinding, ClassTable, MethodType};
use crate::ast::Program;
use crate::error::{Error, Result};

pub struct Enter {
    pub class_table: ClassTable,
}

impl Enter {
    pub fn new() -> Self {
        Self {
            class_table: ClassTable::new(),
        }
    }

    /// Build and validate the class table for a whole program.
    pub fn process(&mut self, program: &Program) -> Result<()> {
        log::debug!(
            "enter: building class table for {} classes",
            program.classes.len() + 1
        );

        self.class_table
            .put(&program.main_class.name, ClassBinding::new(None))?;

        for class in &program.classes {
            let mut binding = ClassBinding::new(class.extends.clone());
            for field in &class.fields {
                binding
                    .fields
                    .insert(field.name.clone(), field.typ.clone());
            }
            for method in &class.methods {
                let formals = method.formals.iter().map(|d| d.typ.clone()).collect();
                binding.methods.insert(
                    method.name.clone(),
                    MethodType {
                        ret_type: method.ret_type.clone(),
                        formals,
                    },
                );
            }
            self.class_table.put(&class.name, binding)?;
        }

        self.validate()?;
        log::debug!("enter: class table complete");
        Ok(())
    }

    /// Hierarchy validation: every `extends` chain must be acyclic, and no
    /// class may redeclare a field an ancestor already declares. A parent
    /// name absent from the table ends the chain walk.
    fn validate(&self) -> Result<()> {
        for (name, _) in self.class_table.iter() {
            let mut seen = HashSet::new();
            let mut current = name.as_str();
            while let Some(binding) = self.class_table.get(current) {
                if !seen.insert(current.to_string()) {
                    return Err(Error::semantic_error(format!(
                        "cyclic inheritance chain involving class '{}'",
                        name
                    )));
                }
                match binding.extends.as_deref() {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
        }

        for (name, binding) in self.class_table.iter() {
            for field in binding.fields.keys() {
                let mut current = binding.extends.as_deref();
                while let Some(parent) = current {
                    match self.class_table.get(parent) {
                        Some(parent_binding) => {
                            if parent_binding.fields.contains_key(field) {
                                return Err(Error::semantic_error(format!(
                                    "field '{}' in class '{}' shadows a field of class '{}'",
                                    field, name, parent
                                )));
                            }
                            current = parent_binding.extends.as_deref();
                        }
                        None => break,
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for Enter {
    fn default() -> Self {
        Self::new()
    }
}
