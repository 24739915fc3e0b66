use std::collections::HashMap;
use std::fmt;

use crate::ast::{Dec, Type};
use crate::error::{Error, Result};

/// A method's call signature: declared return type plus the ordered
/// formal parameter types.
#[derive(Debug, Clone)]
pub struct MethodType {
    pub ret_type: Type,
    pub formals: Vec<Type>,
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, formal) in self.formals.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", formal)?;
        }
        write!(f, ") -> {}", self.ret_type)
    }
}

/// Symbol information for one class: its parent (if any), field types,
/// and method signatures. Built once during pass 1, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClassBinding {
    pub extends: Option<String>,
    pub fields: HashMap<String, Type>,
    pub methods: HashMap<String, MethodType>,
}

impl ClassBinding {
    pub fn new(extends: Option<String>) -> Self {
        Self {
            extends,
            ..Self::default()
        }
    }
}

/// Global class table: class name -> binding.
///
/// Field and method lookup consult the class's own binding first and then
/// walk the `extends` chain; a parent name absent from the table ends the
/// walk. The chain is acyclic by the time lookups run — hierarchy
/// validation rejects cycles before pass 2 starts.
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassBinding>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class binding; duplicate class names are fatal.
    pub fn put(&mut self, name: &str, binding: ClassBinding) -> Result<()> {
        if self.classes.contains_key(name) {
            return Err(Error::semantic_error(format!(
                "duplicate class name '{}'",
                name
            )));
        }
        self.classes.insert(name.to_string(), binding);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ClassBinding> {
        self.classes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ClassBinding)> {
        self.classes.iter()
    }

    /// Chain-aware field lookup: own fields first, then the parent chain.
    pub fn field_of(&self, class: &str, name: &str) -> Option<&Type> {
        let mut current = class;
        loop {
            let binding = self.classes.get(current)?;
            if let Some(typ) = binding.fields.get(name) {
                return Some(typ);
            }
            current = binding.extends.as_deref()?;
        }
    }

    /// Chain-aware method lookup: own methods first, then the parent chain.
    pub fn method_of(&self, class: &str, name: &str) -> Option<&MethodType> {
        let mut current = class;
        loop {
            let binding = self.classes.get(current)?;
            if let Some(sig) = binding.methods.get(name) {
                return Some(sig);
            }
            current = binding.extends.as_deref()?;
        }
    }

    /// Dump the whole table, sorted for stable output.
    pub fn dump(&self) {
        println!("class table:");
        let mut names: Vec<&String> = self.classes.keys().collect();
        names.sort();
        for name in names {
            let binding = &self.classes[name];
            match &binding.extends {
                Some(parent) => println!("  class {} extends {}", name, parent),
                None => println!("  class {}", name),
            }
            let mut fields: Vec<(&String, &Type)> = binding.fields.iter().collect();
            fields.sort_by_key(|(n, _)| n.as_str());
            for (field, typ) in fields {
                println!("    field {} {}", typ, field);
            }
            let mut methods: Vec<(&String, &MethodType)> = binding.methods.iter().collect();
            methods.sort_by_key(|(n, _)| n.as_str());
            for (method, sig) in methods {
                println!("    method {} {}", method, sig);
            }
        }
    }
}

/// Scope table for one method body: formal/local name -> declared type.
/// Rebuilt fresh for every method entered during pass 2.
#[derive(Debug, Default)]
pub struct MethodTable {
    table: HashMap<String, Type>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the formals, then the locals. Any duplicate name within
    /// the method is a fatal registration error.
    pub fn build(&mut self, formals: &[Dec], locals: &[Dec]) -> Result<()> {
        self.table.clear();
        for dec in formals {
            if self
                .table
                .insert(dec.name.clone(), dec.typ.clone())
                .is_some()
            {
                return Err(Error::semantic_error(format!(
                    "duplicated parameter: {}",
                    dec.name
                )));
            }
        }
        for dec in locals {
            if self
                .table
                .insert(dec.name.clone(), dec.typ.clone())
                .is_some()
            {
                return Err(Error::semantic_error(format!(
                    "duplicated variable: {}",
                    dec.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.table.get(name)
    }

    /// Dump the table for one method, sorted for stable output.
    pub fn dump(&self, method: &str) {
        println!("method table for '{}':", method);
        let mut entries: Vec<(&String, &Type)> = self.table.iter().collect();
        entries.sort_by_key(|(n, _)| n.as_str());
        for (name, typ) in entries {
            println!("  {} {}", typ, name);
        }
    }
}
