//! Pass 2: type checking and AST annotation.
//!
//! One traversal over the program, computing every expression's type
//! bottom-up under the class table built by pass 1 and a per-method scope
//! table. Violations accumulate — each one is echoed with the violated
//! rule and the class being elaborated, and checking continues with the
//! fallback type `int` so later rules still run. A nonzero total fails
//! the pass at the end. The only immediate aborts are the fatal
//! registration errors raised while building a method table.
//!
//! Type equality throughout is printed-form equality: class types are
//! equal only when their names are; inheritance never makes two types
//! assignable.

use super::symbols::{ClassTable, MethodTable};
use crate::ast::{Class, Exp, MainClass, Method, Program, Stm, Type};
use crate::config::Config;
use crate::error::{Error, Result};

pub struct Check<'a> {
    class_table: &'a ClassTable,
    method_table: MethodTable,
    current_class: String,
    errors: usize,
    config: &'a Config,
}

impl<'a> Check<'a> {
    pub fn new(class_table: &'a ClassTable, config: &'a Config) -> Self {
        Self {
            class_table,
            method_table: MethodTable::new(),
            current_class: String::new(),
            errors: 0,
            config,
        }
    }

    /// Check the whole program; fails with the accumulated violation
    /// count if any rule was broken.
    pub fn process(&mut self, program: &mut Program) -> Result<()> {
        log::debug!("check: starting type checking");

        self.check_main_class(&mut program.main_class);
        for class in &mut program.classes {
            self.check_class(class)?;
        }

        if self.errors > 0 {
            return Err(Error::Check { count: self.errors });
        }
        log::debug!("check: type checking complete");
        Ok(())
    }

    /// Record one violation and keep going.
    fn error(&mut self, msg: impl AsRef<str>) {
        self.errors += 1;
        eprintln!(
            "error: {} (current class: {})",
            msg.as_ref(),
            self.current_class
        );
    }

    fn check_main_class(&mut self, main: &mut MainClass) {
        self.current_class = main.name.clone();
        // main's String[] argument is unusable in the language, so the
        // scope table stays empty
        self.method_table = MethodTable::new();
        self.check_stm(&mut main.stm);
    }

    fn check_class(&mut self, class: &mut Class) -> Result<()> {
        self.current_class = class.name.clone();
        for field in &class.fields {
            self.check_type_ref(&field.typ);
        }
        for method in &mut class.methods {
            self.check_method(method)?;
        }
        Ok(())
    }

    fn check_method(&mut self, method: &mut Method) -> Result<()> {
        self.method_table = MethodTable::new();
        self.method_table.build(&method.formals, &method.locals)?;
        if self.config.dump_method_table {
            self.method_table.dump(&method.name);
        }

        self.check_type_ref(&method.ret_type);
        for dec in &method.formals {
            self.check_type_ref(&dec.typ);
        }
        for dec in &method.locals {
            self.check_type_ref(&dec.typ);
        }

        for stm in &mut method.stms {
            self.check_stm(stm);
        }

        let ret = self.check_exp(&mut method.ret_exp);
        if ret != method.ret_type {
            self.error(format!(
                "method '{}': return expression has type {}, declared return type is {}",
                method.name, ret, method.ret_type
            ));
        }
        Ok(())
    }

    /// A class type appearing in a declaration must name a declared class.
    fn check_type_ref(&mut self, typ: &Type) {
        if let Type::ClassType { name } = typ {
            if self.class_table.get(name).is_none() {
                self.error(format!("unknown class type '{}'", name));
            }
        }
    }

    /// Resolve a name against the method scope first, then the field
    /// chain of the current class. The flag says whether the name
    /// resolved to a field.
    fn resolve_id(&self, name: &str) -> Option<(Type, bool)> {
        if let Some(typ) = self.method_table.get(name) {
            return Some((typ.clone(), false));
        }
        if let Some(typ) = self.class_table.field_of(&self.current_class, name) {
            return Some((typ.clone(), true));
        }
        None
    }

    fn check_stm(&mut self, stm: &mut Stm) {
        match stm {
            Stm::Assign { name, exp, typ, .. } => match self.resolve_id(name) {
                Some((target, _)) => {
                    let value = self.check_exp(exp);
                    if value != target {
                        self.error(format!(
                            "Assign: cannot assign {} to '{}' of type {}",
                            value, name, target
                        ));
                    }
                    *typ = Some(target);
                }
                None => {
                    self.error(format!("Assign: cannot find left id '{}'", name));
                    self.check_exp(exp);
                }
            },
            Stm::AssignArray {
                name, index, exp, ..
            } => {
                // The target's own declared type is not checked to be
                // int[] at this site.
                if self.resolve_id(name).is_none() {
                    self.error(format!("AssignArray: cannot find left id '{}'", name));
                }
                let index_t = self.check_exp(index);
                if index_t != Type::Int {
                    self.error("AssignArray: index must be int");
                }
                let value = self.check_exp(exp);
                if value != Type::Int {
                    self.error("AssignArray: assigned value must be int");
                }
            }
            Stm::Block { stms, .. } => {
                for stm in stms {
                    self.check_stm(stm);
                }
            }
            Stm::If {
                condition,
                then_stm,
                else_stm,
                ..
            } => {
                let cond = self.check_exp(condition);
                if cond != Type::Boolean {
                    self.error("If: condition must be boolean");
                }
                self.check_stm(then_stm);
                self.check_stm(else_stm);
            }
            Stm::While {
                condition, body, ..
            } => {
                let cond = self.check_exp(condition);
                if cond != Type::Boolean {
                    self.error("While: condition must be boolean");
                }
                self.check_stm(body);
            }
            Stm::Print { exp, .. } => {
                let value = self.check_exp(exp);
                if value != Type::Int {
                    self.error("Print: only int can be printed");
                }
            }
        }
    }

    fn check_exp(&mut self, exp: &mut Exp) -> Type {
        match exp {
            Exp::Add { left, right, .. } => {
                let l = self.check_exp(left);
                let r = self.check_exp(right);
                if l != Type::Int || r != Type::Int {
                    self.error("Add: both operands must be int");
                }
                Type::Int
            }
            Exp::Sub { left, right, .. } => {
                let l = self.check_exp(left);
                let r = self.check_exp(right);
                if l != Type::Int || r != Type::Int {
                    self.error("Sub: both operands must be int");
                }
                Type::Int
            }
            Exp::Times { left, right, .. } => {
                let l = self.check_exp(left);
                let r = self.check_exp(right);
                if l != Type::Int || r != Type::Int {
                    self.error("Times: both operands must be int");
                }
                Type::Int
            }
            Exp::And { left, right, .. } => {
                let l = self.check_exp(left);
                let r = self.check_exp(right);
                if l != Type::Boolean || r != Type::Boolean {
                    self.error("And: both operands must be boolean");
                }
                Type::Boolean
            }
            // < accepts any operand type as long as both sides match
            Exp::Lt { left, right, .. } => {
                let l = self.check_exp(left);
                let r = self.check_exp(right);
                if l != r {
                    self.error("Lt: operand types must match");
                }
                Type::Boolean
            }
            Exp::Not { exp, .. } => {
                let t = self.check_exp(exp);
                if t != Type::Boolean {
                    self.error("Not: operand must be boolean");
                }
                Type::Boolean
            }
            Exp::ArraySelect { array, index, .. } => {
                self.check_exp(array);
                let index_t = self.check_exp(index);
                if index_t != Type::Int {
                    self.error("ArraySelect: index must be int");
                }
                Type::Int
            }
            Exp::Length { array, .. } => {
                let t = self.check_exp(array);
                if t != Type::IntArray {
                    self.error("Length: receiver must be int[]");
                }
                Type::Int
            }
            Exp::NewIntArray { size, .. } => {
                let t = self.check_exp(size);
                if t != Type::Int {
                    self.error("NewIntArray: size must be int");
                }
                Type::IntArray
            }
            // existence of the class is validated where the type is
            // declared, not at the allocation site
            Exp::NewObject { class, .. } => Type::class(class.clone()),
            Exp::Id {
                name,
                typ,
                is_field,
                ..
            } => match self.resolve_id(name) {
                Some((t, field)) => {
                    *typ = Some(t.clone());
                    *is_field = field;
                    t
                }
                None => {
                    self.error(format!("Id not found, must be declared first: '{}'", name));
                    Type::Int
                }
            },
            Exp::Call {
                receiver,
                name,
                args,
                receiver_class,
                arg_types,
                ret_type,
                ..
            } => {
                let recv = self.check_exp(receiver);
                let class = match recv {
                    Type::ClassType { name: class } => {
                        *receiver_class = Some(class.clone());
                        Some(class)
                    }
                    _ => {
                        self.error("Call: receiver must have class type");
                        None
                    }
                };

                let mut actuals = Vec::with_capacity(args.len());
                for arg in args.iter_mut() {
                    actuals.push(self.check_exp(arg));
                }

                let mut result = Type::Int;
                if let Some(class) = class {
                    match self.class_table.method_of(&class, name).cloned() {
                        Some(sig) => {
                            if sig.formals.len() != actuals.len() {
                                self.error(format!(
                                    "Call: wrong number of parameters for method '{}'",
                                    name
                                ));
                            } else {
                                for (expected, actual) in sig.formals.iter().zip(&actuals) {
                                    if expected != actual {
                                        self.error(format!(
                                            "Call: parameter type mismatch for method '{}'",
                                            name
                                        ));
                                    }
                                }
                            }
                            result = sig.ret_type.clone();
                            *arg_types = Some(actuals);
                            *ret_type = Some(result.clone());
                        }
                        None => {
                            self.error(format!(
                                "Call: method '{}' not found in class '{}'",
                                name, class
                            ));
                        }
                    }
                }
                result
            }
            Exp::Num { .. } => Type::Int,
            Exp::True { .. } | Exp::False { .. } => Type::Boolean,
            Exp::This { .. } => Type::class(self.current_class.clone()),
        }
    }
}
