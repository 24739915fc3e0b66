use std::fmt;

/// A MiniJava type.
///
/// Carries no source position so that derived equality is exactly
/// printed-form equality: two types are equal iff their canonical
/// renderings match. In particular `ClassType` equality requires the same
/// class name — inheritance never implies assignability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Boolean,
    IntArray,
    ClassType { name: String },
}

impl Type {
    pub fn class(name: impl Into<String>) -> Self {
        Type::ClassType { name: name.into() }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Boolean => write!(f, "boolean"),
            Type::IntArray => write!(f, "int[]"),
            Type::ClassType { name } => write!(f, "{}", name),
        }
    }
}

/// A typed name declaration: a field, formal parameter, or local variable.
#[derive(Debug, Clone)]
pub struct Dec {
    pub typ: Type,
    pub name: String,
    pub line: usize,
}

/// Expressions.
///
/// One variant per syntactic form. Every variant records the line of the
/// token that introduced it. The `Id` and `Call` variants carry annotation
/// slots that stay `None`/`false` until type elaboration writes them once;
/// nothing in the front end reads them back, they exist for later stages.
#[derive(Debug, Clone)]
pub enum Exp {
    Add {
        left: Box<Exp>,
        right: Box<Exp>,
        line: usize,
    },
    And {
        left: Box<Exp>,
        right: Box<Exp>,
        line: usize,
    },
    ArraySelect {
        array: Box<Exp>,
        index: Box<Exp>,
        line: usize,
    },
    Call {
        receiver: Box<Exp>,
        name: String,
        args: Vec<Exp>,
        line: usize,
        /// Static class of the receiver, resolved by elaboration.
        receiver_class: Option<String>,
        /// Types of the arguments, resolved by elaboration.
        arg_types: Option<Vec<Type>>,
        /// Declared return type of the callee, resolved by elaboration.
        ret_type: Option<Type>,
    },
    False {
        line: usize,
    },
    Id {
        name: String,
        line: usize,
        /// Declared type of the name, resolved by elaboration.
        typ: Option<Type>,
        /// True when the name resolved to a class field rather than a
        /// formal or local.
        is_field: bool,
    },
    Length {
        array: Box<Exp>,
        line: usize,
    },
    Lt {
        left: Box<Exp>,
        right: Box<Exp>,
        line: usize,
    },
    NewIntArray {
        size: Box<Exp>,
        line: usize,
    },
    NewObject {
        class: String,
        line: usize,
    },
    Not {
        exp: Box<Exp>,
        line: usize,
    },
    Num {
        value: i32,
        line: usize,
    },
    Sub {
        left: Box<Exp>,
        right: Box<Exp>,
        line: usize,
    },
    This {
        line: usize,
    },
    Times {
        left: Box<Exp>,
        right: Box<Exp>,
        line: usize,
    },
    True {
        line: usize,
    },
}

impl Exp {
    /// Line of the token that introduced this expression.
    pub fn line(&self) -> usize {
        match self {
            Exp::Add { line, .. }
            | Exp::And { line, .. }
            | Exp::ArraySelect { line, .. }
            | Exp::Call { line, .. }
            | Exp::False { line }
            | Exp::Id { line, .. }
            | Exp::Length { line, .. }
            | Exp::Lt { line, .. }
            | Exp::NewIntArray { line, .. }
            | Exp::NewObject { line, .. }
            | Exp::Not { line, .. }
            | Exp::Num { line, .. }
            | Exp::Sub { line, .. }
            | Exp::This { line }
            | Exp::Times { line, .. }
            | Exp::True { line } => *line,
        }
    }
}

/// Statements.
#[derive(Debug, Clone)]
pub enum Stm {
    Assign {
        name: String,
        exp: Exp,
        line: usize,
        /// Declared type of the left-hand side, resolved by elaboration.
        typ: Option<Type>,
    },
    AssignArray {
        name: String,
        index: Exp,
        exp: Exp,
        line: usize,
    },
    Block {
        stms: Vec<Stm>,
        line: usize,
    },
    If {
        condition: Exp,
        then_stm: Box<Stm>,
        else_stm: Box<Stm>,
        line: usize,
    },
    While {
        condition: Exp,
        body: Box<Stm>,
        line: usize,
    },
    Print {
        exp: Exp,
        line: usize,
    },
}

/// A method declaration.
#[derive(Debug, Clone)]
pub struct Method {
    pub ret_type: Type,
    pub name: String,
    pub formals: Vec<Dec>,
    pub locals: Vec<Dec>,
    pub stms: Vec<Stm>,
    pub ret_exp: Exp,
    pub line: usize,
}

/// A class declaration.
#[derive(Debug, Clone)]
pub struct Class {
    pub name: String,
    pub extends: Option<String>,
    pub fields: Vec<Dec>,
    pub methods: Vec<Method>,
    pub line: usize,
}

/// The main class: a single `public static void main` holding one statement.
#[derive(Debug, Clone)]
pub struct MainClass {
    pub name: String,
    pub arg: String,
    pub stm: Stm,
    pub line: usize,
}

/// A whole program: the main class followed by the other classes.
#[derive(Debug, Clone)]
pub struct Program {
    pub main_class: MainClass,
    pub classes: Vec<Class>,
}
