use super::nodes::*;

/// Renders an AST back to source-like text.
///
/// Used by the CLI `parse` subcommand and the `dump_ast` switch; the
/// pipeline itself never reads the output. Printing is precedence-aware:
/// an operand whose operator binds looser than its context is wrapped in
/// parentheses, so re-parsing the output reproduces the tree structure.
pub struct PrettyPrinter {
    indent_level: usize,
    out: String,
}

/// Binding tightness of an expression, loosest (`&&`) to tightest (atoms).
fn prec(e: &Exp) -> u8 {
    match e {
        Exp::And { .. } => 1,
        Exp::Lt { .. } => 2,
        Exp::Add { .. } | Exp::Sub { .. } => 3,
        Exp::Times { .. } => 4,
        Exp::Not { .. } => 5,
        Exp::Call { .. } | Exp::Length { .. } | Exp::ArraySelect { .. } => 6,
        _ => 7,
    }
}

impl PrettyPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            out: String::new(),
        }
    }

    /// Render a whole program.
    pub fn print(&mut self, program: &Program) -> String {
        self.out.clear();
        self.indent_level = 0;
        self.print_main_class(&program.main_class);
        self.sayln("");
        for class in &program.classes {
            self.print_class(class);
            self.sayln("");
        }
        std::mem::take(&mut self.out)
    }

    fn indent(&mut self) {
        self.indent_level += 2;
    }

    fn dedent(&mut self) {
        if self.indent_level >= 2 {
            self.indent_level -= 2;
        }
    }

    fn say_spaces(&mut self) {
        for _ in 0..self.indent_level {
            self.out.push(' ');
        }
    }

    fn say(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn sayln(&mut self, s: &str) {
        self.out.push_str(s);
        self.out.push('\n');
    }

    // expressions

    fn print_exp(&mut self, e: &Exp, min_prec: u8) {
        if prec(e) < min_prec {
            self.say("(");
            self.print_exp_inner(e);
            self.say(")");
        } else {
            self.print_exp_inner(e);
        }
    }

    fn print_exp_inner(&mut self, e: &Exp) {
        match e {
            Exp::Add { left, right, .. } => {
                self.print_exp(left, 4);
                self.say(" + ");
                self.print_exp(right, 4);
            }
            Exp::Sub { left, right, .. } => {
                self.print_exp(left, 4);
                self.say(" - ");
                self.print_exp(right, 4);
            }
            Exp::Times { left, right, .. } => {
                self.print_exp(left, 5);
                self.say(" * ");
                self.print_exp(right, 5);
            }
            Exp::And { left, right, .. } => {
                self.print_exp(left, 2);
                self.say(" && ");
                self.print_exp(right, 2);
            }
            Exp::Lt { left, right, .. } => {
                self.print_exp(left, 3);
                self.say(" < ");
                self.print_exp(right, 3);
            }
            Exp::Not { exp, .. } => {
                self.say("!");
                self.print_exp(exp, 5);
            }
            Exp::ArraySelect { array, index, .. } => {
                self.print_exp(array, 7);
                self.say("[");
                self.print_exp(index, 0);
                self.say("]");
            }
            Exp::Length { array, .. } => {
                self.print_exp(array, 7);
                self.say(".length");
            }
            Exp::Call {
                receiver,
                name,
                args,
                ..
            } => {
                self.print_exp(receiver, 7);
                self.say(".");
                self.say(name);
                self.say("(");
                for (i, arg) in args.iter().enumerate() {
                    if i != 0 {
                        self.say(", ");
                    }
                    self.print_exp(arg, 0);
                }
                self.say(")");
            }
            Exp::NewIntArray { size, .. } => {
                self.say("new int [");
                self.print_exp(size, 0);
                self.say("]");
            }
            Exp::NewObject { class, .. } => {
                self.say("new ");
                self.say(class);
                self.say("()");
            }
            Exp::Id { name, .. } => self.say(name),
            Exp::Num { value, .. } => {
                let s = value.to_string();
                self.say(&s);
            }
            Exp::True { .. } => self.say("true"),
            Exp::False { .. } => self.say("false"),
            Exp::This { .. } => self.say("this"),
        }
    }

    // statements

    fn print_stm(&mut self, s: &Stm) {
        match s {
            Stm::Assign { name, exp, .. } => {
                self.say_spaces();
                self.say(name);
                self.say(" = ");
                self.print_exp(exp, 0);
                self.sayln(";");
            }
            Stm::AssignArray {
                name, index, exp, ..
            } => {
                self.say_spaces();
                self.say(name);
                self.say("[");
                self.print_exp(index, 0);
                self.say("] = ");
                self.print_exp(exp, 0);
                self.sayln(";");
            }
            Stm::Block { stms, .. } => {
                self.say_spaces();
                self.sayln("{");
                self.indent();
                for stm in stms {
                    self.print_stm(stm);
                }
                self.dedent();
                self.say_spaces();
                self.sayln("}");
            }
            Stm::If {
                condition,
                then_stm,
                else_stm,
                ..
            } => {
                self.say_spaces();
                self.say("if (");
                self.print_exp(condition, 0);
                self.sayln(")");
                self.indent();
                self.print_stm(then_stm);
                self.dedent();
                self.say_spaces();
                self.sayln("else");
                self.indent();
                self.print_stm(else_stm);
                self.dedent();
            }
            Stm::While {
                condition, body, ..
            } => {
                self.say_spaces();
                self.say("while (");
                self.print_exp(condition, 0);
                self.sayln(")");
                self.indent();
                self.print_stm(body);
                self.dedent();
            }
            Stm::Print { exp, .. } => {
                self.say_spaces();
                self.say("System.out.println (");
                self.print_exp(exp, 0);
                self.sayln(");");
            }
        }
    }

    // declarations

    fn print_dec(&mut self, d: &Dec) {
        self.say_spaces();
        let typ = d.typ.to_string();
        self.say(&typ);
        self.say(" ");
        self.say(&d.name);
        self.sayln(";");
    }

    fn print_method(&mut self, m: &Method) {
        self.say_spaces();
        self.say("public ");
        let ret = m.ret_type.to_string();
        self.say(&ret);
        self.say(" ");
        self.say(&m.name);
        self.say("(");
        for (i, formal) in m.formals.iter().enumerate() {
            if i != 0 {
                self.say(", ");
            }
            let typ = formal.typ.to_string();
            self.say(&typ);
            self.say(" ");
            self.say(&formal.name);
        }
        self.sayln(")");
        self.say_spaces();
        self.sayln("{");
        self.indent();
        for local in &m.locals {
            self.print_dec(local);
        }
        for stm in &m.stms {
            self.print_stm(stm);
        }
        self.say_spaces();
        self.say("return ");
        self.print_exp(&m.ret_exp, 0);
        self.sayln(";");
        self.dedent();
        self.say_spaces();
        self.sayln("}");
    }

    fn print_class(&mut self, c: &Class) {
        self.say("class ");
        self.say(&c.name);
        match &c.extends {
            Some(parent) => {
                self.say(" extends ");
                self.sayln(parent);
            }
            None => self.sayln(""),
        }
        self.sayln("{");
        self.indent();
        for field in &c.fields {
            self.print_dec(field);
        }
        for method in &c.methods {
            self.print_method(method);
        }
        self.dedent();
        self.sayln("}");
    }

    fn print_main_class(&mut self, c: &MainClass) {
        self.say("class ");
        self.sayln(&c.name);
        self.sayln("{");
        self.indent();
        self.say_spaces();
        self.say("public static void main (String [] ");
        self.say(&c.arg);
        self.sayln(")");
        self.say_spaces();
        self.sayln("{");
        self.indent();
        self.print_stm(&c.stm);
        self.dedent();
        self.say_spaces();
        self.sayln("}");
        self.dedent();
        self.sayln("}");
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a program to source-like text with a fresh printer.
pub fn pretty(program: &Program) -> String {
    PrettyPrinter::new().print(program)
}
