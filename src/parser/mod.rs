//! Lexical analysis and parsing of MiniJava source into an AST.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::ParseError;
pub use lexer::{Lexer, LexicalToken, Location, Token};
pub use parser::Parser;

use crate::ast::Program;
use crate::config::Config;
use crate::error::Result;

/// Parse MiniJava source text into a program AST.
pub fn parse(source: &str, config: &Config) -> Result<Program> {
    let parser = Parser::new(source, config)?;
    let program = parser.parse()?;
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_program() {
        let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(42);
    }
}
"#;
        let program = parse(source, &Config::default()).expect("failed to parse");
        assert_eq!(program.main_class.name, "Main");
        assert!(program.classes.is_empty());
    }

    #[test]
    fn test_parse_class_with_method() {
        let source = r#"
class Main {
    public static void main(String[] a) {
        System.out.println(new Fac().ComputeFac(10));
    }
}
class Fac {
    public int ComputeFac(int num) {
        return num;
    }
}
"#;
        let program = parse(source, &Config::default()).expect("failed to parse");
        assert_eq!(program.classes.len(), 1);
        assert_eq!(program.classes[0].methods.len(), 1);
        assert_eq!(program.classes[0].methods[0].formals.len(), 1);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let source = "class Main {\n  public static void main(String[] a)\n  oops";
        let err = parse(source, &Config::default()).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("line 3"), "got: {}", rendered);
    }
}
