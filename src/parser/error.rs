use crate::error::Error;
use thiserror::Error as ThisError;

/// Errors raised while turning source text into an AST.
///
/// Every variant is fatal: the first lexical or syntactic problem aborts
/// the whole run. There is no recovery and no accumulation at this level.
#[derive(ThisError, Debug, Clone)]
pub enum ParseError {
    /// Unexpected token encountered
    #[error("expected {expected}, found {found} at line {line}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    /// Ran out of tokens mid-production
    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { expected: String, line: usize },

    /// Unrecognized character sequence
    #[error("lexical error at line {line}: {message}")]
    Lexical { message: String, line: usize },

    /// Integer literal that does not fit the numeric range
    #[error("invalid integer literal '{lexeme}' at line {line}")]
    InvalidLiteral { lexeme: String, line: usize },
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::UnexpectedToken {
                expected,
                found,
                line,
            } => Error::Syntax {
                line,
                expected,
                found,
            },
            ParseError::UnexpectedEof { expected, line } => {
                Error::UnexpectedEof { line, expected }
            }
            ParseError::Lexical { message, line } => Error::Lex { line, message },
            ParseError::InvalidLiteral { lexeme, line } => Error::Syntax {
                line,
                expected: "an integer literal within range".to_string(),
                found: lexeme,
            },
        }
    }
}
