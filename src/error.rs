use thiserror::Error;

/// Result type for mjc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the mjc front end
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("lexical error at line {line}: {message}")]
    Lex { line: usize, message: String },

    #[error("syntax error at line {line}: expected {expected}, found {found}")]
    Syntax {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// Fatal registration errors raised while building symbol tables.
    #[error("semantic error: {message}")]
    Semantic { message: String },

    /// Accumulated type-checking verdict.
    #[error("type checking failed: {count} error(s)")]
    Check { count: usize },
}

impl Error {
    /// Create a lexical error with location information
    pub fn lex_error(line: usize, message: impl Into<String>) -> Self {
        Self::Lex {
            line,
            message: message.into(),
        }
    }

    /// Create a semantic error
    pub fn semantic_error(message: impl Into<String>) -> Self {
        Self::Semantic {
            message: message.into(),
        }
    }
}
