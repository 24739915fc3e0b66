use logos::Logos;

use super::error::ParseError;

/// Token kinds for MiniJava.
///
/// Whitespace is scanned as a token rather than skipped so that the
/// `Lexer` wrapper can keep exact line/column accounting; `tokenize`
/// filters it out. There are deliberately no comment patterns: comment
/// syntax is not part of the language, and `//` or `/* */` input reaches
/// the scanner's error path.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Keywords
    #[token("boolean")]
    Boolean,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("extends")]
    Extends,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("int")]
    Int,
    #[token("length")]
    Length,
    #[token("main")]
    Main,
    #[token("new")]
    New,
    #[token("out")]
    Out,
    #[token("println")]
    Println,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("static")]
    Static,
    #[token("String")]
    String,
    #[token("System")]
    System,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("void")]
    Void,
    #[token("while")]
    While,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("&&")]
    AndAnd,
    #[token("<")]
    Lt,
    #[token("!")]
    Bang,
    #[token("=")]
    Assign,

    // Separators
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Literals and identifiers
    #[regex(r"[0-9]+")]
    Number,
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,

    // Whitespace: space, tab, carriage return, newline
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

impl Token {
    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Boolean
                | Token::Class
                | Token::Else
                | Token::Extends
                | Token::False
                | Token::If
                | Token::Int
                | Token::Length
                | Token::Main
                | Token::New
                | Token::Out
                | Token::Println
                | Token::Public
                | Token::Return
                | Token::Static
                | Token::String
                | Token::System
                | Token::This
                | Token::True
                | Token::Void
                | Token::While
        )
    }

    /// Check if this token can start a type
    pub fn starts_type(&self) -> bool {
        matches!(self, Token::Int | Token::Boolean | Token::Identifier)
    }

    /// Check if this token can start a statement
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            Token::LBrace | Token::If | Token::While | Token::System | Token::Identifier
        )
    }
}

/// Source position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Lexical token with its literal text and location
#[derive(Debug, Clone)]
pub struct LexicalToken {
    pub token: Token,
    pub lexeme: String,
    pub location: Location,
}

impl LexicalToken {
    pub fn new(token: Token, lexeme: String, location: Location) -> Self {
        Self {
            token,
            lexeme,
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Check if this token matches the given token kind
    pub fn is(&self, token: &Token) -> bool {
        self.token == *token
    }
}

/// Lexer for MiniJava source text.
///
/// Pulls one token at a time from the scanner and keeps the running
/// line/column cursor. `next_token` returns `None` once the source is
/// exhausted and on every call thereafter.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    line: usize,
    column: usize,
    dump: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: Token::lexer(source),
            line: 1,
            column: 1,
            dump: false,
        }
    }

    /// Echo every produced token (the token-dump observability switch).
    pub fn with_dump(mut self, dump: bool) -> Self {
        self.dump = dump;
        self
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Result<LexicalToken, ParseError>> {
        let token = self.inner.next()?;

        match token {
            Ok(token) => {
                let lexeme = self.inner.slice().to_string();
                let location = Location::new(self.line, self.column);
                self.update_position(&lexeme);

                if self.dump && token != Token::Whitespace {
                    println!("{:?} '{}' at line {}", token, lexeme, location.line);
                }

                Some(Ok(LexicalToken::new(token, lexeme, location)))
            }
            Err(()) => {
                let bad = self.inner.slice().to_string();
                Some(Err(ParseError::Lexical {
                    message: format!("unrecognized character sequence '{}'", bad),
                    line: self.line,
                }))
            }
        }
    }

    /// Advance the line/column cursor over a consumed lexeme
    fn update_position(&mut self, lexeme: &str) {
        for ch in lexeme.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Get all tokens from the source, with whitespace filtered out
    pub fn tokenize(mut self) -> Result<Vec<LexicalToken>, ParseError> {
        let mut tokens = Vec::new();

        while let Some(result) = self.next_token() {
            let token = result?;
            if !matches!(token.token, Token::Whitespace) {
                tokens.push(token);
            }
        }

        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<LexicalToken, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_keywords() {
        let source = "class Fac extends Object";
        let tokens = Lexer::new(source).tokenize().expect("failed to tokenize");

        assert_eq!(tokens.len(), 4);
        assert!(tokens[0].is(&Token::Class));
        assert!(tokens[1].is(&Token::Identifier));
        assert_eq!(tokens[1].lexeme, "Fac");
        assert!(tokens[2].is(&Token::Extends));
        assert!(tokens[3].is(&Token::Identifier));
    }

    #[test]
    fn test_lexer_identifier_with_underscore_and_digits() {
        let tokens = Lexer::new("num_aux2").tokenize().expect("failed to tokenize");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is(&Token::Identifier));
        assert_eq!(tokens[0].lexeme, "num_aux2");
    }

    #[test]
    fn test_lexer_line_accounting() {
        let source = "class\n  Fac\n{";
        let tokens = Lexer::new(source).tokenize().expect("failed to tokenize");

        assert_eq!(tokens[0].line(), 1);
        assert_eq!(tokens[1].line(), 2);
        assert_eq!(tokens[2].line(), 3);
    }

    #[test]
    fn test_lexer_rejects_comments() {
        let result = Lexer::new("x = 1; // note").tokenize();
        assert!(matches!(result, Err(ParseError::Lexical { .. })));
    }

    #[test]
    fn test_lexer_exhaustion_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert!(lexer.next_token().is_some());
        assert!(lexer.next_token().is_none());
        assert!(lexer.next_token().is_none());
    }
}
