//! Recursive descent parser for MiniJava.
//!
//! Works over the full token vector with a cursor, giving one token of
//! lookahead. Any unexpected token is fatal: the error names the expected
//! kind, the actual kind and lexeme, and the line, and aborts parsing.
//!
//! Expression precedence, loosest to tightest:
//! `&&` > `<` > `+ -` > `*` > unary `!` > postfix > atom. Each binary
//! level and the postfix level apply at most one operator before
//! returning, so chains like `a + b + c` leave a trailing operator that
//! surfaces as a syntax error one level up. Unary `!` chains through
//! recursion. The single backtracking point in the grammar is the
//! declaration/statement disambiguation in `parse_var_decl`.

use super::error::ParseError;
use super::lexer::{Lexer, LexicalToken, Token};
use crate::ast::*;
use crate::config::Config;

pub struct Parser {
    tokens: Vec<LexicalToken>,
    current: usize,
}

type Result<T> = std::result::Result<T, ParseError>;

impl Parser {
    /// Create a parser from source text; lexical errors surface here.
    pub fn new(source: &str, config: &Config) -> Result<Self> {
        let lexer = Lexer::new(source).with_dump(config.dump_tokens);
        let tokens = lexer.tokenize()?;
        Ok(Self { tokens, current: 0 })
    }

    /// Parse a whole program, consuming every token.
    pub fn parse(mut self) -> Result<Program> {
        let main_class = self.parse_main_class()?;
        let mut classes = Vec::new();
        while self.check(&Token::Class) {
            classes.push(self.parse_class_decl()?);
        }
        if !self.is_at_end() {
            return Err(self.unexpected("end of input"));
        }
        Ok(Program {
            main_class,
            classes,
        })
    }

    // Helper methods

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&LexicalToken> {
        self.tokens.get(self.current)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek().map_or(false, |t| t.token == *token)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Line of the current token, falling back to the last line seen.
    fn line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.line())
            .unwrap_or(1)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(t) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("{:?} '{}'", t.token, t.lexeme),
                line: t.line(),
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                line: self.line(),
            },
        }
    }

    fn consume(&mut self, token: &Token, expected: &str) -> Result<&LexicalToken> {
        if self.check(token) {
            self.current += 1;
            Ok(&self.tokens[self.current - 1])
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn parse_identifier(&mut self) -> Result<(String, usize)> {
        let tok = self.consume(&Token::Identifier, "an identifier")?;
        Ok((tok.lexeme.clone(), tok.line()))
    }

    // Expression parsing, loosest precedence first.

    // Exp -> LtExp && LtExp
    //     -> LtExp
    fn parse_exp(&mut self) -> Result<Exp> {
        let left = self.parse_lt_exp()?;
        if self.check(&Token::AndAnd) {
            let line = self.line();
            self.advance();
            let right = self.parse_lt_exp()?;
            return Ok(Exp::And {
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        Ok(left)
    }

    // LtExp -> AddSubExp < AddSubExp
    //       -> AddSubExp
    fn parse_lt_exp(&mut self) -> Result<Exp> {
        let left = self.parse_additive_exp()?;
        if self.check(&Token::Lt) {
            let line = self.line();
            self.advance();
            let right = self.parse_additive_exp()?;
            return Ok(Exp::Lt {
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        Ok(left)
    }

    // AddSubExp -> TimesExp + TimesExp
    //           -> TimesExp - TimesExp
    //           -> TimesExp
    fn parse_additive_exp(&mut self) -> Result<Exp> {
        let left = self.parse_times_exp()?;
        if self.check(&Token::Plus) {
            let line = self.line();
            self.advance();
            let right = self.parse_times_exp()?;
            return Ok(Exp::Add {
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        if self.check(&Token::Minus) {
            let line = self.line();
            self.advance();
            let right = self.parse_times_exp()?;
            return Ok(Exp::Sub {
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        Ok(left)
    }

    // TimesExp -> UnaryExp * UnaryExp
    //          -> UnaryExp
    fn parse_times_exp(&mut self) -> Result<Exp> {
        let left = self.parse_unary_exp()?;
        if self.check(&Token::Star) {
            let line = self.line();
            self.advance();
            let right = self.parse_unary_exp()?;
            return Ok(Exp::Times {
                left: Box::new(left),
                right: Box::new(right),
                line,
            });
        }
        Ok(left)
    }

    // UnaryExp -> ! UnaryExp
    //          -> PostfixExp
    fn parse_unary_exp(&mut self) -> Result<Exp> {
        if self.check(&Token::Bang) {
            let line = self.line();
            self.advance();
            let exp = self.parse_unary_exp()?;
            return Ok(Exp::Not {
                exp: Box::new(exp),
                line,
            });
        }
        self.parse_postfix_exp()
    }

    // PostfixExp -> AtomExp . id ( ExpList )
    //            -> AtomExp . length
    //            -> AtomExp [ Exp ]
    //            -> AtomExp
    fn parse_postfix_exp(&mut self) -> Result<Exp> {
        let atom = self.parse_atom_exp()?;
        if self.check(&Token::Dot) {
            let line = self.line();
            self.advance();
            if self.match_token(&Token::Length) {
                return Ok(Exp::Length {
                    array: Box::new(atom),
                    line,
                });
            }
            let (name, _) = self.parse_identifier()?;
            self.consume(&Token::LParen, "'('")?;
            let args = self.parse_exp_list()?;
            self.consume(&Token::RParen, "')'")?;
            return Ok(Exp::Call {
                receiver: Box::new(atom),
                name,
                args,
                line,
                receiver_class: None,
                arg_types: None,
                ret_type: None,
            });
        }
        if self.check(&Token::LBracket) {
            let line = self.line();
            self.advance();
            let index = self.parse_exp()?;
            self.consume(&Token::RBracket, "']'")?;
            return Ok(Exp::ArraySelect {
                array: Box::new(atom),
                index: Box::new(index),
                line,
            });
        }
        Ok(atom)
    }

    // AtomExp -> ( Exp )
    //         -> NUM | true | false | this | id
    //         -> new int [ Exp ]
    //         -> new id ( )
    fn parse_atom_exp(&mut self) -> Result<Exp> {
        let tok = match self.peek() {
            Some(t) => t.token.clone(),
            None => return Err(self.unexpected("an expression")),
        };
        let line = self.line();
        match tok {
            Token::LParen => {
                self.advance();
                let exp = self.parse_exp()?;
                self.consume(&Token::RParen, "')'")?;
                Ok(exp)
            }
            Token::Number => {
                let lexeme = self.tokens[self.current].lexeme.clone();
                let value = lexeme
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidLiteral { lexeme, line })?;
                self.advance();
                Ok(Exp::Num { value, line })
            }
            Token::True => {
                self.advance();
                Ok(Exp::True { line })
            }
            Token::False => {
                self.advance();
                Ok(Exp::False { line })
            }
            Token::This => {
                self.advance();
                Ok(Exp::This { line })
            }
            Token::Identifier => {
                let (name, line) = self.parse_identifier()?;
                Ok(Exp::Id {
                    name,
                    line,
                    typ: None,
                    is_field: false,
                })
            }
            Token::New => {
                self.advance();
                if self.match_token(&Token::Int) {
                    self.consume(&Token::LBracket, "'['")?;
                    let size = self.parse_exp()?;
                    self.consume(&Token::RBracket, "']'")?;
                    return Ok(Exp::NewIntArray {
                        size: Box::new(size),
                        line,
                    });
                }
                if self.check(&Token::Identifier) {
                    let (class, _) = self.parse_identifier()?;
                    self.consume(&Token::LParen, "'('")?;
                    self.consume(&Token::RParen, "')'")?;
                    return Ok(Exp::NewObject { class, line });
                }
                Err(self.unexpected("'int' or a class name after 'new'"))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    // ExpList -> Exp ( , Exp )*
    //         ->
    fn parse_exp_list(&mut self) -> Result<Vec<Exp>> {
        let mut exps = Vec::new();
        if self.check(&Token::RParen) {
            return Ok(exps);
        }
        exps.push(self.parse_exp()?);
        while self.match_token(&Token::Comma) {
            exps.push(self.parse_exp()?);
        }
        Ok(exps)
    }

    // Statement parsing

    // Statement -> { Statement* }
    //           -> if ( Exp ) Statement else Statement
    //           -> while ( Exp ) Statement
    //           -> System.out.println ( Exp ) ;
    //           -> id = Exp ;
    //           -> id [ Exp ] = Exp ;
    fn parse_statement(&mut self) -> Result<Stm> {
        let tok = match self.peek() {
            Some(t) => t.token.clone(),
            None => return Err(self.unexpected("a statement")),
        };
        let line = self.line();
        match tok {
            Token::LBrace => {
                self.advance();
                let stms = self.parse_statements()?;
                self.consume(&Token::RBrace, "'}'")?;
                Ok(Stm::Block { stms, line })
            }
            Token::If => {
                self.advance();
                self.consume(&Token::LParen, "'('")?;
                let condition = self.parse_exp()?;
                self.consume(&Token::RParen, "')'")?;
                let then_stm = self.parse_statement()?;
                self.consume(&Token::Else, "'else'")?;
                let else_stm = self.parse_statement()?;
                Ok(Stm::If {
                    condition,
                    then_stm: Box::new(then_stm),
                    else_stm: Box::new(else_stm),
                    line,
                })
            }
            Token::While => {
                self.advance();
                self.consume(&Token::LParen, "'('")?;
                let condition = self.parse_exp()?;
                self.consume(&Token::RParen, "')'")?;
                let body = self.parse_statement()?;
                Ok(Stm::While {
                    condition,
                    body: Box::new(body),
                    line,
                })
            }
            Token::System => {
                self.advance();
                self.consume(&Token::Dot, "'.'")?;
                self.consume(&Token::Out, "'out'")?;
                self.consume(&Token::Dot, "'.'")?;
                self.consume(&Token::Println, "'println'")?;
                self.consume(&Token::LParen, "'('")?;
                let exp = self.parse_exp()?;
                self.consume(&Token::RParen, "')'")?;
                self.consume(&Token::Semicolon, "';'")?;
                Ok(Stm::Print { exp, line })
            }
            Token::Identifier => {
                let (name, line) = self.parse_identifier()?;
                if self.match_token(&Token::LBracket) {
                    let index = self.parse_exp()?;
                    self.consume(&Token::RBracket, "']'")?;
                    self.consume(&Token::Assign, "'='")?;
                    let exp = self.parse_exp()?;
                    self.consume(&Token::Semicolon, "';'")?;
                    Ok(Stm::AssignArray {
                        name,
                        index,
                        exp,
                        line,
                    })
                } else {
                    self.consume(&Token::Assign, "'='")?;
                    let exp = self.parse_exp()?;
                    self.consume(&Token::Semicolon, "';'")?;
                    Ok(Stm::Assign {
                        name,
                        exp,
                        line,
                        typ: None,
                    })
                }
            }
            _ => Err(self.unexpected("a statement")),
        }
    }

    // Statements -> Statement Statements
    //            ->
    fn parse_statements(&mut self) -> Result<Vec<Stm>> {
        let mut stms = Vec::new();
        while self.peek().map_or(false, |t| t.token.starts_statement()) {
            stms.push(self.parse_statement()?);
        }
        Ok(stms)
    }

    // Type -> int [ ]
    //      -> int
    //      -> boolean
    //      -> id
    fn parse_type(&mut self) -> Result<Type> {
        let tok = match self.peek() {
            Some(t) => t.token.clone(),
            None => return Err(self.unexpected("a type")),
        };
        match tok {
            Token::Int => {
                self.advance();
                if self.match_token(&Token::LBracket) {
                    self.consume(&Token::RBracket, "']'")?;
                    return Ok(Type::IntArray);
                }
                Ok(Type::Int)
            }
            Token::Boolean => {
                self.advance();
                Ok(Type::Boolean)
            }
            Token::Identifier => {
                let (name, _) = self.parse_identifier()?;
                Ok(Type::ClassType { name })
            }
            _ => Err(self.unexpected("a type")),
        }
    }

    // VarDecl -> Type id ;
    //
    // A local whose "type" is a lone identifier is ambiguous with the
    // start of an assignment statement. Speculatively parse the type; if
    // the next token is not an identifier the candidate was an assignment
    // after all, so restore the saved cursor and yield `None`. This is
    // the grammar's only backtracking point, taken at most once per
    // attempted declaration.
    fn parse_var_decl(&mut self) -> Result<Option<Dec>> {
        let saved = self.current;
        let line = self.line();
        let typ = self.parse_type()?;
        if self.check(&Token::Identifier) {
            let (name, _) = self.parse_identifier()?;
            self.consume(&Token::Semicolon, "';'")?;
            Ok(Some(Dec { typ, name, line }))
        } else {
            self.current = saved;
            Ok(None)
        }
    }

    // VarDecls -> VarDecl VarDecls
    //          ->
    fn parse_var_decls(&mut self) -> Result<Vec<Dec>> {
        let mut decs = Vec::new();
        while self.peek().map_or(false, |t| t.token.starts_type()) {
            match self.parse_var_decl()? {
                Some(dec) => decs.push(dec),
                None => break,
            }
        }
        Ok(decs)
    }

    // FormalList -> Type id ( , Type id )*
    //            ->
    fn parse_formal_list(&mut self) -> Result<Vec<Dec>> {
        let mut formals = Vec::new();
        if self.peek().map_or(false, |t| t.token.starts_type()) {
            let line = self.line();
            let typ = self.parse_type()?;
            let (name, _) = self.parse_identifier()?;
            formals.push(Dec { typ, name, line });
            while self.match_token(&Token::Comma) {
                let line = self.line();
                let typ = self.parse_type()?;
                let (name, _) = self.parse_identifier()?;
                formals.push(Dec { typ, name, line });
            }
        }
        Ok(formals)
    }

    // Method -> public Type id ( FormalList )
    //           { VarDecl* Statement* return Exp ; }
    fn parse_method(&mut self) -> Result<Method> {
        let line = self.line();
        self.consume(&Token::Public, "'public'")?;
        let ret_type = self.parse_type()?;
        let (name, _) = self.parse_identifier()?;
        self.consume(&Token::LParen, "'('")?;
        let formals = self.parse_formal_list()?;
        self.consume(&Token::RParen, "')'")?;
        self.consume(&Token::LBrace, "'{'")?;
        let locals = self.parse_var_decls()?;
        let stms = self.parse_statements()?;
        self.consume(&Token::Return, "'return'")?;
        let ret_exp = self.parse_exp()?;
        self.consume(&Token::Semicolon, "';'")?;
        self.consume(&Token::RBrace, "'}'")?;
        Ok(Method {
            ret_type,
            name,
            formals,
            locals,
            stms,
            ret_exp,
            line,
        })
    }

    // ClassDecl -> class id { VarDecl* Method* }
    //           -> class id extends id { VarDecl* Method* }
    fn parse_class_decl(&mut self) -> Result<Class> {
        let line = self.line();
        self.consume(&Token::Class, "'class'")?;
        let (name, _) = self.parse_identifier()?;
        let extends = if self.match_token(&Token::Extends) {
            let (parent, _) = self.parse_identifier()?;
            Some(parent)
        } else {
            None
        };
        self.consume(&Token::LBrace, "'{'")?;
        let fields = self.parse_var_decls()?;
        let mut methods = Vec::new();
        while self.check(&Token::Public) {
            methods.push(self.parse_method()?);
        }
        self.consume(&Token::RBrace, "'}'")?;
        Ok(Class {
            name,
            extends,
            fields,
            methods,
            line,
        })
    }

    // MainClass -> class id {
    //                public static void main ( String [ ] id ) { Statement }
    //              }
    fn parse_main_class(&mut self) -> Result<MainClass> {
        let line = self.line();
        self.consume(&Token::Class, "'class'")?;
        let (name, _) = self.parse_identifier()?;
        self.consume(&Token::LBrace, "'{'")?;
        self.consume(&Token::Public, "'public'")?;
        self.consume(&Token::Static, "'static'")?;
        self.consume(&Token::Void, "'void'")?;
        self.consume(&Token::Main, "'main'")?;
        self.consume(&Token::LParen, "'('")?;
        self.consume(&Token::String, "'String'")?;
        self.consume(&Token::LBracket, "'['")?;
        self.consume(&Token::RBracket, "']'")?;
        let (arg, _) = self.parse_identifier()?;
        self.consume(&Token::RParen, "')'")?;
        self.consume(&Token::LBrace, "'{'")?;
        let stm = self.parse_statement()?;
        self.consume(&Token::RBrace, "'}'")?;
        self.consume(&Token::RBrace, "'}'")?;
        Ok(MainClass {
            name,
            arg,
            stm,
            line,
        })
    }
}
