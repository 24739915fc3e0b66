use mjc::parser::{Lexer, ParseError, Token};

#[test]
fn test_keywords_and_identifiers() {
    let source = "class Fac extends Base";
    let tokens = Lexer::new(source).tokenize().expect("failed to tokenize");

    assert_eq!(tokens.len(), 4);
    assert!(tokens[0].is(&Token::Class));
    assert!(tokens[1].is(&Token::Identifier));
    assert_eq!(tokens[1].lexeme, "Fac");
    assert!(tokens[2].is(&Token::Extends));
    assert!(tokens[3].is(&Token::Identifier));
    assert_eq!(tokens[3].lexeme, "Base");
}

#[test]
fn test_full_keyword_set() {
    let source = "boolean class else extends false if int length main new \
                  out println public return static String System this true void while";
    let tokens = Lexer::new(source).tokenize().expect("failed to tokenize");

    assert_eq!(tokens.len(), 21);
    assert!(tokens.iter().all(|t| t.token.is_keyword()));
}

#[test]
fn test_operators_and_separators() {
    let source = "+ - * && < ! = , . ; { } [ ] ( )";
    let tokens = Lexer::new(source).tokenize().expect("failed to tokenize");

    let expected = [
        Token::Plus,
        Token::Minus,
        Token::Star,
        Token::AndAnd,
        Token::Lt,
        Token::Bang,
        Token::Assign,
        Token::Comma,
        Token::Dot,
        Token::Semicolon,
        Token::LBrace,
        Token::RBrace,
        Token::LBracket,
        Token::RBracket,
        Token::LParen,
        Token::RParen,
    ];
    assert_eq!(tokens.len(), expected.len());
    for (token, expected) in tokens.iter().zip(&expected) {
        assert!(token.is(expected), "expected {:?}, got {:?}", expected, token);
    }
}

#[test]
fn test_number_literals_are_maximal_runs() {
    let tokens = Lexer::new("12 345 0").tokenize().expect("failed to tokenize");
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.is(&Token::Number)));
    assert_eq!(tokens[1].lexeme, "345");
}

/// A keyword prefix followed by more identifier characters is one
/// identifier, not a keyword plus a fragment.
#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = Lexer::new("classes iffy lengthy")
        .tokenize()
        .expect("failed to tokenize");
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.is(&Token::Identifier)));
}

#[test]
fn test_line_numbers_are_monotonic() {
    let source = "class Main {\n  public static void main(String[] a) {\n    System.out.println(42);\n  }\n}\n";
    let tokens = Lexer::new(source).tokenize().expect("failed to tokenize");

    let lines: Vec<usize> = tokens.iter().map(|t| t.line()).collect();
    assert!(lines.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens.last().unwrap().line(), 5);
}

#[test]
fn test_whitespace_variants_are_skipped() {
    let tokens = Lexer::new(" \t\r\n x \t y ")
        .tokenize()
        .expect("failed to tokenize");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].line(), 2);
}

/// Comment syntax is not part of the language; `//` hits the scanner's
/// error path instead of being skipped.
#[test]
fn test_line_comment_is_a_lexical_error() {
    let result = Lexer::new("x = 1; // note").tokenize();
    assert!(matches!(result, Err(ParseError::Lexical { .. })));
}

#[test]
fn test_block_comment_is_a_lexical_error() {
    let result = Lexer::new("/* note */ x = 1;").tokenize();
    assert!(matches!(result, Err(ParseError::Lexical { .. })));
}

#[test]
fn test_unknown_character_reports_line() {
    let result = Lexer::new("x = 1;\ny = #;").tokenize();
    match result {
        Err(ParseError::Lexical { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected lexical error, got {:?}", other),
    }
}

/// Exhaustion is sticky: once the source runs out, every further call
/// keeps reporting end of input.
#[test]
fn test_next_token_after_exhaustion() {
    let mut lexer = Lexer::new("x");
    assert!(lexer.next_token().is_some());
    assert!(lexer.next_token().is_none());
    assert!(lexer.next_token().is_none());
}
