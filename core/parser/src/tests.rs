//! FILENAME: core/parser/src/tests.rs
//! PURPOSE: Consolidated unit tests for the parser crate.

use crate::ast::{BinaryOperator, Expression, UnaryOperator};
use crate::lexer::{tokenize, LexError, LexErrorKind, Lexer};
use crate::parser::{parse, parse_str, Expected, ParseError, Parser, SyntaxError};
use crate::token::{Token, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).unwrap().iter().map(|t| t.kind).collect()
}

fn parse_error(input: &str) -> ParseError {
    match parse_str(input) {
        Err(SyntaxError::Parse(e)) => e,
        other => panic!("expected parse error for {:?}, got {:?}", input, other),
    }
}

fn lit(n: f64) -> Expression {
    Expression::Literal(n)
}

// ========================================
// LEXER TESTS
// ========================================

#[test]
fn lexer_tokenizes_simple_math() {
    let mut lexer = Lexer::new("1 + 2");

    assert_eq!(lexer.next_token(), Ok(Token::number(1.0, 0)));
    assert_eq!(lexer.next_token(), Ok(Token::new(TokenKind::Plus, 2)));
    assert_eq!(lexer.next_token(), Ok(Token::number(2.0, 4)));
    assert_eq!(lexer.next_token(), Ok(Token::new(TokenKind::End, 5)));
}

#[test]
fn lexer_token_count_includes_end() {
    let tokens = tokenize("3 + 5 * 2").unwrap();
    assert_eq!(tokens.len(), 6);
    assert_eq!(
        kinds("3 + 5 * 2"),
        vec![
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::End,
        ]
    );
}

#[test]
fn lexer_tokenizes_all_operators_and_parens() {
    assert_eq!(
        kinds("(1 + 2 - 3 * 4 / 5)"),
        vec![
            TokenKind::LParen,
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Minus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Number,
            TokenKind::Slash,
            TokenKind::Number,
            TokenKind::RParen,
            TokenKind::End,
        ]
    );
}

#[test]
fn lexer_reads_decimal_numbers() {
    let tokens = tokenize("3.14 + 2.5").unwrap();
    assert_eq!(tokens[0].value, Some(3.14));
    assert_eq!(tokens[2].value, Some(2.5));
    assert_eq!(tokens[1].value, None);
}

#[test]
fn lexer_reads_leading_decimal_point() {
    let tokens = tokenize(".5 + .25").unwrap();
    assert_eq!(tokens[0], Token::number(0.5, 0));
    assert_eq!(tokens[2], Token::number(0.25, 5));
}

#[test]
fn lexer_ignores_whitespace() {
    let expected = kinds("3+5");
    assert_eq!(kinds("3 + 5"), expected);
    assert_eq!(kinds("  3\t+\n5  "), expected);
}

#[test]
fn lexer_never_folds_sign_into_number() {
    assert_eq!(
        kinds("--5"),
        vec![TokenKind::Minus, TokenKind::Minus, TokenKind::Number, TokenKind::End]
    );
}

#[test]
fn lexer_empty_input_is_single_end() {
    assert_eq!(tokenize("").unwrap(), vec![Token::new(TokenKind::End, 0)]);
    assert_eq!(tokenize("   ").unwrap(), vec![Token::new(TokenKind::End, 3)]);
}

#[test]
fn lexer_rejects_unknown_character() {
    let err = tokenize("1 $ 2").unwrap_err();
    assert_eq!(err, LexError::new(LexErrorKind::UnexpectedCharacter, '$', 2));
    assert_eq!(err.to_string(), "unexpected character '$' at position 2");
}

#[test]
fn lexer_rejects_trailing_dot() {
    let err = tokenize("5.").unwrap_err();
    assert_eq!(err, LexError::new(LexErrorKind::MalformedNumber, '.', 1));
}

#[test]
fn lexer_rejects_standalone_dot() {
    let err = tokenize("3 + .").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MalformedNumber);
    assert_eq!(err.position, 4);
}

#[test]
fn lexer_rejects_multiple_decimal_points() {
    let err = tokenize("3.14.15").unwrap_err();
    assert_eq!(err, LexError::new(LexErrorKind::MalformedNumber, '.', 4));

    let err = tokenize("1..2").unwrap_err();
    assert_eq!(err, LexError::new(LexErrorKind::MalformedNumber, '.', 1));
}

#[test]
fn lexer_rejects_numbers_beyond_f64() {
    let huge = "9".repeat(400);
    let err = tokenize(&huge).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::NumberOutOfRange);
    assert_eq!(err.position, 0);
}

#[test]
fn lexer_iterator_stops_after_end() {
    let mut lexer = Lexer::new("7");
    assert_eq!(lexer.next(), Some(Ok(Token::number(7.0, 0))));
    assert_eq!(lexer.next(), Some(Ok(Token::new(TokenKind::End, 1))));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn lexer_iterator_stops_after_error() {
    let mut lexer = Lexer::new("1 @ 2");
    assert!(matches!(lexer.next(), Some(Ok(_))));
    assert!(matches!(lexer.next(), Some(Err(_))));
    assert_eq!(lexer.next(), None);
}

#[test]
fn token_display_shows_kind_and_position() {
    let tokens = tokenize("(2)").unwrap();
    let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(rendered, vec!["'('@0", "NUMBER(2.0)@1", "')'@2", "END@3"]);
}

// ========================================
// PARSER TESTS - LITERALS AND PRECEDENCE
// ========================================

#[test]
fn parser_parses_number_literal() {
    assert_eq!(parse_str("42").unwrap(), lit(42.0));
    assert_eq!(parse_str("3.14159").unwrap(), lit(3.14159));
}

#[test]
fn parser_respects_precedence() {
    let expected = Expression::binary(
        lit(2.0),
        BinaryOperator::Add,
        Expression::binary(lit(3.0), BinaryOperator::Multiply, lit(4.0)),
    );
    assert_eq!(parse_str("2 + 3 * 4").unwrap(), expected);
}

#[test]
fn parser_is_left_associative() {
    let expected = Expression::binary(
        Expression::binary(lit(10.0), BinaryOperator::Subtract, lit(2.0)),
        BinaryOperator::Subtract,
        lit(3.0),
    );
    assert_eq!(parse_str("10 - 2 - 3").unwrap(), expected);

    let expected = Expression::binary(
        Expression::binary(lit(20.0), BinaryOperator::Divide, lit(4.0)),
        BinaryOperator::Multiply,
        lit(2.0),
    );
    assert_eq!(parse_str("20 / 4 * 2").unwrap(), expected);
}

#[test]
fn parser_grouping_overrides_precedence() {
    let expected = Expression::binary(
        Expression::binary(lit(10.0), BinaryOperator::Subtract, lit(2.0)),
        BinaryOperator::Multiply,
        lit(3.0),
    );
    assert_eq!(parse_str("(10 - 2) * 3").unwrap(), expected);
    assert_eq!(parse_str("((((10 - 2)))) * 3").unwrap(), expected);
}

#[test]
fn parser_nests_unary_chains_to_the_right() {
    let expected = Expression::unary(
        UnaryOperator::Negate,
        Expression::unary(UnaryOperator::Negate, lit(5.0)),
    );
    assert_eq!(parse_str("--5").unwrap(), expected);

    let expected = Expression::unary(
        UnaryOperator::Plus,
        Expression::unary(UnaryOperator::Negate, lit(5.0)),
    );
    assert_eq!(parse_str("+-5").unwrap(), expected);
}

#[test]
fn parser_unary_binds_tighter_than_binary() {
    let expected = Expression::binary(
        Expression::unary(UnaryOperator::Negate, lit(5.0)),
        BinaryOperator::Add,
        lit(10.0),
    );
    assert_eq!(parse_str("-5 + 10").unwrap(), expected);

    let expected = Expression::binary(
        lit(10.0),
        BinaryOperator::Add,
        Expression::unary(UnaryOperator::Negate, lit(5.0)),
    );
    assert_eq!(parse_str("10 + -5").unwrap(), expected);
}

#[test]
fn parser_display_is_fully_parenthesized() {
    assert_eq!(parse_str("3 + 5 * 2").unwrap().to_string(), "(3.0 + (5.0 * 2.0))");
    assert_eq!(parse_str("-(1)").unwrap().to_string(), "(-1.0)");
}

#[test]
fn parser_accepts_tokens_without_end() {
    let tokens = vec![
        Token::number(1.0, 0),
        Token::new(TokenKind::Plus, 1),
        Token::number(2.0, 2),
    ];
    assert_eq!(
        parse(tokens).unwrap(),
        Expression::binary(lit(1.0), BinaryOperator::Add, lit(2.0))
    );
}

#[test]
fn expression_display_is_fully_parenthesized() {
    assert_eq!(parse_str("1 + 2 * -3").unwrap().to_string(), "(1.0 + (2.0 * (-3.0)))");
    assert_eq!(parse_str("-(4)").unwrap().to_string(), "(-4.0)");
    assert_eq!(lit(7.5).to_string(), "7.5");
}

#[test]
fn long_binary_chain_displays_and_drops() {
    // Left-deep tree with one level per term
    let input = vec!["1"; 100_001].join("+");
    let expr = parse_str(&input).unwrap();

    let text = expr.to_string();
    assert!(text.starts_with(&format!("{}1.0 + 1.0)", "(".repeat(100_000))));
    assert!(text.ends_with(") + 1.0)"));
    drop(expr);
}

// ========================================
// PARSER TESTS - ERRORS
// ========================================

#[test]
fn parser_rejects_empty_input() {
    assert_eq!(
        parse_error(""),
        ParseError::UnexpectedToken {
            position: 0,
            expected: Expected::Factor,
            found: TokenKind::End,
        }
    );
    assert!(matches!(
        parse(Vec::new()),
        Err(ParseError::UnexpectedToken { position: 0, .. })
    ));
}

#[test]
fn parser_rejects_missing_right_operand() {
    let err = parse_error("1 + ");
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            position: 4,
            expected: Expected::Factor,
            found: TokenKind::End,
        }
    );
    assert_eq!(err.expected(), Expected::Factor);
    assert_eq!(err.found(), TokenKind::End);
}

#[test]
fn parser_rejects_operator_in_factor_position() {
    assert_eq!(
        parse_error("*5"),
        ParseError::UnexpectedToken {
            position: 0,
            expected: Expected::Factor,
            found: TokenKind::Star,
        }
    );
    assert_eq!(parse_error("2 * / 3").found(), TokenKind::Slash);
    assert_eq!(parse_error("()").found(), TokenKind::RParen);
}

#[test]
fn parser_rejects_unclosed_parenthesis() {
    let err = parse_error("(1 + 2");
    assert_eq!(
        err,
        ParseError::UnbalancedParenthesis {
            position: 6,
            open_position: 0,
        }
    );
    assert_eq!(err.expected(), Expected::ClosingParen);
    assert_eq!(err.found(), TokenKind::End);

    assert!(matches!(
        parse_error("2 * ((1 + 2)"),
        ParseError::UnbalancedParenthesis { open_position: 4, .. }
    ));
}

#[test]
fn parser_rejects_junk_before_closing_parenthesis() {
    assert_eq!(
        parse_error("(1 2)"),
        ParseError::MissingClosingParen {
            position: 3,
            open_position: 0,
            found: TokenKind::Number,
        }
    );
}

#[test]
fn parser_rejects_trailing_input() {
    let err = parse_error("3 + 5)");
    assert_eq!(
        err,
        ParseError::TrailingInput {
            position: 5,
            found: TokenKind::RParen,
        }
    );
    assert_eq!(err.expected(), Expected::OperatorOrEnd);

    assert!(matches!(
        parse_error("1 2"),
        ParseError::TrailingInput { position: 2, found: TokenKind::Number }
    ));
}

#[test]
fn parser_names_missing_unary_operand() {
    assert_eq!(
        parse_error("3 + -"),
        ParseError::MissingOperand {
            position: 5,
            operator: UnaryOperator::Negate,
            operator_position: 4,
            found: TokenKind::End,
        }
    );
    assert_eq!(
        parse_error("(3 + -)"),
        ParseError::MissingOperand {
            position: 6,
            operator: UnaryOperator::Negate,
            operator_position: 5,
            found: TokenKind::RParen,
        }
    );
    assert!(matches!(
        parse_error("+"),
        ParseError::MissingOperand { operator: UnaryOperator::Plus, .. }
    ));
}

#[test]
fn parser_limits_parenthesis_nesting() {
    let input = format!("{}1{}", "(".repeat(300), ")".repeat(300));
    assert_eq!(
        parse_error(&input),
        ParseError::NestingTooDeep {
            position: 256,
            limit: 256,
            found: TokenKind::LParen,
        }
    );

    let ok = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(parse_str(&ok).unwrap(), lit(1.0));
}

#[test]
fn parser_limits_unary_nesting() {
    let input = format!("{}1", "-".repeat(300));
    assert!(matches!(
        parse_error(&input),
        ParseError::NestingTooDeep { limit: 256, .. }
    ));
}

#[test]
fn parser_honours_custom_depth_limit() {
    let mut parser = Parser::with_max_depth(tokenize("((1))").unwrap(), 2);
    assert_eq!(parser.parse().unwrap(), lit(1.0));

    let mut parser = Parser::with_max_depth(tokenize("(((1)))").unwrap(), 2);
    assert!(matches!(
        parser.parse(),
        Err(ParseError::NestingTooDeep { position: 2, limit: 2, .. })
    ));
}

#[test]
fn parse_str_reports_lex_errors() {
    assert!(matches!(
        parse_str("1 $ 2"),
        Err(SyntaxError::Lex(LexError { position: 2, character: '$', .. }))
    ));
}

#[test]
fn parse_error_messages_are_readable() {
    assert_eq!(
        parse_error("1 + ").to_string(),
        "expected a number, '(' or a sign at position 4, found end of input"
    );
    assert_eq!(
        parse_error("3 + 5)").to_string(),
        "unexpected ')' at position 5 after a complete expression"
    );
}
