use crate::lexer::{GHERKIN_KEYWORDS, HEADER_KEYWORDS, Lexeme, TokenKind, scan};

fn kinds(src: &str, table: &crate::lexer::KeywordTable) -> Vec<TokenKind> {
    scan(src, table).into_iter().map(|t| t.kind).collect()
}

#[test]
fn feature_line_captures_title() {
    let tokens = scan("Feature: tuples", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].kind, TokenKind::Feature);
    assert_eq!(tokens[1].kind, TokenKind::Str);
    assert_eq!(tokens[1].title(), Some("tuples"));
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn scenario_title_keeps_raw_punctuation() {
    // The rest of the line is captured verbatim; the `=` never becomes a
    // token of its own.
    let tokens = scan("Scenario: point has w=1", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].kind, TokenKind::Scenario);
    assert_eq!(tokens[1].title(), Some("point has w=1"));
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn scenario_outline_wins_over_scenario() {
    let tokens = scan("Scenario Outline: cases", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].kind, TokenKind::ScenarioOutline);
    assert_eq!(tokens[1].title(), Some("cases"));
}

#[test]
fn dotted_access_splits_at_scan_time() {
    let tokens = scan("p1.x = 4.5", GHERKIN_KEYWORDS);
    let expected = [
        TokenKind::Identifier,
        TokenKind::Dot,
        TokenKind::Identifier,
        TokenKind::Equality,
        TokenKind::Number,
        TokenKind::Eof,
    ];
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        expected
    );
    assert_eq!(tokens[0].ident(), Some("p1"));
    assert_eq!(tokens[2].ident(), Some("x"));
    assert_eq!(tokens[4].number(), Some(4.5));
}

#[test]
fn numbers_parse_as_doubles() {
    let tokens = scan("4 -4.5 0.25", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].number(), Some(4.0));
    assert_eq!(tokens[1].kind, TokenKind::Minus);
    assert_eq!(tokens[2].number(), Some(4.5));
    assert_eq!(tokens[3].number(), Some(0.25));
}

#[test]
fn math_symbols_tokenise() {
    assert_eq!(
        kinds("x ← √2 * π", GHERKIN_KEYWORDS),
        [
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Root,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::Pi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn hash_comments_run_to_end_of_line() {
    let tokens = scan("# a comment\nGiven x", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].kind, TokenKind::Given);
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens[1].ident(), Some("x"));
}

#[test]
fn pipe_rows_tokenise_without_crashing() {
    let tokens = scan("| 1 | 2 |", GHERKIN_KEYWORDS);
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        [
            TokenKind::Pipe,
            TokenKind::Number,
            TokenKind::Pipe,
            TokenKind::Number,
            TokenKind::Pipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn eof_lands_on_the_line_after_the_last() {
    let tokens = scan("Given x", GHERKIN_KEYWORDS);
    assert_eq!(tokens.last().map(|t| t.line), Some(2));
}

#[test]
fn single_char_keywords_break_words() {
    let tokens = scan("origin;", HEADER_KEYWORDS);
    assert_eq!(tokens[0].ident(), Some("origin"));
    assert_eq!(tokens[1].kind, TokenKind::Semicolon);
}

#[test]
fn step_keywords_require_their_trailing_space() {
    // `Given` with no trailing space is just an identifier.
    let tokens = scan("Given", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].ident(), Some("Given"));
}

#[test]
fn header_class_line_tokenises() {
    assert_eq!(
        kinds("class Sphere : public Shape {", HEADER_KEYWORDS),
        [
            TokenKind::Class,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Public,
            TokenKind::Identifier,
            TokenKind::LeftBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn header_pointer_declaration_tokenises() {
    assert_eq!(
        kinds("const Tuple *origin;", HEADER_KEYWORDS),
        [
            TokenKind::Const,
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn header_line_comments_are_skipped() {
    let tokens = scan("// copyright\nclass A { };", HEADER_KEYWORDS);
    assert_eq!(tokens[0].kind, TokenKind::Class);
    assert_eq!(tokens[0].line, 2);
}

#[test]
fn destructor_name_stays_one_identifier() {
    let tokens = scan("~Sphere();", HEADER_KEYWORDS);
    assert_eq!(tokens[0].ident(), Some("~Sphere"));
    assert_eq!(tokens[1].kind, TokenKind::LeftParen);
}

#[test]
fn token_display_includes_lexemes() {
    let tokens = scan("p1 = 4", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].to_string(), "IDENTIFIER: p1");
    assert_eq!(tokens[1].to_string(), "EQUALITY");
    assert_eq!(tokens[2].to_string(), "NUMBER: 4.0");
}

#[test]
fn keywords_carry_no_lexeme() {
    let tokens = scan("Given x", GHERKIN_KEYWORDS);
    assert_eq!(tokens[0].lexeme, Lexeme::None);
}
