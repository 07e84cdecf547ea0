use conf2xml::{lex, LexError, LexErrorKind, TokenKind};

fn kinds(src: &str) -> Result<Vec<TokenKind>, LexError> {
    Ok(lex(src)?.into_iter().map(|t| t.kind).collect())
}

fn texts(src: &str) -> Vec<String> {
    lex(src).unwrap().into_iter().map(|t| t.text).collect()
}

#[test]
fn lex_var_and_ident() {
    let tokens = lex("var x").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[0].text, "var");
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].text, "x");
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn lex_var_only_as_whole_word() {
    let ks = kinds("var variable _var var1 varx").unwrap();
    assert_eq!(
        ks,
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
    assert_eq!(texts("variable"), vec!["variable", ""]);
}

#[test]
fn lex_empty_input_is_just_eof() {
    let tokens = lex("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].text, "");
    assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
}

#[test]
fn lex_string_verbatim() {
    let tokens = lex(r#""hello""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "hello");
}

#[test]
fn lex_string_has_no_escapes_and_may_span_lines() {
    assert_eq!(texts("\"a\\nb\""), vec!["a\\nb", ""]);
    let tokens = lex("\"one\ntwo\" x").unwrap();
    assert_eq!(tokens[0].text, "one\ntwo");
    assert_eq!((tokens[1].line(), tokens[1].column()), (2, 6));
}

#[test]
fn lex_numbers() {
    let tokens = lex("3.14 .5 0.0 10.25").unwrap();
    let nums: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(nums, vec!["3.14", ".5", "0.0", "10.25"]);
}

#[test]
fn lex_mapping_tokens() {
    let tokens = lex(r#"$[key "value"]"#).unwrap();
    assert_eq!(tokens[0].text, "$[");
    assert_eq!(tokens[1].text, "key");
    assert_eq!(tokens[2].text, "value");
    assert_eq!(tokens[3].kind, TokenKind::CloseBracket);
}

#[test]
fn lex_punctuations() {
    let ks = kinds("@( $[ ] : , ( )").unwrap();
    assert_eq!(
        ks,
        vec![
            TokenKind::OpenConstRef,
            TokenKind::OpenMapping,
            TokenKind::CloseBracket,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn lex_constant_declaration_and_reference() {
    assert_eq!(
        texts("var PI 3.14 @(PI)"),
        vec!["var", "PI", "3.14", "@(", "PI", ")", ""]
    );
}

#[test]
fn skip_block_comment() {
    assert_eq!(kinds("=begin anything here =cut var x"), kinds("var x"));
}

#[test]
fn skip_comment_whitespace_comment_sequence() {
    let ks = kinds("=begin a =cut\n  =begin b =cut x").unwrap();
    assert_eq!(ks, vec![TokenKind::Ident, TokenKind::Eof]);
}

#[test]
fn comment_advances_line_numbers() {
    let tokens = lex("=begin\none\ntwo\n=cut x").unwrap();
    assert_eq!((tokens[0].line(), tokens[0].column()), (4, 6));
}

#[test]
fn span_line_col_across_newline() {
    let tokens = lex("var\n  x").unwrap();
    assert_eq!((tokens[0].line(), tokens[0].column()), (1, 1));
    assert_eq!((tokens[1].line(), tokens[1].column()), (2, 3));
    assert_eq!((tokens[2].line(), tokens[2].column()), (2, 4));
}

#[test]
fn columns_count_chars_not_bytes() {
    let tokens = lex("\"ö\" x").unwrap();
    assert_eq!(tokens[1].column(), 5);
    assert_eq!(tokens[1].span.start, 5);
}

#[test]
fn error_bare_integer() {
    let err = lex("42").expect_err("integers need a fractional part");
    assert_eq!(err.kind, LexErrorKind::InvalidNumber);
    assert_eq!((err.line(), err.column()), (1, 1));
}

#[test]
fn error_missing_fraction_digits() {
    let err = lex("x 3.").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidNumber);
    assert_eq!(err.column(), 3);
}

#[test]
fn error_unexpected_char() {
    let err = lex("x\n @").expect_err("should fail on illegal character");
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('@'));
    assert_eq!(err.code(), "UnexpectedChar");
    assert_eq!((err.line(), err.column()), (2, 2));
}

#[test]
fn error_lone_dollar_and_dot() {
    assert_eq!(lex("$").unwrap_err().kind, LexErrorKind::UnexpectedChar('$'));
    assert_eq!(lex(". 5").unwrap_err().kind, LexErrorKind::UnexpectedChar('.'));
}

#[test]
fn error_unterminated_string() {
    let err = lex("  \"abc").expect_err("should fail on unterminated string");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!((err.line(), err.column()), (1, 3));
}

#[test]
fn error_unterminated_comment() {
    let err = lex("var x =begin never closed").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    assert_eq!(err.column(), 7);
}
