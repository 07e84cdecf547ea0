use conf2xml::{lex, parse_document, parse_source, ParseErrorKind, Value};

#[test]
fn parse_constant_reference() {
    let values = parse_source("var PI 3.14 @(PI)").unwrap();
    assert_eq!(values, vec![Value::Number(3.14)]);
}

#[test]
fn declaration_produces_no_output() {
    assert_eq!(parse_source("var PI 3.14").unwrap(), Vec::<Value>::new());
}

#[test]
fn parse_constant_inside_mapping() {
    let values = parse_source(
        r#"
        var URL "example.com"
        $[server: @(URL), port: 80.0]
        "#,
    )
    .unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].get("server"), Some(&Value::from("example.com")));
    assert_eq!(values[0].get("port"), Some(&Value::Number(80.0)));
}

#[test]
fn constant_bound_to_mapping_and_reference() {
    let values = parse_source(
        r#"
        var DB $[host: "localhost", port: 5432.0]
        var PRIMARY @(DB)
        $[primary: @(PRIMARY), replica: @(DB)]
        "#,
    )
    .unwrap();
    let top = &values[0];
    assert_eq!(top.get("primary"), top.get("replica"));
    assert_eq!(
        top.get("primary").and_then(|v| v.get("host")),
        Some(&Value::from("localhost"))
    );
}

#[test]
fn redeclaration_does_not_change_earlier_references() {
    let values = parse_source("var X 1.0 @(X) var X 2.0 @(X)").unwrap();
    assert_eq!(values, vec![Value::Number(1.0), Value::Number(2.0)]);
}

#[test]
fn resolved_copies_are_independent() {
    let doc = parse_document(&lex(r#"var S $[a: "x"] @(S) @(S)"#).unwrap()).unwrap();
    let mut values = doc.values;
    values[0]
        .as_mapping_mut()
        .unwrap()
        .insert("b".into(), Value::Number(1.0));

    assert_eq!(values[0].as_mapping().unwrap().len(), 2);
    assert_eq!(values[1].as_mapping().unwrap().len(), 1);
    assert_eq!(doc.constants.get("S").unwrap().as_mapping().unwrap().len(), 1);
}

#[test]
fn document_exposes_constants() {
    let doc = parse_document(&lex("var A 1.0 var B \"b\" var A 3.0").unwrap()).unwrap();
    assert!(doc.values.is_empty());
    assert_eq!(doc.constants.len(), 2);
    assert_eq!(doc.constants.get("A"), Some(&Value::Number(3.0)));
}

#[test]
fn error_unknown_constant() {
    let err = conf2xml::parse(&lex("@(UNKNOWN)").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownConstant("UNKNOWN".into()));
    assert_eq!((err.line(), err.column()), (1, 3));
}

#[test]
fn error_constant_used_before_declaration() {
    let err = conf2xml::parse(&lex("@(X) var X 1.0").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownConstant("X".into()));
}

#[test]
fn error_missing_close_paren() {
    let err = conf2xml::parse(&lex("var X 1.0 @(X 2.0").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingCloseParen);
    assert_eq!(err.column(), 15);
}

#[test]
fn error_var_without_name() {
    let err = conf2xml::parse(&lex("var 1.0").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ExpectedIdentifier);

    let err = conf2xml::parse(&lex("@(\"X\")").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::ExpectedIdentifier);
}

#[test]
fn error_var_without_value() {
    let err = conf2xml::parse(&lex("var X").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidValue);
}

#[test]
fn error_nested_declaration_is_not_a_value() {
    let err = conf2xml::parse(&lex("$[a: var X 1.0]").unwrap()).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    assert_eq!(err.column(), 6);
}
