use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn texts(source: &str) -> Vec<String> {
    tokenize(source).into_iter().map(|t| t.text(source).to_string()).collect()
}

#[test]
fn tokenizes_simple_declaration() {
    let toks = texts("export function foo(a: number): string {}");
    assert_eq!(
        toks,
        vec!["export", "function", "foo", "(", "a", ":", "number", ")", ":", "string", "{", "}", ""]
    );
}

#[test]
fn angle_brackets_are_single_char_punct() {
    let toks = texts("Map<string, Array<number>>");
    assert_eq!(toks, vec!["Map", "<", "string", ",", "Array", "<", "number", ">", ">", ""]);
}

#[test]
fn arrow_is_one_token() {
    let kinds = kinds("() => {}");
    assert_eq!(kinds, vec![TokenKind::Punct, TokenKind::Punct, TokenKind::Arrow, TokenKind::Punct, TokenKind::Punct, TokenKind::Eof]);
}

#[test]
fn dot_dot_dot_is_one_token() {
    let toks = texts("...rest");
    assert_eq!(toks[0], "...");
}

#[test]
fn question_dot_is_one_token_but_optional_dot_number_is_not() {
    assert_eq!(texts("a?.b")[1], "?.");
    // `a?.5` is ambiguous with a numeric member access in real TS grammar;
    // our heuristic treats a digit after `?.` as "not optional chaining" so
    // that conditional-expression number branches still scan correctly.
    let toks = texts("a ? .5 : 1");
    assert!(toks.contains(&".5".to_string()) || toks.contains(&".".to_string()));
}

#[test]
fn string_literal_is_consumed_whole_including_escapes() {
    let toks = tokenize(r#"const x = "a\"b";"#);
    let lit = toks.iter().find(|t| t.kind == TokenKind::StringLit).unwrap();
    assert_eq!(lit.text(r#"const x = "a\"b";"#), r#""a\"b""#);
}

#[test]
fn template_literal_with_nested_hole_is_one_token() {
    let src = "const x = `a${ `b${c}` }d`;";
    let toks = tokenize(src);
    let lit = toks.iter().find(|t| t.kind == TokenKind::TemplateLit).unwrap();
    assert_eq!(lit.text(src), "`a${ `b${c}` }d`");
}

#[test]
fn line_comment_becomes_leading_trivia_of_next_token() {
    let src = "// hi\nfoo";
    let toks = tokenize(src);
    let foo = toks.iter().find(|t| t.text(src) == "foo").unwrap();
    assert_eq!(foo.leading_trivia.slice(src), "// hi\n");
}

#[test]
fn block_comment_becomes_leading_trivia() {
    let src = "/* c */ foo";
    let toks = tokenize(src);
    let foo = toks.iter().find(|t| t.text(src) == "foo").unwrap();
    assert_eq!(foo.leading_trivia.slice(src), "/* c */ ");
}

#[test]
fn division_after_identifier_is_not_a_regex() {
    let src = "a / b / c";
    let toks = tokenize(src);
    // Each `/` should be its own single-char punct, not swallow the rest.
    let puncts: Vec<_> = toks.iter().filter(|t| t.kind == TokenKind::Punct).collect();
    assert_eq!(puncts.len(), 2);
}

#[test]
fn regex_after_return_is_a_regex_literal() {
    let src = "return /ab\\/c/g;";
    let toks = tokenize(src);
    // scanned as an opaque atom spanning the whole literal including flags
    let atom = toks.iter().find(|t| t.text(src).starts_with('/')).unwrap();
    assert_eq!(atom.text(src), "/ab\\/c/g");
}

#[test]
fn regex_after_closing_paren_is_division() {
    let src = "(a) / b";
    let toks = tokenize(src);
    let div_count = toks.iter().filter(|t| t.kind == TokenKind::Punct && t.text(src) == "/").count();
    assert_eq!(div_count, 1);
}

#[test]
fn strip_bom_removes_leading_marker() {
    let with_bom = "\u{feff}const x = 1;";
    assert_eq!(strip_bom(with_bom), "const x = 1;");
    assert_eq!(strip_bom("const x = 1;"), "const x = 1;");
}

#[test]
fn comment_inside_string_is_not_treated_as_trivia() {
    let src = r#"const x = "// not a comment";"#;
    let toks = tokenize(src);
    let lit = toks.iter().find(|t| t.kind == TokenKind::StringLit).unwrap();
    assert_eq!(lit.text(src), r#""// not a comment""#);
}

#[test]
fn empty_source_yields_only_eof() {
    let toks = tokenize("");
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Eof);
}

#[test]
fn numeric_literal_variants() {
    assert_eq!(texts("0x1F")[0], "0x1F");
    assert_eq!(texts("1_000")[0], "1_000");
    assert_eq!(texts("1.5e-10")[0], "1.5e-10");
    assert_eq!(texts("10n")[0], "10n");
}
