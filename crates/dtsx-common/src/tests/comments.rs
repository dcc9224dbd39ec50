use super::*;

#[test]
fn merges_contiguous_line_comments() {
    let source = "// a\n// b\nexport const x = 1;";
    let blocks = extract_comment_blocks(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, CommentBlockKind::Line);
    assert_eq!(blocks[0].text(source), "// a\n// b");
}

#[test]
fn blank_line_splits_line_comments_into_separate_blocks() {
    let source = "// a\n\n// b\nexport const x = 1;";
    let blocks = extract_comment_blocks(source);
    assert_eq!(blocks.len(), 2);
}

#[test]
fn jsdoc_is_detected() {
    let source = "/** doc */\nexport function f(): void {}";
    let blocks = extract_comment_blocks(source);
    assert_eq!(blocks[0].kind, CommentBlockKind::JsDoc);
}

#[test]
fn triple_slash_like_block_is_plain_block_not_jsdoc() {
    let source = "/*** not jsdoc */\nexport const x = 1;";
    let blocks = extract_comment_blocks(source);
    assert_eq!(blocks[0].kind, CommentBlockKind::Block);
}

#[test]
fn leading_blocks_attach_across_blank_lines() {
    let source = "// a\n\n\nexport const x = 1;";
    let decl_pos = source.find("export").unwrap() as u32;
    let blocks = extract_comment_blocks(source);
    let leading = leading_comment_blocks(source, decl_pos, &blocks);
    assert_eq!(leading.len(), 1);
}

#[test]
fn leading_blocks_stop_at_non_whitespace() {
    let source = "const y = 1;\n// a\nexport const x = 1;";
    let decl_pos = source.rfind("export").unwrap() as u32;
    let blocks = extract_comment_blocks(source);
    let leading = leading_comment_blocks(source, decl_pos, &blocks);
    assert_eq!(leading.len(), 1);
    assert_eq!(leading[0].text(source), "// a");
}

#[test]
fn comments_inside_string_literals_are_ignored() {
    let source = "export const x = \"// not a comment\";\nexport const y = 2;";
    let blocks = extract_comment_blocks(source);
    assert!(blocks.is_empty());
}

#[test]
fn comments_inside_template_holes_are_found() {
    let source = "const t = `${ /* inner */ 1}`;";
    let blocks = extract_comment_blocks(source);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, CommentBlockKind::Block);
}
