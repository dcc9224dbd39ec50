//! Recursive-descent, error-tolerant parser over the scanner's token stream.
//!
//! Only the shapes the extractor needs are modelled in full (signatures,
//! member lists, clause text); everything else — bodies, initializers,
//! decorators — is skipped structurally rather than parsed.

use crate::ast::*;
use crate::cursor::Cursor;
use dtsx_common::{CoreWarning, Span, messages};
use dtsx_scanner::{TokenKind, strip_bom, tokenize};

pub struct Parser<'a> {
    file_name: String,
    source: &'a str,
    pub warnings: Vec<CoreWarning>,
}

const MEMBER_MODIFIER_WORDS: &[&str] =
    &["public", "private", "protected", "static", "abstract", "readonly", "override", "declare"];

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, file_name: impl Into<String>) -> Self {
        Parser { file_name: file_name.into(), source, warnings: Vec::new() }
    }

    pub fn parse(mut self) -> (SourceFile<'a>, Vec<CoreWarning>) {
        let stripped = strip_bom(self.source);
        let tokens = tokenize(stripped);
        let mut cursor = Cursor::new(stripped, &tokens);
        let items = self.parse_items(&mut cursor, false);
        let file_name = self.file_name.clone();
        (SourceFile { source: stripped, file_name, items }, self.warnings)
    }

    fn warn(&mut self, span: Span, diagnostic: messages::DiagnosticMessage) {
        self.warnings.push(CoreWarning::new(self.file_name.clone(), span, diagnostic));
    }

    fn parse_items(&mut self, c: &mut Cursor<'a, '_>, in_module_body: bool) -> Vec<Item> {
        let mut items = Vec::new();
        loop {
            if c.is_eof() {
                break;
            }
            if in_module_body && c.is_punct('}') {
                break;
            }
            if c.eat_punct(';') {
                continue;
            }
            match self.parse_item(c) {
                Some(mut parsed) => items.append(&mut parsed),
                None => {
                    let span = Span::at(c.start_of_cur());
                    self.warn(span, messages::UNRECOGNISED_TOP_LEVEL_CONSTRUCT);
                    c.recover_to_next_boundary();
                }
            }
        }
        items
    }

    /// Parses one source-level statement, which may expand to more than one
    /// `Item` (multi-declarator `const`/`let`/`var`).
    fn parse_item(&mut self, c: &mut Cursor<'a, '_>) -> Option<Vec<Item>> {
        let start = c.start_of_cur();
        let mut is_exported = false;
        let mut is_default = false;
        let mut is_declare = false;

        if c.eat_word("export") {
            is_exported = true;
            if c.eat_word("default") {
                is_default = true;
                return Some(vec![self.parse_export_default(c, start)]);
            }
            if c.is_punct('*') || c.is_punct('{') || (c.is_word("type") && (c.is_punct_at(1, '{') || c.is_punct_at(1, '*'))) {
                return Some(vec![self.parse_export_list(c, start, is_exported)]);
            }
        }
        if c.eat_word("declare") {
            is_declare = true;
        }

        if c.is_word("import") && !is_exported {
            return Some(vec![self.parse_import(c, start)]);
        }
        if c.is_word("const") && c.is_word_at(1, "enum") {
            c.bump(); // "const"
            return Some(vec![self.parse_enum(c, start, is_exported, is_declare, true)]);
        }
        if c.is_word("enum") {
            return Some(vec![self.parse_enum(c, start, is_exported, is_declare, false)]);
        }
        if c.is_word("const") || c.is_word("let") || c.is_word("var") {
            return Some(self.parse_variable(c, start, is_exported, is_declare));
        }
        if c.is_word("async") && c.is_word_at(1, "function") {
            return Some(vec![self.parse_function(c, start, is_exported, is_default, is_declare)]);
        }
        if c.is_word("function") {
            return Some(vec![self.parse_function(c, start, is_exported, is_default, is_declare)]);
        }
        if c.is_word("interface") {
            return Some(vec![self.parse_interface(c, start, is_exported, is_declare)]);
        }
        if c.is_word("type") && !c.is_punct_at(1, '{') {
            return Some(vec![self.parse_type_alias(c, start, is_exported)]);
        }
        if c.is_word("abstract") && c.is_word_at(1, "class") {
            return Some(vec![self.parse_class(c, start, is_exported, is_default, is_declare)]);
        }
        if c.is_word("class") {
            return Some(vec![self.parse_class(c, start, is_exported, is_default, is_declare)]);
        }
        if (c.is_word("namespace") || c.is_word("module")) && !c.is_punct_at(1, '.') {
            return Some(vec![self.parse_module(c, start, is_exported, is_declare)]);
        }

        if is_exported || is_declare {
            // A modifier we recognised but whose following construct we do
            // not model; recover rather than silently drop the modifiers'
            // worth of position tracking.
            return None;
        }
        None
    }

    fn parse_export_default(&mut self, c: &mut Cursor<'a, '_>, start: u32) -> Item {
        if c.is_word("async") && c.is_word_at(1, "function") {
            return self.parse_function(c, start, true, true, false);
        }
        if c.is_word("function") {
            return self.parse_function(c, start, true, true, false);
        }
        if c.is_word("abstract") && c.is_word_at(1, "class") {
            return self.parse_class(c, start, true, true, false);
        }
        if c.is_word("class") {
            return self.parse_class(c, start, true, true, false);
        }
        let expr = c.capture_type_text(&[";"]);
        c.eat_punct(';');
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported: true,
            is_default: true,
            is_declare: false,
            kind: ItemKind::ExportDefaultExpr(expr.unwrap_or(Span::new(start, end))),
        }
    }

    fn parse_import(&mut self, c: &mut Cursor<'a, '_>, start: u32) -> Item {
        c.bump(); // "import"
        let mut is_type_only = false;
        if c.is_word("type") && !c.is_punct_at(1, ',') && !c.is_word_at(1, "from") {
            is_type_only = true;
            c.bump();
        }

        let mut specifiers = Vec::new();
        let mut is_side_effect = false;

        if c.peek().kind == TokenKind::StringLit {
            // `import "side-effect-module";`
            is_side_effect = true;
        } else {
            // default import
            if c.peek().kind == TokenKind::Word && !c.is_punct_at(1, '.') {
                let name_tok = c.bump();
                specifiers.push(ImportSpecifier { name: name_tok.span, alias: None, is_type: false });
                c.eat_punct(',');
            }
            if c.eat_punct('*') {
                c.eat_word("as");
                if c.peek().kind == TokenKind::Word {
                    let name_tok = c.bump();
                    specifiers.push(ImportSpecifier { name: name_tok.span, alias: None, is_type: false });
                }
            } else if c.eat_punct('{') {
                while !c.is_punct('}') && !c.is_eof() {
                    let mut spec_is_type = false;
                    if c.is_word("type") && !c.is_word_at(1, "as") && !c.is_punct_at(1, ',') && !c.is_punct_at(1, '}') {
                        spec_is_type = true;
                        c.bump();
                    }
                    let name = c.bump().span;
                    let alias = if c.eat_word("as") { Some(c.bump().span) } else { None };
                    specifiers.push(ImportSpecifier { name, alias, is_type: spec_is_type });
                    if !c.eat_punct(',') {
                        break;
                    }
                }
                c.eat_punct('}');
            }
        }

        if !is_side_effect {
            c.eat_word("from");
        }
        let source = if c.peek().kind == TokenKind::StringLit { c.bump().span } else { Span::dummy() };
        c.eat_punct(';');
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported: false,
            is_default: false,
            is_declare: false,
            kind: ItemKind::Import(ImportItem {
                raw: Span::new(start, end),
                is_type_only,
                is_side_effect,
                source,
                specifiers,
            }),
        }
    }

    fn parse_export_list(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool) -> Item {
        let mut is_type_only = false;
        if c.is_word("type") {
            is_type_only = true;
            c.bump();
        }
        let mut is_star = false;
        let mut star_alias = None;
        let mut specifiers = Vec::new();

        if c.eat_punct('*') {
            is_star = true;
            if c.eat_word("as") {
                star_alias = Some(c.bump().span);
            }
        } else if c.eat_punct('{') {
            while !c.is_punct('}') && !c.is_eof() {
                let mut spec_is_type = false;
                if c.is_word("type") && !c.is_word_at(1, "as") && !c.is_punct_at(1, ',') && !c.is_punct_at(1, '}') {
                    spec_is_type = true;
                    c.bump();
                }
                let name = c.bump().span;
                let alias = if c.eat_word("as") { Some(c.bump().span) } else { None };
                specifiers.push(ExportSpecifier { name, alias, is_type: spec_is_type });
                if !c.eat_punct(',') {
                    break;
                }
            }
            c.eat_punct('}');
        }

        let source = if c.eat_word("from") {
            if c.peek().kind == TokenKind::StringLit { Some(c.bump().span) } else { None }
        } else {
            None
        };
        c.eat_punct(';');
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default: false,
            is_declare: false,
            kind: ItemKind::ExportList(ExportListItem {
                raw: Span::new(start, end),
                is_type_only,
                source,
                is_star,
                star_alias,
                specifiers,
            }),
        }
    }

    fn parse_variable(&mut self, c: &mut Cursor<'a, '_>, stmt_start: u32, is_exported: bool, is_declare: bool) -> Vec<Item> {
        let binding_kind = match c.cur_text() {
            "const" => BindingKind::Const,
            "let" => BindingKind::Let,
            _ => BindingKind::Var,
        };
        c.bump();

        let mut items = Vec::new();
        let mut first = true;
        loop {
            let decl_start = if first { stmt_start } else { c.start_of_cur() };
            first = false;
            let name = c.capture_type_text(&[":", "=", ",", ";"]).unwrap_or(Span::dummy());
            let type_span = if c.eat_punct(':') { c.capture_type_text(&["=", ",", ";"]) } else { None };
            let initializer = if c.eat_punct('=') { c.capture_type_text(&[",", ";"]) } else { None };
            let end = c.end_of_prev_significant();
            items.push(Item {
                span: Span::new(decl_start, end),
                is_exported,
                is_default: false,
                is_declare,
                kind: ItemKind::Variable(VariableItem { binding_kind, name, type_span, initializer }),
            });
            if !c.eat_punct(',') {
                break;
            }
        }
        c.eat_punct(';');
        items
    }

    fn parse_generics(&mut self, c: &mut Cursor<'a, '_>) -> Option<Span> {
        c.capture_angle_list()
    }

    fn parse_params(&mut self, c: &mut Cursor<'a, '_>) -> Vec<Param> {
        let mut params = Vec::new();
        if !c.eat_punct('(') {
            return params;
        }
        while !c.is_punct(')') && !c.is_eof() {
            let mut modifiers = ParamModifiers::default();
            loop {
                if c.eat_word("public") {
                    modifiers.public = true;
                } else if c.eat_word("private") {
                    modifiers.private = true;
                } else if c.eat_word("protected") {
                    modifiers.protected = true;
                } else if c.eat_word("readonly") {
                    modifiers.readonly = true;
                } else {
                    break;
                }
            }
            let is_rest = if c.is_dot_dot_dot() {
                c.bump();
                true
            } else {
                false
            };
            let name = c.capture_type_text(&[":", "?", "=", ",", ")"]).unwrap_or(Span::dummy());
            let optional = c.eat_punct('?');
            let type_span = if c.eat_punct(':') { c.capture_type_text(&[",", "=", ")"]) } else { None };
            let has_default = if c.eat_punct('=') {
                c.capture_type_text(&[",", ")"]);
                true
            } else {
                false
            };
            params.push(Param { name, type_span, optional, has_default, is_rest, modifiers });
            if !c.eat_punct(',') {
                break;
            }
        }
        c.eat_punct(')');
        params
    }

    fn parse_return_type(&mut self, c: &mut Cursor<'a, '_>, stop_puncts: &[&str]) -> Option<Span> {
        if c.eat_punct(':') { c.capture_type_text(stop_puncts) } else { None }
    }

    fn parse_function(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool, is_default: bool, is_declare: bool) -> Item {
        let is_async = c.eat_word("async");
        c.eat_word("function");
        let is_generator = c.eat_punct('*');
        let name = if c.peek().kind == TokenKind::Word { Some(c.bump().span) } else { None };
        let generics = self.parse_generics(c);
        let params = self.parse_params(c);
        let return_type = self.parse_return_type(c, &["{", ";"]);
        if c.is_punct('{') {
            c.skip_brace_block();
        } else {
            c.eat_punct(';');
        }
        let end = c.end_of_prev_significant();
        if name.is_none() && !is_default {
            self.warn(Span::new(start, end), messages::FUNCTION_WITHOUT_NAME);
        }
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default,
            is_declare,
            kind: ItemKind::Function(FunctionItem { name, is_async, is_generator, generics, params, return_type }),
        }
    }

    fn parse_interface(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool, is_declare: bool) -> Item {
        c.bump(); // "interface"
        let name = if c.peek().kind == TokenKind::Word { c.bump().span } else { Span::dummy() };
        let generics = self.parse_generics(c);
        let extends = if c.eat_word("extends") { c.capture_clause(&[], &["{"]) } else { None };
        let members = self.parse_interface_members(c);
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default: false,
            is_declare,
            kind: ItemKind::Interface(InterfaceItem { name, generics, extends, members }),
        }
    }

    fn parse_member_name(&mut self, c: &mut Cursor<'a, '_>) -> Span {
        if c.is_punct('[') {
            c.capture_bracketed('[', ']').unwrap_or(Span::dummy())
        } else if !c.is_eof() {
            c.bump().span
        } else {
            Span::dummy()
        }
    }

    fn parse_interface_members(&mut self, c: &mut Cursor<'a, '_>) -> Vec<Member> {
        let mut members = Vec::new();
        if !c.eat_punct('{') {
            return members;
        }
        while !c.is_punct('}') && !c.is_eof() {
            if c.eat_punct(';') || c.eat_punct(',') {
                continue;
            }
            let member_start = c.start_of_cur();
            let readonly = if c.is_word("readonly") && !c.is_punct_at(1, ':') && !c.is_punct_at(1, '?') {
                c.bump();
                true
            } else {
                false
            };
            let kind = if c.is_punct('(') || c.is_punct('<') {
                let generics = self.parse_generics(c);
                let params = self.parse_params(c);
                let return_type = self.parse_return_type(c, &[";", ",", "}"]);
                MemberKind::CallSignature { generics, params, return_type }
            } else if c.is_word("new") && (c.is_punct_at(1, '(') || c.is_punct_at(1, '<')) {
                c.bump();
                let _generics = self.parse_generics(c);
                let params = self.parse_params(c);
                let return_type = self.parse_return_type(c, &[";", ",", "}"]);
                MemberKind::ConstructSignature { params, return_type }
            } else {
                let name = self.parse_member_name(c);
                let optional = c.eat_punct('?');
                if c.is_punct('(') || c.is_punct('<') {
                    let generics = self.parse_generics(c);
                    let params = self.parse_params(c);
                    let return_type = self.parse_return_type(c, &[";", ",", "}"]);
                    MemberKind::Method { name, optional, generics, params, return_type, is_generator: false, is_async: false }
                } else {
                    let type_span = if c.eat_punct(':') { c.capture_type_text(&[";", ",", "}"]) } else { None };
                    MemberKind::Property { name, optional, readonly, type_span }
                }
            };
            c.eat_punct(';');
            c.eat_punct(',');
            members.push(Member { span: Span::new(member_start, c.end_of_prev_significant()), kind });
        }
        c.eat_punct('}');
        members
    }

    fn parse_type_alias(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool) -> Item {
        c.bump(); // "type"
        let name = if c.peek().kind == TokenKind::Word { c.bump().span } else { Span::dummy() };
        let generics = self.parse_generics(c);
        c.eat_punct('=');
        let rhs = c.capture_type_text(&[";"]).unwrap_or(Span::new(c.start_of_cur(), c.start_of_cur()));
        c.eat_punct(';');
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default: false,
            is_declare: false,
            kind: ItemKind::TypeAlias(TypeAliasItem { name, generics, rhs }),
        }
    }

    fn parse_class(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool, is_default: bool, is_declare: bool) -> Item {
        let is_abstract = c.eat_word("abstract");
        c.eat_word("class");
        let name = if c.peek().kind == TokenKind::Word { Some(c.bump().span) } else { None };
        let generics = self.parse_generics(c);
        let extends = if c.eat_word("extends") { c.capture_clause(&["implements"], &["{"]) } else { None };
        let implements = if c.eat_word("implements") { c.capture_clause(&[], &["{"]) } else { None };
        let members = self.parse_class_members(c);
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default,
            is_declare,
            kind: ItemKind::Class(ClassItem { name, is_abstract, generics, extends, implements, members }),
        }
    }

    fn parse_member_modifiers(&mut self, c: &mut Cursor<'a, '_>) -> ClassMemberModifiers {
        let mut modifiers = ClassMemberModifiers::default();
        loop {
            let is_modifier_word = c.peek().kind == TokenKind::Word && MEMBER_MODIFIER_WORDS.contains(&c.cur_text());
            if !is_modifier_word {
                break;
            }
            // Don't consume a modifier keyword if it's actually the member's
            // own name (e.g. a method literally called `static`).
            if c.is_punct_at(1, '(') || c.is_punct_at(1, ':') || c.is_punct_at(1, '?') || c.is_punct_at(1, '=') || c.is_punct_at(1, ';') {
                break;
            }
            match c.cur_text() {
                "public" => modifiers.access = Some(AccessModifier::Public),
                "private" => modifiers.access = Some(AccessModifier::Private),
                "protected" => modifiers.access = Some(AccessModifier::Protected),
                "static" => modifiers.is_static = true,
                "abstract" => modifiers.is_abstract = true,
                "readonly" => modifiers.readonly = true,
                _ => {}
            }
            c.bump();
        }
        modifiers
    }

    fn parse_private_or_name(&mut self, c: &mut Cursor<'a, '_>) -> (Span, bool) {
        if c.is_punct('#') {
            let start = c.start_of_cur();
            c.bump();
            let end = if !c.is_eof() { c.bump().span.end } else { start };
            (Span::new(start, end), true)
        } else {
            (self.parse_member_name(c), false)
        }
    }

    fn parse_class_members(&mut self, c: &mut Cursor<'a, '_>) -> Vec<ClassMember> {
        let mut members = Vec::new();
        if !c.eat_punct('{') {
            return members;
        }
        while !c.is_punct('}') && !c.is_eof() {
            if c.eat_punct(';') {
                continue;
            }
            let member_start = c.start_of_cur();
            let modifiers = self.parse_member_modifiers(c);

            if modifiers.is_static && c.is_punct('{') {
                c.skip_brace_block();
                members.push(ClassMember {
                    span: Span::new(member_start, c.end_of_prev_significant()),
                    modifiers,
                    kind: ClassMemberKind::Erased,
                });
                continue;
            }

            let is_async = !c.is_punct_at(1, '(') && !c.is_punct_at(1, ':') && !c.is_punct_at(1, '?') && c.eat_word("async");
            let is_generator = c.eat_punct('*');

            let is_accessor = (c.is_word("get") || c.is_word("set"))
                && !c.is_punct_at(1, '(')
                && !c.is_punct_at(1, ':')
                && !c.is_punct_at(1, '?')
                && !c.is_punct_at(1, '=')
                && !c.is_punct_at(1, ';');

            let kind = if is_accessor {
                let is_setter = c.is_word("set");
                c.bump();
                let (name, is_private_name) = self.parse_private_or_name(c);
                let params = self.parse_params(c);
                let type_span = if !is_setter { self.parse_return_type(c, &["{", ";", "}"]) } else { None };
                if c.is_punct('{') {
                    c.skip_brace_block();
                } else {
                    c.eat_punct(';');
                }
                ClassMemberKind::Accessor { is_setter, name, params, type_span, is_private_name }
            } else {
                let (name, is_private_name) = self.parse_private_or_name(c);
                let name_text = if !is_private_name { name.slice(c.source) } else { "" };
                if !is_private_name && name_text == "constructor" {
                    let params = self.parse_params(c);
                    if c.is_punct('{') {
                        c.skip_brace_block();
                    } else {
                        c.eat_punct(';');
                    }
                    ClassMemberKind::Constructor { params }
                } else {
                    let optional = c.eat_punct('?');
                    if c.is_punct('(') || c.is_punct('<') {
                        let generics = self.parse_generics(c);
                        let params = self.parse_params(c);
                        let return_type = self.parse_return_type(c, &["{", ";", "}"]);
                        if c.is_punct('{') {
                            c.skip_brace_block();
                        } else {
                            c.eat_punct(';');
                        }
                        ClassMemberKind::Method {
                            name,
                            optional,
                            generics,
                            params,
                            return_type,
                            is_generator,
                            is_async,
                            is_private_name,
                        }
                    } else {
                        let type_span = if c.eat_punct(':') { c.capture_type_text(&[",", ";", "=", "}"]) } else { None };
                        if c.eat_punct('=') {
                            c.capture_type_text(&[";", "}"]);
                        }
                        c.eat_punct(';');
                        c.eat_punct(',');
                        ClassMemberKind::Property { name, optional, type_span, is_private_name }
                    }
                }
            };
            members.push(ClassMember { span: Span::new(member_start, c.end_of_prev_significant()), modifiers, kind });
        }
        c.eat_punct('}');
        members
    }

    fn parse_enum(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool, is_declare: bool, is_const: bool) -> Item {
        c.bump(); // "enum"
        let name = if c.peek().kind == TokenKind::Word { c.bump().span } else { Span::dummy() };
        let mut members = Vec::new();
        if c.eat_punct('{') {
            while !c.is_punct('}') && !c.is_eof() {
                let member_name = c.capture_type_text(&["=", ",", "}"]).unwrap_or(Span::dummy());
                let initializer = if c.eat_punct('=') { c.capture_type_text(&[",", "}"]) } else { None };
                members.push(EnumMember { name: member_name, initializer });
                if !c.eat_punct(',') {
                    break;
                }
            }
            c.eat_punct('}');
        }
        c.eat_punct(';');
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default: false,
            is_declare,
            kind: ItemKind::Enum(EnumItem { name, is_const, members }),
        }
    }

    fn parse_module(&mut self, c: &mut Cursor<'a, '_>, start: u32, is_exported: bool, is_declare: bool) -> Item {
        c.bump(); // "namespace" | "module"
        let (name, is_string_name) = if c.peek().kind == TokenKind::StringLit {
            (c.bump().span, true)
        } else if c.peek().kind == TokenKind::Word {
            (c.bump().span, false)
        } else {
            (Span::dummy(), false)
        };
        let body = if c.eat_punct('{') {
            let body = self.parse_items(c, true);
            c.eat_punct('}');
            body
        } else {
            c.eat_punct(';');
            Vec::new()
        };
        let end = c.end_of_prev_significant();
        Item {
            span: Span::new(start, end),
            is_exported,
            is_default: false,
            is_declare,
            kind: ItemKind::Module(ModuleItem { name, is_string_name, body }),
        }
    }
}

pub fn parse<'a>(source: &'a str, file_name: impl Into<String>) -> (SourceFile<'a>, Vec<CoreWarning>) {
    Parser::new(source, file_name).parse()
}
