//! Canonical `.d.ts` rendering (§4.4) and module assembly (§4.5).
//!
//! Each `Declaration` renders independently of its siblings; the only
//! cross-declaration state is the emission context (top level, inside a
//! namespace, inside a string-named ambient module), which decides whether
//! `declare` is synthesised. Interfaces and type aliases never carry it.

use crate::options::EmitOptions;
use crate::writer::SourceWriter;
use dtsx_extractor::{
    AccessModifier, BindingKind, ClassDecl, DeclKind, Declaration, EnumDecl, ExportDecl, ExportSpecifiers,
    FunctionDecl, InterfaceDecl, MemberDecl, MemberKind, MemberModifiers, ParamDecl, TypeAliasDecl, VariableDecl,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Context {
    TopLevel,
    InsideNamespace,
    InsideAmbientModule,
}

impl Context {
    fn declare_prefix(self) -> &'static str {
        match self {
            Context::InsideAmbientModule => "",
            Context::TopLevel | Context::InsideNamespace => "declare ",
        }
    }
}

fn export_prefix(is_exported: bool) -> &'static str {
    if is_exported { "export " } else { "" }
}

/// Assembles the final `.d.ts` text: imports first (source order), then
/// every other declaration in source order, separated per `keep_comments`,
/// with a trailing newline.
#[tracing::instrument(level = "debug", skip(declarations, options))]
pub fn emit(declarations: &[Declaration<'_>], options: EmitOptions) -> String {
    let (imports, rest): (Vec<&Declaration<'_>>, Vec<&Declaration<'_>>) =
        declarations.iter().partition(|d| matches!(d.kind, DeclKind::Import(_)));

    let rendered: Vec<String> = imports
        .into_iter()
        .chain(rest)
        .filter(|d| !is_malformed(d))
        .map(|d| render_declaration_with_comments(d, Context::TopLevel, options))
        .collect();

    tracing::debug!(count = rendered.len(), "assembled declaration output");

    let separator = if options.keep_comments { "\n\n" } else { "\n" };
    let mut out = rendered.join(separator);
    out.push('\n');
    out
}

fn is_malformed(decl: &Declaration<'_>) -> bool {
    match &decl.kind {
        DeclKind::Import(_) | DeclKind::Export(_) | DeclKind::ExportDefaultExpr(_) => false,
        _ => decl.name.is_empty(),
    }
}

fn render_declaration_with_comments<'a>(decl: &Declaration<'a>, ctx: Context, options: EmitOptions) -> String {
    let body = decl.text_or_init(|| render_kind(decl, ctx, options));
    if !options.keep_comments || decl.leading_comments.is_empty() {
        return body.to_string();
    }
    let mut s = String::new();
    for (i, comment) in decl.leading_comments.iter().enumerate() {
        if i > 0 {
            s.push('\n');
            s.push('\n');
        }
        s.push_str(comment);
    }
    s.push('\n');
    s.push_str(body);
    s
}

fn render_kind<'a>(decl: &Declaration<'a>, ctx: Context, options: EmitOptions) -> String {
    match &decl.kind {
        DeclKind::Import(imp) => imp.raw_text.to_string(),
        DeclKind::Export(e) => render_export(e),
        DeclKind::ExportDefaultExpr(text) => format!("export default {text};"),
        DeclKind::Variable(v) => render_variable(decl.name, v, ctx, decl.is_exported),
        DeclKind::Function(f) => render_function(decl.name, f, ctx, decl.is_exported),
        DeclKind::Interface(i) => render_interface(decl.name, i, decl.is_exported),
        DeclKind::TypeAlias(t) => render_type_alias(decl.name, t, decl.is_exported),
        DeclKind::Class(c) => render_class(decl.name, c, ctx, decl.is_exported),
        DeclKind::Enum(e) => render_enum(decl.name, e, ctx, decl.is_exported),
        DeclKind::Module(m) => render_module(decl.name, m.is_string_name, &m.body, ctx, decl.is_exported, options),
    }
}

fn render_export(e: &ExportDecl<'_>) -> String {
    let mut s = String::from("export ");
    if e.is_type_only {
        s.push_str("type ");
    }
    match &e.specifiers {
        ExportSpecifiers::Star { alias } => {
            s.push('*');
            if let Some(alias) = alias {
                s.push_str(" as ");
                s.push_str(alias);
            }
        }
        ExportSpecifiers::List(items) => {
            s.push_str("{ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    s.push_str(", ");
                }
                if item.is_type {
                    s.push_str("type ");
                }
                s.push_str(item.name);
                if let Some(alias) = item.alias {
                    s.push_str(" as ");
                    s.push_str(alias);
                }
            }
            s.push_str(" }");
        }
    }
    if let Some(source) = e.source {
        s.push_str(" from ");
        s.push_str(source);
    }
    s.push(';');
    s
}

fn variable_type_fallback(initializer: Option<&str>) -> &'static str {
    let Some(initializer) = initializer else {
        return "any";
    };
    let trimmed = initializer.trim();
    if trimmed.starts_with('"') || trimmed.starts_with('\'') || trimmed.starts_with('`') {
        return "string";
    }
    if trimmed == "true" || trimmed == "false" {
        return "boolean";
    }
    let first = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if first.starts_with(|c: char| c.is_ascii_digit()) {
        return "number";
    }
    "any"
}

fn render_variable(name: &str, v: &VariableDecl<'_>, ctx: Context, is_exported: bool) -> String {
    let kind = match v.binding_kind {
        BindingKind::Const => "const",
        BindingKind::Let => "let",
        BindingKind::Var => "var",
    };
    let owned_fallback;
    let ty = match v.type_annotation {
        Some(t) => t,
        None => {
            owned_fallback = variable_type_fallback(v.initializer_source);
            owned_fallback
        }
    };
    format!("{}{}{} {}: {};", export_prefix(is_exported), ctx.declare_prefix(), kind, name, ty)
}

fn render_params(params: &[ParamDecl<'_>]) -> String {
    params.iter().map(render_param).collect::<Vec<_>>().join(", ")
}

fn render_param(p: &ParamDecl<'_>) -> String {
    let mut s = String::new();
    if p.is_rest {
        s.push_str("...");
        s.push_str(p.name);
    } else if p.name.starts_with('{') || p.name.starts_with('[') {
        s.push_str(&render_destructured_name(p.name));
        if p.optional || p.has_default {
            s.push('?');
        }
    } else {
        s.push_str(p.name);
        if p.optional || p.has_default {
            s.push('?');
        }
    }
    if let Some(t) = p.type_annotation {
        s.push_str(": ");
        s.push_str(t);
    }
    s
}

/// Strips default-value expressions from a destructuring pattern (identifiers
/// only survive into a declaration); patterns with more than three bindings
/// spread across indented lines for readability.
fn render_destructured_name(name: &str) -> String {
    let (open, close) = if name.starts_with('{') { ('{', '}') } else { ('[', ']') };
    let inner = name.strip_prefix(open).and_then(|s| s.strip_suffix(close)).unwrap_or(name);
    let entries: Vec<&str> =
        split_top_level(inner, ',').into_iter().map(|e| e.split('=').next().unwrap_or(e).trim()).filter(|e| !e.is_empty()).collect();
    if entries.len() <= 3 {
        return format!("{open}{}{close}", entries.join(", "));
    }
    let mut s = String::new();
    s.push(open);
    s.push('\n');
    for entry in &entries {
        s.push_str("    ");
        s.push_str(entry);
        s.push_str(",\n");
    }
    s.push(close);
    s
}

fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth -= 1,
            c if c == sep && depth == 0 => {
                out.push(&s[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    out.push(&s[start..]);
    out
}

fn render_function(name: &str, f: &FunctionDecl<'_>, ctx: Context, is_exported: bool) -> String {
    let mut s = String::new();
    s.push_str(export_prefix(is_exported));
    s.push_str(ctx.declare_prefix());
    s.push_str("function ");
    s.push_str(name);
    if let Some(g) = f.generics {
        s.push_str(g);
    }
    s.push('(');
    s.push_str(&render_params(&f.parameters));
    s.push_str("): ");
    s.push_str(f.return_type);
    s.push(';');
    s
}

/// Joins already-rendered member/body lines into `{ FIRST\n  SECOND ... }`:
/// the first member shares the opening brace's line, later members each take
/// their own two-space-indented line, and the closing brace attaches directly
/// to the last member rather than starting a line of its own.
fn join_braced(members: &[String]) -> String {
    if members.is_empty() {
        return "{}".to_string();
    }
    let mut w = SourceWriter::new();
    w.write("{ ");
    w.increase_indent();
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            w.write_line();
        }
        let mut lines = member.split('\n');
        if let Some(first) = lines.next() {
            w.write(first);
        }
        for line in lines {
            w.write_line();
            w.write(line);
        }
    }
    w.decrease_indent();
    w.write(" }");
    w.into_output()
}

fn render_interface(name: &str, i: &InterfaceDecl<'_>, is_exported: bool) -> String {
    let mut s = String::new();
    s.push_str(export_prefix(is_exported));
    s.push_str("interface ");
    s.push_str(name);
    if let Some(g) = i.generics {
        s.push_str(g);
    }
    if let Some(e) = i.extends {
        s.push_str(" extends ");
        s.push_str(e);
    }
    s.push(' ');
    let members: Vec<String> = i.members.iter().map(render_interface_member).collect();
    s.push_str(&join_braced(&members));
    s
}

fn render_interface_member(m: &MemberDecl<'_>) -> String {
    match &m.kind {
        MemberKind::Property { name, optional, type_annotation } => {
            let mut s = String::new();
            if m.modifiers.readonly {
                s.push_str("readonly ");
            }
            s.push_str(name);
            if *optional {
                s.push('?');
            }
            s.push_str(": ");
            s.push_str(type_annotation.unwrap_or("any"));
            s.push(';');
            s
        }
        MemberKind::Method { name, optional, generics, parameters, return_type, .. } => {
            let mut s = String::new();
            s.push_str(name);
            if *optional {
                s.push('?');
            }
            if let Some(g) = generics {
                s.push_str(g);
            }
            s.push('(');
            s.push_str(&render_params(parameters));
            s.push_str("): ");
            s.push_str(return_type);
            s.push(';');
            s
        }
        MemberKind::CallSignature { generics, parameters, return_type } => {
            let mut s = String::new();
            if let Some(g) = generics {
                s.push_str(g);
            }
            s.push('(');
            s.push_str(&render_params(parameters));
            s.push_str("): ");
            s.push_str(return_type);
            s.push(';');
            s
        }
        MemberKind::ConstructSignature { parameters, return_type } => {
            let mut s = String::from("new (");
            s.push_str(&render_params(parameters));
            s.push_str("): ");
            s.push_str(return_type);
            s.push(';');
            s
        }
        MemberKind::Accessor { .. } | MemberKind::Constructor { .. } => {
            unreachable!("interface members are never accessors or constructors")
        }
    }
}

fn render_type_alias(name: &str, t: &TypeAliasDecl<'_>, is_exported: bool) -> String {
    let mut s = String::new();
    s.push_str(export_prefix(is_exported));
    s.push_str("type ");
    s.push_str(name);
    if let Some(g) = t.generics {
        s.push_str(g);
    }
    s.push_str(" = ");
    s.push_str(t.rhs);
    s.push(';');
    s
}

fn render_class(name: &str, c: &ClassDecl<'_>, ctx: Context, is_exported: bool) -> String {
    let mut s = String::new();
    s.push_str(export_prefix(is_exported));
    s.push_str(ctx.declare_prefix());
    if c.is_abstract {
        s.push_str("abstract ");
    }
    s.push_str("class ");
    s.push_str(name);
    if let Some(g) = c.generics {
        s.push_str(g);
    }
    if let Some(e) = c.extends {
        s.push_str(" extends ");
        s.push_str(e);
    }
    if let Some(im) = c.implements {
        s.push_str(" implements ");
        s.push_str(im);
    }
    s.push(' ');
    let members: Vec<String> = c.members.iter().map(render_class_member).collect();
    s.push_str(&join_braced(&members));
    s
}

fn class_member_prefix(m: &MemberModifiers, include_readonly: bool) -> String {
    let mut s = String::new();
    if m.is_static {
        s.push_str("static ");
    }
    if m.is_abstract {
        s.push_str("abstract ");
    }
    if include_readonly && m.readonly {
        s.push_str("readonly ");
    }
    match m.access {
        Some(AccessModifier::Private) => s.push_str("private "),
        Some(AccessModifier::Protected) => s.push_str("protected "),
        Some(AccessModifier::Public) => s.push_str("public "),
        None => {}
    }
    s
}

fn render_class_member(m: &MemberDecl<'_>) -> String {
    match &m.kind {
        MemberKind::Property { name, optional, type_annotation } => {
            let mut s = class_member_prefix(&m.modifiers, true);
            s.push_str(name);
            if *optional {
                s.push('?');
            }
            s.push_str(": ");
            s.push_str(type_annotation.unwrap_or("any"));
            s.push(';');
            s
        }
        MemberKind::Method { name, optional, generics, parameters, return_type, .. } => {
            let mut s = class_member_prefix(&m.modifiers, false);
            s.push_str(name);
            if *optional {
                s.push('?');
            }
            if let Some(g) = generics {
                s.push_str(g);
            }
            s.push('(');
            s.push_str(&render_params(parameters));
            s.push_str("): ");
            s.push_str(return_type);
            s.push(';');
            s
        }
        MemberKind::Accessor { is_setter, name, parameters, type_annotation } => {
            let mut s = class_member_prefix(&m.modifiers, false);
            s.push_str(if *is_setter { "set " } else { "get " });
            s.push_str(name);
            s.push('(');
            s.push_str(&render_params(parameters));
            s.push(')');
            if !*is_setter {
                s.push_str(": ");
                s.push_str(type_annotation.unwrap_or("any"));
            }
            s.push(';');
            s
        }
        MemberKind::Constructor { parameters } => format!("constructor({});", render_params(parameters)),
        MemberKind::CallSignature { .. } | MemberKind::ConstructSignature { .. } => {
            unreachable!("class members are never call/construct signatures")
        }
    }
}

fn render_enum(name: &str, e: &EnumDecl<'_>, ctx: Context, is_exported: bool) -> String {
    let mut s = String::new();
    s.push_str(export_prefix(is_exported));
    s.push_str(ctx.declare_prefix());
    if e.is_const {
        s.push_str("const ");
    }
    s.push_str("enum ");
    s.push_str(name);
    s.push(' ');
    let members: Vec<String> = e
        .members
        .iter()
        .map(|m| match m.initializer {
            Some(init) => format!("{} = {},", m.name, init),
            None => format!("{},", m.name),
        })
        .collect();
    s.push_str(&join_braced(&members));
    s
}

fn render_module<'a>(
    name: &str,
    is_string_name: bool,
    body: &[Declaration<'a>],
    ctx: Context,
    is_exported: bool,
    options: EmitOptions,
) -> String {
    let child_ctx = if is_string_name { Context::InsideAmbientModule } else { Context::InsideNamespace };
    let members: Vec<String> = body
        .iter()
        .filter(|d| !is_malformed(d))
        .map(|d| render_declaration_with_comments(d, child_ctx, options))
        .collect();
    let keyword = if is_string_name { "module" } else { "namespace" };
    let mut s = String::new();
    s.push_str(export_prefix(is_exported));
    s.push_str(ctx.declare_prefix());
    s.push_str(keyword);
    s.push(' ');
    s.push_str(name);
    s.push(' ');
    s.push_str(&join_braced(&members));
    s
}

#[cfg(test)]
#[path = "tests/emit.rs"]
mod tests;
