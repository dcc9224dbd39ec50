//! Extraction (§4.3): converts the parser's tolerant syntax tree into the
//! Declaration IR, then widens the result by the reference closure (§4.3.1).

use crate::declaration::{
    AccessModifier, ClassDecl, DeclKind, Declaration, EnumDecl, EnumMemberDecl, ExportDecl, ExportSpecifierDecl,
    ExportSpecifiers, FunctionDecl, ImportDecl, ImportSpecifierDecl, InterfaceDecl, MemberDecl, MemberKind,
    MemberModifiers, ModuleDecl, ParamDecl, TypeAliasDecl, VariableDecl,
};
use crate::options::{ExtractOptions, ReferenceAllowLists};
use crate::reference_closure::referenced_names;
use dtsx_common::{CommentBlock, CoreWarning, Span, extract_comment_blocks, leading_comment_blocks};
use dtsx_parser::{self as ast, Item, ItemKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// Result of extracting one source file: the Declaration sequence (exported
/// surface plus anything pulled in by reference closure) in source order,
/// plus every warning collected along the way (parser recoveries and
/// extraction-time anomalies).
pub struct ExtractResult<'a> {
    pub declarations: Vec<Declaration<'a>>,
    pub warnings: Vec<CoreWarning>,
}

#[tracing::instrument(level = "debug", skip(source, options, allow_lists), fields(file = file_name))]
pub fn extract<'a>(
    source: &'a str,
    file_name: &str,
    options: ExtractOptions,
    allow_lists: &ReferenceAllowLists,
) -> ExtractResult<'a> {
    let (file, mut warnings) = dtsx_parser::parse(source, file_name);
    let all_comments = if options.keep_comments { extract_comment_blocks(source) } else { Vec::new() };

    let built: Vec<Declaration<'a>> = file
        .items
        .iter()
        .filter_map(|item| convert_item(item, source, file_name, options, &all_comments, allow_lists, &mut warnings))
        .collect();

    let declarations = select_with_closure(built, allow_lists);
    tracing::debug!(count = declarations.len(), "extracted declaration surface");
    ExtractResult { declarations, warnings }
}

/// First pass (exported surface) followed by the single reference-closure
/// pass (§4.3.1). Applied once per lexical level: the file's top level, and
/// independently inside every `module`/`namespace` body.
fn select_with_closure<'a>(built: Vec<Declaration<'a>>, allow_lists: &ReferenceAllowLists) -> Vec<Declaration<'a>> {
    let mut slots: Vec<Option<Declaration<'a>>> = built.into_iter().map(Some).collect();

    let mut name_index: FxHashMap<&str, usize> = FxHashMap::default();
    for (idx, slot) in slots.iter().enumerate() {
        let d = slot.as_ref().expect("freshly built slots are all Some");
        if is_closure_target_kind(&d.kind) {
            name_index.entry(d.name).or_insert(idx);
        }
    }

    let mut output = Vec::new();
    for slot in &mut slots {
        let include = should_include_first_pass(slot.as_ref().expect("freshly built slots are all Some"));
        if include {
            output.push(slot.take().expect("checked Some above"));
        }
    }

    let included_names: FxHashSet<&str> = output.iter().map(|d| d.name).collect();
    let imported_names: FxHashSet<&str> = output
        .iter()
        .filter_map(|d| match &d.kind {
            DeclKind::Import(imp) => Some(imp.specifiers.iter().map(|s| s.alias.unwrap_or(s.name))),
            _ => None,
        })
        .flatten()
        .collect();

    for name in referenced_names(&output) {
        if included_names.contains(name) || imported_names.contains(name) {
            continue;
        }
        if allow_lists.built_in_types.contains(name) || allow_lists.single_letter_generics.contains(name) {
            continue;
        }
        if let Some(&idx) = name_index.get(name) {
            if let Some(mut pulled) = slots[idx].take() {
                pulled.is_exported = false;
                pulled.leading_comments = Vec::new();
                output.push(pulled);
            }
        }
    }

    output
}

fn is_closure_target_kind(kind: &DeclKind<'_>) -> bool {
    matches!(kind, DeclKind::Interface(_) | DeclKind::TypeAlias(_) | DeclKind::Class(_) | DeclKind::Enum(_))
}

fn should_include_first_pass(d: &Declaration<'_>) -> bool {
    match &d.kind {
        DeclKind::Import(_) | DeclKind::Export(_) | DeclKind::ExportDefaultExpr(_) => true,
        DeclKind::Module(m) if m.is_string_name => true,
        _ => d.is_exported,
    }
}

fn convert_item<'a>(
    item: &Item,
    source: &'a str,
    file_name: &str,
    options: ExtractOptions,
    all_comments: &[CommentBlock],
    allow_lists: &ReferenceAllowLists,
    warnings: &mut Vec<CoreWarning>,
) -> Option<Declaration<'a>> {
    let comments = if options.keep_comments {
        leading_comment_blocks(source, item.span.start, all_comments).iter().map(|b| b.text(source)).collect()
    } else {
        Vec::new()
    };

    let (name, kind, is_exported): (&'a str, DeclKind<'a>, bool) = match &item.kind {
        ItemKind::Import(imp) => ("", DeclKind::Import(convert_import(imp, source)), false),
        ItemKind::ExportList(el) => ("", DeclKind::Export(convert_export_list(el, source)), true),
        ItemKind::ExportDefaultExpr(span) => ("default", DeclKind::ExportDefaultExpr(span.slice(source)), true),
        ItemKind::Variable(v) => (
            v.name.slice(source),
            DeclKind::Variable(VariableDecl {
                binding_kind: v.binding_kind,
                type_annotation: v.type_span.map(|s| s.slice(source)),
                initializer_source: v.initializer.map(|s| s.slice(source)),
            }),
            item.is_exported,
        ),
        ItemKind::Function(f) => (
            f.name.map(|s| s.slice(source)).unwrap_or("default"),
            DeclKind::Function(FunctionDecl {
                is_async: f.is_async,
                is_generator: f.is_generator,
                generics: f.generics.map(|s| s.slice(source)),
                parameters: convert_params(&f.params, source),
                return_type: synth_return_type(f.return_type, f.is_generator, f.is_async, source),
            }),
            item.is_exported,
        ),
        ItemKind::Interface(i) => (i.name.slice(source), DeclKind::Interface(convert_interface(i, source)), item.is_exported),
        ItemKind::TypeAlias(t) => (
            t.name.slice(source),
            DeclKind::TypeAlias(TypeAliasDecl { generics: t.generics.map(|s| s.slice(source)), rhs: t.rhs.slice(source) }),
            item.is_exported,
        ),
        ItemKind::Class(c) => {
            (c.name.map(|s| s.slice(source)).unwrap_or("default"), DeclKind::Class(convert_class(c, source)), item.is_exported)
        }
        ItemKind::Enum(e) => (e.name.slice(source), DeclKind::Enum(convert_enum(e, source)), item.is_exported),
        ItemKind::Module(m) => {
            let body_built: Vec<Declaration<'a>> = m
                .body
                .iter()
                .filter_map(|child| convert_item(child, source, file_name, options, all_comments, allow_lists, warnings))
                .collect();
            let body = select_with_closure(body_built, allow_lists);
            (m.name.slice(source), DeclKind::Module(ModuleDecl { is_string_name: m.is_string_name, body }), item.is_exported)
        }
    };

    Some(Declaration::new(name, kind, item.span, is_exported, item.is_default, comments))
}

fn convert_import<'a>(imp: &ast::ImportItem, source: &'a str) -> ImportDecl<'a> {
    ImportDecl {
        raw_text: imp.raw.slice(source),
        source: imp.source.slice(source),
        is_type_only: imp.is_type_only,
        is_side_effect: imp.is_side_effect,
        specifiers: imp
            .specifiers
            .iter()
            .map(|s| ImportSpecifierDecl { name: s.name.slice(source), alias: s.alias.map(|a| a.slice(source)), is_type: s.is_type })
            .collect(),
    }
}

fn convert_export_list<'a>(el: &ast::ExportListItem, source: &'a str) -> ExportDecl<'a> {
    let specifiers = if el.is_star {
        ExportSpecifiers::Star { alias: el.star_alias.map(|a| a.slice(source)) }
    } else {
        ExportSpecifiers::List(
            el.specifiers
                .iter()
                .map(|s| ExportSpecifierDecl { name: s.name.slice(source), alias: s.alias.map(|a| a.slice(source)), is_type: s.is_type })
                .collect(),
        )
    };
    ExportDecl { source: el.source.map(|s| s.slice(source)), is_type_only: el.is_type_only, specifiers }
}

fn convert_params<'a>(params: &[ast::Param], source: &'a str) -> Vec<ParamDecl<'a>> {
    params
        .iter()
        .map(|p| ParamDecl {
            name: p.name.slice(source),
            type_annotation: p.type_span.map(|s| s.slice(source)),
            optional: p.optional,
            has_default: p.has_default,
            is_rest: p.is_rest,
            modifiers: p.modifiers.clone().into(),
        })
        .collect()
}

fn synth_return_type<'a>(return_type: Option<Span>, is_generator: bool, is_async: bool, source: &'a str) -> &'a str {
    if let Some(rt) = return_type {
        return rt.slice(source);
    }
    match (is_generator, is_async) {
        (true, true) => "AsyncGenerator<any, any, any>",
        (true, false) => "Generator<any, any, any>",
        (false, true) => "Promise<void>",
        (false, false) => "void",
    }
}

fn convert_interface<'a>(it: &ast::InterfaceItem, source: &'a str) -> InterfaceDecl<'a> {
    InterfaceDecl {
        generics: it.generics.map(|s| s.slice(source)),
        extends: it.extends.map(|s| s.slice(source)),
        members: it.members.iter().map(|m| convert_interface_member(m, source)).collect(),
    }
}

fn convert_interface_member<'a>(m: &ast::Member, source: &'a str) -> MemberDecl<'a> {
    let readonly = matches!(&m.kind, ast::MemberKind::Property { readonly: true, .. });
    let kind = match &m.kind {
        ast::MemberKind::Property { name, optional, type_span, .. } => {
            MemberKind::Property { name: name.slice(source), optional: *optional, type_annotation: type_span.map(|s| s.slice(source)) }
        }
        ast::MemberKind::Method { name, optional, generics, params, return_type, is_generator, is_async } => MemberKind::Method {
            name: name.slice(source),
            optional: *optional,
            generics: generics.map(|s| s.slice(source)),
            parameters: convert_params(params, source),
            return_type: synth_return_type(*return_type, *is_generator, *is_async, source),
            is_generator: *is_generator,
            is_async: *is_async,
        },
        ast::MemberKind::CallSignature { generics, params, return_type } => MemberKind::CallSignature {
            generics: generics.map(|s| s.slice(source)),
            parameters: convert_params(params, source),
            return_type: synth_return_type(*return_type, false, false, source),
        },
        ast::MemberKind::ConstructSignature { params, return_type } => MemberKind::ConstructSignature {
            parameters: convert_params(params, source),
            return_type: synth_return_type(*return_type, false, false, source),
        },
    };
    MemberDecl { modifiers: MemberModifiers { access: None, is_static: false, is_abstract: false, readonly }, kind }
}

fn convert_class<'a>(it: &ast::ClassItem, source: &'a str) -> ClassDecl<'a> {
    let mut members = Vec::new();
    for cm in &it.members {
        if let ast::ClassMemberKind::Constructor { params } = &cm.kind {
            for p in params {
                if p.modifiers.is_parameter_property() {
                    members.push(synth_param_property_field(p, source));
                }
            }
        }
        if let Some(converted) = convert_class_member(cm, source) {
            members.push(converted);
        }
    }
    ClassDecl {
        is_abstract: it.is_abstract,
        generics: it.generics.map(|s| s.slice(source)),
        extends: it.extends.map(|s| s.slice(source)),
        implements: it.implements.map(|s| s.slice(source)),
        members,
    }
}

fn synth_param_property_field<'a>(p: &ast::Param, source: &'a str) -> MemberDecl<'a> {
    let m = &p.modifiers;
    let access = if m.private {
        Some(AccessModifier::Private)
    } else if m.protected {
        Some(AccessModifier::Protected)
    } else if m.public {
        Some(AccessModifier::Public)
    } else {
        None
    };
    MemberDecl {
        modifiers: MemberModifiers { access, is_static: false, is_abstract: false, readonly: m.readonly },
        kind: MemberKind::Property { name: p.name.slice(source), optional: p.optional, type_annotation: p.type_span.map(|s| s.slice(source)) },
    }
}

fn convert_class_member<'a>(cm: &ast::ClassMember, source: &'a str) -> Option<MemberDecl<'a>> {
    if is_private_named(&cm.kind) {
        return None;
    }
    let modifiers = MemberModifiers {
        access: cm.modifiers.access,
        is_static: cm.modifiers.is_static,
        is_abstract: cm.modifiers.is_abstract,
        readonly: cm.modifiers.readonly,
    };
    let kind = match &cm.kind {
        ast::ClassMemberKind::Property { name, optional, type_span, .. } => {
            MemberKind::Property { name: name.slice(source), optional: *optional, type_annotation: type_span.map(|s| s.slice(source)) }
        }
        ast::ClassMemberKind::Method { name, optional, generics, params, return_type, is_generator, is_async, .. } => MemberKind::Method {
            name: name.slice(source),
            optional: *optional,
            generics: generics.map(|s| s.slice(source)),
            parameters: convert_params(params, source),
            return_type: synth_return_type(*return_type, *is_generator, *is_async, source),
            is_generator: *is_generator,
            is_async: *is_async,
        },
        ast::ClassMemberKind::Accessor { is_setter, name, params, type_span, .. } => MemberKind::Accessor {
            is_setter: *is_setter,
            name: name.slice(source),
            parameters: convert_params(params, source),
            type_annotation: type_span.map(|s| s.slice(source)),
        },
        ast::ClassMemberKind::Constructor { params } => MemberKind::Constructor { parameters: convert_params(params, source) },
        ast::ClassMemberKind::Erased => return None,
    };
    Some(MemberDecl { modifiers, kind })
}

fn is_private_named(kind: &ast::ClassMemberKind) -> bool {
    matches!(
        kind,
        ast::ClassMemberKind::Property { is_private_name: true, .. }
            | ast::ClassMemberKind::Method { is_private_name: true, .. }
            | ast::ClassMemberKind::Accessor { is_private_name: true, .. }
    )
}

fn convert_enum<'a>(it: &ast::EnumItem, source: &'a str) -> EnumDecl<'a> {
    EnumDecl {
        is_const: it.is_const,
        members: it
            .members
            .iter()
            .map(|m| EnumMemberDecl { name: m.name.slice(source), initializer: m.initializer.map(|s| s.slice(source)) })
            .collect(),
    }
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;
