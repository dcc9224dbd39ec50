//! Reference-closure scanning (§4.3.1): collecting capitalised identifiers
//! that appear in type position across a set of already-included
//! Declarations. Orchestration (deciding which of these are "known" and
//! which must be pulled in) lives in `extract`; this module only answers
//! "what names does this text reference".

use crate::declaration::{ClassDecl, DeclKind, Declaration, InterfaceDecl, MemberDecl, MemberKind};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

static TYPE_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][A-Za-z0-9]*").unwrap());

/// Every capitalised identifier found in a type-bearing position across
/// `declarations`. This is a regex scan over the substrings the extractor
/// already sliced out as types (generics, extends/implements clauses,
/// parameter and return types, member types) — not a full type parser, per
/// the documented compromise.
pub fn referenced_names<'a>(declarations: &[Declaration<'a>]) -> FxHashSet<&'a str> {
    let mut names = FxHashSet::default();
    for decl in declarations {
        for fragment in type_fragments(&decl.kind) {
            for m in TYPE_NAME_RE.find_iter(fragment) {
                names.insert(m.as_str());
            }
        }
    }
    names
}

fn type_fragments<'a>(kind: &DeclKind<'a>) -> Vec<&'a str> {
    match kind {
        DeclKind::Import(_) | DeclKind::Export(_) | DeclKind::ExportDefaultExpr(_) | DeclKind::Enum(_) => Vec::new(),
        DeclKind::Variable(v) => v.type_annotation.into_iter().collect(),
        DeclKind::Function(f) => {
            let mut v = vec![f.return_type];
            v.extend(f.generics);
            for p in &f.parameters {
                v.extend(p.type_annotation);
            }
            v
        }
        DeclKind::Interface(i) => interface_fragments(i),
        DeclKind::TypeAlias(t) => {
            let mut v = vec![t.rhs];
            v.extend(t.generics);
            v
        }
        DeclKind::Class(c) => class_fragments(c),
        DeclKind::Module(m) => m.body.iter().flat_map(|d| type_fragments(&d.kind)).collect(),
    }
}

fn interface_fragments<'a>(i: &InterfaceDecl<'a>) -> Vec<&'a str> {
    let mut v = Vec::new();
    v.extend(i.generics);
    v.extend(i.extends);
    for m in &i.members {
        v.extend(member_fragments(m));
    }
    v
}

fn class_fragments<'a>(c: &ClassDecl<'a>) -> Vec<&'a str> {
    let mut v = Vec::new();
    v.extend(c.generics);
    v.extend(c.extends);
    v.extend(c.implements);
    for m in &c.members {
        v.extend(member_fragments(m));
    }
    v
}

fn member_fragments<'a>(member: &MemberDecl<'a>) -> Vec<&'a str> {
    match &member.kind {
        MemberKind::Property { type_annotation, .. } => type_annotation.iter().copied().collect(),
        MemberKind::Method { generics, parameters, return_type, .. } => {
            let mut v = vec![*return_type];
            v.extend(*generics);
            for p in parameters {
                v.extend(p.type_annotation);
            }
            v
        }
        MemberKind::Accessor { parameters, type_annotation, .. } => {
            let mut v: Vec<&str> = Vec::new();
            v.extend(*type_annotation);
            for p in parameters {
                v.extend(p.type_annotation);
            }
            v
        }
        MemberKind::CallSignature { generics, parameters, return_type } => {
            let mut v = vec![*return_type];
            v.extend(*generics);
            for p in parameters {
                v.extend(p.type_annotation);
            }
            v
        }
        MemberKind::ConstructSignature { parameters, return_type } => {
            let mut v = vec![*return_type];
            for p in parameters {
                v.extend(p.type_annotation);
            }
            v
        }
        MemberKind::Constructor { parameters } => parameters.iter().filter_map(|p| p.type_annotation).collect(),
    }
}
