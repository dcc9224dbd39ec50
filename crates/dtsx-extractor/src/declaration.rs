//! The Declaration intermediate representation (§3.2): a tagged variant, not
//! an inheritance hierarchy. Every field that is only ever copied verbatim
//! downstream is an immutable slice into the source buffer rather than an
//! owned `String` — the only place new strings are allocated is inside the
//! emitter, and only for assembled lines.

use dtsx_common::Span;
use std::cell::OnceCell;

pub use dtsx_parser::{AccessModifier, BindingKind};

#[derive(Clone, Copy, Debug, Default)]
pub struct ParamModifiers {
    pub public: bool,
    pub private: bool,
    pub protected: bool,
    pub readonly: bool,
}

impl ParamModifiers {
    pub fn is_parameter_property(&self) -> bool {
        self.public || self.private || self.protected || self.readonly
    }
}

impl From<dtsx_parser::ParamModifiers> for ParamModifiers {
    fn from(m: dtsx_parser::ParamModifiers) -> Self {
        ParamModifiers { public: m.public, private: m.private, protected: m.protected, readonly: m.readonly }
    }
}

#[derive(Clone, Debug)]
pub struct ParamDecl<'a> {
    pub name: &'a str,
    pub type_annotation: Option<&'a str>,
    pub optional: bool,
    pub has_default: bool,
    pub is_rest: bool,
    pub modifiers: ParamModifiers,
}

#[derive(Clone, Debug)]
pub struct ImportSpecifierDecl<'a> {
    pub name: &'a str,
    pub alias: Option<&'a str>,
    pub is_type: bool,
}

#[derive(Clone, Debug)]
pub struct ImportDecl<'a> {
    pub raw_text: &'a str,
    pub source: &'a str,
    pub is_type_only: bool,
    pub is_side_effect: bool,
    pub specifiers: Vec<ImportSpecifierDecl<'a>>,
}

#[derive(Clone, Debug)]
pub struct ExportSpecifierDecl<'a> {
    pub name: &'a str,
    pub alias: Option<&'a str>,
    pub is_type: bool,
}

#[derive(Clone, Debug)]
pub enum ExportSpecifiers<'a> {
    Star { alias: Option<&'a str> },
    List(Vec<ExportSpecifierDecl<'a>>),
}

#[derive(Clone, Debug)]
pub struct ExportDecl<'a> {
    pub source: Option<&'a str>,
    pub is_type_only: bool,
    pub specifiers: ExportSpecifiers<'a>,
}

#[derive(Clone, Debug)]
pub struct VariableDecl<'a> {
    pub binding_kind: BindingKind,
    pub type_annotation: Option<&'a str>,
    pub initializer_source: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct FunctionDecl<'a> {
    pub is_async: bool,
    pub is_generator: bool,
    pub generics: Option<&'a str>,
    pub parameters: Vec<ParamDecl<'a>>,
    /// Never empty: synthesised per the generator/async rules in §4.3 when
    /// the source omitted an annotation.
    pub return_type: &'a str,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MemberModifiers {
    pub access: Option<AccessModifier>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub readonly: bool,
}

#[derive(Clone, Debug)]
pub enum MemberKind<'a> {
    Property {
        name: &'a str,
        optional: bool,
        type_annotation: Option<&'a str>,
    },
    Method {
        name: &'a str,
        optional: bool,
        generics: Option<&'a str>,
        parameters: Vec<ParamDecl<'a>>,
        return_type: &'a str,
        is_generator: bool,
        is_async: bool,
    },
    Accessor {
        is_setter: bool,
        name: &'a str,
        parameters: Vec<ParamDecl<'a>>,
        type_annotation: Option<&'a str>,
    },
    CallSignature {
        generics: Option<&'a str>,
        parameters: Vec<ParamDecl<'a>>,
        return_type: &'a str,
    },
    ConstructSignature {
        parameters: Vec<ParamDecl<'a>>,
        return_type: &'a str,
    },
    Constructor {
        parameters: Vec<ParamDecl<'a>>,
    },
}

#[derive(Clone, Debug)]
pub struct MemberDecl<'a> {
    pub modifiers: MemberModifiers,
    pub kind: MemberKind<'a>,
}

#[derive(Clone, Debug)]
pub struct InterfaceDecl<'a> {
    pub generics: Option<&'a str>,
    pub extends: Option<&'a str>,
    pub members: Vec<MemberDecl<'a>>,
}

#[derive(Clone, Debug)]
pub struct TypeAliasDecl<'a> {
    pub generics: Option<&'a str>,
    pub rhs: &'a str,
}

#[derive(Clone, Debug)]
pub struct ClassDecl<'a> {
    pub is_abstract: bool,
    pub generics: Option<&'a str>,
    pub extends: Option<&'a str>,
    pub implements: Option<&'a str>,
    pub members: Vec<MemberDecl<'a>>,
}

#[derive(Clone, Debug)]
pub struct EnumMemberDecl<'a> {
    pub name: &'a str,
    pub initializer: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct EnumDecl<'a> {
    pub is_const: bool,
    pub members: Vec<EnumMemberDecl<'a>>,
}

#[derive(Clone, Debug)]
pub struct ModuleDecl<'a> {
    pub is_string_name: bool,
    pub body: Vec<Declaration<'a>>,
}

#[derive(Clone, Debug)]
pub enum DeclKind<'a> {
    Import(ImportDecl<'a>),
    Export(ExportDecl<'a>),
    /// `export default <expr>` where the expression was not itself a
    /// function/class declaration; holds the expression's raw text.
    ExportDefaultExpr(&'a str),
    Variable(VariableDecl<'a>),
    Function(FunctionDecl<'a>),
    Interface(InterfaceDecl<'a>),
    TypeAlias(TypeAliasDecl<'a>),
    Class(ClassDecl<'a>),
    Enum(EnumDecl<'a>),
    Module(ModuleDecl<'a>),
}

/// One top-level (or namespace-body) declaration. `text` is filled in by the
/// emitter on first emission through a one-shot cache cell, so repeated
/// emission of the same `Declaration` is cheap and idempotent without the
/// emitter needing ordinary interior mutation.
#[derive(Clone)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub kind: DeclKind<'a>,
    pub span: Span,
    pub is_exported: bool,
    pub is_default: bool,
    /// Verbatim text of each leading comment block, source order, already
    /// resolved against the source buffer — the emitter never needs the
    /// buffer itself to reproduce them.
    pub leading_comments: Vec<&'a str>,
    text: OnceCell<String>,
}

impl<'a> Declaration<'a> {
    pub fn new(
        name: &'a str,
        kind: DeclKind<'a>,
        span: Span,
        is_exported: bool,
        is_default: bool,
        leading_comments: Vec<&'a str>,
    ) -> Self {
        Declaration { name, kind, span, is_exported, is_default, leading_comments, text: OnceCell::new() }
    }

    /// Returns this declaration's cached canonical text, computing it with
    /// `render` on first access. Later calls, even with a different
    /// `render`, return the value computed on the first call.
    pub fn text_or_init(&self, render: impl FnOnce() -> String) -> &str {
        self.text.get_or_init(render)
    }
}

impl std::fmt::Debug for Declaration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Declaration")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("span", &self.span)
            .field("is_exported", &self.is_exported)
            .field("is_default", &self.is_default)
            .finish()
    }
}
