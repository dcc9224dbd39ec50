//! The syntactic tree the parser produces.
//!
//! Nodes carry spans into the source buffer rather than owned strings
//! wherever the text is only ever copied verbatim downstream; the extractor
//! and emitter slice the original buffer instead of re-allocating.

use dtsx_common::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Const,
    Let,
    Var,
}

#[derive(Clone, Debug, Default)]
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

#[derive(Clone, Debug)]
pub struct Param {
    pub name: Span,
    pub type_span: Option<Span>,
    pub optional: bool,
    pub has_default: bool,
    pub is_rest: bool,
    pub modifiers: ParamModifiers,
}

#[derive(Clone, Debug)]
pub struct ImportSpecifier {
    pub name: Span,
    pub alias: Option<Span>,
    pub is_type: bool,
}

#[derive(Clone, Debug)]
pub struct ImportItem {
    pub raw: Span,
    pub is_type_only: bool,
    pub is_side_effect: bool,
    pub source: Span,
    pub specifiers: Vec<ImportSpecifier>,
}

#[derive(Clone, Debug)]
pub struct ExportSpecifier {
    pub name: Span,
    pub alias: Option<Span>,
    pub is_type: bool,
}

#[derive(Clone, Debug)]
pub struct ExportListItem {
    pub raw: Span,
    pub is_type_only: bool,
    pub source: Option<Span>,
    pub is_star: bool,
    pub star_alias: Option<Span>,
    pub specifiers: Vec<ExportSpecifier>,
}

#[derive(Clone, Debug)]
pub struct VariableItem {
    pub binding_kind: BindingKind,
    pub name: Span,
    pub type_span: Option<Span>,
    pub initializer: Option<Span>,
}

#[derive(Clone, Debug)]
pub struct FunctionItem {
    pub name: Option<Span>,
    pub is_async: bool,
    pub is_generator: bool,
    pub generics: Option<Span>,
    pub params: Vec<Param>,
    pub return_type: Option<Span>,
}

#[derive(Clone, Debug)]
pub enum MemberKind {
    Property {
        name: Span,
        optional: bool,
        readonly: bool,
        type_span: Option<Span>,
    },
    Method {
        name: Span,
        optional: bool,
        generics: Option<Span>,
        params: Vec<Param>,
        return_type: Option<Span>,
        is_generator: bool,
        is_async: bool,
    },
    CallSignature {
        generics: Option<Span>,
        params: Vec<Param>,
        return_type: Option<Span>,
    },
    ConstructSignature {
        params: Vec<Param>,
        return_type: Option<Span>,
    },
}

#[derive(Clone, Debug)]
pub struct Member {
    pub span: Span,
    pub kind: MemberKind,
}

#[derive(Clone, Debug)]
pub struct InterfaceItem {
    pub name: Span,
    pub generics: Option<Span>,
    pub extends: Option<Span>,
    pub members: Vec<Member>,
}

#[derive(Clone, Debug)]
pub struct TypeAliasItem {
    pub name: Span,
    pub generics: Option<Span>,
    pub rhs: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
}

#[derive(Clone, Debug, Default)]
pub struct ClassMemberModifiers {
    pub access: Option<AccessModifier>,
    pub is_static: bool,
    pub is_abstract: bool,
    pub readonly: bool,
}

#[derive(Clone, Debug)]
pub enum ClassMemberKind {
    Property {
        name: Span,
        optional: bool,
        type_span: Option<Span>,
        is_private_name: bool,
    },
    Method {
        name: Span,
        optional: bool,
        generics: Option<Span>,
        params: Vec<Param>,
        return_type: Option<Span>,
        is_generator: bool,
        is_async: bool,
        is_private_name: bool,
    },
    Accessor {
        is_setter: bool,
        name: Span,
        params: Vec<Param>,
        type_span: Option<Span>,
        is_private_name: bool,
    },
    Constructor {
        params: Vec<Param>,
    },
    /// `static { ... }` block or any other construct the emitter always
    /// erases; kept as a member so source order/spans stay consistent, but
    /// never emitted.
    Erased,
}

#[derive(Clone, Debug)]
pub struct ClassMember {
    pub span: Span,
    pub modifiers: ClassMemberModifiers,
    pub kind: ClassMemberKind,
}

#[derive(Clone, Debug)]
pub struct ClassItem {
    pub name: Option<Span>,
    pub is_abstract: bool,
    pub generics: Option<Span>,
    pub extends: Option<Span>,
    pub implements: Option<Span>,
    pub members: Vec<ClassMember>,
}

#[derive(Clone, Debug)]
pub struct EnumMember {
    pub name: Span,
    pub initializer: Option<Span>,
}

#[derive(Clone, Debug)]
pub struct EnumItem {
    pub name: Span,
    pub is_const: bool,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug)]
pub struct ModuleItem {
    pub name: Span,
    pub is_string_name: bool,
    pub body: Vec<Item>,
}

#[derive(Clone, Debug)]
pub enum ItemKind {
    Import(ImportItem),
    ExportList(ExportListItem),
    /// `export default <expression>`, where the declaration form (function
    /// or class) didn't apply; the span covers the expression text.
    ExportDefaultExpr(Span),
    Variable(VariableItem),
    Function(FunctionItem),
    Interface(InterfaceItem),
    TypeAlias(TypeAliasItem),
    Class(ClassItem),
    Enum(EnumItem),
    Module(ModuleItem),
}

#[derive(Clone, Debug)]
pub struct Item {
    pub span: Span,
    pub is_exported: bool,
    pub is_default: bool,
    pub is_declare: bool,
    pub kind: ItemKind,
}

#[derive(Debug)]
pub struct SourceFile<'a> {
    pub source: &'a str,
    pub file_name: String,
    pub items: Vec<Item>,
}
