use super::*;
use crate::declaration::{DeclKind, MemberKind};
use crate::options::{ExtractOptions, ReferenceAllowLists};

fn extract_default(source: &str) -> ExtractResult<'_> {
    extract(source, "input.ts", ExtractOptions::default(), &ReferenceAllowLists::default())
}

#[test]
fn simple_const_and_function_are_both_exported() {
    let result = extract_default(
        "export const x: number = 1;\nexport function add(a: number, b: number): number { return a + b; }",
    );
    assert_eq!(result.declarations.len(), 2);
    assert_eq!(result.declarations[0].name, "x");
    assert!(matches!(result.declarations[0].kind, DeclKind::Variable(_)));
    assert_eq!(result.declarations[1].name, "add");
    let DeclKind::Function(f) = &result.declarations[1].kind else { panic!("expected function") };
    assert_eq!(f.return_type, "number");
}

#[test]
fn generator_and_async_generator_return_types_are_synthesised() {
    let result = extract_default("export function* g() { yield 1; }\nexport async function* h() { yield 1; }");
    assert_eq!(result.declarations.len(), 2);
    let DeclKind::Function(g) = &result.declarations[0].kind else { panic!("expected function") };
    assert_eq!(g.return_type, "Generator<any, any, any>");
    let DeclKind::Function(h) = &result.declarations[1].kind else { panic!("expected function") };
    assert_eq!(h.return_type, "AsyncGenerator<any, any, any>");
}

#[test]
fn constructor_parameter_properties_split_into_leading_fields() {
    let result = extract_default("export class C { constructor(public name: string, private n?: number) {} }");
    assert_eq!(result.declarations.len(), 1);
    let DeclKind::Class(c) = &result.declarations[0].kind else { panic!("expected class") };
    assert_eq!(c.members.len(), 3);

    let MemberKind::Property { name, type_annotation, .. } = &c.members[0].kind else { panic!("expected property") };
    assert_eq!(*name, "name");
    assert_eq!(*type_annotation, Some("string"));
    assert_eq!(c.members[0].modifiers.access, Some(dtsx_parser::AccessModifier::Public));

    let MemberKind::Property { name, optional, .. } = &c.members[1].kind else { panic!("expected property") };
    assert_eq!(*name, "n");
    assert!(*optional);
    assert_eq!(c.members[1].modifiers.access, Some(dtsx_parser::AccessModifier::Private));

    let MemberKind::Constructor { parameters } = &c.members[2].kind else { panic!("expected constructor") };
    assert_eq!(parameters.len(), 2);
    assert_eq!(parameters[0].name, "name");
}

#[test]
fn reference_closure_pulls_in_non_exported_interface() {
    let result = extract_default("interface Opts { verbose: boolean }\nexport function run(o: Opts): void {}");
    assert_eq!(result.declarations.len(), 2);
    assert_eq!(result.declarations[0].name, "run");
    assert_eq!(result.declarations[1].name, "Opts");
    assert!(!result.declarations[1].is_exported);
    assert!(result.declarations[1].leading_comments.is_empty());
}

#[test]
fn reference_closure_does_not_pull_unreferenced_non_exported_declarations() {
    let result = extract_default("interface Unused { x: number }\nexport const y: number = 1;");
    assert_eq!(result.declarations.len(), 1);
    assert_eq!(result.declarations[0].name, "y");
}

#[test]
fn ambient_string_named_module_reaches_the_surface_without_its_own_export_keyword() {
    let result = extract_default("declare module 'x' { export function f(): void; export const v: number; }");
    assert_eq!(result.declarations.len(), 1);
    let DeclKind::Module(m) = &result.declarations[0].kind else { panic!("expected module") };
    assert!(m.is_string_name);
    assert_eq!(m.body.len(), 2);
    // Reaching the surface is not the same as carrying `export`: nothing in
    // the source put `export` before `declare module 'x'`.
    assert!(!result.declarations[0].is_exported);
}

#[test]
fn private_fields_and_static_blocks_are_erased() {
    let result = extract_default("export class K { #secret = 1; static { K.init(); } pub = 2; }");
    assert_eq!(result.declarations.len(), 1);
    let DeclKind::Class(c) = &result.declarations[0].kind else { panic!("expected class") };
    assert_eq!(c.members.len(), 1);
    let MemberKind::Property { name, .. } = &c.members[0].kind else { panic!("expected property") };
    assert_eq!(*name, "pub");
}

#[test]
fn non_exported_function_and_variable_are_dropped() {
    let result = extract_default("function helper() {}\nconst hidden = 1;");
    assert!(result.declarations.is_empty());
}

#[test]
fn import_and_export_list_are_always_included() {
    let result = extract_default("import { A } from 'a';\nexport { A };");
    assert_eq!(result.declarations.len(), 2);
    assert!(matches!(result.declarations[0].kind, DeclKind::Import(_)));
    assert!(matches!(result.declarations[1].kind, DeclKind::Export(_)));
}

#[test]
fn built_in_and_single_letter_generic_names_are_not_treated_as_closure_candidates() {
    let result = extract_default(
        "interface T { z: number }\nexport function identity<T>(x: T): Promise<Array<string>> { return x as any; }",
    );
    assert_eq!(result.declarations.len(), 1, "the allow-listed name T must not pull in the unrelated interface T");
}

#[test]
fn unknown_construct_is_skipped_with_a_warning() {
    let result = extract_default("doSomething();\nexport const x: number = 1;");
    assert_eq!(result.declarations.len(), 1);
    assert!(!result.warnings.is_empty());
}
