use super::*;

fn slice<'a>(source: &'a str, span: dtsx_common::Span) -> &'a str {
    span.slice(source)
}

#[test]
fn parses_exported_const_and_function() {
    let src = "export const x: number = 1;\nexport function add(a: number, b: number): number { return a + b; }";
    let (file, warnings) = parse(src, "a.ts");
    assert!(warnings.is_empty());
    assert_eq!(file.items.len(), 2);

    match &file.items[0].kind {
        ItemKind::Variable(v) => {
            assert!(file.items[0].is_exported);
            assert_eq!(slice(file.source, v.name), "x");
            assert_eq!(slice(file.source, v.type_span.unwrap()), "number");
        }
        other => panic!("expected variable, got {other:?}"),
    }

    match &file.items[1].kind {
        ItemKind::Function(f) => {
            assert_eq!(slice(file.source, f.name.unwrap()), "add");
            assert_eq!(f.params.len(), 2);
            assert_eq!(slice(file.source, f.return_type.unwrap()), "number");
        }
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn parses_generator_and_async_generator() {
    let src = "export function* g() { yield 1; }\nexport async function* h() { yield 1; }";
    let (file, _) = parse(src, "a.ts");
    assert_eq!(file.items.len(), 2);
    match &file.items[0].kind {
        ItemKind::Function(f) => {
            assert!(f.is_generator);
            assert!(!f.is_async);
            assert!(f.return_type.is_none());
        }
        other => panic!("expected function, got {other:?}"),
    }
    match &file.items[1].kind {
        ItemKind::Function(f) => {
            assert!(f.is_generator);
            assert!(f.is_async);
        }
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn parses_class_with_parameter_properties() {
    let src = "export class C { constructor(public name: string, private n?: number) {} }";
    let (file, _) = parse(src, "a.ts");
    match &file.items[0].kind {
        ItemKind::Class(c) => {
            assert_eq!(slice(file.source, c.name.unwrap()), "C");
            assert_eq!(c.members.len(), 1);
            match &c.members[0].kind {
                ClassMemberKind::Constructor { params } => {
                    assert_eq!(params.len(), 2);
                    assert!(params[0].modifiers.public);
                    assert_eq!(slice(file.source, params[0].name), "name");
                    assert!(params[1].modifiers.private);
                    assert!(params[1].optional);
                }
                other => panic!("expected constructor, got {other:?}"),
            }
        }
        other => panic!("expected class, got {other:?}"),
    }
}

#[test]
fn parses_interface_pulled_in_later_by_closure() {
    let src = "interface Opts { verbose: boolean }\nexport function run(o: Opts): void {}";
    let (file, _) = parse(src, "a.ts");
    assert_eq!(file.items.len(), 2);
    assert!(!file.items[0].is_exported);
    match &file.items[0].kind {
        ItemKind::Interface(i) => {
            assert_eq!(i.members.len(), 1);
        }
        other => panic!("expected interface, got {other:?}"),
    }
}

#[test]
fn parses_ambient_module_body() {
    let src = "declare module 'x' { export function f(): void; export const v: number; }";
    let (file, _) = parse(src, "a.ts");
    assert_eq!(file.items.len(), 1);
    match &file.items[0].kind {
        ItemKind::Module(m) => {
            assert!(m.is_string_name);
            assert_eq!(m.body.len(), 2);
        }
        other => panic!("expected module, got {other:?}"),
    }
}

#[test]
fn parses_private_fields_and_static_blocks() {
    let src = "export class K { #secret = 1; static { K.init(); } pub = 2; }";
    let (file, _) = parse(src, "a.ts");
    match &file.items[0].kind {
        ItemKind::Class(c) => {
            assert_eq!(c.members.len(), 3);
            assert!(matches!(c.members[0].kind, ClassMemberKind::Property { is_private_name: true, .. }));
            assert!(matches!(c.members[1].kind, ClassMemberKind::Erased));
            match &c.members[2].kind {
                ClassMemberKind::Property { name, is_private_name, .. } => {
                    assert!(!is_private_name);
                    assert_eq!(slice(file.source, *name), "pub");
                }
                other => panic!("expected property, got {other:?}"),
            }
        }
        other => panic!("expected class, got {other:?}"),
    }
}

#[test]
fn parses_generic_interface_with_extends() {
    let src = "export interface Box<T> extends Container<T> { value: T; get(): T; }";
    let (file, _) = parse(src, "a.ts");
    match &file.items[0].kind {
        ItemKind::Interface(i) => {
            assert_eq!(slice(file.source, i.generics.unwrap()), "<T>");
            assert_eq!(slice(file.source, i.extends.unwrap()).trim(), "Container<T>");
            assert_eq!(i.members.len(), 2);
        }
        other => panic!("expected interface, got {other:?}"),
    }
}

#[test]
fn parses_type_alias_with_union_rhs() {
    let src = "export type Status = 'ok' | 'error' | { code: number };";
    let (file, _) = parse(src, "a.ts");
    match &file.items[0].kind {
        ItemKind::TypeAlias(t) => {
            assert!(slice(file.source, t.rhs).contains("| { code: number }"));
        }
        other => panic!("expected type alias, got {other:?}"),
    }
}

#[test]
fn parses_const_enum() {
    let src = "export const enum Direction { Up, Down = 2, Left }";
    let (file, _) = parse(src, "a.ts");
    match &file.items[0].kind {
        ItemKind::Enum(e) => {
            assert!(e.is_const);
            assert_eq!(e.members.len(), 3);
            assert!(e.members[1].initializer.is_some());
        }
        other => panic!("expected enum, got {other:?}"),
    }
}

#[test]
fn parses_import_and_export_from() {
    let src = "import type { A, B as C } from 'mod';\nexport { A } from 'mod';\nexport * as ns from 'other';";
    let (file, _) = parse(src, "a.ts");
    assert_eq!(file.items.len(), 3);
    match &file.items[0].kind {
        ItemKind::Import(i) => {
            assert!(i.is_type_only);
            assert_eq!(i.specifiers.len(), 2);
            assert_eq!(slice(file.source, i.specifiers[1].alias.unwrap()), "C");
        }
        other => panic!("expected import, got {other:?}"),
    }
    match &file.items[2].kind {
        ItemKind::ExportList(e) => {
            assert!(e.is_star);
            assert_eq!(slice(file.source, e.star_alias.unwrap()), "ns");
        }
        other => panic!("expected export list, got {other:?}"),
    }
}

#[test]
fn recovers_from_malformed_construct() {
    let src = "@@@ not valid\nexport const x: number = 1;";
    let (file, warnings) = parse(src, "a.ts");
    assert!(!warnings.is_empty());
    assert!(file.items.iter().any(|it| matches!(it.kind, ItemKind::Variable(_))));
}

#[test]
fn parses_export_default_class_and_expression() {
    let (file1, _) = parse("export default class { m() {} }", "a.ts");
    assert!(matches!(file1.items[0].kind, ItemKind::Class(_)));
    assert!(file1.items[0].is_default);

    let (file2, _) = parse("export default 42;", "a.ts");
    assert!(matches!(file2.items[0].kind, ItemKind::ExportDefaultExpr(_)));
}

#[test]
fn parses_getter_and_setter() {
    let src = "export class C { get x(): number { return 1; } set x(v: number) {} }";
    let (file, _) = parse(src, "a.ts");
    match &file.items[0].kind {
        ItemKind::Class(c) => {
            assert_eq!(c.members.len(), 2);
            assert!(matches!(c.members[0].kind, ClassMemberKind::Accessor { is_setter: false, .. }));
            assert!(matches!(c.members[1].kind, ClassMemberKind::Accessor { is_setter: true, .. }));
        }
        other => panic!("expected class, got {other:?}"),
    }
}
