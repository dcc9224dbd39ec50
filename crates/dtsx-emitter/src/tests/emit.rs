use super::*;
use dtsx_extractor::{ExtractOptions, ReferenceAllowLists, extract};

fn emit_source(source: &str, keep_comments: bool) -> String {
    let result = extract(source, "input.ts", ExtractOptions { keep_comments }, &ReferenceAllowLists::default());
    emit(&result.declarations, EmitOptions { keep_comments })
}

#[test]
fn simple_const_and_function_with_types() {
    let out = emit_source(
        "export const x: number = 1;\nexport function add(a: number, b: number): number { return a + b; }",
        true,
    );
    assert_eq!(out, "export declare const x: number;\n\nexport declare function add(a: number, b: number): number;\n");
}

#[test]
fn generator_return_synthesis() {
    let out = emit_source("export function* g() { yield 1; }\nexport async function* h() { yield 1; }", true);
    assert!(out.contains("export declare function g(): Generator<any, any, any>;"));
    assert!(out.contains("export declare function h(): AsyncGenerator<any, any, any>;"));
    assert!(!out.contains('*'));
}

#[test]
fn parameter_property_split_into_fields_then_constructor() {
    let out = emit_source("export class C { constructor(public name: string, private n?: number) {} }", true);
    assert!(out.contains("{ public name: string;\n  private n?: number;\n  constructor(name: string, n?: number); }"));
}

#[test]
fn reference_closure_pulls_in_non_exported_interface() {
    let out = emit_source("interface Opts { verbose: boolean }\nexport function run(o: Opts): void {}", true);
    assert!(out.contains("interface Opts { verbose: boolean }"));
    assert!(!out.contains("declare interface"), "interfaces never carry declare regardless of export state");
    assert!(out.contains("export declare function run(o: Opts): void;"));
}

#[test]
fn ambient_module_body_drops_declare() {
    let out = emit_source("declare module 'x' { export function f(): void; export const v: number; }", true);
    assert_eq!(out, "declare module 'x' { export function f(): void;\n  export const v: number; }\n");
    assert_eq!(out.matches("declare").count(), 1, "only the outer declare module keyword may appear");
}

#[test]
fn private_fields_and_static_blocks_are_erased() {
    let out = emit_source("export class K { #secret = 1; static { K.init(); } pub = 2; }", true);
    assert!(out.contains("pub: any;"));
    assert!(!out.contains("#secret"));
    assert!(!out.contains("K.init"));
}

#[test]
fn variable_type_fallback_by_initializer_shape() {
    let out = emit_source("export const s = 'hi';\nexport const n = 42;\nexport const b = true;\nexport const u = foo();", false);
    assert!(out.contains("export declare const s: string;"));
    assert!(out.contains("export declare const n: number;"));
    assert!(out.contains("export declare const b: boolean;"));
    assert!(out.contains("export declare const u: any;"));
}

#[test]
fn keep_comments_false_drops_leading_comments() {
    let source = "/** doc */\nexport function f(): void {}";
    let with = emit_source(source, true);
    let without = emit_source(source, false);
    assert!(with.contains("/** doc */"));
    assert!(!without.contains("/** doc */"));
}

#[test]
fn import_statement_is_reproduced_verbatim_with_single_semicolon() {
    let out = emit_source("import { A } from 'a';\nexport interface B extends A {}", false);
    assert_eq!(out.matches("import { A } from 'a';;").count(), 0, "no doubled semicolon");
    assert!(out.starts_with("import { A } from 'a';"));
}

#[test]
fn nested_namespace_keeps_declare_but_ambient_module_inside_it_does_not() {
    let out = emit_source("export namespace N { export declare module 'inner' { export const z: number; } }", false);
    assert!(out.contains("export declare namespace N"));
    assert!(out.contains("declare module 'inner'"));
    assert!(!out.contains("declare const z"));
    assert!(out.contains("export const z: number;"));
}

#[test]
fn output_always_ends_with_trailing_newline() {
    let out = emit_source("export const x = 1;", false);
    assert!(out.ends_with('\n'));
    assert!(!out.ends_with("\n\n"));
}
