//! End-to-end extractor -> emitter scenarios, plus the universal invariants
//! the core promises regardless of input.

use dtsx::{EmitOptions, ExtractOptions, ReferenceAllowLists, generate};

mod common;

fn run(source: &str, keep_comments: bool) -> String {
    common::init_tracing_from_env();
    let (text, _warnings) = generate(
        source,
        "input.ts",
        ExtractOptions { keep_comments },
        EmitOptions { keep_comments },
        &ReferenceAllowLists::default(),
    )
    .expect("well-formed fixtures never hit an invariant violation");
    text
}

#[test]
fn scenario_simple_const_and_function() {
    let out = run(
        "export const x: number = 1;\nexport function add(a: number, b: number): number { return a + b; }",
        true,
    );
    assert_eq!(out, "export declare const x: number;\n\nexport declare function add(a: number, b: number): number;\n");
}

#[test]
fn scenario_generator_return_synthesis() {
    let out = run("export function* g() { yield 1; }\nexport async function* h() { yield 1; }", true);
    assert!(out.contains("export declare function g(): Generator<any, any, any>;"));
    assert!(out.contains("export declare function h(): AsyncGenerator<any, any, any>;"));
}

#[test]
fn scenario_parameter_property_split() {
    let out = run("export class C { constructor(public name: string, private n?: number) {} }", true);
    assert!(out.contains("{ public name: string;\n  private n?: number;\n  constructor(name: string, n?: number); }"));
}

#[test]
fn scenario_reference_closure_pulls_non_exported_interface() {
    let out = run("interface Opts { verbose: boolean }\nexport function run(o: Opts): void {}", true);
    assert!(out.contains("interface Opts { verbose: boolean }"));
    assert!(out.contains("export declare function run(o: Opts): void;"));
}

#[test]
fn scenario_ambient_module_drops_inner_declare() {
    let out = run("declare module 'x' { export function f(): void; export const v: number; }", true);
    assert_eq!(out, "declare module 'x' { export function f(): void;\n  export const v: number; }\n");
}

#[test]
fn scenario_private_fields_and_static_blocks_erased() {
    let out = run("export class K { #secret = 1; static { K.init(); } pub = 2; }", true);
    assert!(out.contains("pub: any;"));
    assert!(!out.contains('#'));
    assert!(!out.contains("static"));
}

#[test]
fn no_body_leakage_for_function_and_class_members() {
    let source = "export function add(a: number, b: number): number {\n  const secret = a + b;\n  return secret;\n}\nexport class Store {\n  value = computeDefault();\n  load(): void { console.log('loading'); }\n}";
    let out = run(source, false);
    assert!(!out.contains("computeDefault()"));
    assert!(!out.contains("console.log"));
    assert!(!out.contains("const secret"));
    assert!(!out.contains("return secret"));
}

#[test]
fn order_preservation_for_exported_top_level_declarations() {
    let out = run("export const a = 1;\nexport const b = 2;\nexport const c = 3;", false);
    let pos_a = out.find("const a").unwrap();
    let pos_b = out.find("const b").unwrap();
    let pos_c = out.find("const c").unwrap();
    assert!(pos_a < pos_b && pos_b < pos_c);
}

#[test]
fn is_idempotent_after_re_parsing_its_own_output() {
    let source = "export class Box<T> {\n  private value: T;\n  constructor(public label: string, value: T) { this.value = value; }\n  get(): T { return this.value; }\n}";
    let first = run(source, false);
    let second = run(&first, false);
    assert_eq!(first, second);
}

#[test]
fn ambient_module_rule_no_inner_line_starts_with_declare() {
    let out = run("declare module 'x' { export declare function f(): void; export declare const v: number; }", true);
    for line in out.lines().skip(1) {
        assert!(!line.trim_start().starts_with("declare"), "line inside an ambient module must not start with declare: {line}");
    }
}
