//! Plain, `Default`-deriving configuration. Nothing here is read from a
//! global — every option is threaded through as an explicit argument,
//! mirroring the teacher's `CheckerOptions` pattern.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractOptions {
    pub keep_comments: bool,
}

/// Data, not a singleton: the built-in-type and common-generic allow-lists
/// consulted by the reference-closure pass (§4.3.1). Callers (and tests) can
/// substitute their own lists; `default()` matches the closed lists named in
/// the component design.
#[derive(Clone, Debug)]
pub struct ReferenceAllowLists {
    pub built_in_types: HashSet<String>,
    pub single_letter_generics: HashSet<String>,
}

impl Default for ReferenceAllowLists {
    fn default() -> Self {
        let built_in_types = [
            "string",
            "number",
            "boolean",
            "object",
            "any",
            "unknown",
            "never",
            "void",
            "undefined",
            "null",
            "Array",
            "Promise",
            "Record",
            "Partial",
            "Required",
            "Pick",
            "Omit",
            "Exclude",
            "Extract",
            "NonNullable",
            "ReturnType",
            "Parameters",
            "ConstructorParameters",
            "InstanceType",
            "ThisType",
            "Function",
            "Date",
            "RegExp",
            "Error",
            "Map",
            "Set",
            "WeakMap",
            "WeakSet",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let single_letter_generics = [
            "T", "K", "V", "U", "R", "P", "E", "A", "B", "C", "D", "F", "G", "H", "I", "J", "L", "M", "N", "O", "Q",
            "S", "W", "X", "Y", "Z",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        ReferenceAllowLists { built_in_types, single_letter_generics }
    }
}
