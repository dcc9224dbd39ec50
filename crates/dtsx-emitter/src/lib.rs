//! Canonical `.d.ts` text emission and module assembly.
//!
//! Turns a slice of extracted `Declaration`s back into source text: every
//! rule here is about erasing what the extractor already stripped (bodies,
//! initializers, private members never appear in the IR to begin with) and
//! synthesising what the output format requires but the IR doesn't carry
//! directly (`declare`, by emission context).

mod emit;
mod options;
mod writer;

pub use emit::emit;
pub use options::EmitOptions;
