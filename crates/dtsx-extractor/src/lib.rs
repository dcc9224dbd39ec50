//! Declaration extraction and reference closure.
//!
//! Walks the syntactic tree the parser produces, selects the exported API
//! surface, synthesises the types the source left implicit (generator
//! returns, parameter property splitting), and widens the result with any
//! non-exported declarations that the surface references (§4.3.1). Bodies,
//! initializers and private members never make it into the IR at all — the
//! emitter downstream never needs to filter them back out.

pub mod declaration;
pub mod extract;
pub mod options;
pub mod reference_closure;

pub use declaration::*;
pub use extract::{ExtractResult, extract};
pub use options::{ExtractOptions, ReferenceAllowLists};
pub use reference_closure::referenced_names;
