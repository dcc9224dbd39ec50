//! Plain, `Default`-deriving configuration, mirroring `ExtractOptions`.

#[derive(Clone, Copy, Debug, Default)]
pub struct EmitOptions {
    pub keep_comments: bool,
}
