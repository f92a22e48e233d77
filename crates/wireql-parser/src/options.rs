//! Parser configuration.

/// Read-only configuration for a parse call.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserOptions {
    /// Omit location tracking entirely: every node's `loc` is `None`.
    pub no_locations: bool,

    /// Abort with a syntax error once more than this many field
    /// selections have been parsed. `None` disables the ceiling.
    ///
    /// The count is accumulated incrementally as fields are parsed, not
    /// computed by a post-pass, so an abusive document fails before its
    /// tail is ever tokenized.
    pub max_fields: Option<usize>,

    /// Experimental grammar extension: permit variable definitions on
    /// fragment definitions (`fragment f($x: Int) on T { ... }`).
    pub allow_fragment_variables: bool,
}
