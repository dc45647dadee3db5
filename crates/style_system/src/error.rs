use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while building breakpoints or loading theme configuration.
pub enum StyleError {
    /// One of the required `sm`/`md`/`lg`/`xl` breakpoints was not supplied.
    #[error("missing required breakpoint `{0}`")]
    MissingBreakpoint(String),
    /// A breakpoint value has no leading numeric portion.
    #[error("breakpoint `{name}` has a non-numeric length `{value}`")]
    InvalidLength {
        /// Breakpoint name.
        name: String,
        /// Offending length string.
        value: String,
    },
    /// Theme JSON could not be parsed or did not match the theme schema.
    #[error("invalid theme JSON: {0}")]
    ThemeJson(#[from] serde_json::Error),
    /// Theme TOML could not be parsed or did not match the theme schema.
    #[error("invalid theme TOML: {0}")]
    ThemeToml(#[from] toml::de::Error),
}
