/// Errors raised by the chimera detection library.
#[derive(Debug, thiserror::Error)]
pub enum ChimeraError {
    #[error("not a valid search method: {0}")]
    UnknownSearchMethod(String),

    #[error("not a valid trim mode: {0}")]
    UnknownTrimMode(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Query and candidate are not in the same alignment coordinates.
    #[error("aligned length of {name} is {found}, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("alignment strings are of different lengths: {left} vs {right}")]
    IdentityLength { left: usize, right: usize },
}
