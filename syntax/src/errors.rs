use alloc::string::String;

// PARSE ERROR
// ================================================================================================

/// Errors raised while parsing knitout text.
///
/// Header problems are not errors: malformed or absent header values fall back to machine
/// defaults with a warning. Only instruction lines that cannot be understood fail the parse.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: unknown operation '{op}'")]
    UnknownOperation { line: usize, op: String },
    #[error("line {line}: '{op}' is missing its {what}")]
    MissingArgument { line: usize, op: &'static str, what: &'static str },
    #[error("line {line}: '{token}' is not a direction (expected '+' or '-')")]
    InvalidDirection { line: usize, token: String },
    #[error("line {line}: '{token}' is not a needle (expected f<n> or b<n>)")]
    InvalidNeedle { line: usize, token: String },
    #[error("line {line}: '{token}' is not a valid carrier set (ids 1-10, at most 2, no repeats)")]
    InvalidCarriers { line: usize, token: String },
    #[error("line {line}: '{token}' is not a racking value")]
    InvalidRackValue { line: usize, token: String },
    #[error("line {line}: unexpected trailing token '{token}'")]
    TrailingToken { line: usize, token: String },
}
