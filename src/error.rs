use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The text is not a valid literal for the target type.
    #[error("Input '{input}' is not a valid {target} literal.")]
    Format { input: String, target: String },

    /// The literal is well-formed but outside the target's representable range.
    #[error("Value '{input}' is out of range for {target}.")]
    Overflow { input: String, target: String },

    #[error("Cannot convert an absent value to non-nullable {target}.")]
    NullInput { target: String },

    #[error("Invalid cast from {from} to {to}.")]
    InvalidCast { from: String, to: String },

    #[error("Invalid argument: {0}.")]
    InvalidArgument(String),

    #[error("Failed to serialize object graph. Original error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Member '{member}' was not found on type '{type_name}'.")]
    MemberNotFound { type_name: String, member: String },

    #[error("Member '{member}' on type '{type_name}' is not {access}.")]
    Access { type_name: String, member: String, access: &'static str },

    #[error("Member '{member}' expects {expected}, got {found}.")]
    TypeMismatch { member: String, expected: String, found: String },

    #[error("Method '{method}' expects {expected} argument(s), got {actual}.")]
    ParameterCount { method: String, expected: usize, actual: usize },

    #[error("Ambiguous match for method '{method}' on type '{type_name}': {candidates} overloads.")]
    AmbiguousMatch { type_name: String, method: String, candidates: usize },

    /// The invoked method itself failed; the original cause is kept as the source.
    #[error("Method '{method}' failed: {source}")]
    Invocation {
        method: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Character '{character}' at position {position} cannot be encoded as ASCII.")]
    Encoding { character: char, position: usize },

    #[error("Failed to parse {format}. Original error: {message}")]
    Parse { format: &'static str, message: String },
}

impl Error {
    pub(crate) fn format(input: &str, target: impl ToString) -> Self {
        Error::Format { input: input.to_string(), target: target.to_string() }
    }

    pub(crate) fn overflow(input: &str, target: impl ToString) -> Self {
        Error::Overflow { input: input.to_string(), target: target.to_string() }
    }

    pub(crate) fn xml(message: impl ToString) -> Self {
        Error::Parse { format: "XML", message: message.to_string() }
    }

    pub(crate) fn json(message: impl ToString) -> Self {
        Error::Parse { format: "JSON", message: message.to_string() }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::xml(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::json(err)
    }
}

/// Convenience type alias for Results with the crate error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
