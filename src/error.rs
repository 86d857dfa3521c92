use thiserror::Error;

/// A malformed hash notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at position {position}: {message}")]
pub struct ParseError {
    pub message: String,
    /// Character offset of the offending token in the notation text.
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Errors that can occur while compiling a hash notation into an evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("could not find hash function \"{name}\"")]
    AlgorithmNotFound { name: String },

    #[error("hash function \"{name}\" is ambiguous, it matches: {}", .candidates.join(", "))]
    AmbiguousAlgorithmMatch {
        name: String,
        candidates: Vec<String>,
    },

    #[error("self test of algorithm \"{name}\" failed with error: {reason}")]
    AlgorithmUnsupportedParameters { name: String, reason: PrimitiveError },

    #[error("{placeholder} required but not specified")]
    MissingPlaceholderValue { placeholder: String },
}

/// Failures raised by a digest or HMAC primitive when invoked with a given parameterization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("{algorithm} does not accept a digest size (got {bits} bits)")]
    FixedDigestSize { algorithm: String, bits: u32 },

    #[error("digest size {bits} bits is not supported by {algorithm}")]
    UnsupportedDigestSize { algorithm: String, bits: u32 },

    #[error("{algorithm} requires a digest size, none was provided")]
    DigestSizeRequired { algorithm: String },

    #[error("{algorithm} cannot be used as an HMAC digest")]
    NotKeyable { algorithm: String },
}

/// Errors that can occur while running a compiled evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("primitive failure in \"{algorithm}\": {source}")]
    Primitive {
        algorithm: String,
        source: PrimitiveError,
    },
}

/// Errors produced when decoding a user supplied value into bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid hex value '{input}': {message}")]
    Hex { input: String, message: String },

    #[error("invalid base64 value '{input}': {message}")]
    Base64 { input: String, message: String },
}

/// Errors that abort a cracking run.
#[derive(Error, Debug)]
pub enum CrackError {
    #[error("failed to read wordlist: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
