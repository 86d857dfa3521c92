use crate::error::EvaluationError;

mod program;

pub use program::Program;
pub(crate) use program::render;

/// Anything that maps a password to a digest. The cracking driver is generic over it.
pub trait HashFunction: Send + Sync {
    fn hash(&self, password: &[u8]) -> Result<Vec<u8>, EvaluationError>;

    /// Whether the output is binary rather than lower-case hex text.
    fn is_raw(&self) -> bool;
}

/// A compiled hash notation that depends on the password.
///
/// An `Evaluator` is created by the `Compiler`. It is immutable and can be used
/// repeatedly and safely across multiple threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    program: Program,
}

impl Evaluator {
    pub fn new(program: Program) -> Self {
        Self { program }
    }

    /// Hashes `password` through the compiled notation.
    ///
    /// Returns hex-text bytes unless the outermost function was written with `_raw`.
    pub fn eval(&self, password: &[u8]) -> Result<Vec<u8>, EvaluationError> {
        self.program.eval(password)
    }

    pub fn is_raw(&self) -> bool {
        self.program.is_raw()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

impl HashFunction for Evaluator {
    fn hash(&self, password: &[u8]) -> Result<Vec<u8>, EvaluationError> {
        self.eval(password)
    }

    fn is_raw(&self) -> bool {
        Evaluator::is_raw(self)
    }
}

/// The outcome of compiling a notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// The notation never reads the password; it folded to these bytes.
    Constant(Vec<u8>),
    Evaluator(Evaluator),
}

impl Compiled {
    pub fn constant(&self) -> Option<&[u8]> {
        match self {
            Compiled::Constant(bytes) => Some(bytes),
            Compiled::Evaluator(_) => None,
        }
    }

    pub fn evaluator(&self) -> Option<&Evaluator> {
        match self {
            Compiled::Evaluator(evaluator) => Some(evaluator),
            Compiled::Constant(_) => None,
        }
    }

    pub fn into_evaluator(self) -> Option<Evaluator> {
        match self {
            Compiled::Evaluator(evaluator) => Some(evaluator),
            Compiled::Constant(_) => None,
        }
    }

    /// Hashes `password`, returning the folded bytes unchanged for a constant.
    pub fn hash(&self, password: &[u8]) -> Result<Vec<u8>, EvaluationError> {
        match self {
            Compiled::Constant(bytes) => Ok(bytes.clone()),
            Compiled::Evaluator(evaluator) => evaluator.eval(password),
        }
    }
}
