//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the oddhash crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use oddhash::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let compiler = Compiler::new();
//! match compiler.compile("md5(sha1_raw($p))")? {
//!     Compiled::Evaluator(evaluator) => println!("{:?}", evaluator.eval(b"password")?),
//!     Compiled::Constant(bytes) => println!("constant: {:?}", bytes),
//! }
//! # Ok(())
//! # }
//! ```

// Compilation and evaluation
pub use crate::compiler::{Compiler, CompilerBuilder, Value};
pub use crate::evaluator::{Compiled, Evaluator, HashFunction, Program};

// Parse tree
pub use crate::ast::{Algorithm, DisplayTree, Expression, Function, Placeholder};

// Registry
pub use crate::registry::{AlgorithmDescriptor, AlgorithmRegistry, Primitive, ResolvedAlgorithm};

// Collaborators
pub use crate::crack::{CrackOptions, CrackReport, Cracker, Targets};
pub use crate::encoding::Coding;

// Error types
pub use crate::error::{CompileError, DecodeError, EvaluationError, ParseError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
