use crate::ast::{Algorithm, Expression, Function, Placeholder};
use crate::error::CompileError;
use crate::evaluator::{render, Compiled, Evaluator, Program};
use crate::registry::{AlgorithmRegistry, ResolvedAlgorithm};
use std::sync::Arc;

pub mod diagnostics;
pub mod parsing;
mod value;

use diagnostics::{DiagnosticEvent, Diagnostics, TracingDiagnostics};
pub use value::Value;

/// Fixed input the compiler hashes to prove a resolved algorithm works.
const SELF_TEST_INPUT: &[u8] = b"test";
const SELF_TEST_KEY: &[u8] = b"key";

/// Turns hash notations into evaluators.
///
/// A `Compiler` holds the salt and message bound before compilation and an
/// immutable registry snapshot. It can compile any number of notations.
pub struct Compiler {
    registry: AlgorithmRegistry,
    salt: Option<Vec<u8>>,
    message: Option<Vec<u8>>,
    diagnostics: Arc<dyn Diagnostics>,
}

pub struct CompilerBuilder {
    registry: Option<AlgorithmRegistry>,
    salt: Option<Vec<u8>>,
    message: Option<Vec<u8>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            salt: None,
            message: None,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Binds `$s`.
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// Binds `$m`.
    pub fn with_message(mut self, message: impl Into<Vec<u8>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            registry: self.registry.unwrap_or_default(),
            salt: self.salt,
            message: self.message,
            diagnostics: self.diagnostics,
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// A compiler with the provider registry and no salt or message bound.
    pub fn new() -> Self {
        CompilerBuilder::new().build()
    }

    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Parses and compiles a notation.
    ///
    /// Either a complete result is returned or nothing is; there are no partially
    /// compiled evaluators.
    pub fn compile(&self, notation: &str) -> Result<Compiled, CompileError> {
        let tree = parsing::parse(notation)?;
        self.compile_tree(&tree)
    }

    /// Compiles an already parsed notation.
    pub fn compile_tree(&self, root: &Function) -> Result<Compiled, CompileError> {
        Ok(match self.compile_function(root)? {
            Value::Constant(bytes) => Compiled::Constant(bytes),
            Value::Deferred(program) => Compiled::Evaluator(Evaluator::new(program)),
        })
    }

    fn compile_expression(&self, expr: &Expression) -> Result<Value, CompileError> {
        match expr {
            Expression::Function(function) => self.compile_function(function),
            Expression::Placeholder(placeholder) => self.compile_placeholder(*placeholder),
            Expression::Concat(left, right) => {
                let left = self.compile_expression(left)?;
                let right = self.compile_expression(right)?;
                Ok(Self::concat(left, right))
            }
        }
    }

    fn compile_placeholder(&self, placeholder: Placeholder) -> Result<Value, CompileError> {
        let bound = match placeholder {
            Placeholder::Password => return Ok(Value::Deferred(Program::Password)),
            Placeholder::Salt => &self.salt,
            Placeholder::Message => &self.message,
        };
        bound
            .clone()
            .map(Value::Constant)
            .ok_or_else(|| CompileError::MissingPlaceholderValue {
                placeholder: placeholder.describe().to_string(),
            })
    }

    fn concat(left: Value, right: Value) -> Value {
        match (left, right) {
            (Value::Constant(mut left), Value::Constant(right)) => {
                left.extend(right);
                Value::Constant(left)
            }
            (left, right) => Value::Deferred(Program::Concat(
                Box::new(left.into_program()),
                Box::new(right.into_program()),
            )),
        }
    }

    fn compile_function(&self, function: &Function) -> Result<Value, CompileError> {
        let algorithm = self.resolve(&function.algorithm)?;
        let operand = self.compile_expression(&function.operand)?;
        let node = function.to_string();

        let value = if function.algorithm.hmac {
            // The key is the password, so keyed nodes never fold.
            Value::Deferred(Program::Hmac {
                algorithm,
                raw: function.raw,
                message: Box::new(operand.into_program()),
            })
        } else {
            match operand {
                Value::Constant(bytes) => {
                    let digest = algorithm.digest(&bytes).map_err(|reason| {
                        CompileError::AlgorithmUnsupportedParameters {
                            name: function.algorithm.to_string(),
                            reason,
                        }
                    })?;
                    Value::Constant(render(digest, function.raw))
                }
                deferred => Value::Deferred(Program::Digest {
                    algorithm,
                    raw: function.raw,
                    input: Box::new(deferred.into_program()),
                }),
            }
        };

        match &value {
            Value::Constant(bytes) => self.diagnostics.event(DiagnosticEvent::Folded {
                node,
                len: bytes.len(),
            }),
            Value::Deferred(_) => self.diagnostics.event(DiagnosticEvent::Deferred { node }),
        }
        Ok(value)
    }

    /// Resolves a selector against the registry and self-tests the result.
    ///
    /// The bare name wins when it matches; the size is then a digest-size parameter.
    /// Otherwise `name_size` is tried and the size is consumed by the lookup. A size
    /// left over on a keyed selector fails the self-test.
    fn resolve(&self, selector: &Algorithm) -> Result<ResolvedAlgorithm, CompileError> {
        self.diagnostics.event(DiagnosticEvent::Lookup {
            name: selector.name.clone(),
        });

        let (descriptor, digest_bits) = match self.registry.lookup(&selector.name, None) {
            Ok(descriptor) => (descriptor, selector.size),
            Err(CompileError::AlgorithmNotFound { .. }) if selector.size.is_some() => {
                match self.registry.lookup(&selector.name, selector.size) {
                    Ok(descriptor) => (descriptor, None),
                    Err(err) => return Err(self.not_found(err)),
                }
            }
            Err(err) => return Err(self.not_found(err)),
        };

        let algorithm = ResolvedAlgorithm::new(descriptor.clone(), digest_bits);

        let self_test = if selector.hmac {
            algorithm.hmac(SELF_TEST_KEY, SELF_TEST_INPUT)
        } else {
            algorithm.digest(SELF_TEST_INPUT)
        };
        if let Err(reason) = self_test {
            self.diagnostics.event(DiagnosticEvent::SelfTestFailed {
                algorithm: algorithm.to_string(),
                reason: reason.clone(),
            });
            return Err(CompileError::AlgorithmUnsupportedParameters {
                name: selector.to_string(),
                reason,
            });
        }

        self.diagnostics.event(DiagnosticEvent::Resolved {
            selector: selector.to_string(),
            algorithm: descriptor.name.clone(),
            digest_bits,
        });
        Ok(algorithm)
    }

    fn not_found(&self, err: CompileError) -> CompileError {
        if let CompileError::AlgorithmNotFound { name } = &err {
            self.diagnostics
                .event(DiagnosticEvent::NotFound { name: name.clone() });
        }
        err
    }
}
