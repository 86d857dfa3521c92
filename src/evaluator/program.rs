use crate::error::EvaluationError;
use crate::registry::ResolvedAlgorithm;
use std::fmt;

/// A compiled node that still depends on the password.
///
/// Every constant a node needs is owned by the node, so a `Program` can be shared
/// between threads and evaluated any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    /// The password itself.
    Password,
    /// Bytes folded at compile time.
    Literal(Vec<u8>),
    Concat(Box<Program>, Box<Program>),
    Digest {
        algorithm: ResolvedAlgorithm,
        raw: bool,
        input: Box<Program>,
    },
    /// HMAC keyed with the password over the evaluated message.
    Hmac {
        algorithm: ResolvedAlgorithm,
        raw: bool,
        message: Box<Program>,
    },
}

impl Program {
    pub fn eval(&self, password: &[u8]) -> Result<Vec<u8>, EvaluationError> {
        match self {
            Program::Password => Ok(password.to_vec()),
            Program::Literal(bytes) => Ok(bytes.clone()),
            Program::Concat(left, right) => {
                let mut out = left.eval(password)?;
                out.extend(right.eval(password)?);
                Ok(out)
            }
            Program::Digest {
                algorithm,
                raw,
                input,
            } => {
                let data = input.eval(password)?;
                let digest = algorithm
                    .digest(&data)
                    .map_err(|source| EvaluationError::Primitive {
                        algorithm: algorithm.to_string(),
                        source,
                    })?;
                Ok(render(digest, *raw))
            }
            Program::Hmac {
                algorithm,
                raw,
                message,
            } => {
                let data = message.eval(password)?;
                let mac = algorithm
                    .hmac(password, &data)
                    .map_err(|source| EvaluationError::Primitive {
                        algorithm: algorithm.to_string(),
                        source,
                    })?;
                Ok(render(mac, *raw))
            }
        }
    }

    /// Whether the node emits binary bytes rather than hex text.
    pub fn is_raw(&self) -> bool {
        match self {
            Program::Digest { raw, .. } | Program::Hmac { raw, .. } => *raw,
            _ => true,
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Program::Password => writeln!(f, "{}password", indent),
            Program::Literal(bytes) => writeln!(f, "{}literal {}", indent, hex::encode(bytes)),
            Program::Concat(left, right) => {
                writeln!(f, "{}concat", indent)?;
                left.fmt_tree(f, depth + 1)?;
                right.fmt_tree(f, depth + 1)
            }
            Program::Digest {
                algorithm,
                raw,
                input,
            } => {
                writeln!(f, "{}{}{}", indent, algorithm, if *raw { " raw" } else { "" })?;
                input.fmt_tree(f, depth + 1)
            }
            Program::Hmac {
                algorithm,
                raw,
                message,
            } => {
                writeln!(
                    f,
                    "{}hmac {} key=password{}",
                    indent,
                    algorithm,
                    if *raw { " raw" } else { "" }
                )?;
                message.fmt_tree(f, depth + 1)
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Binary digest bytes in raw mode, lower-case hex text otherwise.
pub(crate) fn render(digest: Vec<u8>, raw: bool) -> Vec<u8> {
    if raw {
        digest
    } else {
        hex::encode(digest).into_bytes()
    }
}
