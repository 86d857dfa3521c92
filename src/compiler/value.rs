use crate::evaluator::Program;

/// What a parse-tree node compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Fully known at compile time.
    Constant(Vec<u8>),
    /// Needs the password before it can produce bytes.
    Deferred(Program),
}

impl Value {
    pub fn is_constant(&self) -> bool {
        matches!(self, Value::Constant(_))
    }

    /// Lowers the value into a program node, embedding constants as literals.
    pub fn into_program(self) -> Program {
        match self {
            Value::Constant(bytes) => Program::Literal(bytes),
            Value::Deferred(program) => program,
        }
    }
}
