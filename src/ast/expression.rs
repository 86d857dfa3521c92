use std::fmt;

/// A position in the notation bound to a caller-supplied or runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Salt,
    Password,
    Message,
}

impl Placeholder {
    /// The human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Placeholder::Salt => "salt",
            Placeholder::Password => "password",
            Placeholder::Message => "message",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::Salt => write!(f, "$s"),
            Placeholder::Password => write!(f, "$p"),
            Placeholder::Message => write!(f, "$m"),
        }
    }
}

/// An algorithm selector as written, before registry resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Algorithm {
    pub hmac: bool,
    pub name: String,
    pub size: Option<u32>,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hmac {
            write!(f, "hmac_")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(size) = self.size {
            write!(f, "_{}", size)?;
        }
        Ok(())
    }
}

/// Applies an algorithm to the bytes produced by its operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub algorithm: Algorithm,
    /// Emit binary digest bytes instead of lower-case hex text.
    pub raw: bool,
    pub operand: Box<Expression>,
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.algorithm)?;
        if self.raw {
            write!(f, "_raw")?;
        }
        write!(f, "({})", self.operand)
    }
}

/// The parse tree of a hash notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Function(Function),
    /// Byte concatenation, evaluated left to right. Chains nest to the right.
    Concat(Box<Expression>, Box<Expression>),
    Placeholder(Placeholder),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Function(function) => write!(f, "{}", function),
            Expression::Concat(l, r) => write!(f, "{}.{}", l, r),
            Expression::Placeholder(p) => write!(f, "{}", p),
        }
    }
}

/// A wrapper to display a parse tree as an indented outline.
pub struct DisplayTree<'a>(pub &'a Function);

impl<'a> fmt::Display for DisplayTree<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_function(self.0, f, "", true)
    }
}

impl<'a> DisplayTree<'a> {
    fn fmt_function(
        function: &Function,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });

        write!(f, "{}{}function", prefix, node_marker)?;
        if function.raw {
            write!(f, " (raw)")?;
        }
        writeln!(f)?;

        let algorithm = &function.algorithm;
        write!(f, "{}├── algorithm: {}", child_prefix, algorithm.name)?;
        if let Some(size) = algorithm.size {
            write!(f, ", size {}", size)?;
        }
        if algorithm.hmac {
            write!(f, ", hmac")?;
        }
        writeln!(f)?;

        Self::fmt_expression(&function.operand, f, &child_prefix, true)
    }

    fn fmt_expression(
        expr: &Expression,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        match expr {
            Expression::Function(function) => Self::fmt_function(function, f, prefix, is_last),
            Expression::Placeholder(p) => {
                let node_marker = if is_last { "└── " } else { "├── " };
                writeln!(f, "{}{}{} ({})", prefix, node_marker, p, p.describe())
            }
            Expression::Concat(l, r) => {
                let node_marker = if is_last { "└── " } else { "├── " };
                let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
                writeln!(f, "{}{}concat", prefix, node_marker)?;
                Self::fmt_expression(l, f, &child_prefix, false)?;
                Self::fmt_expression(r, f, &child_prefix, true)
            }
        }
    }
}
