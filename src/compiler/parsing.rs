//! Recursive-descent parser for the hash notation.
//!
//! ```text
//! function   := algorithm [ "_raw" ] "(" concat ")"
//! algorithm  := [ "hmac_" ] NAME [ "_" DIGITS ]
//! concat     := param ( "." concat )?
//! param      := function | "$s" | "$p" | "$m"
//! ```
//!
//! Names are ASCII alphanumeric runs. Underscores only separate the selector
//! segments, so `sha3_384` is the name `sha3` with the size `384`; the registry
//! decides what that refers to.

use crate::ast::{Algorithm, Expression, Function, Placeholder};
use crate::error::ParseError;

type ParseResult<T> = Result<T, ParseError>;

const HMAC_PREFIX: &str = "hmac";
const RAW_SUFFIX: &str = "raw";

/// Deepest nesting of functions and concatenations accepted. Compilation and
/// evaluation recurse over the tree, so this also bounds their stack use.
pub const MAX_DEPTH: usize = 256;

/// Parses a complete notation into the root function.
pub fn parse(s: &str) -> ParseResult<Function> {
    Parser::new(s).parse()
}

/// One `_`-separated run of the algorithm selector.
struct Segment {
    text: String,
    pos: usize,
}

impl Segment {
    fn is_digits(&self) -> bool {
        self.text.chars().all(|c| c.is_ascii_digit())
    }
}

pub struct Parser {
    input: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(s: &str) -> Self {
        Parser {
            input: s.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> ParseResult<Function> {
        self.skip_ws();
        if self.eof() {
            return Err(ParseError::new("empty hash format", self.pos));
        }
        let function = self.parse_function()?;
        self.skip_ws();
        if let Some(c) = self.peek() {
            return Err(ParseError::new(
                format!("unexpected trailing characters starting with '{}'", c),
                self.pos,
            ));
        }
        Ok(function)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(c) => ParseError::new(format!("expected {}, found '{}'", expected, c), self.pos),
            None => ParseError::new(
                format!("expected {}, found end of input", expected),
                self.pos,
            ),
        }
    }

    fn consume_char(&mut self, expected: char) -> ParseResult<()> {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.next_char();
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::new(
                format!("hash format nested too deeply (limit {})", MAX_DEPTH),
                self.pos,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_function(&mut self) -> ParseResult<Function> {
        self.enter()?;
        let (algorithm, raw) = self.parse_selector()?;
        self.consume_char('(')?;
        let operand = self.parse_concat()?;
        self.consume_char(')')?;
        self.depth -= 1;
        Ok(Function {
            algorithm,
            raw,
            operand: Box::new(operand),
        })
    }

    fn parse_concat(&mut self) -> ParseResult<Expression> {
        self.skip_ws();
        let left = self.parse_param()?;
        self.skip_ws();
        if self.peek() == Some('.') {
            self.next_char();
            self.enter()?;
            let right = self.parse_concat()?;
            self.depth -= 1;
            return Ok(Expression::Concat(Box::new(left), Box::new(right)));
        }
        Ok(left)
    }

    fn parse_param(&mut self) -> ParseResult<Expression> {
        match self.peek() {
            Some('$') => {
                let start = self.pos;
                self.next_char();
                let placeholder = match self.next_char() {
                    Some('s') => Placeholder::Salt,
                    Some('p') => Placeholder::Password,
                    Some('m') => Placeholder::Message,
                    Some(c) => {
                        return Err(ParseError::new(
                            format!("unknown placeholder '${}', expected $s, $p or $m", c),
                            start,
                        ));
                    }
                    None => {
                        return Err(ParseError::new(
                            "incomplete placeholder, expected $s, $p or $m",
                            start,
                        ));
                    }
                };
                Ok(Expression::Placeholder(placeholder))
            }
            Some(c) if c.is_ascii_alphanumeric() => Ok(Expression::Function(self.parse_function()?)),
            _ => Err(self.unexpected("a hash function or a placeholder")),
        }
    }

    /// Reads `[hmac_] NAME [_DIGITS] [_raw]` as a run of segments.
    fn parse_selector(&mut self) -> ParseResult<(Algorithm, bool)> {
        let mut segments = self.read_segments()?.into_iter().peekable();

        let mut first = segments
            .next()
            .ok_or_else(|| self.unexpected("an algorithm name"))?;

        // `hmac` is only a prefix when a real name follows it.
        let mut hmac = false;
        if first.text == HMAC_PREFIX {
            if let Some(next) = segments.peek() {
                if !next.is_digits() && next.text != RAW_SUFFIX {
                    hmac = true;
                    if let Some(name) = segments.next() {
                        first = name;
                    }
                }
            }
        }
        let name = first.text;

        let mut size = None;
        if let Some(segment) = segments.next_if(|s| s.is_digits()) {
            let bits = segment.text.parse::<u32>().map_err(|_| {
                ParseError::new(
                    format!("digest size '{}' is out of range", segment.text),
                    segment.pos,
                )
            })?;
            size = Some(bits);
        }

        let raw = segments.next_if(|s| s.text == RAW_SUFFIX).is_some();

        if let Some(extra) = segments.next() {
            return Err(ParseError::new(
                format!("unexpected '{}' in algorithm name '{}'", extra.text, name),
                extra.pos,
            ));
        }

        Ok((Algorithm { hmac, name, size }, raw))
    }

    fn read_segments(&mut self) -> ParseResult<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            let start = self.pos;
            let mut text = String::new();
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() {
                    text.push(c);
                    self.next_char();
                } else {
                    break;
                }
            }
            if text.is_empty() {
                return Err(self.unexpected("an algorithm name"));
            }
            segments.push(Segment { text, pos: start });

            // Whitespace may surround the separator, as it may surround '(' and '.'.
            self.skip_ws();
            if self.peek() != Some('_') {
                return Ok(segments);
            }
            self.next_char();
            self.skip_ws();
            if !self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                return Err(self.unexpected("an algorithm name segment after '_'"));
            }
        }
    }
}
