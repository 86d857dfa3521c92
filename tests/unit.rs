//! Unit tests for core oddhash types.
mod common;
use oddhash::error::{CompileError, DecodeError, PrimitiveError};
use oddhash::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_placeholder_display() {
    assert_eq!(format!("{}", Placeholder::Salt), "$s");
    assert_eq!(format!("{}", Placeholder::Password), "$p");
    assert_eq!(format!("{}", Placeholder::Message), "$m");
    assert_eq!(Placeholder::Message.describe(), "message");
}

#[test]
fn test_algorithm_display() {
    let algorithm = Algorithm {
        hmac: true,
        name: "keccak".to_string(),
        size: Some(256),
    };
    assert_eq!(algorithm.to_string(), "hmac_keccak_256");
}

#[test]
fn test_value_into_program() {
    assert_eq!(
        Value::Constant(b"ab".to_vec()).into_program(),
        Program::Literal(b"ab".to_vec())
    );
    assert_eq!(Value::Deferred(Program::Password).into_program(), Program::Password);
    assert!(Value::Constant(Vec::new()).is_constant());
    assert!(!Value::Deferred(Program::Password).is_constant());
}

#[test]
fn test_compiled_accessors() {
    let constant = Compiled::Constant(b"fixed".to_vec());
    assert_eq!(constant.constant(), Some(&b"fixed"[..]));
    assert!(constant.evaluator().is_none());
    assert_eq!(constant.clone().into_evaluator(), None);

    let deferred = Compiled::Evaluator(Evaluator::new(Program::Password));
    assert_eq!(deferred.constant(), None);
    assert_eq!(deferred.hash(b"pw").unwrap(), b"pw".to_vec());
}

#[test]
fn test_error_messages() {
    let err = CompileError::AlgorithmUnsupportedParameters {
        name: "keccak_100".to_string(),
        reason: PrimitiveError::UnsupportedDigestSize {
            algorithm: "keccak".to_string(),
            bits: 100,
        },
    };
    assert_eq!(
        err.to_string(),
        "self test of algorithm \"keccak_100\" failed with error: digest size 100 bits is not supported by keccak"
    );

    let err = CompileError::AmbiguousAlgorithmMatch {
        name: "tiger".to_string(),
        candidates: vec!["Tiger".to_string(), "TIGER".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "hash function \"tiger\" is ambiguous, it matches: Tiger, TIGER"
    );

    let err = CompileError::from(ParseError::new("expected ')'", 6));
    assert_eq!(err.to_string(), "syntax error at position 6: expected ')'");

    let err = DecodeError::Hex {
        input: "zz".to_string(),
        message: "bad".to_string(),
    };
    assert_eq!(err.to_string(), "invalid hex value 'zz': bad");
}

#[test]
fn test_coding_tags() {
    for coding in Coding::ALL {
        assert_eq!(Coding::from_tag(coding.tag()), Some(coding));
        assert_eq!(coding.to_string(), coding.tag());
    }
    assert_eq!(Coding::from_tag("HEX"), None);
}
