//! Decoding of user supplied values such as `hex:7465737431` or `base64:dGVzdA==`.

use crate::error::DecodeError;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coding {
    Hex,
    Base64,
    Base64UrlSafe,
    Utf8,
}

impl Coding {
    pub const ALL: [Coding; 4] = [
        Coding::Hex,
        Coding::Base64,
        Coding::Base64UrlSafe,
        Coding::Utf8,
    ];

    /// The prefix that selects this coding.
    pub fn tag(self) -> &'static str {
        match self {
            Coding::Hex => "hex",
            Coding::Base64 => "base64",
            Coding::Base64UrlSafe => "base64urlsafe",
            Coding::Utf8 => "utf8",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Coding> {
        Coding::ALL.into_iter().find(|c| c.tag() == tag)
    }

    pub fn decode(self, value: &str) -> Result<Vec<u8>, DecodeError> {
        match self {
            Coding::Hex => hex::decode(value).map_err(|e| DecodeError::Hex {
                input: value.to_string(),
                message: e.to_string(),
            }),
            Coding::Base64 => STANDARD.decode(value).map_err(|e| DecodeError::Base64 {
                input: value.to_string(),
                message: e.to_string(),
            }),
            Coding::Base64UrlSafe => URL_SAFE.decode(value).map_err(|e| DecodeError::Base64 {
                input: value.to_string(),
                message: e.to_string(),
            }),
            Coding::Utf8 => Ok(value.as_bytes().to_vec()),
        }
    }
}

impl fmt::Display for Coding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Decodes `input`, honouring a leading `<tag>:` and falling back to `default`.
///
/// A prefix that is not a known tag is part of the value.
pub fn decode(input: &str, default: Coding) -> Result<Vec<u8>, DecodeError> {
    if let Some((tag, rest)) = input.split_once(':') {
        if let Some(coding) = Coding::from_tag(tag) {
            return coding.decode(rest);
        }
    }
    default.decode(input)
}

/// Tag names, for help text.
pub fn codings() -> Vec<&'static str> {
    Coding::ALL.iter().map(|c| c.tag()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(decode("hex:74657374", Coding::Utf8).unwrap(), b"test");
        assert_eq!(decode("base64:dGVzdA==", Coding::Utf8).unwrap(), b"test");
        assert_eq!(decode("base64urlsafe:-_8=", Coding::Utf8).unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode("utf8:hex:00", Coding::Hex).unwrap(), b"hex:00");
    }

    #[test]
    fn test_default_coding() {
        assert_eq!(decode("74657374", Coding::Hex).unwrap(), b"test");
        assert_eq!(decode("74657374", Coding::Utf8).unwrap(), b"74657374");
    }

    #[test]
    fn test_unknown_prefix_is_part_of_value() {
        assert_eq!(decode("pass:word", Coding::Utf8).unwrap(), b"pass:word");
        assert_eq!(decode("", Coding::Utf8).unwrap(), b"");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            decode("hex:zz", Coding::Utf8),
            Err(DecodeError::Hex { .. })
        ));
        assert!(matches!(
            decode("abc", Coding::Hex),
            Err(DecodeError::Hex { .. })
        ));
        assert!(matches!(
            decode("base64:***", Coding::Utf8),
            Err(DecodeError::Base64 { .. })
        ));
    }

    #[test]
    fn test_codings_lists_tags() {
        assert_eq!(codings(), vec!["hex", "base64", "base64urlsafe", "utf8"]);
    }
}
