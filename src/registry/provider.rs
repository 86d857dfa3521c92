//! Adapter over the RustCrypto digest crates.
//!
//! This is the only place that names concrete digest types. Everything above it works
//! with the [`Primitive`] enumeration, which is what the registry enumerates at startup.

use crate::error::PrimitiveError;
use blake2::digest::{Update, VariableOutput};
use blake2::{Blake2bVar, Blake2sVar};
use hmac::{Mac, SimpleHmac};
use md2::Md2;
use md4::Md4;
use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Keccak224, Keccak256, Keccak384, Keccak512, Sha3_224, Sha3_256, Sha3_384, Sha3_512};

/// A digest algorithm offered by the underlying cryptography provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Md2,
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Keccak,
    Blake2b,
    Blake2s,
    Ripemd160,
}

impl Primitive {
    /// Every primitive, in the order they are listed in help output.
    pub const ALL: [Primitive; 16] = [
        Primitive::Blake2b,
        Primitive::Blake2s,
        Primitive::Md2,
        Primitive::Md4,
        Primitive::Md5,
        Primitive::Ripemd160,
        Primitive::Sha1,
        Primitive::Sha224,
        Primitive::Sha256,
        Primitive::Sha384,
        Primitive::Sha3_224,
        Primitive::Sha3_256,
        Primitive::Sha3_384,
        Primitive::Sha3_512,
        Primitive::Sha512,
        Primitive::Keccak,
    ];

    /// The provider's canonical spelling, used as the registry key.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Md2 => "MD2",
            Primitive::Md4 => "MD4",
            Primitive::Md5 => "MD5",
            Primitive::Sha1 => "SHA1",
            Primitive::Sha224 => "SHA224",
            Primitive::Sha256 => "SHA256",
            Primitive::Sha384 => "SHA384",
            Primitive::Sha512 => "SHA512",
            Primitive::Sha3_224 => "SHA3_224",
            Primitive::Sha3_256 => "SHA3_256",
            Primitive::Sha3_384 => "SHA3_384",
            Primitive::Sha3_512 => "SHA3_512",
            Primitive::Keccak => "keccak",
            Primitive::Blake2b => "BLAKE2b",
            Primitive::Blake2s => "BLAKE2s",
            Primitive::Ripemd160 => "RIPEMD160",
        }
    }

    /// Whether the digest width is chosen by the caller.
    pub fn variable_digest_size(self) -> bool {
        matches!(
            self,
            Primitive::Keccak | Primitive::Blake2b | Primitive::Blake2s
        )
    }

    /// Computes the digest of `data`, optionally with an explicit width in bits.
    pub fn digest(self, bits: Option<u32>, data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        macro_rules! fixed {
            ($x:ty) => {
                match bits {
                    None => Ok(<$x as Digest>::digest(data).to_vec()),
                    Some(bits) => Err(PrimitiveError::FixedDigestSize {
                        algorithm: self.name().to_string(),
                        bits,
                    }),
                }
            };
        }

        match self {
            Primitive::Md2 => fixed!(Md2),
            Primitive::Md4 => fixed!(Md4),
            Primitive::Md5 => fixed!(Md5),
            Primitive::Sha1 => fixed!(Sha1),
            Primitive::Sha224 => fixed!(Sha224),
            Primitive::Sha256 => fixed!(Sha256),
            Primitive::Sha384 => fixed!(Sha384),
            Primitive::Sha512 => fixed!(Sha512),
            Primitive::Sha3_224 => fixed!(Sha3_224),
            Primitive::Sha3_256 => fixed!(Sha3_256),
            Primitive::Sha3_384 => fixed!(Sha3_384),
            Primitive::Sha3_512 => fixed!(Sha3_512),
            Primitive::Ripemd160 => fixed!(Ripemd160),
            Primitive::Keccak => self.keccak(bits, data),
            Primitive::Blake2b => {
                let len = self.output_len(bits.unwrap_or(512), 512)?;
                let mut hasher = Blake2bVar::new(len).map_err(|_| self.unsupported(len))?;
                Update::update(&mut hasher, data);
                let mut out = vec![0u8; len];
                hasher
                    .finalize_variable(&mut out)
                    .map_err(|_| self.unsupported(len))?;
                Ok(out)
            }
            Primitive::Blake2s => {
                let len = self.output_len(bits.unwrap_or(256), 256)?;
                let mut hasher = Blake2sVar::new(len).map_err(|_| self.unsupported(len))?;
                Update::update(&mut hasher, data);
                let mut out = vec![0u8; len];
                hasher
                    .finalize_variable(&mut out)
                    .map_err(|_| self.unsupported(len))?;
                Ok(out)
            }
        }
    }

    /// Computes HMAC over `data` keyed with `key`.
    ///
    /// Only fixed-output primitives can be keyed; variable-width families report
    /// [`PrimitiveError::NotKeyable`].
    pub fn hmac(self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        macro_rules! hmac_digest {
            ($x:ty) => {{
                let mut mac = <SimpleHmac<$x> as Mac>::new_from_slice(key).map_err(|_| {
                    PrimitiveError::NotKeyable {
                        algorithm: self.name().to_string(),
                    }
                })?;
                Mac::update(&mut mac, data);
                Ok(Mac::finalize(mac).into_bytes().to_vec())
            }};
        }

        match self {
            Primitive::Md2 => hmac_digest!(Md2),
            Primitive::Md4 => hmac_digest!(Md4),
            Primitive::Md5 => hmac_digest!(Md5),
            Primitive::Sha1 => hmac_digest!(Sha1),
            Primitive::Sha224 => hmac_digest!(Sha224),
            Primitive::Sha256 => hmac_digest!(Sha256),
            Primitive::Sha384 => hmac_digest!(Sha384),
            Primitive::Sha512 => hmac_digest!(Sha512),
            Primitive::Sha3_224 => hmac_digest!(Sha3_224),
            Primitive::Sha3_256 => hmac_digest!(Sha3_256),
            Primitive::Sha3_384 => hmac_digest!(Sha3_384),
            Primitive::Sha3_512 => hmac_digest!(Sha3_512),
            Primitive::Ripemd160 => hmac_digest!(Ripemd160),
            Primitive::Keccak | Primitive::Blake2b | Primitive::Blake2s => {
                Err(PrimitiveError::NotKeyable {
                    algorithm: self.name().to_string(),
                })
            }
        }
    }

    fn keccak(self, bits: Option<u32>, data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        match bits {
            Some(224) => Ok(Keccak224::digest(data).to_vec()),
            Some(256) => Ok(Keccak256::digest(data).to_vec()),
            Some(384) => Ok(Keccak384::digest(data).to_vec()),
            Some(512) => Ok(Keccak512::digest(data).to_vec()),
            Some(bits) => Err(PrimitiveError::UnsupportedDigestSize {
                algorithm: self.name().to_string(),
                bits,
            }),
            None => Err(PrimitiveError::DigestSizeRequired {
                algorithm: self.name().to_string(),
            }),
        }
    }

    /// Converts a width in bits into a byte length, rejecting widths the family can't produce.
    fn output_len(self, bits: u32, max_bits: u32) -> Result<usize, PrimitiveError> {
        if bits == 0 || bits > max_bits || bits % 8 != 0 {
            return Err(PrimitiveError::UnsupportedDigestSize {
                algorithm: self.name().to_string(),
                bits,
            });
        }
        Ok((bits / 8) as usize)
    }

    fn unsupported(self, len: usize) -> PrimitiveError {
        PrimitiveError::UnsupportedDigestSize {
            algorithm: self.name().to_string(),
            bits: (len * 8) as u32,
        }
    }
}
