//! The algorithm registry: an immutable, case-insensitive index of the digest
//! algorithms the cryptography provider exposes.

use crate::error::{CompileError, PrimitiveError};
use ahash::AHashMap;
use std::fmt;

pub mod provider;

pub use provider::Primitive;

/// A registry entry, resolved once per compile and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmDescriptor {
    pub name: String,
    pub primitive: Primitive,
    pub hmac_capable: bool,
    pub variable_digest_size: bool,
}

impl AlgorithmDescriptor {
    /// Describes a provider primitive under its canonical name.
    pub fn from_primitive(primitive: Primitive) -> Self {
        Self::named(primitive.name(), primitive)
    }

    /// Describes a provider primitive under a custom registry name.
    pub fn named(name: impl Into<String>, primitive: Primitive) -> Self {
        let variable_digest_size = primitive.variable_digest_size();
        Self {
            name: name.into(),
            primitive,
            hmac_capable: !variable_digest_size,
            variable_digest_size,
        }
    }
}

/// An algorithm selected by the compiler, together with the digest width it was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAlgorithm {
    descriptor: AlgorithmDescriptor,
    digest_bits: Option<u32>,
}

impl ResolvedAlgorithm {
    pub fn new(descriptor: AlgorithmDescriptor, digest_bits: Option<u32>) -> Self {
        Self {
            descriptor,
            digest_bits,
        }
    }

    pub fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    pub fn digest_bits(&self) -> Option<u32> {
        self.digest_bits
    }

    pub fn digest(&self, data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        self.descriptor.primitive.digest(self.digest_bits, data)
    }

    pub fn hmac(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        if !self.descriptor.hmac_capable {
            return Err(PrimitiveError::NotKeyable {
                algorithm: self.descriptor.name.clone(),
            });
        }
        // HMAC always runs at the primitive's native width.
        if let Some(bits) = self.digest_bits {
            return Err(PrimitiveError::FixedDigestSize {
                algorithm: self.descriptor.name.clone(),
                bits,
            });
        }
        self.descriptor.primitive.hmac(key, data)
    }
}

impl fmt::Display for ResolvedAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.digest_bits {
            Some(bits) => write!(f, "{}[{}]", self.descriptor.name, bits),
            None => write!(f, "{}", self.descriptor.name),
        }
    }
}

/// Immutable mapping from normalized (upper-case) names to registry entries.
///
/// Names that collide once normalized are all kept, so a lookup can report the
/// ambiguity instead of picking one.
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    descriptors: Vec<AlgorithmDescriptor>,
    index: AHashMap<String, Vec<usize>>,
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgorithmRegistry {
    /// Enumerates every primitive the provider exposes.
    pub fn new() -> Self {
        Self::from_descriptors(Primitive::ALL.into_iter().map(AlgorithmDescriptor::from_primitive))
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = AlgorithmDescriptor>) -> Self {
        let descriptors: Vec<AlgorithmDescriptor> = descriptors.into_iter().collect();
        let mut index: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (i, descriptor) in descriptors.iter().enumerate() {
            index
                .entry(descriptor.name.to_ascii_uppercase())
                .or_default()
                .push(i);
        }
        Self { descriptors, index }
    }

    /// Registry names in provider order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Finds the single entry named `name`, or `name_size` when a size is given.
    pub fn lookup(
        &self,
        name: &str,
        size: Option<u32>,
    ) -> Result<&AlgorithmDescriptor, CompileError> {
        let key = match size {
            Some(size) => format!("{}_{}", name, size),
            None => name.to_string(),
        };

        match self.index.get(&key.to_ascii_uppercase()).map(Vec::as_slice) {
            Some([only]) => Ok(&self.descriptors[*only]),
            Some(matches) if !matches.is_empty() => Err(CompileError::AmbiguousAlgorithmMatch {
                name: key,
                candidates: matches
                    .iter()
                    .map(|&i| self.descriptors[i].name.clone())
                    .collect(),
            }),
            _ => Err(CompileError::AlgorithmNotFound { name: key }),
        }
    }
}
