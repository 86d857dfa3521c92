//! Hooks the compiler reports its decisions through.

use crate::error::PrimitiveError;
use std::sync::Mutex;

/// Something the compiler decided while transforming a parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A registry lookup for the given key is about to happen.
    Lookup { name: String },
    /// An algorithm selector resolved to a registry entry.
    Resolved {
        selector: String,
        algorithm: String,
        digest_bits: Option<u32>,
    },
    NotFound { name: String },
    SelfTestFailed {
        algorithm: String,
        reason: PrimitiveError,
    },
    /// A sub-expression folded to a constant of `len` bytes.
    Folded { node: String, len: usize },
    /// A sub-expression stays a function of the password.
    Deferred { node: String },
}

/// Receives compiler events. Implementations must be cheap; they run inline.
pub trait Diagnostics: Send + Sync {
    fn event(&self, event: DiagnosticEvent);
}

/// Forwards every event to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn event(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::Lookup { name } => tracing::debug!(%name, "looking up algorithm"),
            DiagnosticEvent::Resolved {
                selector,
                algorithm,
                digest_bits,
            } => tracing::debug!(%selector, %algorithm, ?digest_bits, "resolved algorithm"),
            DiagnosticEvent::NotFound { name } => tracing::debug!(%name, "algorithm not found"),
            DiagnosticEvent::SelfTestFailed { algorithm, reason } => {
                tracing::debug!(%algorithm, %reason, "algorithm self test failed")
            }
            DiagnosticEvent::Folded { node, len } => tracing::debug!(%node, len, "folded constant"),
            DiagnosticEvent::Deferred { node } => tracing::debug!(%node, "deferred on password"),
        }
    }
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn event(&self, event: DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
