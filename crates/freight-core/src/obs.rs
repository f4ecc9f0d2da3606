//! Structured observability hooks for Freight identity and qualification.
//!
//! Events are emitted as `tracing` events with an `event` field naming them:
//! - `freight.identified` (debug): an ID was derived and stored
//! - `freight.id_stale` (warn): a stored ID no longer matches the artifacts
//! - `freight.ambiguous_token` (warn): an artifact token contains the delimiter
//! - `freight.qualified` (info): a Stage qualified a piece of Freight

use tracing::{debug, info, warn};

/// RAII guard that enters a Freight-scoped tracing span.
///
/// # Example
///
/// ```ignore
/// let _span = FreightSpan::enter("kargo-demo/f1");
/// // All tracing calls now carry freight = "kargo-demo/f1"
/// ```
pub struct FreightSpan {
    _span: tracing::span::EnteredSpan,
}

impl FreightSpan {
    /// Create and enter a span tagged with the Freight name.
    pub fn enter(freight: &str) -> Self {
        let span = tracing::info_span!("freight", freight = %freight);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: ID derived and stored.
pub fn emit_freight_identified(name: &str, id: &str, artifacts: usize) {
    debug!(
        event = "freight.identified",
        name = %name,
        id = %id,
        artifacts = artifacts,
    );
}

/// Emit event: stored ID does not match the artifacts (warning level).
pub fn emit_id_stale(name: &str, stored: &str, derived: &str) {
    warn!(
        event = "freight.id_stale",
        name = %name,
        stored = %stored,
        derived = %derived,
    );
}

/// Emit event: tokens containing the delimiter (warning level), one per token.
pub fn emit_ambiguous_tokens(name: &str, tokens: &[String]) {
    for token in tokens {
        warn!(event = "freight.ambiguous_token", name = %name, token = %token);
    }
}

/// Emit event: a Stage qualified the Freight.
pub fn emit_freight_qualified(name: &str, id: &str, stage: &str) {
    info!(event = "freight.qualified", name = %name, id = %id, stage = %stage);
}
