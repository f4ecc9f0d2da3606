//! Content-derived Freight identity.
//!
//! Each artifact contributes one token:
//! - commit: `<repoURL>:<id>`
//! - image: `<repoURL>:<tag>`
//! - chart: `<registryURL>/<name>:<version>`
//!
//! Tokens from all three categories are pooled, sorted by byte order, joined
//! with `|` and hashed with SHA-1. The lowercase hex digest is the ID. The
//! encoding is a cross-system key and must not change: the delimiter is not
//! escaped, so tokens that contain `|` are reported by [`ambiguous_tokens`]
//! rather than rewritten.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

use crate::error::{FreightError, Result};
use crate::freight::{Chart, Freight, GitCommit, Image};
use crate::obs;

/// Separator placed between sorted artifact tokens.
pub const TOKEN_DELIMITER: &str = "|";

/// Length of a hex-encoded SHA-1 digest.
const ID_HEX_LEN: usize = 40;

/// Whether `s` is an ID in canonical form: 40 lowercase hex chars.
fn is_canonical_id(s: &str) -> bool {
    s.len() == ID_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Canonical string form of an artifact reference.
pub trait IdentityToken {
    fn identity_token(&self) -> String;
}

impl IdentityToken for GitCommit {
    fn identity_token(&self) -> String {
        format!("{}:{}", self.repo_url, self.id)
    }
}

impl IdentityToken for Image {
    fn identity_token(&self) -> String {
        format!("{}:{}", self.repo_url, self.tag)
    }
}

impl IdentityToken for Chart {
    fn identity_token(&self) -> String {
        format!("{}/{}:{}", self.registry_url, self.name, self.version)
    }
}

/// Identifier derived from a Freight's artifacts.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FreightId(String);

impl FreightId {
    /// Hash an already-canonicalized token string.
    pub fn from_canonical(canonical: &str) -> Self {
        FreightId(hex::encode(Sha1::digest(canonical.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 7 hex chars).
    pub fn short(&self) -> &str {
        &self.0[..7.min(self.0.len())]
    }
}

impl TryFrom<String> for FreightId {
    type Error = FreightError;

    fn try_from(s: String) -> Result<Self> {
        if !is_canonical_id(&s) {
            return Err(FreightError::InvalidId(s));
        }
        Ok(FreightId(s))
    }
}

impl From<FreightId> for String {
    fn from(id: FreightId) -> Self {
        id.0
    }
}

impl fmt::Display for FreightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FreightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FreightId({})", self.short())
    }
}

impl PartialEq<str> for FreightId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FreightId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// All artifact tokens of `freight`, sorted by byte order.
pub fn canonical_tokens(freight: &Freight) -> Vec<String> {
    let mut tokens = Vec::with_capacity(freight.artifact_count());
    tokens.extend(freight.commits.iter().map(IdentityToken::identity_token));
    tokens.extend(freight.images.iter().map(IdentityToken::identity_token));
    tokens.extend(freight.charts.iter().map(IdentityToken::identity_token));
    // `Ord` on String compares UTF-8 bytes, independent of locale.
    tokens.sort_unstable();
    tokens
}

/// The exact byte string that is hashed to produce the ID.
pub fn canonical_string(freight: &Freight) -> String {
    canonical_tokens(freight).join(TOKEN_DELIMITER)
}

/// Tokens containing the delimiter.
///
/// Such a token can make two different artifact sets hash to the same ID.
pub fn ambiguous_tokens(freight: &Freight) -> Vec<String> {
    canonical_tokens(freight)
        .into_iter()
        .filter(|t| t.contains(TOKEN_DELIMITER))
        .collect()
}

impl Freight {
    /// Compute the ID from current artifact content without storing it.
    pub fn derive_id(&self) -> FreightId {
        FreightId::from_canonical(&canonical_string(self))
    }

    /// Derive the ID and assign it to the `id` field.
    pub fn update_id(&mut self) -> FreightId {
        let ambiguous = ambiguous_tokens(self);
        if !ambiguous.is_empty() {
            obs::emit_ambiguous_tokens(&self.metadata.name, &ambiguous);
        }
        let id = self.derive_id();
        self.id = id.to_string();
        obs::emit_freight_identified(&self.metadata.name, id.as_str(), self.artifact_count());
        id
    }

    /// Whether `id` is set and matches the current artifacts.
    pub fn is_identified(&self) -> bool {
        !self.id.is_empty() && self.derive_id() == self.id.as_str()
    }

    /// Check that the stored `id` matches the current artifacts.
    ///
    /// An `id` that is not 40 lowercase hex chars is `InvalidId`, never
    /// `StaleId`: IDs are compared byte for byte across systems.
    pub fn verify_id(&self) -> Result<FreightId> {
        if self.id.is_empty() {
            return Err(FreightError::Unidentified);
        }
        if !is_canonical_id(&self.id) {
            return Err(FreightError::InvalidId(self.id.clone()));
        }
        let derived = self.derive_id();
        if derived != self.id.as_str() {
            obs::emit_id_stale(&self.metadata.name, &self.id, derived.as_str());
            return Err(FreightError::StaleId {
                stored: self.id.clone(),
                derived: derived.into(),
            });
        }
        Ok(derived)
    }

    /// Content equality by ID. Both sides must carry a current ID.
    pub fn same_content(&self, other: &Freight) -> Result<bool> {
        let ours = self.verify_id()?;
        let theirs = other.verify_id()?;
        Ok(ours == theirs)
    }
}
