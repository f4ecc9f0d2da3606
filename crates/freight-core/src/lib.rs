//! Freight Domain Model
//!
//! Defines Freight as a content-identified bundle of deployable artifacts:
//! - GitCommit: a specific commit in a specific Git repository
//! - Image: a specific tag of a container image repository
//! - Chart: a specific version of a chart in a chart registry
//! - FreightStatus: the Stages that have qualified the bundle
//!
//! A Freight's ID is derived from its artifacts alone (SHA-1 over the sorted,
//! `|`-joined artifact tokens), so two pieces of Freight can be compared for
//! equality by comparing their IDs.

pub mod document;
pub mod error;
pub mod freight;
pub mod identity;
pub mod meta;
pub mod obs;
pub mod telemetry;

pub use document::FreightDocument;
pub use error::{FreightError, Result};
pub use freight::{
    Chart, Freight, FreightList, FreightStatus, GitCommit, Image, Qualification, Qualifications,
};
pub use identity::{
    ambiguous_tokens, canonical_string, canonical_tokens, FreightId, IdentityToken,
    TOKEN_DELIMITER,
};
pub use meta::{ListMeta, ObjectMeta, TypeMeta, FREIGHT_KIND, FREIGHT_LIST_KIND, GROUP_VERSION};

/// Freight domain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
