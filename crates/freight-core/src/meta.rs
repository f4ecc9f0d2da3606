//! Resource envelope shared by Freight and FreightList.
//!
//! Mirrors the API machinery wire shape: `apiVersion`/`kind` inline on the
//! object, everything else under `metadata`. None of it feeds identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// API group and version Freight resources are served under.
pub const GROUP_VERSION: &str = "kargo.akuity.io/v1alpha1";

pub const FREIGHT_KIND: &str = "Freight";
pub const FREIGHT_LIST_KIND: &str = "FreightList";

/// Type information carried inline on every object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl TypeMeta {
    /// Type information for a single Freight.
    pub fn freight() -> Self {
        TypeMeta {
            api_version: GROUP_VERSION.to_string(),
            kind: FREIGHT_KIND.to_string(),
        }
    }

    /// Type information for a FreightList.
    pub fn freight_list() -> Self {
        TypeMeta {
            api_version: GROUP_VERSION.to_string(),
            kind: FREIGHT_LIST_KIND.to_string(),
        }
    }
}

/// Object metadata. Every field is optional and omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_version: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub generation: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Metadata carrying only a name and namespace.
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ObjectMeta {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ObjectMeta::default()
    }
}

/// List metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(rename = "resourceVersion", default, skip_serializing_if = "String::is_empty")]
    pub resource_version: String,

    /// Opaque continuation token for paged lists
    #[serde(rename = "continue", default, skip_serializing_if = "String::is_empty")]
    pub continue_token: String,
}

impl ListMeta {
    pub fn is_empty(&self) -> bool {
        self.resource_version.is_empty() && self.continue_token.is_empty()
    }
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}
