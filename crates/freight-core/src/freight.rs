//! Freight schema definitions
//!
//! Field names follow the resource wire format (`repoURL`, `registryURL`,
//! `healthCheckCommit`). Every field is omitted when zero-valued and absent
//! collections deserialize as empty.

use serde::de::IgnoredAny;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::meta::{ListMeta, ObjectMeta, TypeMeta};
use crate::obs;

// ============================================================================
// 1. ARTIFACT REFERENCES
// ============================================================================

/// A specific commit from a specific Git repository.
///
/// Identity: `repo_url` + `id`. Everything else is informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
    /// URL of the Git repository
    #[serde(rename = "repoURL", default, skip_serializing_if = "String::is_empty")]
    pub repo_url: String,

    /// ID of the commit in the repository at `repo_url`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Branch the commit was found on
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,

    /// Commit that Stage health assessments compare synced sources against,
    /// when it differs from `id` (e.g. after a rendering step).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub health_check_commit: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
}

impl GitCommit {
    pub fn new(repo_url: impl Into<String>, id: impl Into<String>) -> Self {
        GitCommit {
            repo_url: repo_url.into(),
            id: id.into(),
            ..Default::default()
        }
    }
}

/// A specific version of a specific container image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "repoURL", default, skip_serializing_if = "String::is_empty")]
    pub repo_url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

impl Image {
    pub fn new(repo_url: impl Into<String>, tag: impl Into<String>) -> Self {
        Image {
            repo_url: repo_url.into(),
            tag: tag.into(),
        }
    }
}

/// A specific version of a specific chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(rename = "registryURL", default, skip_serializing_if = "String::is_empty")]
    pub registry_url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl Chart {
    pub fn new(
        registry_url: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Chart {
            registry_url: registry_url.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

// ============================================================================
// 2. STATUS - which Stages have qualified this Freight
// ============================================================================

/// Presence marker recording that a Stage accepted a piece of Freight.
///
/// Carries no data; on the wire it is always `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {}

/// Set of Stage names this Freight has been qualified for.
///
/// Serialized as `{"<stage>": {}, ...}`; any value under a stage key is
/// accepted on input and discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifications(BTreeSet<String>);

impl Qualifications {
    /// Record a qualification. Returns `true` if the Stage was not yet present.
    pub fn insert(&mut self, stage: impl Into<String>) -> bool {
        self.0.insert(stage.into())
    }

    pub fn contains(&self, stage: &str) -> bool {
        self.0.contains(stage)
    }

    /// Stage names in sorted order.
    pub fn stages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Qualifications {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Qualifications(iter.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Qualifications {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for stage in &self.0 {
            map.serialize_entry(stage, &Qualification {})?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Qualifications {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<BTreeMap<String, IgnoredAny>>::deserialize(deserializer)?;
        Ok(Qualifications(
            raw.unwrap_or_default().into_keys().collect(),
        ))
    }
}

/// Most recently observed state of a piece of Freight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightStatus {
    #[serde(default, skip_serializing_if = "Qualifications::is_empty")]
    pub qualifications: Qualifications,
}

impl FreightStatus {
    pub fn is_empty(&self) -> bool {
        self.qualifications.is_empty()
    }
}

// ============================================================================
// 3. FREIGHT - the bundle itself
// ============================================================================

/// A collection of versioned artifacts promoted as a unit.
///
/// `id` is system-assigned: see [`Freight::update_id`]. It stays empty until
/// derived and must be re-derived after any change to `commits`, `images`
/// or `charts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Freight {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    #[serde(default, skip_serializing_if = "ObjectMeta::is_empty")]
    pub metadata: ObjectMeta,

    /// Content-derived identifier (lowercase hex SHA-1)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<GitCommit>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<Image>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charts: Vec<Chart>,

    #[serde(default, skip_serializing_if = "FreightStatus::is_empty")]
    pub status: FreightStatus,
}

impl Freight {
    /// Assemble a piece of Freight and derive its ID.
    pub fn new(commits: Vec<GitCommit>, images: Vec<Image>, charts: Vec<Chart>) -> Self {
        let mut freight = Freight {
            type_meta: TypeMeta::freight(),
            commits,
            images,
            charts,
            ..Default::default()
        };
        freight.update_id();
        freight
    }

    /// Attach object metadata. Does not affect the ID.
    pub fn with_metadata(mut self, metadata: ObjectMeta) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn status(&self) -> &FreightStatus {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut FreightStatus {
        &mut self.status
    }

    /// Total number of artifacts across all three categories.
    pub fn artifact_count(&self) -> usize {
        self.commits.len() + self.images.len() + self.charts.len()
    }

    /// Record that `stage` accepted this Freight.
    ///
    /// Returns `true` if the qualification is new. Never touches `id`.
    pub fn qualify(&mut self, stage: impl Into<String>) -> bool {
        let stage = stage.into();
        let added = self.status.qualifications.insert(stage.clone());
        if added {
            obs::emit_freight_qualified(&self.metadata.name, &self.id, &stage);
        }
        added
    }

    pub fn is_qualified_for(&self, stage: &str) -> bool {
        self.status.qualifications.contains(stage)
    }

    /// Stages this Freight is qualified for, in sorted order.
    pub fn qualified_stages(&self) -> impl Iterator<Item = &str> {
        self.status.qualifications.stages()
    }
}

/// A list of Freight resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightList {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    #[serde(default, skip_serializing_if = "ListMeta::is_empty")]
    pub metadata: ListMeta,

    #[serde(default)]
    pub items: Vec<Freight>,
}

impl FreightList {
    pub fn new(items: Vec<Freight>) -> Self {
        FreightList {
            type_meta: TypeMeta::freight_list(),
            metadata: ListMeta::default(),
            items,
        }
    }
}
