//! Parsing of Freight documents that may hold one Freight or a FreightList.

use serde_json::Value;

use crate::error::{FreightError, Result};
use crate::freight::{Freight, FreightList};
use crate::meta::{FREIGHT_KIND, FREIGHT_LIST_KIND};

/// A parsed JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreightDocument {
    Single(Freight),
    List(FreightList),
}

impl FreightDocument {
    /// Parse a document, dispatching on `kind`.
    ///
    /// Without a `kind`, an `items` array marks a list; anything else is
    /// read as a single Freight.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_default();
        match kind.as_str() {
            FREIGHT_LIST_KIND => Ok(FreightDocument::List(serde_json::from_value(value)?)),
            FREIGHT_KIND => Ok(FreightDocument::Single(serde_json::from_value(value)?)),
            "" if value.get("items").is_some_and(Value::is_array) => {
                Ok(FreightDocument::List(serde_json::from_value(value)?))
            }
            "" => Ok(FreightDocument::Single(serde_json::from_value(value)?)),
            other => Err(FreightError::UnsupportedKind(other.to_string())),
        }
    }

    pub fn freights(&self) -> &[Freight] {
        match self {
            FreightDocument::Single(freight) => std::slice::from_ref(freight),
            FreightDocument::List(list) => &list.items,
        }
    }

    pub fn freights_mut(&mut self) -> &mut [Freight] {
        match self {
            FreightDocument::Single(freight) => std::slice::from_mut(freight),
            FreightDocument::List(list) => &mut list.items,
        }
    }

    /// Re-derive and store the ID of every Freight in the document.
    pub fn stamp_ids(&mut self) {
        for freight in self.freights_mut() {
            freight.update_id();
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        let json = match self {
            FreightDocument::Single(freight) => serde_json::to_string_pretty(freight)?,
            FreightDocument::List(list) => serde_json::to_string_pretty(list)?,
        };
        Ok(json)
    }
}
