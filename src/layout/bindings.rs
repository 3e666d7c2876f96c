//! Field bindings handed to the renderer alongside the template.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names the receipt binds.
pub mod fields {
    /// Pickup number.
    pub const ORDER_NUM: &str = "orderNum";
    /// Order creation time.
    pub const TIME: &str = "time";
    /// Last digits of the customer's contact number.
    pub const USER_NUM: &str = "userNum";
    /// Delivery address.
    pub const ADDR: &str = "addr";
    /// Delivery time.
    pub const SEND_TIME: &str = "sendTime";
}

/// Field name to display string. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldBindings(BTreeMap<String, String>);

impl FieldBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Bound field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldBindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
