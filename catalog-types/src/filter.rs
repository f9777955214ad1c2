use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::DriveIdentityEntry;

/// Restricts resolution to drives named by identifier or device name.
///
/// An empty filter restricts nothing: every entry passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriveFilter {
    keys: BTreeSet<String>,
}

impl DriveFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether `entry` should be resolved under this filter.
    pub fn accepts(&self, entry: &DriveIdentityEntry) -> bool {
        self.keys.is_empty()
            || self.keys.contains(&entry.identifier.to_string())
            || self.keys.contains(&entry.dev_name)
    }
}

impl<S: Into<String>> FromIterator<S> for DriveFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}
