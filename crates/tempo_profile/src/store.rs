//! The ordered collection of delay profiles owned by project settings.

use crate::profile::DelayProfile;
use serde::{Deserialize, Serialize};

/// Ordered list of delay profiles as authored by the user.
///
/// The store keeps profiles in authoring order and does not enforce unique
/// names; the cache resolves duplicates when it indexes the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayProfileStore {
    profiles: Vec<DelayProfile>,
}

impl DelayProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a profile.
    pub fn push(&mut self, profile: DelayProfile) {
        self.profiles.push(profile);
    }

    /// Returns all profiles in authoring order.
    pub fn profiles(&self) -> &[DelayProfile] {
        &self.profiles
    }

    /// Returns mutable access to the profiles.
    ///
    /// Callers editing profiles must notify observers afterwards.
    pub fn profiles_mut(&mut self) -> &mut Vec<DelayProfile> {
        &mut self.profiles
    }

    /// Returns the first profile with the given name by linear scan.
    pub fn find(&self, name: &str) -> Option<&DelayProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Returns the number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if the store holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<DelayProfile> for DelayProfileStore {
    fn from_iter<I: IntoIterator<Item = DelayProfile>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store() {
        let store = DelayProfileStore::new();
        assert!(store.is_empty());
        assert!(store.find("Fast").is_none());
    }

    #[test]
    fn keeps_authoring_order() {
        let store: DelayProfileStore = ["B", "A", "C"].into_iter().map(DelayProfile::new).collect();
        let names: Vec<&str> = store.profiles().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn find_returns_first_match() {
        let mut store = DelayProfileStore::new();
        store.push(DelayProfile::new("Fast").with_via_delay(1.0));
        store.push(DelayProfile::new("Fast").with_via_delay(2.0));
        assert_eq!(store.find("Fast").map(|p| p.via_delay), Some(1.0));
    }

    #[test]
    fn profiles_mut_edits_in_place() {
        let mut store: DelayProfileStore = std::iter::once(DelayProfile::new("Fast")).collect();
        store.profiles_mut()[0].via_delay = 7.5;
        assert_eq!(store.profiles()[0].via_delay, 7.5);
    }
}
