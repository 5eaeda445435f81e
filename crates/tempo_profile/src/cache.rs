//! Name-keyed lookup cache over a [`DelayProfileStore`].
//!
//! The cache holds value copies of every profile together with a per-profile
//! via-override map, so nothing it hands out can outlive or alias the store.
//! A rebuild clears everything and repopulates from the store in one pass;
//! there is no incremental update. Borrows returned by lookups end before the
//! next `rebuild(&mut self, ..)`, which the borrow checker enforces.

use crate::profile::{DelayProfile, ViaOverrideKey};
use crate::store::DelayProfileStore;
use std::collections::HashMap;
use tempo_common::LayerId;

/// Receives settings-changed notifications from the project.
///
/// The project calls every observer synchronously, passing the delay-profile
/// store explicitly, whenever the store is edited or reloaded. Calling it
/// repeatedly with the same store is harmless.
pub trait SettingsObserver {
    /// Handles a change of the delay-profile store.
    fn on_settings_changed(&mut self, store: &DelayProfileStore);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    profile: DelayProfile,
    via_overrides: HashMap<ViaOverrideKey, i64>,
}

/// A borrowed view of one cached profile and its via overrides.
#[derive(Debug, Clone, Copy)]
pub struct CachedProfile<'a> {
    entry: &'a CacheEntry,
}

impl<'a> CachedProfile<'a> {
    /// Returns the cached profile record.
    pub fn profile(&self) -> &'a DelayProfile {
        &self.entry.profile
    }

    /// Returns the profile name.
    pub fn name(&self) -> &'a str {
        &self.entry.profile.name
    }

    /// Returns the track delay rate for `layer`, if defined.
    pub fn layer_delay(&self, layer: LayerId) -> Option<f64> {
        self.entry.profile.layer_delay(layer)
    }

    /// Returns the default via delay rate.
    pub fn via_delay(&self) -> f64 {
        self.entry.profile.via_delay
    }

    /// Returns the override delay for exactly `key`, if one exists.
    pub fn via_override(&self, key: &ViaOverrideKey) -> Option<i64> {
        self.entry.via_overrides.get(key).copied()
    }

    /// Returns the number of distinct via override keys.
    pub fn via_override_count(&self) -> usize {
        self.entry.via_overrides.len()
    }
}

/// Rebuildable index from profile name to profile and via overrides.
#[derive(Debug, Clone, Default)]
pub struct DelayProfileCache {
    entries: HashMap<String, CacheEntry>,
    generation: u64,
}

impl DelayProfileCache {
    /// Creates an empty cache. Every lookup misses until the first rebuild.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache already populated from `store`.
    pub fn from_store(store: &DelayProfileStore) -> Self {
        let mut cache = Self::new();
        cache.rebuild(store);
        cache
    }

    /// Clears the cache and repopulates it from `store`.
    ///
    /// Profiles are indexed in store order. When two profiles share a name
    /// the later one replaces the earlier; when a profile lists the same
    /// via-override key twice the later entry's delay wins.
    pub fn rebuild(&mut self, store: &DelayProfileStore) {
        self.entries.clear();

        for profile in store.profiles() {
            let mut via_overrides = HashMap::with_capacity(profile.via_overrides.len());
            for entry in &profile.via_overrides {
                via_overrides.insert(entry.key(), entry.delay);
            }

            self.entries.insert(
                profile.name.clone(),
                CacheEntry {
                    profile: profile.clone(),
                    via_overrides,
                },
            );
        }

        self.generation = self.generation.wrapping_add(1);
    }

    /// Looks up a profile and its overrides by name.
    ///
    /// `None` means no timing policy is configured under that name; it is not
    /// an error.
    pub fn get(&self, name: &str) -> Option<CachedProfile<'_>> {
        self.entries.get(name).map(|entry| CachedProfile { entry })
    }

    /// Looks up a profile record by name.
    pub fn lookup(&self, name: &str) -> Option<&DelayProfile> {
        self.entries.get(name).map(|entry| &entry.profile)
    }

    /// Returns the override delay for `key` in the named profile.
    pub fn via_override(&self, name: &str, key: &ViaOverrideKey) -> Option<i64> {
        self.get(name)?.via_override(key)
    }

    /// Returns the number of cached profiles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no profiles are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all cached profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of rebuilds performed so far.
    ///
    /// Callers that memoize values derived from the cache compare
    /// generations to detect that a rebuild has happened in between.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl SettingsObserver for DelayProfileCache {
    fn on_settings_changed(&mut self, store: &DelayProfileStore) {
        self.rebuild(store);
    }
}
