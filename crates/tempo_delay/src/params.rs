//! Time-domain parameter providers.
//!
//! A board holds one [`TimeDomainParameters`] implementation and forwards
//! every settings-changed notification to it. [`UserDefinedTimeDomain`]
//! resolves user-authored delay profiles through a [`DelayProfileCache`].

use crate::calc::{self, item_delay};
use tempo_board::{GeometryContext, ItemKind, LineChain, NetClass, RoutedItem, StackupGeometry};
use tempo_profile::{CachedProfile, DelayProfileCache, DelayProfileStore, SettingsObserver};

/// Computes propagation delays and their inverse for routed items.
///
/// None of these operations fail: a net class without a delay profile, a
/// missing via override or an item kind without a delay model degrade to
/// zero or to the geometric fallback.
pub trait TimeDomainParameters: SettingsObserver {
    /// Returns the propagation delay of a single item.
    fn propagation_delay(&self, item: &RoutedItem, context: &GeometryContext) -> i64;

    /// Returns the propagation delays of a batch of items sharing one net
    /// class, in input order.
    fn propagation_delays(&self, items: &[RoutedItem], context: &GeometryContext) -> Vec<i64>;

    /// Returns the length of track on `context.layer` whose delay is `delay`.
    fn track_length_for_delay(&self, delay: i64, context: &GeometryContext) -> i64;

    /// Returns the delay of a polyline on `context.layer` that is not (yet)
    /// a routed item.
    fn delay_for_shape(&self, shape: &LineChain, context: &GeometryContext) -> i64;
}

/// Time-domain parameters driven by user-defined delay profiles.
#[derive(Debug)]
pub struct UserDefinedTimeDomain<G> {
    cache: DelayProfileCache,
    geometry: G,
}

impl<G: StackupGeometry> UserDefinedTimeDomain<G> {
    /// Creates a provider with an empty cache. Every item is untimed until
    /// the first settings-changed notification.
    pub fn new(geometry: G) -> Self {
        Self {
            cache: DelayProfileCache::new(),
            geometry,
        }
    }

    /// Creates a provider whose cache is built from `store`.
    pub fn with_store(geometry: G, store: &DelayProfileStore) -> Self {
        Self {
            cache: DelayProfileCache::from_store(store),
            geometry,
        }
    }

    /// Returns the profile cache.
    pub fn cache(&self) -> &DelayProfileCache {
        &self.cache
    }

    /// Returns the geometry accessor.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    fn profile_for(&self, net_class: &NetClass) -> Option<CachedProfile<'_>> {
        self.cache.get(net_class.delay_profile())
    }
}

impl<G: StackupGeometry> SettingsObserver for UserDefinedTimeDomain<G> {
    fn on_settings_changed(&mut self, store: &DelayProfileStore) {
        self.cache.rebuild(store);
    }
}

impl<G: StackupGeometry> TimeDomainParameters for UserDefinedTimeDomain<G> {
    fn propagation_delay(&self, item: &RoutedItem, _context: &GeometryContext) -> i64 {
        if item.is_retired() {
            return 0;
        }

        // A pad carries its own delay and needs no profile.
        if let ItemKind::Pad { pad_to_die_delay } = &item.kind {
            return *pad_to_die_delay;
        }

        match self.profile_for(item.effective_net_class()) {
            Some(profile) => item_delay(item, profile, &self.geometry),
            None => 0,
        }
    }

    /// The profile is resolved once, from the first item's net class, and
    /// applied to the whole batch. A batch mixing net classes with different
    /// profiles is timed entirely with the first item's profile; callers
    /// must group items by net class before batching.
    fn propagation_delays(&self, items: &[RoutedItem], _context: &GeometryContext) -> Vec<i64> {
        let Some(first) = items.first() else {
            return Vec::new();
        };

        let Some(profile) = self.profile_for(first.effective_net_class()) else {
            return vec![0; items.len()];
        };

        items
            .iter()
            .map(|item| item_delay(item, profile, &self.geometry))
            .collect()
    }

    fn track_length_for_delay(&self, delay: i64, context: &GeometryContext) -> i64 {
        self.profile_for(&context.net_class)
            .and_then(|profile| profile.layer_delay(context.layer))
            .map_or(0, |rate| calc::length_for_delay(rate, delay))
    }

    fn delay_for_shape(&self, shape: &LineChain, context: &GeometryContext) -> i64 {
        self.profile_for(&context.net_class)
            .and_then(|profile| profile.layer_delay(context.layer))
            .map_or(0, |rate| {
                calc::delay_for_length(rate, self.geometry.line_length(shape))
            })
    }
}
