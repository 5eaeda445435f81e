//! Delay profile records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tempo_common::LayerId;

/// A named propagation-delay policy.
///
/// Layer and via constants are rates in time units per millimetre. Via
/// override delays are final values in time units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayProfile {
    /// The unique profile name referenced by net classes.
    pub name: String,
    /// Delay per millimetre of track, per copper layer.
    #[serde(default)]
    pub layer_delays: BTreeMap<LayerId, f64>,
    /// Default delay per millimetre of via barrel.
    #[serde(default)]
    pub via_delay: f64,
    /// Exact via delays, consulted before the default via rate.
    #[serde(default)]
    pub via_overrides: Vec<ViaOverrideEntry>,
}

impl DelayProfile {
    /// Creates an empty profile with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layer_delays: BTreeMap::new(),
            via_delay: 0.0,
            via_overrides: Vec::new(),
        }
    }

    /// Sets the track delay rate for `layer`.
    pub fn with_layer_delay(mut self, layer: LayerId, delay_per_mm: f64) -> Self {
        self.layer_delays.insert(layer, delay_per_mm);
        self
    }

    /// Sets the default via delay rate.
    pub fn with_via_delay(mut self, delay_per_mm: f64) -> Self {
        self.via_delay = delay_per_mm;
        self
    }

    /// Appends a via override entry.
    pub fn with_via_override(mut self, entry: ViaOverrideEntry) -> Self {
        self.via_overrides.push(entry);
        self
    }

    /// Returns the track delay rate for `layer`, if the profile defines one.
    pub fn layer_delay(&self, layer: LayerId) -> Option<f64> {
        self.layer_delays.get(&layer).copied()
    }
}

/// An explicit delay for one combination of signal layers and via span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViaOverrideEntry {
    /// Layer the signal enters the via on.
    pub signal_layer_from: LayerId,
    /// Layer the signal leaves the via on.
    pub signal_layer_to: LayerId,
    /// First layer of the via padstack.
    pub via_layer_from: LayerId,
    /// Last layer of the via padstack.
    pub via_layer_to: LayerId,
    /// The final delay in time units.
    pub delay: i64,
}

impl ViaOverrideEntry {
    /// Creates an override for `key` with the given delay.
    pub fn new(key: ViaOverrideKey, delay: i64) -> Self {
        Self {
            signal_layer_from: key.signal_start,
            signal_layer_to: key.signal_end,
            via_layer_from: key.via_start,
            via_layer_to: key.via_end,
            delay,
        }
    }

    /// Returns the four-layer key this entry matches.
    pub fn key(&self) -> ViaOverrideKey {
        ViaOverrideKey {
            signal_start: self.signal_layer_from,
            signal_end: self.signal_layer_to,
            via_start: self.via_layer_from,
            via_end: self.via_layer_to,
        }
    }
}

/// Composite lookup key for via overrides.
///
/// Matching is exact on all four layers; there is no wildcard or partial match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ViaOverrideKey {
    /// Layer the signal enters the via on.
    pub signal_start: LayerId,
    /// Layer the signal leaves the via on.
    pub signal_end: LayerId,
    /// First layer of the via padstack.
    pub via_start: LayerId,
    /// Last layer of the via padstack.
    pub via_end: LayerId,
}

impl ViaOverrideKey {
    /// Creates a key from a signal layer pair and a padstack layer pair.
    pub fn new(signal: (LayerId, LayerId), via: (LayerId, LayerId)) -> Self {
        Self {
            signal_start: signal.0,
            signal_end: signal.1,
            via_start: via.0,
            via_end: via.1,
        }
    }
}

impl fmt::Display for ViaOverrideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "signal {}->{} / via {}->{}",
            self.signal_start, self.signal_end, self.via_start, self.via_end
        )
    }
}
