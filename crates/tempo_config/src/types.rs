//! Configuration types deserialized from `tempo.toml`.
//!
//! These mirror the file layout one to one. Layer references are still names
//! and physical quantities are still unit strings; see
//! [`ProjectConfig::resolve`](crate::ProjectConfig::resolve) for the
//! conversion into board and profile types.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use tempo_board::MergeStatus;

/// The top-level project configuration parsed from `tempo.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata.
    pub project: ProjectMeta,
    /// The layer stack, listed top to bottom.
    #[serde(default)]
    pub stackup: Vec<StackupEntry>,
    /// Delay profiles, in declaration order.
    #[serde(default)]
    pub profiles: Vec<ProfileConfig>,
    /// Net classes and the delay profile each one selects.
    #[serde(default)]
    pub net_classes: Vec<NetClassConfig>,
    /// Routed items to time.
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// Core project metadata required in every `tempo.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// A brief description of the board.
    #[serde(default)]
    pub description: String,
}

/// One element of the layer stack.
///
/// Exactly one of `copper` and `dielectric` must be set.
#[derive(Debug, Deserialize)]
pub struct StackupEntry {
    /// Name of a copper layer (e.g., "F.Cu").
    #[serde(default)]
    pub copper: Option<String>,
    /// Name of a dielectric layer (e.g., "prepreg").
    #[serde(default)]
    pub dielectric: Option<String>,
    /// Layer thickness as a length (e.g., "0.035mm").
    #[serde(default)]
    pub thickness: Quantity,
}

/// A delay profile as written in the file.
#[derive(Debug, Deserialize)]
pub struct ProfileConfig {
    /// The profile name referenced by net classes.
    pub name: String,
    /// Default via delay per millimetre of barrel (e.g., "10fs").
    #[serde(default)]
    pub via_delay: Quantity,
    /// Track delay per millimetre, keyed by copper layer name.
    #[serde(default)]
    pub layers: BTreeMap<String, Quantity>,
    /// Exact delays for specific via configurations.
    #[serde(default)]
    pub via_overrides: Vec<ViaOverrideConfig>,
}

/// A via override as written in the file.
#[derive(Debug, Deserialize)]
pub struct ViaOverrideConfig {
    /// Signal entry and exit layer names.
    pub signal: [String; 2],
    /// First and last layer names of the via padstack.
    pub via: [String; 2],
    /// The final delay (e.g., "120fs").
    pub delay: Quantity,
}

/// A net class as written in the file.
#[derive(Debug, Deserialize)]
pub struct NetClassConfig {
    /// The net class name.
    pub name: String,
    /// Name of the delay profile timing this class. Empty means untimed.
    #[serde(default)]
    pub delay_profile: String,
}

/// A routed item as written in the file, tagged by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemConfig {
    /// A track.
    Line {
        /// The owning net class.
        net_class: String,
        /// The copper layer name.
        layer: String,
        /// Polyline vertices in millimetres.
        points: Vec<[f64; 2]>,
        /// Merge status of the fragment.
        #[serde(default)]
        merge: MergeStatus,
    },
    /// A via.
    Via {
        /// The owning net class.
        net_class: String,
        /// Signal entry and exit layer names.
        signal: [String; 2],
        /// Padstack layer names. Defaults to the signal layers.
        #[serde(default)]
        via: Option<[String; 2]>,
        /// Merge status of the fragment.
        #[serde(default)]
        merge: MergeStatus,
    },
    /// A component pad.
    Pad {
        /// The owning net class.
        net_class: String,
        /// Pad-to-die delay (e.g., "25fs").
        #[serde(default)]
        pad_to_die: Quantity,
        /// Merge status of the fragment.
        #[serde(default)]
        merge: MergeStatus,
    },
}

impl ItemConfig {
    /// Returns the name of the item's net class.
    pub fn net_class(&self) -> &str {
        match self {
            ItemConfig::Line { net_class, .. }
            | ItemConfig::Via { net_class, .. }
            | ItemConfig::Pad { net_class, .. } => net_class,
        }
    }
}

/// A physical quantity kept as written until resolution.
///
/// Accepts a unit string such as `"1.6mm"` or `"25ps"`, or a bare number in
/// internal units. The default is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity(pub String);

impl Quantity {
    /// Returns the quantity text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuantityVisitor;

        impl<'de> Visitor<'de> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a number or a string with a unit suffix")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Quantity(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Quantity(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Quantity(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Quantity(v.to_string()))
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}
