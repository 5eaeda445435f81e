//! Routed items whose propagation delay can be computed.
//!
//! A [`RoutedItem`] is one element of a routed net: a track segment, a via
//! or a component pad. Besides its geometry every item carries a
//! [`MergeStatus`] and the [`NetClass`] that decides which delay profile
//! applies to it.

use crate::geometry::LineChain;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tempo_common::LayerId;

/// A group of electrically related nets sharing design rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetClass {
    /// The net class name (e.g., "Default", "DDR_DQ").
    pub name: String,
    /// Name of the delay profile timing this class. Empty means untimed.
    #[serde(default)]
    pub delay_profile: String,
}

impl NetClass {
    /// Creates a net class timed by the named delay profile.
    pub fn new(name: impl Into<String>, delay_profile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delay_profile: delay_profile.into(),
        }
    }

    /// Returns the name of the delay profile governing this class.
    pub fn delay_profile(&self) -> &str {
        &self.delay_profile
    }
}

/// How an item takes part in a merged length measurement.
///
/// When tuning tools merge overlapping routing fragments, the surviving
/// fragment is `MergedActive` and the superseded ones are `MergedRetired`.
/// Retired items never contribute delay, so a fragment is not counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStatus {
    /// An ordinary item that was never merged.
    #[default]
    Normal,
    /// The fragment kept after a merge.
    MergedActive,
    /// A superseded duplicate fragment.
    MergedRetired,
}

/// The geometric variant of a routed item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A track on a single copper layer.
    Line {
        /// The copper layer the track runs on.
        layer: LayerId,
        /// The track centreline.
        shape: LineChain,
    },
    /// A via carrying the signal between two copper layers.
    Via {
        /// Layer the signal enters the via on.
        signal_start: LayerId,
        /// Layer the signal leaves the via on.
        signal_end: LayerId,
        /// First layer of the via's physical padstack.
        via_start: LayerId,
        /// Last layer of the via's physical padstack.
        via_end: LayerId,
    },
    /// A component pad with a package (pad-to-die) delay.
    Pad {
        /// Delay from the pad to the die, in time units.
        pad_to_die_delay: i64,
    },
    /// An item kind with no delay model. Always contributes zero.
    Other,
}

/// A single element of a routed net.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedItem {
    /// The geometric variant and its data.
    pub kind: ItemKind,
    /// Merge classification of this item.
    pub merge_status: MergeStatus,
    /// The net class governing this item.
    pub net_class: Arc<NetClass>,
}

impl RoutedItem {
    /// Creates an item of the given kind with [`MergeStatus::Normal`].
    pub fn new(kind: ItemKind, net_class: Arc<NetClass>) -> Self {
        Self {
            kind,
            merge_status: MergeStatus::Normal,
            net_class,
        }
    }

    /// Creates a track item on `layer`.
    pub fn line(net_class: Arc<NetClass>, layer: LayerId, shape: LineChain) -> Self {
        Self::new(ItemKind::Line { layer, shape }, net_class)
    }

    /// Creates a via item whose signal and padstack span the same layers.
    pub fn via(net_class: Arc<NetClass>, start: LayerId, end: LayerId) -> Self {
        Self::via_with_stack(net_class, (start, end), (start, end))
    }

    /// Creates a via item whose signal layers differ from its padstack span,
    /// as with a through via used between two inner layers.
    pub fn via_with_stack(
        net_class: Arc<NetClass>,
        signal: (LayerId, LayerId),
        stack: (LayerId, LayerId),
    ) -> Self {
        Self::new(
            ItemKind::Via {
                signal_start: signal.0,
                signal_end: signal.1,
                via_start: stack.0,
                via_end: stack.1,
            },
            net_class,
        )
    }

    /// Creates a pad item with the given pad-to-die delay.
    pub fn pad(net_class: Arc<NetClass>, pad_to_die_delay: i64) -> Self {
        Self::new(ItemKind::Pad { pad_to_die_delay }, net_class)
    }

    /// Returns this item with its merge status replaced.
    pub fn with_merge_status(mut self, merge_status: MergeStatus) -> Self {
        self.merge_status = merge_status;
        self
    }

    /// Returns the net class whose delay profile applies to this item.
    pub fn effective_net_class(&self) -> &NetClass {
        &self.net_class
    }

    /// Returns `true` if this item is a superseded merge fragment.
    pub fn is_retired(&self) -> bool {
        self.merge_status == MergeStatus::MergedRetired
    }

    /// Returns the layer the item starts on, if it has one.
    pub fn start_layer(&self) -> Option<LayerId> {
        match &self.kind {
            ItemKind::Line { layer, .. } => Some(*layer),
            ItemKind::Via { signal_start, .. } => Some(*signal_start),
            ItemKind::Pad { .. } | ItemKind::Other => None,
        }
    }

    /// Returns the layer the item ends on, if it has one.
    pub fn end_layer(&self) -> Option<LayerId> {
        match &self.kind {
            ItemKind::Line { layer, .. } => Some(*layer),
            ItemKind::Via { signal_end, .. } => Some(*signal_end),
            ItemKind::Pad { .. } | ItemKind::Other => None,
        }
    }
}

/// The (net class, layer) pair used when no concrete item is available:
/// length and delay conversion, or the delay of a free polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryContext {
    /// The net class whose delay profile applies.
    pub net_class: Arc<NetClass>,
    /// The copper layer the geometry lies on.
    pub layer: LayerId,
}

impl GeometryContext {
    /// Creates a context for `layer` under `net_class`.
    pub fn new(net_class: Arc<NetClass>, layer: LayerId) -> Self {
        Self { net_class, layer }
    }

    /// Creates a context matching the net class and start layer of `item`.
    ///
    /// Items without a layer (pads) fall back to `default_layer`.
    pub fn for_item(item: &RoutedItem, default_layer: LayerId) -> Self {
        Self::new(
            Arc::clone(&item.net_class),
            item.start_layer().unwrap_or(default_layer),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(n: u32) -> LayerId {
        LayerId::from_raw(n)
    }

    fn ddr() -> Arc<NetClass> {
        Arc::new(NetClass::new("DDR", "Fast"))
    }

    #[test]
    fn new_items_are_normal() {
        let item = RoutedItem::pad(ddr(), 25);
        assert_eq!(item.merge_status, MergeStatus::Normal);
        assert!(!item.is_retired());
    }

    #[test]
    fn retired_status() {
        let item = RoutedItem::pad(ddr(), 25).with_merge_status(MergeStatus::MergedRetired);
        assert!(item.is_retired());
    }

    #[test]
    fn effective_net_class_supplies_profile_name() {
        let item = RoutedItem::line(ddr(), l(0), LineChain::default());
        assert_eq!(item.effective_net_class().delay_profile(), "Fast");
        assert_eq!(item.effective_net_class().name, "DDR");
    }

    #[test]
    fn via_layers() {
        let item = RoutedItem::via_with_stack(ddr(), (l(1), l(2)), (l(0), l(3)));
        assert_eq!(item.start_layer(), Some(l(1)));
        assert_eq!(item.end_layer(), Some(l(2)));
        match item.kind {
            ItemKind::Via {
                via_start, via_end, ..
            } => {
                assert_eq!(via_start, l(0));
                assert_eq!(via_end, l(3));
            }
            _ => panic!("expected via"),
        }
    }

    #[test]
    fn pad_and_other_have_no_layers() {
        assert_eq!(RoutedItem::pad(ddr(), 1).start_layer(), None);
        assert_eq!(RoutedItem::new(ItemKind::Other, ddr()).end_layer(), None);
    }

    #[test]
    fn context_for_item_uses_start_layer() {
        let line = RoutedItem::line(ddr(), l(4), LineChain::default());
        assert_eq!(GeometryContext::for_item(&line, l(0)).layer, l(4));
        let pad = RoutedItem::pad(ddr(), 1);
        assert_eq!(GeometryContext::for_item(&pad, l(0)).layer, l(0));
    }

    #[test]
    fn merge_status_serde_names() {
        let json = serde_json::to_string(&MergeStatus::MergedRetired).unwrap();
        assert_eq!(json, "\"merged_retired\"");
        let back: MergeStatus = serde_json::from_str("\"merged_active\"").unwrap();
        assert_eq!(back, MergeStatus::MergedActive);
    }
}
