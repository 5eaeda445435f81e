//! The physical board stackup and the geometry accessor trait.

use crate::geometry::LineChain;
use serde::{Deserialize, Serialize};
use tempo_common::{InternalError, LayerId, TempoResult};

/// Physical measurements the delay engine needs from the board.
///
/// Both methods are pure functions of the board's physical stackup. The
/// delay engine calls them on every calculation and does not cache results.
pub trait StackupGeometry {
    /// Returns the vertical distance a via travels between two copper
    /// layers, in internal length units.
    fn stackup_height(&self, from: LayerId, to: LayerId) -> i64;

    /// Returns the physical length of a polyline in internal length units.
    fn line_length(&self, shape: &LineChain) -> i64 {
        shape.length()
    }
}

/// One element of the layer stack, listed top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackupLayer {
    /// A copper layer that can carry routing.
    Copper {
        /// The board layer ID.
        id: LayerId,
        /// The layer name (e.g., "F.Cu").
        name: String,
        /// Copper thickness in internal length units.
        thickness: i64,
    },
    /// An insulating core or prepreg between copper layers.
    Dielectric {
        /// The material or role name (e.g., "core", "prepreg").
        name: String,
        /// Dielectric thickness in internal length units.
        thickness: i64,
    },
}

impl StackupLayer {
    /// Returns the thickness of this stack element.
    pub fn thickness(&self) -> i64 {
        match self {
            StackupLayer::Copper { thickness, .. } | StackupLayer::Dielectric { thickness, .. } => {
                *thickness
            }
        }
    }

    fn copper_id(&self) -> Option<LayerId> {
        match self {
            StackupLayer::Copper { id, .. } => Some(*id),
            StackupLayer::Dielectric { .. } => None,
        }
    }
}

/// An ordered layer stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stackup {
    layers: Vec<StackupLayer>,
}

impl Stackup {
    /// Creates a stackup from layers listed top to bottom.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` if two copper layers share an ID or a name;
    /// callers are expected to allocate layer IDs uniquely.
    pub fn new(layers: Vec<StackupLayer>) -> TempoResult<Self> {
        let mut seen: Vec<(LayerId, &str)> = Vec::new();
        for layer in &layers {
            if let StackupLayer::Copper { id, name, .. } = layer {
                if seen.iter().any(|(i, n)| i == id || *n == name.as_str()) {
                    return Err(InternalError::new(format!(
                        "duplicate copper layer {id} ('{name}') in stackup"
                    )));
                }
                seen.push((*id, name.as_str()));
            }
        }
        Ok(Self { layers })
    }

    /// Returns all stack elements top to bottom.
    pub fn layers(&self) -> &[StackupLayer] {
        &self.layers
    }

    /// Returns the IDs of all copper layers, top to bottom.
    pub fn copper_layers(&self) -> Vec<LayerId> {
        self.layers.iter().filter_map(StackupLayer::copper_id).collect()
    }

    /// Returns the ID of the copper layer with the given name.
    pub fn layer_by_name(&self, name: &str) -> Option<LayerId> {
        self.layers.iter().find_map(|layer| match layer {
            StackupLayer::Copper { id, name: n, .. } if n == name => Some(*id),
            _ => None,
        })
    }

    /// Returns the name of the copper layer with the given ID.
    pub fn layer_name(&self, id: LayerId) -> Option<&str> {
        self.layers.iter().find_map(|layer| match layer {
            StackupLayer::Copper { id: i, name, .. } if *i == id => Some(name.as_str()),
            _ => None,
        })
    }

    /// Returns the total board thickness.
    pub fn board_thickness(&self) -> i64 {
        self.layers.iter().map(StackupLayer::thickness).sum()
    }

    fn position(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.copper_id() == Some(id))
    }
}

impl StackupGeometry for Stackup {
    /// Sums every stack element strictly between the two copper layers.
    ///
    /// The result does not depend on argument order. The same layer, or a
    /// layer that is not in the stack, gives zero.
    fn stackup_height(&self, from: LayerId, to: LayerId) -> i64 {
        let (Some(a), Some(b)) = (self.position(from), self.position(to)) else {
            return 0;
        };
        let (top, bottom) = if a <= b { (a, b) } else { (b, a) };
        if bottom - top < 2 {
            return 0;
        }
        self.layers[top + 1..bottom]
            .iter()
            .map(StackupLayer::thickness)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UM: i64 = 1_000;

    fn l(n: u32) -> LayerId {
        LayerId::from_raw(n)
    }

    fn copper(id: u32, name: &str) -> StackupLayer {
        StackupLayer::Copper {
            id: l(id),
            name: name.to_string(),
            thickness: 35 * UM,
        }
    }

    fn dielectric(thickness: i64) -> StackupLayer {
        StackupLayer::Dielectric {
            name: "core".to_string(),
            thickness,
        }
    }

    /// F.Cu / 200um / In1.Cu / 1000um / In2.Cu / 200um / B.Cu
    fn four_layer() -> Stackup {
        Stackup::new(vec![
            copper(0, "F.Cu"),
            dielectric(200 * UM),
            copper(1, "In1.Cu"),
            dielectric(1000 * UM),
            copper(2, "In2.Cu"),
            dielectric(200 * UM),
            copper(3, "B.Cu"),
        ])
        .unwrap()
    }

    #[test]
    fn adjacent_layers_height_is_dielectric() {
        assert_eq!(four_layer().stackup_height(l(0), l(1)), 200 * UM);
    }

    #[test]
    fn height_includes_intermediate_copper() {
        let s = four_layer();
        assert_eq!(s.stackup_height(l(0), l(3)), 1400 * UM + 70 * UM);
        assert_eq!(s.stackup_height(l(1), l(2)), 1000 * UM);
    }

    #[test]
    fn height_is_symmetric() {
        let s = four_layer();
        assert_eq!(s.stackup_height(l(3), l(1)), s.stackup_height(l(1), l(3)));
    }

    #[test]
    fn same_or_unknown_layer_is_zero() {
        let s = four_layer();
        assert_eq!(s.stackup_height(l(2), l(2)), 0);
        assert_eq!(s.stackup_height(l(0), l(9)), 0);
    }

    #[test]
    fn name_lookups() {
        let s = four_layer();
        assert_eq!(s.layer_by_name("In2.Cu"), Some(l(2)));
        assert_eq!(s.layer_name(l(3)), Some("B.Cu"));
        assert_eq!(s.layer_by_name("In7.Cu"), None);
        assert_eq!(s.copper_layers(), vec![l(0), l(1), l(2), l(3)]);
    }

    #[test]
    fn board_thickness_sums_everything() {
        assert_eq!(four_layer().board_thickness(), 1400 * UM + 4 * 35 * UM);
    }

    #[test]
    fn duplicate_copper_rejected() {
        let err = Stackup::new(vec![copper(0, "F.Cu"), dielectric(UM), copper(0, "B.Cu")])
            .unwrap_err();
        assert!(err.message.contains("duplicate copper layer L0"));
    }

    #[test]
    fn default_line_length_uses_shape() {
        let shape = LineChain::segment((0, 0), (0, 5 * UM));
        assert_eq!(four_layer().line_length(&shape), 5 * UM);
    }
}
