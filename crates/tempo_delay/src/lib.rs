//! Propagation delay calculation for routed circuit-board items.
//!
//! This crate turns routed items (tracks, vias, pads) into signal
//! propagation delays, using the user-defined delay profiles selected by
//! each item's net class, and converts target delays back into equivalent
//! track lengths for interactive length tuning.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use tempo_board::{GeometryContext, LineChain, NetClass, RoutedItem, StackupGeometry};
//! use tempo_common::LayerId;
//! use tempo_delay::{TimeDomainParameters, UserDefinedTimeDomain};
//! use tempo_profile::{DelayProfile, DelayProfileStore};
//!
//! struct Flat;
//! impl StackupGeometry for Flat {
//!     fn stackup_height(&self, _: LayerId, _: LayerId) -> i64 { 0 }
//! }
//!
//! let top = LayerId::from_raw(0);
//! let mut store = DelayProfileStore::new();
//! store.push(DelayProfile::new("Fast").with_layer_delay(top, 5.0));
//! let params = UserDefinedTimeDomain::with_store(Flat, &store);
//!
//! let class = Arc::new(NetClass::new("DDR", "Fast"));
//! let track = RoutedItem::line(class.clone(), top, LineChain::segment((0, 0), (10_000_000, 0)));
//! let ctx = GeometryContext::new(class, top);
//! assert_eq!(params.propagation_delay(&track, &ctx), 50);
//! assert_eq!(params.track_length_for_delay(50, &ctx), 10_000_000);
//! ```
//!
//! # Architecture
//!
//! - [`calc`]: stateless formulas over a resolved profile
//! - [`params`]: the [`TimeDomainParameters`] trait and its profile-driven implementation
//! - [`breakdown`]: per-kind delay totals for reports

#![warn(missing_docs)]

pub mod breakdown;
pub mod calc;
pub mod params;

pub use breakdown::DelayBreakdown;
pub use params::{TimeDomainParameters, UserDefinedTimeDomain};
