//! Board model consumed by the Tempo propagation-delay engine.
//!
//! The delay engine never owns board geometry. It reads routed items
//! ([`RoutedItem`]), the net class governing each item ([`NetClass`]), and
//! physical distances from a [`StackupGeometry`] accessor. This crate defines
//! those collaborators plus a concrete layered [`Stackup`].
//!
//! # Architecture
//!
//! - [`geometry`]: polylines measured in internal length units
//! - [`item`]: routed items (line, via, pad) with merge status and net class
//! - [`stackup`]: the physical layer stack and the [`StackupGeometry`] trait

#![warn(missing_docs)]

pub mod geometry;
pub mod item;
pub mod stackup;

pub use geometry::{LineChain, Point};
pub use item::{GeometryContext, ItemKind, MergeStatus, NetClass, RoutedItem};
pub use stackup::{Stackup, StackupGeometry, StackupLayer};
