//! Shared foundational types used across the Tempo propagation-delay engine.
//!
//! This crate provides board layer identifiers, the internal length and time
//! units with their string parsers, and common result types.

#![warn(missing_docs)]

pub mod ids;
pub mod result;
pub mod units;

pub use ids::LayerId;
pub use result::{InternalError, TempoResult};
pub use units::{
    parse_length, parse_time, ParseUnitError, IU_PER_MIL, IU_PER_MM, IU_PER_UM, TIME_IU_PER_NS,
    TIME_IU_PER_PS,
};
