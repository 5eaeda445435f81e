//! Per-kind summary of a net's propagation delay.
//!
//! Length-tuning reports show how much of a net's delay comes from tracks,
//! from vias and from package (pad-to-die) delay.

use crate::params::TimeDomainParameters;
use serde::Serialize;
use tempo_board::{GeometryContext, ItemKind, RoutedItem};

/// Propagation delay of a group of items, split by item kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DelayBreakdown {
    /// Sum of track delays.
    pub track_delay: i64,
    /// Sum of via delays.
    pub via_delay: i64,
    /// Sum of pad-to-die delays.
    pub pad_to_die_delay: i64,
    /// Number of non-retired track items.
    pub line_count: usize,
    /// Number of non-retired via items.
    pub via_count: usize,
    /// Number of non-retired pad items.
    pub pad_count: usize,
    /// Number of retired items, which contribute nothing.
    pub retired_count: usize,
}

impl DelayBreakdown {
    /// Computes the breakdown of `items`.
    ///
    /// Delays come from a single batch call, so the batch rule applies: the
    /// first item's net class selects the profile for every item.
    pub fn compute<P>(params: &P, items: &[RoutedItem], context: &GeometryContext) -> Self
    where
        P: TimeDomainParameters + ?Sized,
    {
        let delays = params.propagation_delays(items, context);
        let mut breakdown = Self::default();

        for (item, delay) in items.iter().zip(delays) {
            if item.is_retired() {
                breakdown.retired_count += 1;
                continue;
            }
            match item.kind {
                ItemKind::Line { .. } => {
                    breakdown.track_delay += delay;
                    breakdown.line_count += 1;
                }
                ItemKind::Via { .. } => {
                    breakdown.via_delay += delay;
                    breakdown.via_count += 1;
                }
                ItemKind::Pad { .. } => {
                    breakdown.pad_to_die_delay += delay;
                    breakdown.pad_count += 1;
                }
                ItemKind::Other => {}
            }
        }

        breakdown
    }

    /// Returns the total delay.
    pub fn total(&self) -> i64 {
        self.track_delay + self.via_delay + self.pad_to_die_delay
    }
}
