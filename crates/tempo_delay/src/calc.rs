//! Stateless delay formulas.
//!
//! Every function here is a pure computation over a resolved profile and a
//! geometry accessor. Rates are time units per millimetre; lengths are
//! converted from internal units to millimetres with [`IU_PER_MM`] before
//! multiplying, and results are truncated toward zero.

use tempo_board::{ItemKind, RoutedItem, StackupGeometry};
use tempo_common::IU_PER_MM;
use tempo_profile::{CachedProfile, ViaOverrideKey};

/// Converts a physical length to a delay at `rate_per_mm`.
pub fn delay_for_length(rate_per_mm: f64, length: i64) -> i64 {
    (rate_per_mm * (length as f64 / IU_PER_MM)) as i64
}

/// Converts a delay back to the track length that produces it at
/// `rate_per_mm`.
///
/// A zero or non-finite rate has no inverse and gives zero.
pub fn length_for_delay(rate_per_mm: f64, delay: i64) -> i64 {
    if rate_per_mm == 0.0 || !rate_per_mm.is_finite() {
        return 0;
    }
    let length_mm = delay as f64 / rate_per_mm;
    (length_mm * IU_PER_MM) as i64
}

/// Computes the delay of one item under an already-resolved profile.
///
/// Retired items give zero. A track on a layer the profile has no rate for
/// also gives zero.
pub fn item_delay<G>(item: &RoutedItem, profile: CachedProfile<'_>, geometry: &G) -> i64
where
    G: StackupGeometry + ?Sized,
{
    if item.is_retired() {
        return 0;
    }

    match &item.kind {
        ItemKind::Line { layer, shape } => profile
            .layer_delay(*layer)
            .map_or(0, |rate| delay_for_length(rate, geometry.line_length(shape))),
        ItemKind::Via {
            signal_start,
            signal_end,
            via_start,
            via_end,
        } => {
            // Layers are taken as the item reports them; callers normalize
            // to stackup order upstream.
            let key = ViaOverrideKey::new((*signal_start, *signal_end), (*via_start, *via_end));
            if let Some(delay) = profile.via_override(&key) {
                return delay;
            }
            let height = geometry.stackup_height(*signal_start, *signal_end);
            delay_for_length(profile.via_delay(), height)
        }
        ItemKind::Pad { pad_to_die_delay } => *pad_to_die_delay,
        ItemKind::Other => 0,
    }
}
