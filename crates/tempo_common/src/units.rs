//! Internal length and time units with unit-suffixed string parsing.
//!
//! Lengths are stored as integer nanometres and propagation delays as integer
//! femtoseconds. Delay-profile constants are expressed in time units per
//! millimetre, so every delay formula converts a length to millimetres with
//! [`IU_PER_MM`] before multiplying.

/// Internal length units (nanometres) per millimetre.
pub const IU_PER_MM: f64 = 1_000_000.0;

/// Internal length units per micrometre.
pub const IU_PER_UM: f64 = 1_000.0;

/// Internal length units per mil (thousandth of an inch).
pub const IU_PER_MIL: f64 = 25_400.0;

/// Internal length units per inch.
const IU_PER_INCH: f64 = 25_400_000.0;

/// Internal time units (femtoseconds) per picosecond.
pub const TIME_IU_PER_PS: f64 = 1_000.0;

/// Internal time units per nanosecond.
pub const TIME_IU_PER_NS: f64 = 1_000_000.0;

/// Error type for parsing length or time strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {quantity}: '{input}'")]
pub struct ParseUnitError {
    /// The input string that failed to parse.
    pub input: String,
    /// The kind of quantity that was expected ("length" or "time").
    pub quantity: &'static str,
}

/// Parses a length such as `"1.6mm"`, `"35um"`, `"62mil"` or `"0.5in"` into
/// fractional internal length units.
///
/// A bare number is taken to be in internal units already.
pub fn parse_length(s: &str) -> Result<f64, ParseUnitError> {
    parse_with_suffixes(
        s,
        "length",
        &[
            ("mm", IU_PER_MM),
            ("um", IU_PER_UM),
            ("mil", IU_PER_MIL),
            ("in", IU_PER_INCH),
            ("nm", 1.0),
        ],
    )
}

/// Parses a time such as `"25ps"`, `"1.2ns"` or `"300fs"` into fractional
/// internal time units.
///
/// A bare number is taken to be in internal units already.
pub fn parse_time(s: &str) -> Result<f64, ParseUnitError> {
    parse_with_suffixes(
        s,
        "time",
        &[
            ("ns", TIME_IU_PER_NS),
            ("ps", TIME_IU_PER_PS),
            ("fs", 1.0),
        ],
    )
}

fn parse_with_suffixes(
    s: &str,
    quantity: &'static str,
    suffixes: &[(&str, f64)],
) -> Result<f64, ParseUnitError> {
    let s = s.trim();
    let err = || ParseUnitError {
        input: s.to_string(),
        quantity,
    };

    let lower = s.to_ascii_lowercase();
    for (suffix, scale) in suffixes {
        if let Some(num) = lower.strip_suffix(suffix) {
            let val: f64 = num.trim().parse().map_err(|_| err())?;
            return finite(val * scale).ok_or_else(err);
        }
    }

    let val: f64 = s.parse().map_err(|_| err())?;
    finite(val).ok_or_else(err)
}

fn finite(val: f64) -> Option<f64> {
    val.is_finite().then_some(val)
}
