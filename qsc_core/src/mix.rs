//! # Mix Ratio Parsing
//!
//! Parses volumetric mix-ratio strings like `"1:2:4"` (cement:sand:aggregate
//! for concrete) or `"1:4"` (cement:sand for mortar) into normalized part
//! shares. Parsing is a pure function: no defaults are substituted and no
//! out-of-range value is silently corrected.
//!
//! ## Example
//!
//! ```rust
//! use qsc_core::mix::MixRatio;
//!
//! let mix = MixRatio::parse("1:2:4", 3).unwrap();
//! assert_eq!(mix.parts(), &[1.0, 2.0, 4.0]);
//! assert!((mix.share(0) - 1.0 / 7.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// An ordered sequence of positive mix parts.
///
/// Arity is fixed at parse time: 2 parts for mortar, 3 for concrete.
/// Invariant: every part is finite and > 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixRatio {
    parts: Vec<f64>,
}

impl MixRatio {
    /// Parse a ratio string of the form `"p1:p2"` or `"p1:p2:p3"`.
    ///
    /// # Arguments
    ///
    /// * `input` - The ratio string; whitespace around segments is accepted
    /// * `expected_parts` - Required arity (2 for mortar, 3 for concrete)
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidMixRatio` when the segment count does not match
    /// `expected_parts`, a segment is not parseable as a number, or a part
    /// is not strictly positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qsc_core::mix::MixRatio;
    ///
    /// assert!(MixRatio::parse("1:4", 2).is_ok());
    /// assert!(MixRatio::parse("1:4", 3).is_err());   // wrong arity
    /// assert!(MixRatio::parse("1:x:4", 3).is_err()); // non-numeric
    /// assert!(MixRatio::parse("0:2:4", 3).is_err()); // non-positive part
    /// ```
    pub fn parse(input: &str, expected_parts: usize) -> CalcResult<Self> {
        let segments: Vec<&str> = input.split(':').collect();
        if segments.len() != expected_parts {
            return Err(CalcError::invalid_mix_ratio(
                input,
                format!(
                    "expected {} parts separated by ':', found {}",
                    expected_parts,
                    segments.len()
                ),
            ));
        }

        let mut parts = Vec::with_capacity(expected_parts);
        for segment in segments {
            let part: f64 = segment.trim().parse().map_err(|_| {
                CalcError::invalid_mix_ratio(
                    input,
                    format!("'{}' is not a number", segment.trim()),
                )
            })?;
            if !part.is_finite() || part <= 0.0 {
                return Err(CalcError::invalid_mix_ratio(
                    input,
                    format!("part '{}' must be positive", segment.trim()),
                ));
            }
            parts.push(part);
        }

        Ok(MixRatio { parts })
    }

    /// The raw parts in order.
    pub fn parts(&self) -> &[f64] {
        &self.parts
    }

    /// Sum of all parts.
    pub fn sum(&self) -> f64 {
        self.parts.iter().sum()
    }

    /// Normalized share of part `i`: `parts[i] / sum(parts)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds (arity is fixed at parse time, so
    /// callers index by construction).
    pub fn share(&self, i: usize) -> f64 {
        self.parts[i] / self.sum()
    }

    /// Partition `volume` across the parts by their shares.
    pub fn split(&self, volume: f64) -> Vec<f64> {
        let sum = self.sum();
        self.parts.iter().map(|p| p / sum * volume).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_concrete_mix() {
        let mix = MixRatio::parse("1:2:4", 3).unwrap();
        assert_eq!(mix.parts(), &[1.0, 2.0, 4.0]);
        assert_eq!(mix.sum(), 7.0);
    }

    #[test]
    fn test_parse_mortar_mix() {
        let mix = MixRatio::parse("1:4", 2).unwrap();
        assert_eq!(mix.parts(), &[1.0, 4.0]);
        assert!((mix.share(1) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_parse_accepts_whitespace_and_decimals() {
        let mix = MixRatio::parse(" 1 : 1.5 : 3 ", 3).unwrap();
        assert_eq!(mix.parts(), &[1.0, 1.5, 3.0]);
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        let err = MixRatio::parse("1:2", 3).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MIX_RATIO");
        assert!(MixRatio::parse("1:2:4", 2).is_err());
        assert!(MixRatio::parse("1", 2).is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(MixRatio::parse("1:sand", 2).is_err());
        assert!(MixRatio::parse(":2:4", 3).is_err());
    }

    #[test]
    fn test_parse_rejects_non_positive_parts() {
        assert!(MixRatio::parse("0:2:4", 3).is_err());
        assert!(MixRatio::parse("1:-2", 2).is_err());
    }

    #[test]
    fn test_split_partitions_volume() {
        let mix = MixRatio::parse("1:2:4", 3).unwrap();
        let volumes = mix.split(1.386);
        assert!((volumes[0] - 0.198).abs() < 1e-12);
        assert!((volumes.iter().sum::<f64>() - 1.386).abs() < 1e-12);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mix = MixRatio::parse("1:6", 2).unwrap();
        let json = serde_json::to_string(&mix).unwrap();
        let roundtrip: MixRatio = serde_json::from_str(&json).unwrap();
        assert_eq!(mix, roundtrip);
    }
}
