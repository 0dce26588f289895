//! Filter predicates applied to parsed values
//!
//! Any `Fn(i64) -> bool` can be handed to the handler. [`Residue`] is the
//! named filter the CLI builds from `--modulus` and `--remainder`.

use crate::error::ConfigError;
use std::fmt;

/// Keeps values where `value % modulus == remainder`
///
/// Uses Rust's truncating `%`, so a negative value leaves a negative (or
/// zero) remainder: `-5 % 4 == -1`, which never matches remainder 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Residue {
    modulus: i64,
    remainder: i64,
}

impl Residue {
    pub fn new(modulus: i64, remainder: i64) -> Result<Self, ConfigError> {
        if modulus == 0 {
            return Err(ConfigError::InvalidModulus(modulus));
        }
        Ok(Self { modulus, remainder })
    }

    pub fn matches(&self, value: i64) -> bool {
        // wrapping_rem: i64::MIN % -1 overflows
        value.wrapping_rem(self.modulus) == self.remainder
    }

    /// Turn into a closure for the handler
    pub fn as_fn(self) -> impl Fn(i64) -> bool {
        move |value| self.matches(value)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value % {} == {}", self.modulus, self.remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_four_equals_three() {
        let residue = Residue::new(4, 3).unwrap();
        let kept: Vec<i64> = [7, 11, 11, 4, 15]
            .into_iter()
            .filter(|&v| residue.matches(v))
            .collect();
        assert_eq!(kept, vec![7, 11, 11, 15]);
    }

    #[test]
    fn test_negative_values_use_truncated_remainder() {
        let residue = Residue::new(4, 3).unwrap();
        assert!(!residue.matches(-1));
        assert!(!residue.matches(-5));

        let negative = Residue::new(4, -1).unwrap();
        assert!(negative.matches(-5));
    }

    #[test]
    fn test_zero_modulus_rejected() {
        assert_eq!(Residue::new(0, 1), Err(ConfigError::InvalidModulus(0)));
    }

    #[test]
    fn test_min_value_does_not_overflow() {
        let residue = Residue::new(-1, 0).unwrap();
        assert!(residue.matches(i64::MIN));
    }

    #[test]
    fn test_display() {
        assert_eq!(Residue::new(4, 3).unwrap().to_string(), "value % 4 == 3");
    }
}
