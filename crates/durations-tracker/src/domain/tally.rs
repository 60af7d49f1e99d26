//! Exact arithmetic for turn values.
//!
//! Turn values are compared for structural equality when recognising a turn
//! advance, so they are kept as fixed-point integers instead of floats.

use std::fmt;
use std::str::FromStr;

use durations_core::error::DomainError;

/// Units per whole value.
const SCALE: i64 = 1000;
const SCALE_UNSIGNED: u64 = 1000;
const FRACTION_DIGITS: usize = 3;

/// A signed decimal with three fractional digits.
///
/// Input with more fractional digits is rounded half away from zero to the
/// nearest thousandth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tally(i64);

impl Tally {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One.
    pub const ONE: Self = Self(SCALE);

    /// Builds a tally from a whole number, or `None` on overflow.
    #[must_use]
    pub fn from_whole(value: i64) -> Option<Self> {
        value.checked_mul(SCALE).map(Self)
    }

    /// Adds two tallies, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Whether the value is below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Reads a platform value: a JSON number, a numeric string, or an empty
    /// string / null (zero).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the value is not numeric.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DomainError> {
        match value {
            serde_json::Value::Null => Ok(Self::ZERO),
            serde_json::Value::String(text) if text.trim().is_empty() => Ok(Self::ZERO),
            serde_json::Value::String(text) => text.parse(),
            serde_json::Value::Number(number) => number.to_string().parse(),
            other => Err(DomainError::Validation(format!("`{other}` is not a number"))),
        }
    }

    /// Writes the value as a JSON number.
    #[must_use]
    pub fn to_json(self) -> serde_json::Value {
        if self.0 % SCALE == 0 {
            return serde_json::Value::from(self.0 / SCALE);
        }
        self.to_string()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or_else(
                || serde_json::Value::String(self.to_string()),
                serde_json::Value::Number,
            )
    }
}

impl FromStr for Tally {
    type Err = DomainError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::Validation(format!("`{text}` is not a number"));
        let trimmed = text.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let mut units: i64 = 0;
        for digit in whole.bytes() {
            units = units
                .checked_mul(10)
                .and_then(|u| u.checked_add(i64::from(digit - b'0')))
                .ok_or_else(invalid)?;
        }
        units = units.checked_mul(SCALE).ok_or_else(invalid)?;

        let mut place = SCALE / 10;
        let mut fraction_units = 0;
        for digit in fraction.bytes().take(FRACTION_DIGITS) {
            fraction_units += i64::from(digit - b'0') * place;
            place /= 10;
        }
        if fraction
            .as_bytes()
            .get(FRACTION_DIGITS)
            .is_some_and(|digit| *digit >= b'5')
        {
            fraction_units += 1;
        }
        units = units.checked_add(fraction_units).ok_or_else(invalid)?;

        Ok(Self(if negative { -units } else { units }))
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / SCALE_UNSIGNED;
        let fraction = magnitude % SCALE_UNSIGNED;
        if fraction == 0 {
            return write!(f, "{sign}{whole}");
        }
        let mut digits = format!("{fraction:03}");
        while digits.ends_with('0') {
            digits.pop();
        }
        write!(f, "{sign}{whole}.{digits}")
    }
}

/// How an entry's value changes when it takes its turn.
///
/// Negative steps count a duration down towards expiry; positive steps count
/// rounds up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step(Tally);

impl Step {
    /// `-1`: a duration losing one round per turn.
    pub const COUNTDOWN: Self = Self(Tally(-SCALE));

    /// `+1`: the round counter moving forward.
    pub const NEXT_ROUND: Self = Self(Tally(SCALE));

    /// The signed change applied per turn.
    #[must_use]
    pub fn delta(self) -> Tally {
        self.0
    }

    /// Whether the step counts down towards expiry.
    #[must_use]
    pub fn counts_down(self) -> bool {
        self.0.is_negative()
    }

    /// Parses a round formula typed by a user: a `+` or `-` sign followed by
    /// whole digits, e.g. `+1` or `-2`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the formula is malformed.
    pub fn parse_formula(text: &str) -> Result<Self, DomainError> {
        let invalid = || {
            DomainError::Validation(format!(
                "`{text}` is not a valid round formula. The round formula must start with a plus `+` or minus `-` sign, followed by a number."
            ))
        };
        let rest = text
            .strip_prefix('+')
            .or_else(|| text.strip_prefix('-'))
            .ok_or_else(invalid)?
            .trim_start();
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        text.parse().map_err(|_| invalid())
    }
}

impl FromStr for Step {
    type Err = DomainError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => ("-", &trimmed[1..]),
            Some(b'+') => ("", &trimmed[1..]),
            _ => ("", trimmed),
        };
        format!("{sign}{}", rest.trim_start())
            .parse::<Tally>()
            .map(Self)
            .map_err(|_| DomainError::Validation(format!("`{text}` is not a valid formula")))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_negative() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "+{}", self.0)
        }
    }
}
