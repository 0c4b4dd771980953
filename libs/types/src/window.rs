//! Trailing look-back window for statistics
//!
//! A window is a whole number of hours counted back from "now". The lower
//! bound is inclusive and the upper bound is open.

use crate::errors::LookbackError;
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;

/// Look-back window in whole hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lookback {
    hours: i64,
}

impl Lookback {
    /// Window used when the caller does not supply one
    pub const DEFAULT_HOURS: i64 = 1;

    /// Build a window from a number of hours.
    ///
    /// Negative values are allowed and describe a window that starts in the
    /// future, so nothing falls inside it.
    pub fn from_hours(hours: i64) -> Self {
        Self { hours }
    }

    /// Parse the optional `time` query value.
    ///
    /// Missing or empty values fall back to [`Lookback::DEFAULT_HOURS`].
    pub fn parse(raw: Option<&str>) -> Result<Self, LookbackError> {
        match raw {
            None | Some("") => Ok(Self::default()),
            Some(value) => value.parse(),
        }
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Earliest timestamp (inclusive) that belongs to the window ending at `now`.
    ///
    /// Windows reaching past the representable calendar saturate: to the
    /// earliest instant for huge look-backs, to the latest for huge negative
    /// ones.
    pub fn lower_bound(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match TimeDelta::try_hours(self.hours).and_then(|span| now.checked_sub_signed(span)) {
            Some(bound) => bound,
            None if self.hours < 0 => DateTime::<Utc>::MAX_UTC,
            None => DateTime::<Utc>::MIN_UTC,
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self::from_hours(Self::DEFAULT_HOURS)
    }
}

impl FromStr for Lookback {
    type Err = LookbackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours: i64 = s
            .parse()
            .map_err(|_| LookbackError::NotAnInteger(s.to_string()))?;
        Ok(Self::from_hours(hours))
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_is_one_hour() {
        assert_eq!(Lookback::parse(None).unwrap().hours(), 1);
        assert_eq!(Lookback::parse(Some("")).unwrap().hours(), 1);
        assert_eq!(
            Lookback::default().lower_bound(noon()),
            noon() - TimeDelta::hours(1)
        );
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(Lookback::parse(Some("48")).unwrap().hours(), 48);
        assert_eq!(Lookback::parse(Some("+3")).unwrap().hours(), 3);
        assert_eq!(Lookback::parse(Some("-2")).unwrap().hours(), -2);
        assert_eq!(Lookback::parse(Some("0")).unwrap().hours(), 0);
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        for raw in ["Wrong", "1.5", " 1", "1h", "0x10", "99999999999999999999"] {
            assert_eq!(
                Lookback::parse(Some(raw)),
                Err(LookbackError::NotAnInteger(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_lower_bound() {
        let window = Lookback::from_hours(48);
        assert_eq!(
            window.lower_bound(noon()),
            Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap()
        );

        let future = Lookback::from_hours(-1);
        assert!(future.lower_bound(noon()) > noon());
    }

    #[test]
    fn test_lower_bound_saturates() {
        for hours in [3_000_000_000, i64::MAX] {
            let window = Lookback::parse(Some(hours.to_string().as_str())).unwrap();
            assert_eq!(window.lower_bound(noon()), DateTime::<Utc>::MIN_UTC);
        }
        for hours in [-3_000_000_000, i64::MIN] {
            let window = Lookback::parse(Some(hours.to_string().as_str())).unwrap();
            assert_eq!(window.lower_bound(noon()), DateTime::<Utc>::MAX_UTC);
        }
    }

    proptest! {
        #[test]
        fn prop_parse_matches_hours(hours in any::<i64>()) {
            let parsed = Lookback::parse(Some(hours.to_string().as_str())).unwrap();
            prop_assert_eq!(parsed.hours(), hours);
        }

        #[test]
        fn prop_lower_bound_is_hours_before_now(hours in 0i64..100_000i64) {
            let bound = Lookback::from_hours(hours).lower_bound(noon());
            prop_assert_eq!(noon() - bound, TimeDelta::hours(hours));
        }
    }
}
