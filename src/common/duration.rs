use thiserror::Error;
use tracing::debug;

/// Units accepted for how long a giveaway stays open.
pub const GIVEAWAY_UNITS: &[char] = &['s', 'm', 'h', 'd'];
/// Units accepted for the winner's claim window.
pub const CLAIM_UNITS: &[char] = &['m', 'h'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,
    #[error("duration has no magnitude")]
    MissingMagnitude,
    #[error("unit `{0}` is not supported")]
    UnsupportedUnit(char),
    #[error("`{0}` is not a whole number")]
    InvalidMagnitude(String),
    #[error("duration is too large")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duration {
    pub seconds: i64,
}

fn unit_multiplier(unit: char) -> Option<i64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(60 * 60),
        'd' => Some(60 * 60 * 24),
        _ => None,
    }
}

/// Splits `10s` into its magnitude text and the multiplier of its unit.
fn split<'a>(string: &'a str, units: &[char]) -> Result<(&'a str, i64), DurationError> {
    let Some((index, unit)) = string.char_indices().last() else {
        return Err(DurationError::Empty);
    };
    let magnitude = &string[..index];
    if magnitude.is_empty() {
        return Err(DurationError::MissingMagnitude);
    }

    match unit_multiplier(unit) {
        Some(multiplier) if units.contains(&unit) => Ok((magnitude, multiplier)),
        _ => Err(DurationError::UnsupportedUnit(unit)),
    }
}

impl Duration {
    /// Parses strings such as `10s` or `2h`: an integer magnitude followed by
    /// a single unit character drawn from `units`.
    pub fn parse(string: &str, units: &[char]) -> Result<Duration, DurationError> {
        debug!("Parsing duration: {}", string);

        let (magnitude, multiplier) = split(string, units)?;

        let Ok(value) = magnitude.parse::<i64>() else {
            return Err(DurationError::InvalidMagnitude(magnitude.to_string()));
        };

        let Some(seconds) = value.checked_mul(multiplier) else {
            return Err(DurationError::Overflow);
        };

        let duration = Duration { seconds };
        debug!("Parsed duration: {:?}", duration);
        Ok(duration)
    }

    /// Checks the shape of a duration without converting it, so magnitudes of
    /// any length pass.
    pub fn validate(string: &str, units: &[char]) -> Result<(), DurationError> {
        let (magnitude, _) = split(string, units)?;
        let digits = magnitude
            .strip_prefix(|sign| sign == '-' || sign == '+')
            .unwrap_or(magnitude);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DurationError::InvalidMagnitude(magnitude.to_string()));
        }
        Ok(())
    }

    pub fn to_timestamp(&self, from: time::OffsetDateTime) -> Option<time::OffsetDateTime> {
        from.checked_add(time::Duration::seconds(self.seconds))
    }

    /// Non-positive durations collapse to zero.
    pub fn to_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::try_from(self.seconds).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_giveaway_unit() {
        let cases = [("10s", 10), ("5m", 300), ("1h", 3600), ("1d", 86400)];
        for (string, seconds) in cases {
            let duration = Duration::parse(string, GIVEAWAY_UNITS).unwrap();
            assert_eq!(duration.seconds, seconds, "{string}");
        }
    }

    #[test]
    fn test_claim_units_reject_seconds_and_days() {
        assert_eq!(Duration::parse("30m", CLAIM_UNITS).unwrap().seconds, 1800);
        assert_eq!(Duration::parse("2h", CLAIM_UNITS).unwrap().seconds, 7200);
        assert_eq!(
            Duration::parse("30s", CLAIM_UNITS),
            Err(DurationError::UnsupportedUnit('s'))
        );
        assert_eq!(
            Duration::parse("1d", CLAIM_UNITS),
            Err(DurationError::UnsupportedUnit('d'))
        );
    }

    #[test]
    fn test_rejects_malformed_strings() {
        assert_eq!(Duration::parse("", GIVEAWAY_UNITS), Err(DurationError::Empty));
        assert_eq!(
            Duration::parse("s", GIVEAWAY_UNITS),
            Err(DurationError::MissingMagnitude)
        );
        assert_eq!(
            Duration::parse("10x", GIVEAWAY_UNITS),
            Err(DurationError::UnsupportedUnit('x'))
        );
        assert_eq!(
            Duration::parse("1.5h", GIVEAWAY_UNITS),
            Err(DurationError::InvalidMagnitude("1.5".to_string()))
        );
        assert_eq!(
            Duration::parse(" 5m", GIVEAWAY_UNITS),
            Err(DurationError::InvalidMagnitude(" 5".to_string()))
        );
        assert_eq!(
            Duration::parse("10", GIVEAWAY_UNITS),
            Err(DurationError::UnsupportedUnit('0'))
        );
        assert_eq!(
            Duration::parse("🎉", GIVEAWAY_UNITS),
            Err(DurationError::MissingMagnitude)
        );
    }

    #[test]
    fn test_overflow_is_rejected() {
        let string = format!("{}d", i64::MAX);
        assert_eq!(
            Duration::parse(&string, GIVEAWAY_UNITS),
            Err(DurationError::Overflow)
        );
    }

    #[test]
    fn test_validate_accepts_any_integer_magnitude() {
        assert_eq!(Duration::validate("99999999999999999999m", CLAIM_UNITS), Ok(()));
        assert_eq!(Duration::validate("-3h", CLAIM_UNITS), Ok(()));
        assert_eq!(
            Duration::validate("30s", CLAIM_UNITS),
            Err(DurationError::UnsupportedUnit('s'))
        );
        assert_eq!(
            Duration::validate("1.5h", CLAIM_UNITS),
            Err(DurationError::InvalidMagnitude("1.5".to_string()))
        );
        assert_eq!(
            Duration::validate("-m", CLAIM_UNITS),
            Err(DurationError::InvalidMagnitude("-".to_string()))
        );
        assert_eq!(Duration::validate("m", CLAIM_UNITS), Err(DurationError::MissingMagnitude));
    }

    #[test]
    fn test_non_positive_durations_are_accepted() {
        let zero = Duration::parse("0s", GIVEAWAY_UNITS).unwrap();
        let negative = Duration::parse("-5m", GIVEAWAY_UNITS).unwrap();

        assert_eq!(zero.to_std(), std::time::Duration::ZERO);
        assert_eq!(negative.seconds, -300);
        assert_eq!(negative.to_std(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_to_timestamp_adds_seconds() {
        let from = time::OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let duration = Duration::parse("2m", GIVEAWAY_UNITS).unwrap();

        assert_eq!(
            duration.to_timestamp(from).unwrap().unix_timestamp(),
            1_700_000_120
        );
    }
}
