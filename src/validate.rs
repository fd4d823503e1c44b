//! Local preconditions checked before any request is sent

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Penalty range of the model based endpoints
pub const PENALTY_RANGE: RangeInclusive<f64> = -2.0..=2.0;

/// Penalty range of the engine based endpoints
pub const LEGACY_PENALTY_RANGE: RangeInclusive<f64> = 0.0..=1.0;

pub const SPEECH_SPEED_RANGE: RangeInclusive<f64> = 0.25..=4.0;

/// Rejects a present value outside `range`; absent values pass
pub fn in_range(
  name: &str
, value: Option<f64>
, range: &RangeInclusive<f64>
) -> Result<()>
{   match value
    {   Some(v) if !range.contains(&v) => Err(Error::validation(format!(
          "{} must be between {} and {}, got {}",
          name, range.start(), range.end(), v
        )))
      , _ => Ok(())
    }
}

/// Exactly one of the two values must be present
pub fn exactly_one<A, B>(
  first: (&str, &Option<A>)
, second: (&str, &Option<B>)
) -> Result<()>
{   match (first.1.is_some(), second.1.is_some())
    {   (true, false) | (false, true) => Ok(())
      , (false, false) => Err(Error::validation(format!(
          "either {} or {} needs to be specified",
          first.0, second.0
        )))
      , (true, true) => Err(Error::validation(format!(
          "specifying both {} and {} is not allowed",
          first.0, second.0
        )))
    }
}

/// Presence and frequency penalties share one range per API version
pub fn penalties(
  presence: Option<f64>
, frequency: Option<f64>
, range: &RangeInclusive<f64>
) -> Result<()>
{   in_range("presence_penalty", presence, range)?;
    in_range("frequency_penalty", frequency, range)
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn boundaries_are_inclusive()
    {   assert!(in_range("p", Some(2.0), &PENALTY_RANGE).is_ok());
        assert!(in_range("p", Some(-2.0), &PENALTY_RANGE).is_ok());
        assert!(in_range("p", Some(2.0001), &PENALTY_RANGE).is_err());
        assert!(in_range("p", Some(-2.0001), &PENALTY_RANGE).is_err());
    }

    #[test]
    fn legacy_range_is_narrower()
    {   assert!(penalties(Some(1.0), Some(0.0), &LEGACY_PENALTY_RANGE)
          .is_ok());
        assert!(penalties(Some(-0.5), None, &LEGACY_PENALTY_RANGE)
          .is_err());
        assert!(penalties(None, Some(1.5), &LEGACY_PENALTY_RANGE)
          .is_err());
    }

    #[test]
    fn exactly_one_of_two()
    {   let some: Option<u8> = Some(1);
        let none: Option<u8> = None;
        assert!(exactly_one(("a", &some), ("b", &none)).is_ok());
        assert!(exactly_one(("a", &none), ("b", &some)).is_ok());
        assert!(exactly_one(("a", &none), ("b", &none)).is_err());
        assert!(exactly_one(("a", &some), ("b", &some)).is_err());
    }
}
