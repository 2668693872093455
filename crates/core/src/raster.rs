//! Daily timestamp raster.
//!
//! For an `n`-observation series the observation at index `i` is dated `now - (n - i - 1)`
//! days, so the last one is "now" and the rest step back one day each.

use crate::{VitalsError, VitalsResult};
use chrono::{DateTime, Duration, FixedOffset, Local, Timelike};

/// Drop subsecond precision.
pub fn truncate_to_second(value: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    value.with_nanosecond(0).unwrap_or(value)
}

/// Current local time with its UTC offset, truncated to the second.
pub fn local_now() -> DateTime<FixedOffset> {
    let now: DateTime<FixedOffset> = Local::now().into();
    truncate_to_second(now)
}

/// Timestamps for a series of `count` daily observations ending at `now`, oldest first.
#[derive(Clone, Debug)]
pub struct DayRaster {
    now: DateTime<FixedOffset>,
    count: usize,
    next_index: usize,
}

impl Iterator for DayRaster {
    type Item = DateTime<FixedOffset>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.count {
            return None;
        }

        let days_ago = (self.count - self.next_index - 1) as i64;
        self.next_index += 1;
        // In range: day_raster checked the oldest date.
        Some(self.now - Duration::days(days_ago))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next_index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DayRaster {}

/// Build the raster for `count` observations ending at `now` (truncated to the second).
///
/// # Errors
///
/// Returns [`VitalsError::InvalidArgument`] if the oldest date would fall outside the range
/// chrono can represent.
pub fn day_raster(now: DateTime<FixedOffset>, count: usize) -> VitalsResult<DayRaster> {
    let now = truncate_to_second(now);

    if count > 0 {
        let oldest = i64::try_from(count - 1)
            .ok()
            .and_then(Duration::try_days)
            .and_then(|span| now.checked_sub_signed(span));
        if oldest.is_none() {
            return Err(VitalsError::InvalidArgument(format!(
                "{count} daily observations reach back further than a representable date"
            )));
        }
    }

    Ok(DayRaster {
        now,
        count,
        next_index: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-10-19T14:07:33.456789+02:00").expect("valid rfc3339")
    }

    #[test]
    fn five_day_raster_steps_one_day_and_ends_now() {
        let now = fixed_now();
        let stamps: Vec<_> = day_raster(now, 5).expect("raster").collect();
        assert_eq!(stamps.len(), 5);

        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0]);
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }

        assert_eq!(stamps[4], truncate_to_second(now));
        assert_eq!(stamps[4].nanosecond(), 0);
        assert_eq!(stamps[0].to_rfc3339(), "2026-10-15T14:07:33+02:00");
    }

    #[test]
    fn keeps_the_offset() {
        let stamps: Vec<_> = day_raster(fixed_now(), 3).expect("raster").collect();
        for ts in stamps {
            assert_eq!(ts.offset().local_minus_utc(), 2 * 3600);
        }
    }

    #[test]
    fn single_observation_is_now() {
        let stamps: Vec<_> = day_raster(fixed_now(), 1).expect("raster").collect();
        assert_eq!(stamps, vec![truncate_to_second(fixed_now())]);
    }

    #[test]
    fn empty_raster_for_zero_count() {
        assert_eq!(day_raster(fixed_now(), 0).expect("raster").count(), 0);
    }

    #[test]
    fn rejects_unrepresentable_span() {
        let err = day_raster(fixed_now(), usize::MAX).expect_err("too far back");
        assert!(matches!(err, VitalsError::InvalidArgument(_)));
    }

    #[test]
    fn local_now_has_no_subseconds() {
        assert_eq!(local_now().nanosecond(), 0);
    }
}
