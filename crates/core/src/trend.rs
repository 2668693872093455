//! Trend functions.
//!
//! A trend maps an observation index to the Gaussian parameters used for that observation.

use crate::{VitalsError, VitalsResult};
use std::{fmt, str::FromStr};

/// Shape of a generated series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Trend {
    /// Every observation is drawn from the baseline distribution.
    None,
    /// The mean rises slowly (quadratic in the normalised index), then the final observation
    /// spikes to four standard deviations above baseline with half the spread.
    #[default]
    RisingSpike,
}

/// Mean and standard deviation for one observation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendParameters {
    pub mean: f64,
    pub std_dev: f64,
}

impl Trend {
    /// Gaussian parameters for the observation at `index` out of `count`.
    ///
    /// `index` is expected to be in `0..count`.
    pub fn parameters(
        self,
        index: usize,
        count: usize,
        base_mean: f64,
        base_std_dev: f64,
    ) -> TrendParameters {
        match self {
            Trend::None => TrendParameters {
                mean: base_mean,
                std_dev: base_std_dev,
            },
            Trend::RisingSpike if index + 1 == count => TrendParameters {
                mean: base_mean + 4.0 * base_std_dev,
                std_dev: base_std_dev / 2.0,
            },
            Trend::RisingSpike => {
                let progress = index as f64 / count as f64;
                TrendParameters {
                    mean: base_mean + base_std_dev * progress.powi(2) / 2.0,
                    std_dev: base_std_dev,
                }
            }
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Trend::None => "none",
            Trend::RisingSpike => "rising-spike",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = VitalsError;

    fn from_str(s: &str) -> VitalsResult<Self> {
        match s {
            "none" => Ok(Trend::None),
            "rising-spike" => Ok(Trend::RisingSpike),
            other => Err(VitalsError::InvalidArgument(format!(
                "unknown trend '{other}' (expected 'none' or 'rising-spike')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEAN: f64 = 70.59;
    const SD: f64 = 8.36;

    #[test]
    fn none_is_flat() {
        for index in 0..10 {
            let p = Trend::None.parameters(index, 10, MEAN, SD);
            assert_eq!(p.mean, MEAN);
            assert_eq!(p.std_dev, SD);
        }
    }

    #[test]
    fn rising_spike_rises_then_spikes() {
        let count = 10;
        let params: Vec<_> = (0..count)
            .map(|i| Trend::RisingSpike.parameters(i, count, MEAN, SD))
            .collect();

        assert_eq!(params[0].mean, MEAN);
        for pair in params[..count - 1].windows(2) {
            assert!(pair[1].mean > pair[0].mean);
            assert_eq!(pair[1].std_dev, SD);
        }

        let last = params[count - 1];
        let before = params[count - 2];
        assert_eq!(last.mean, MEAN + 4.0 * SD);
        assert_eq!(last.std_dev, SD / 2.0);
        // The rise never reaches half a deviation, so the spike is a clear jump.
        assert!(before.mean < MEAN + SD / 2.0);
        assert!(last.mean - before.mean > 3.0 * SD);
    }

    #[test]
    fn rising_spike_uses_quadratic_progress() {
        let p = Trend::RisingSpike.parameters(5, 10, MEAN, SD);
        let expected = MEAN + SD * 0.25 / 2.0;
        assert!((p.mean - expected).abs() < 1e-12);
    }

    #[test]
    fn single_observation_is_the_spike() {
        let p = Trend::RisingSpike.parameters(0, 1, MEAN, SD);
        assert_eq!(p.mean, MEAN + 4.0 * SD);
        assert_eq!(p.std_dev, SD / 2.0);
    }

    #[test]
    fn parses_and_displays_names() {
        assert_eq!("none".parse::<Trend>().expect("parse"), Trend::None);
        assert_eq!(
            "rising-spike".parse::<Trend>().expect("parse"),
            Trend::RisingSpike
        );
        assert_eq!(Trend::RisingSpike.to_string(), "rising-spike");
        assert_eq!(Trend::None.to_string(), "none");
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "spiky".parse::<Trend>().expect_err("unknown trend");
        match err {
            VitalsError::InvalidArgument(msg) => assert!(msg.contains("spiky")),
            other => panic!("expected InvalidArgument error, got {other:?}"),
        }
    }
}
