//! Applied-current drives: constant bindings and piecewise-linear profiles.

use crate::error::{SimError, SimResult};
use cf_core::numeric::lerp;

/// Piecewise current-vs-time schedule.
///
/// Holds ordered `(time_s, current_a)` samples with strictly increasing
/// times. Evaluation interpolates linearly between samples and holds the
/// first/last sample outside the covered span.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentProfile {
    samples: Vec<(f64, f64)>,
}

impl CurrentProfile {
    /// Build a profile from `(time_s, current_a)` samples.
    pub fn new(samples: Vec<(f64, f64)>) -> SimResult<Self> {
        if samples.len() < 2 {
            return Err(SimError::InvalidArg {
                what: "current profile needs at least two samples",
            });
        }
        for &(t, i) in &samples {
            if !t.is_finite() || !i.is_finite() {
                return Err(SimError::InvalidArg {
                    what: "current profile samples must be finite",
                });
            }
        }
        for window in samples.windows(2) {
            if !(window[1].0 > window[0].0) {
                return Err(SimError::InvalidArg {
                    what: "current profile times must be strictly increasing",
                });
            }
        }
        Ok(Self { samples })
    }

    /// Build a stepped profile: a fixed-spacing time axis from zero through
    /// `duration_s` with `levels` repeated cyclically along it.
    ///
    /// The axis upper bound is inclusive; when `duration_s` is not an exact
    /// multiple of `step_s` the final partial bucket is still covered.
    pub fn stepped(duration_s: f64, step_s: f64, levels: &[f64]) -> SimResult<Self> {
        if !(duration_s > 0.0) || !duration_s.is_finite() {
            return Err(SimError::InvalidArg {
                what: "profile duration must be positive",
            });
        }
        if !(step_s > 0.0) || !step_s.is_finite() {
            return Err(SimError::InvalidArg {
                what: "profile step must be positive",
            });
        }
        if levels.is_empty() {
            return Err(SimError::InvalidArg {
                what: "profile needs at least one current level",
            });
        }

        // Same axis as arange(0, duration + step, step): the last bucket
        // starting at or before `duration` is included.
        let count = ((duration_s + step_s) / step_s - 1e-9).ceil() as usize;
        let samples = (0..count)
            .map(|i| (i as f64 * step_s, levels[i % levels.len()]))
            .collect();
        Self::new(samples)
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    pub fn start_time(&self) -> f64 {
        self.samples[0].0
    }

    pub fn end_time(&self) -> f64 {
        self.samples[self.samples.len() - 1].0
    }

    /// Applied current at time t, linearly interpolated.
    ///
    /// Before the first sample the first current applies; after the last
    /// sample the last current applies.
    pub fn current_at(&self, t: f64) -> f64 {
        let n = self.samples.len();
        if t <= self.samples[0].0 {
            return self.samples[0].1;
        }
        if t >= self.samples[n - 1].0 {
            return self.samples[n - 1].1;
        }
        // partition_point returns the first index with time > t
        let hi = self.samples.partition_point(|&(ts, _)| ts <= t);
        let lo = hi - 1;
        let (t0, i0) = self.samples[lo];
        let (t1, i1) = self.samples[hi];
        lerp(i0, i1, (t - t0) / (t1 - t0))
    }
}

/// Binding of the cell's applied-current input.
///
/// The constant variant corresponds to an externally supplied input value
/// (interactive stepping); the profile variant installs a piecewise-linear
/// interpolant over the whole run.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentDrive {
    Constant(f64),
    Profile(CurrentProfile),
}

impl CurrentDrive {
    pub fn current_at(&self, t: f64) -> f64 {
        match self {
            CurrentDrive::Constant(i) => *i,
            CurrentDrive::Profile(profile) => profile.current_at(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepped_cycles_levels_over_inclusive_axis() {
        let profile = CurrentProfile::stepped(1200.0, 600.0, &[1.0, -1.0, 0.0]).unwrap();
        assert_eq!(
            profile.samples(),
            &[(0.0, 1.0), (600.0, -1.0), (1200.0, 0.0)]
        );
    }

    #[test]
    fn stepped_covers_partial_final_bucket() {
        let profile = CurrentProfile::stepped(1000.0, 600.0, &[2.0]).unwrap();
        assert_eq!(profile.end_time(), 1200.0);
        assert_eq!(profile.samples().len(), 3);
    }

    #[test]
    fn stepped_repeats_short_level_list() {
        let profile = CurrentProfile::stepped(3600.0, 600.0, &[1.0, -1.0]).unwrap();
        let currents: Vec<f64> = profile.samples().iter().map(|s| s.1).collect();
        assert_eq!(currents, vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
    }

    #[test]
    fn interpolates_between_samples() {
        let profile = CurrentProfile::new(vec![(0.0, 0.0), (10.0, 5.0)]).unwrap();
        assert!((profile.current_at(5.0) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn holds_boundary_values_outside_span() {
        let profile = CurrentProfile::new(vec![(0.0, 1.0), (10.0, -1.0)]).unwrap();
        assert_eq!(profile.current_at(-5.0), 1.0);
        assert_eq!(profile.current_at(15.0), -1.0);
    }

    #[test]
    fn rejects_short_profiles() {
        assert!(CurrentProfile::new(vec![(0.0, 1.0)]).is_err());
    }

    #[test]
    fn rejects_non_increasing_times() {
        assert!(CurrentProfile::new(vec![(0.0, 1.0), (0.0, 2.0)]).is_err());
        assert!(CurrentProfile::new(vec![(5.0, 1.0), (2.0, 2.0)]).is_err());
    }

    #[test]
    fn rejects_non_finite_samples() {
        assert!(CurrentProfile::new(vec![(0.0, f64::NAN), (1.0, 0.0)]).is_err());
    }

    #[test]
    fn constant_drive_ignores_time() {
        let drive = CurrentDrive::Constant(5.0);
        assert_eq!(drive.current_at(0.0), 5.0);
        assert_eq!(drive.current_at(1e6), 5.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn interpolation_stays_within_sample_hull(
            currents in prop::collection::vec(-50.0_f64..50.0, 2..8),
            t in -100.0_f64..1000.0,
        ) {
            let samples: Vec<(f64, f64)> = currents
                .iter()
                .enumerate()
                .map(|(i, &c)| (i as f64 * 60.0, c))
                .collect();
            let profile = CurrentProfile::new(samples).unwrap();

            let lo = currents.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = currents.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let i = profile.current_at(t);
            prop_assert!(i >= lo - 1e-9 && i <= hi + 1e-9);
        }
    }
}
