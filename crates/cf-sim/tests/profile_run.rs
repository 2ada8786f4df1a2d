//! Integration test: one-shot profile runs.
//!
//! Covers the batch contract:
//! - Stepped profile construction (inclusive axis, cyclic level assignment)
//! - Four aligned output traces with a strictly increasing time axis
//! - SOC trends matching the profile's discharge/charge segments

use cf_cell::{CellModel, CellParameters};
use cf_sim::{CurrentProfile, RunOptions, run_profile};

fn default_cell() -> CellModel {
    CellModel::new(CellParameters::default()).unwrap()
}

#[test]
fn stepped_profile_concrete_axis() {
    let profile = CurrentProfile::stepped(1200.0, 600.0, &[1.0, -1.0, 0.0]).unwrap();
    let times: Vec<f64> = profile.samples().iter().map(|s| s.0).collect();
    let currents: Vec<f64> = profile.samples().iter().map(|s| s.1).collect();
    assert_eq!(times, vec![0.0, 600.0, 1200.0]);
    assert_eq!(currents, vec![1.0, -1.0, 0.0]);
}

#[test]
fn traces_are_aligned_and_time_increases_at_resolution() {
    let profile = CurrentProfile::stepped(1200.0, 600.0, &[1.0, -1.0, 0.0]).unwrap();
    let opts = RunOptions::default();
    let traj = run_profile(&default_cell(), &profile, &opts).unwrap();

    assert_eq!(traj.time.len(), traj.current.len());
    assert_eq!(traj.time.len(), traj.voltage.len());
    assert_eq!(traj.time.len(), traj.soc.len());
    assert_eq!(traj.len(), 1201);

    for window in traj.time.windows(2) {
        let dt = window[1] - window[0];
        assert!(dt > 0.0, "time axis must be strictly increasing");
        assert!((dt - opts.time_resolution).abs() < 1e-9);
    }
}

#[test]
fn constant_discharge_profile_depletes_soc() {
    let profile = CurrentProfile::new(vec![(0.0, 5.0), (600.0, 5.0)]).unwrap();
    let traj = run_profile(&default_cell(), &profile, &RunOptions::default()).unwrap();

    let first = *traj.soc.first().unwrap();
    let last = *traj.soc.last().unwrap();
    assert!(last < first);
    assert!(traj.soc.iter().all(|s| (0.0..=1.0).contains(s)));
    assert!(traj.voltage.iter().all(|v| (2.5..=4.2).contains(v)));
}

#[test]
fn charge_segment_raises_soc() {
    let profile = CurrentProfile::new(vec![(0.0, -5.0), (600.0, -5.0)]).unwrap();
    let traj = run_profile(&default_cell(), &profile, &RunOptions::default()).unwrap();
    assert!(traj.soc.last().unwrap() > traj.soc.first().unwrap());
}

#[test]
fn recorded_current_matches_interpolant() {
    let profile = CurrentProfile::new(vec![(0.0, 0.0), (10.0, 5.0)]).unwrap();
    let traj = run_profile(&default_cell(), &profile, &RunOptions::default()).unwrap();

    for (t, i) in traj.time.iter().zip(traj.current.iter()) {
        assert!((i - profile.current_at(*t)).abs() < 1e-12);
    }
    // Midpoint of the linear ramp.
    assert!((traj.current[5] - 2.5).abs() < 1e-12);
}

#[test]
fn coarser_resolution_shrinks_output() {
    let profile = CurrentProfile::stepped(1200.0, 600.0, &[1.0, -1.0, 0.0]).unwrap();
    let opts = RunOptions {
        time_resolution: 10.0,
        ..RunOptions::default()
    };
    let traj = run_profile(&default_cell(), &profile, &opts).unwrap();
    assert_eq!(traj.len(), 121);
}

#[test]
fn repeated_runs_are_identical() {
    // Fresh sessions per run: no state leaks between invocations.
    let profile = CurrentProfile::stepped(600.0, 60.0, &[2.0, -2.0]).unwrap();
    let cell = default_cell();
    let a = run_profile(&cell, &profile, &RunOptions::default()).unwrap();
    let b = run_profile(&cell, &profile, &RunOptions::default()).unwrap();
    assert_eq!(a.time, b.time);
    assert_eq!(a.soc, b.soc);
    assert_eq!(a.voltage, b.voltage);
}
