use std::time::Duration;

use clap::Args;
use rand::{Rng, SeedableRng as _, rngs::SmallRng};
use serde_json::json;

use crate::{profile::BehaviorProfile, scenario};

/// dry-run the behavior profile without any network traffic
#[derive(Debug, Clone, Args)]
pub struct SampleCommand {
    /// number of simulated iterations
    #[arg(long, value_name = "N", default_value_t = 1_000)]
    iterations: usize,

    /// seed for deterministic output
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// report json instead of a human-friendly format
    #[arg(long, default_value_t = false)]
    json: bool,
}

pub async fn exec(args: SampleCommand) -> anyhow::Result<()> {
    let profile = scenario::website_user()?;

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let report = simulate(&profile, args.iterations, &mut rng);

    if args.json {
        println!("{}", report.to_json(&profile));
    } else {
        report.print(&profile);
    }

    Ok(())
}

/// Per-action pick counts plus the range of sampled wait times.
#[derive(Debug, PartialEq, Eq)]
struct SampleReport {
    iterations: usize,
    /// Parallel to the profile's action list.
    picks: Vec<usize>,
    wait_min: Duration,
    wait_max: Duration,
    wait_total: Duration,
}

/// Run `iterations` pick + wait rounds against the profile, no I/O.
fn simulate<R: Rng + ?Sized>(
    profile: &BehaviorProfile,
    iterations: usize,
    rng: &mut R,
) -> SampleReport {
    let mut picks = vec![0usize; profile.actions().len()];
    let mut wait_min = Duration::MAX;
    let mut wait_max = Duration::ZERO;
    let mut wait_total = Duration::ZERO;

    for _ in 0..iterations {
        picks[profile.pick_index(rng)] += 1;

        let wait = profile.wait_time().sample(rng);
        wait_min = wait_min.min(wait);
        wait_max = wait_max.max(wait);
        wait_total += wait;
    }

    if iterations == 0 {
        wait_min = Duration::ZERO;
    }

    SampleReport {
        iterations,
        picks,
        wait_min,
        wait_max,
        wait_total,
    }
}

impl SampleReport {
    fn mean_wait(&self) -> Duration {
        if self.iterations == 0 {
            Duration::ZERO
        } else {
            self.wait_total / self.iterations as u32
        }
    }

    fn observed(&self, picks: usize) -> f64 {
        if self.iterations == 0 {
            0.
        } else {
            picks as f64 / self.iterations as f64
        }
    }

    fn print(&self, profile: &BehaviorProfile) {
        let total_weight = profile.total_weight() as f64;

        println!("profile={} iterations={}", profile.name(), self.iterations);
        for (action, picks) in profile.actions().iter().zip(&self.picks) {
            println!(
                "action={} weight={} picks={} observed={:.3} expected={:.3}",
                action.report_name(),
                action.weight(),
                picks,
                self.observed(*picks),
                action.weight() as f64 / total_weight,
            );
        }
        println!(
            "wait min={:.3}s max={:.3}s mean={:.3}s",
            self.wait_min.as_secs_f64(),
            self.wait_max.as_secs_f64(),
            self.mean_wait().as_secs_f64(),
        );
    }

    fn to_json(&self, profile: &BehaviorProfile) -> serde_json::Value {
        let total_weight = profile.total_weight() as f64;

        json!({
            "profile": profile.name(),
            "iterations": self.iterations,
            "actions": profile
                .actions()
                .iter()
                .zip(&self.picks)
                .map(|(action, picks)| {
                    json!({
                        "name": action.report_name(),
                        "path": action.path(),
                        "weight": action.weight(),
                        "picks": picks,
                        "observed": self.observed(*picks),
                        "expected": action.weight() as f64 / total_weight,
                    })
                })
                .collect::<Vec<_>>(),
            "wait": {
                "min_s": self.wait_min.as_secs_f64(),
                "max_s": self.wait_max.as_secs_f64(),
                "mean_s": self.mean_wait().as_secs_f64(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::website_user;

    #[test]
    fn thousand_iterations_follow_the_weights() {
        let profile = website_user().expect("profile");
        let mut rng = SmallRng::seed_from_u64(42);

        let report = simulate(&profile, 1_000, &mut rng);

        assert_eq!(report.picks.iter().sum::<usize>(), 1_000);
        // expectations (500, 250, 250), bounds at ~4 sigma
        assert!(
            (440..=560).contains(&report.picks[0]),
            "index picks: {}",
            report.picks[0],
        );
        assert!(
            (195..=305).contains(&report.picks[1]),
            "page2 picks: {}",
            report.picks[1],
        );
        assert!(
            (195..=305).contains(&report.picks[2]),
            "missing page picks: {}",
            report.picks[2],
        );
    }

    #[test]
    fn sampled_waits_stay_within_the_declared_interval() {
        let profile = website_user().expect("profile");
        let mut rng = SmallRng::seed_from_u64(7);

        let report = simulate(&profile, 1_000, &mut rng);

        assert!(report.wait_min >= Duration::from_secs(1));
        assert!(report.wait_max <= Duration::from_secs(2));
        assert!(report.mean_wait() >= report.wait_min);
        assert!(report.mean_wait() <= report.wait_max);
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let profile = website_user().expect("profile");

        let mut first_rng = SmallRng::seed_from_u64(7);
        let first = simulate(&profile, 500, &mut first_rng);

        let mut second_rng = SmallRng::seed_from_u64(7);
        let second = simulate(&profile, 500, &mut second_rng);

        assert_eq!(first, second);
    }

    #[test]
    fn zero_iterations_produce_an_empty_report() {
        let profile = website_user().expect("profile");
        let mut rng = SmallRng::seed_from_u64(9);

        let report = simulate(&profile, 0, &mut rng);

        assert!(report.picks.iter().all(|picks| *picks == 0));
        assert_eq!(report.wait_min, Duration::ZERO);
        assert_eq!(report.wait_max, Duration::ZERO);
        assert_eq!(report.mean_wait(), Duration::ZERO);
    }
}
