use anyhow::{Context as _, bail};
use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
};

use super::{WaitTime, WeightedAction};

/// Declares what a single simulated user does on each iteration and how
/// long it waits between iterations.
///
/// Read-only after construction. The runner creates one independent
/// instance of RNG and timing state per simulated user; this type only
/// holds the declaration.
#[derive(Debug, Clone)]
pub struct BehaviorProfile {
    name: String,
    wait_time: WaitTime,
    actions: Vec<WeightedAction>,
    index: WeightedIndex<usize>,
}

impl BehaviorProfile {
    /// Build a profile from an explicit action list.
    ///
    /// Rejects empty action lists and zero weights.
    pub fn new(
        name: impl Into<String>,
        wait_time: WaitTime,
        actions: Vec<WeightedAction>,
    ) -> anyhow::Result<Self> {
        let name = name.into();
        if actions.is_empty() {
            bail!("behavior profile '{name}' declares no actions");
        }
        if let Some(action) = actions.iter().find(|action| action.weight() == 0) {
            bail!(
                "behavior profile '{name}': action '{}' has weight 0, weights must be positive",
                action.report_name(),
            );
        }
        let index = WeightedIndex::new(actions.iter().map(|action| action.weight()))
            .with_context(|| format!("build weighted selection for profile '{name}'"))?;

        Ok(Self {
            name,
            wait_time,
            actions,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wait_time(&self) -> WaitTime {
        self.wait_time
    }

    pub fn actions(&self) -> &[WeightedAction] {
        &self.actions
    }

    /// Total of all declared weights.
    pub fn total_weight(&self) -> usize {
        self.actions.iter().map(|action| action.weight()).sum()
    }

    /// Index of the next action, weighted random.
    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }

    /// Weighted random selection of one action.
    ///
    /// Stateless per iteration: every pick is independent of prior picks,
    /// modulo the weight distribution.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &WeightedAction {
        &self.actions[self.pick_index(rng)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng as _, rngs::SmallRng};

    fn two_to_one() -> BehaviorProfile {
        BehaviorProfile::new(
            "TwoToOne",
            WaitTime::between_secs(0, 0).expect("wait time"),
            vec![
                WeightedAction::get("/a", 2),
                WeightedAction::get("/b", 1),
            ],
        )
        .expect("profile")
    }

    #[test]
    fn pick_only_returns_declared_actions() {
        let profile = two_to_one();
        let mut rng = SmallRng::seed_from_u64(5);

        for _ in 0..100 {
            let action = profile.pick(&mut rng);
            assert!(["/a", "/b"].contains(&action.path()));
        }
    }

    #[test]
    fn pick_frequencies_follow_the_weights() {
        let profile = two_to_one();
        let mut rng = SmallRng::seed_from_u64(42);

        let mut a = 0usize;
        for _ in 0..3_000 {
            if profile.pick(&mut rng).path() == "/a" {
                a += 1;
            }
        }

        // expectation 2000 of 3000, +/- 4 sigma (~103)
        assert!((1_890..=2_110).contains(&a), "picks of /a: {a}");
    }

    #[test]
    fn zero_weight_is_rejected() {
        let result = BehaviorProfile::new(
            "Broken",
            WaitTime::between_secs(0, 0).expect("wait time"),
            vec![WeightedAction::get("/a", 0)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_action_list_is_rejected() {
        let result = BehaviorProfile::new(
            "Empty",
            WaitTime::between_secs(0, 0).expect("wait time"),
            Vec::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn total_weight_sums_all_actions() {
        assert_eq!(two_to_one().total_weight(), 3);
    }
}
