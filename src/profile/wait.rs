use std::time::Duration;

use anyhow::bail;
use rand::Rng;

/// Randomized pause applied between consecutive actions of one simulated user.
///
/// Pure configuration: sampling draws uniformly from the closed interval
/// `[low, high]`. The type performs no I/O and keeps no timing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    low: Duration,
    high: Duration,
}

impl WaitTime {
    /// Closed interval of whole seconds to wait between actions.
    pub fn between_secs(low: u64, high: u64) -> anyhow::Result<Self> {
        Self::between(Duration::from_secs(low), Duration::from_secs(high))
    }

    pub fn between(low: Duration, high: Duration) -> anyhow::Result<Self> {
        if low > high {
            bail!("invalid wait time interval: low {low:?} > high {high:?}");
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> Duration {
        self.low
    }

    pub fn high(&self) -> Duration {
        self.high
    }

    /// Draw the next inter-action delay.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.low == self.high {
            return self.low;
        }
        rng.random_range(self.low..=self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng as _, rngs::SmallRng};

    #[test]
    fn samples_stay_within_the_closed_interval() {
        let wait = WaitTime::between_secs(1, 2).expect("wait time");
        let mut rng = SmallRng::seed_from_u64(1);

        for _ in 0..1_000 {
            let delay = wait.sample(&mut rng);
            assert!(delay >= Duration::from_secs(1), "delay too short: {delay:?}");
            assert!(delay <= Duration::from_secs(2), "delay too long: {delay:?}");
        }
    }

    #[test]
    fn degenerate_interval_always_yields_its_single_value() {
        let wait = WaitTime::between_secs(3, 3).expect("wait time");
        let mut rng = SmallRng::seed_from_u64(2);

        for _ in 0..10 {
            assert_eq!(wait.sample(&mut rng), Duration::from_secs(3));
        }
    }

    #[test]
    fn inverted_interval_is_rejected() {
        assert!(WaitTime::between_secs(2, 1).is_err());
    }
}
