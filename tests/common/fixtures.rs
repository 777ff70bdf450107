// Test fixtures and data generators for integration tests

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tierwise::{DataProfile, Provider, Temperature};

/// Deterministic fleet generator for reproducible tests
pub struct FleetGenerator {
    rng: StdRng,
    now: NaiveDateTime,
    next_id: usize,
}

impl FleetGenerator {
    /// Creates a generator with a fixed seed, evaluating profiles at `now`
    pub fn new(seed: u64, now: NaiveDateTime) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
            next_id: 0,
        }
    }

    fn file_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}/object-{:05}", prefix, self.next_id)
    }

    fn placement(&mut self) -> (Provider, Temperature) {
        let provider = Provider::ALL[self.rng.gen_range(0..Provider::ALL.len())];
        let tier = Temperature::ALL[self.rng.gen_range(0..Temperature::ALL.len())];
        (provider, tier)
    }

    /// Any profile: size, counts, recency and placement all random
    pub fn profile(&mut self) -> DataProfile {
        let id = self.file_id("mixed");
        let size_gb = self.rng.gen_range(0.001..2048.0);
        let access_7d = self.rng.gen_range(0..40);
        let access_30d = access_7d + self.rng.gen_range(0..120);
        let idle_days = self.rng.gen_range(0..400);
        let (provider, tier) = self.placement();

        DataProfile::new(id, size_gb, self.now - Duration::days(idle_days), provider, tier)
            .with_access_counts(access_7d, access_30d)
    }

    /// Rarely touched data sitting on hot storage
    pub fn idle_on_hot(&mut self) -> DataProfile {
        let id = self.file_id("idle");
        let size_gb = self.rng.gen_range(10.0..500.0);
        let access_30d = self.rng.gen_range(0..2);
        let idle_days = self.rng.gen_range(31..365);
        let provider = Provider::ALL[self.rng.gen_range(0..Provider::ALL.len())];

        DataProfile::new(id, size_gb, self.now - Duration::days(idle_days), provider, Temperature::Hot)
            .with_access_counts(0, access_30d)
    }

    /// Busy data already on hot storage
    pub fn busy_on_hot(&mut self) -> DataProfile {
        let id = self.file_id("busy");
        let size_gb = self.rng.gen_range(0.5..50.0);
        let access_7d = self.rng.gen_range(10..200);
        let access_30d = access_7d + self.rng.gen_range(15..400);
        let provider = Provider::ALL[self.rng.gen_range(0..Provider::ALL.len())];

        DataProfile::new(id, size_gb, self.now - Duration::hours(2), provider, Temperature::Hot)
            .with_access_counts(access_7d, access_30d)
    }

    /// `count` random profiles
    pub fn fleet(&mut self, count: usize) -> Vec<DataProfile> {
        (0..count).map(|_| self.profile()).collect()
    }
}

impl Default for FleetGenerator {
    fn default() -> Self {
        Self::new(42, super::eval_time())
    }
}
