use std::num::NonZeroUsize;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use storm_genesis_core::Basin;
use storm_genesis_system_count::{Config, CountSampling, CountStrategy};
use storm_genesis_tables::GenesisRateTable;

fn rate_table() -> GenesisRateTable {
    GenesisRateTable::new([16.4, 11.9, 4.4, 12.3, 7.9, 0.0]).expect("valid rates")
}

fn mean_count(sampling: &mut CountSampling, basin: Basin, trials: usize, seed: u64) -> f64 {
    let rates = rate_table();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let total: u64 = (0..trials)
        .map(|_| {
            let count = sampling
                .sample_storm_count(basin, &rates, &mut rng)
                .expect("valid basin");
            u64::from(count.get())
        })
        .sum();
    total as f64 / trials as f64
}

#[test]
fn direct_mean_converges_to_rate() {
    let mut sampling = CountSampling::new(Config::new(CountStrategy::Direct));
    let mean = mean_count(&mut sampling, Basin::NorthAtlantic, 10_000, 0x5eed);
    assert!(
        (mean - 11.9).abs() < 0.15,
        "sample mean {mean} too far from rate 11.9"
    );
}

#[test]
fn batched_mean_converges_to_rate() {
    let batch_size = NonZeroUsize::new(64).expect("non-zero batch");
    let mut sampling = CountSampling::new(Config::new(CountStrategy::Batched { batch_size }));
    let mean = mean_count(&mut sampling, Basin::NorthIndian, 10_000, 0x1234_5678);
    assert!(
        (mean - 4.4).abs() < 0.1,
        "sample mean {mean} too far from rate 4.4"
    );
}

#[test]
fn default_batch_produces_plausible_counts() {
    let rates = rate_table();
    let mut sampling = CountSampling::new(Config::default());
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..20 {
        let count = sampling
            .sample_storm_count(Basin::EasternPacific, &rates, &mut rng)
            .expect("valid basin");
        assert!(count.get() < 100, "implausible count {}", count.get());
    }
}

#[test]
fn zero_rate_yields_no_storms() {
    let rates = rate_table();
    let mut sampling = CountSampling::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..100 {
        let count = sampling
            .sample_storm_count(Basin::WesternPacific, &rates, &mut rng)
            .expect("zero rate is valid");
        assert_eq!(count.get(), 0);
    }
}

#[test]
fn deterministic_replay_produces_identical_counts() {
    let replay = |seed: u64| -> Vec<u32> {
        let rates = rate_table();
        let batch_size = NonZeroUsize::new(500).expect("non-zero batch");
        let mut sampling = CountSampling::new(Config::new(CountStrategy::Batched { batch_size }));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Basin::ALL
            .into_iter()
            .cycle()
            .take(60)
            .map(|basin| {
                sampling
                    .sample_storm_count(basin, &rates, &mut rng)
                    .expect("valid basin")
                    .get()
            })
            .collect()
    };

    assert_eq!(replay(42), replay(42), "replay diverged between runs");
    assert_ne!(replay(42), replay(43), "different seeds should diverge");
}
