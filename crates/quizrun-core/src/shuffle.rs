//! Fisher–Yates shuffling of quiz records.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shuffle in place with a generator seeded from the wall clock.
///
/// Order differs run to run; there is no reproducibility guarantee.
pub fn shuffle<T>(items: &mut [T]) {
    let mut rng = StdRng::seed_from_u64(clock_seed());
    shuffle_with(items, &mut rng);
}

/// Shuffle in place using the forward Fisher–Yates walk: for each position
/// `i`, pick `c` uniformly in `[0, n - i)` and swap `i` with `i + c`.
pub fn shuffle_with<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let n = items.len();
    if n <= 1 {
        return;
    }
    for i in 0..n {
        let choice = rng.random_range(0..n - i);
        items.swap(i, i + choice);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| fold_nanos(d.as_nanos()))
        .unwrap_or_default()
}

/// Fold a 128-bit nanosecond count into a 64-bit seed, keeping the high bits.
fn fold_nanos(nanos: u128) -> u64 {
    (nanos as u64) ^ ((nanos >> 64) as u64)
}
