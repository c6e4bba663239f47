// ============================================================
// Layer 4: Train/Validation Splitter
// ============================================================
// Shuffles example start indices and splits them into a
// training set and a validation set for export.
//
// The shuffle is seeded so the same corpus, stride and seed
// always produce the same two files. Each half is sorted
// again afterwards so exported files read in corpus order.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` with a seeded RNG and split into (train, validation).
///
/// `train_fraction` is clamped to `[0, 1]`; the split point is rounded.
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total    = samples.len();
    let fraction = train_fraction.clamp(0.0, 1.0);
    let split_at = ((total as f64) * fraction).round() as usize;
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len()
    );

    (samples, val)
}

/// Every `stride`-th start index of a corpus of `len` lines, split
/// into sorted (train, validation) index lists.
pub fn split_indices(
    len:          usize,
    stride:       usize,
    val_fraction: f64,
    seed:         u64,
) -> (Vec<usize>, Vec<usize>) {
    let indices: Vec<usize> = (0..len).step_by(stride.max(1)).collect();
    let (mut train, mut val) = split_train_val(indices, 1.0 - val_fraction, seed);
    train.sort_unstable();
    val.sort_unstable();
    (train, val)
}
