use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform random priorities for treap nodes.
///
/// Each tree owns one source, so a tree built with an explicit seed has a
/// fully reproducible shape. Priorities span the whole `i64` range; with 64
/// bits of priority, collisions between siblings are astronomically
/// unlikely and the tie-break in `merge` is unobservable in practice.
pub(crate) struct PrioritySource {
    rng: SmallRng,
}

impl PrioritySource {
    /// Creates a source with a fresh, per-tree seed.
    pub(crate) fn new() -> Self {
        Self { rng: default_rng() }
    }

    /// Creates a source with a fixed seed, for reproducible tree shapes.
    pub(crate) fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws the next priority, uniform over the full `i64` range.
    #[inline]
    pub(crate) fn next_priority(&mut self) -> i64 {
        self.rng.r#gen()
    }
}

#[cfg(feature = "std")]
fn default_rng() -> SmallRng {
    SmallRng::from_entropy()
}

// Without `std` there is no entropy source; each tree instead draws its
// seed from a process-wide SplitMix64 sequence. Seeds stay distinct per
// tree, which is all the balance argument needs for non-adversarial input.
#[cfg(not(feature = "std"))]
fn default_rng() -> SmallRng {
    use core::sync::atomic::{AtomicU64, Ordering};

    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let mut z = SEQUENCE.fetch_add(1, Ordering::Relaxed).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    SmallRng::seed_from_u64(z ^ (z >> 31))
}
