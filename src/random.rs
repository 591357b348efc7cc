use crate::{
    context::{Context, DataPlugin},
    hashing::{hash_seed, hash_str},
    trace,
};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use std::any::Any;

/// Identifies an independent random number stream. Declare one with `define_rng!`.
pub trait RngId: Any {
    #![allow(non_upper_case_globals)]
    const name: &'static str;
    type RngType: SeedableRng + Rng + 'static;
}

/// The random draws the transmission models need: a uniform value in `[0, 1)` and an unbiased
/// permutation. Every `rand::Rng` provides them; tests substitute scripted fakes.
pub trait RandomService {
    /// A uniform draw in `[0, 1)`.
    fn draw_uniform(&mut self) -> f64;

    /// A uniformly random permutation of `0..n` (Fisher-Yates).
    fn shuffle_indices(&mut self, n: usize) -> Vec<usize>;
}

impl<R: Rng> RandomService for R {
    fn draw_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn shuffle_indices(&mut self, n: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(self);
        indices
    }
}

struct RngPlugin {
    base_seed: u64,
}

impl DataPlugin for RngPlugin {
    const new: &'static dyn Fn() -> Self = &|| RngPlugin { base_seed: 0 };
}

pub trait ContextRandomExt {
    /// Sets the base seed every substream is derived from.
    fn init_random(&mut self, base_seed: u64);

    fn get_base_random_seed(&self) -> u64;

    /// Creates a fresh rng for `R` whose seed depends only on the base seed, `R`'s name and
    /// `keys`. Streams keyed by (place, day, disease) are independent of one another and of the
    /// order in which places are processed, so a run replays exactly under a fixed base seed.
    fn substream<R: RngId>(&self, keys: &[u64]) -> R::RngType;
}

impl ContextRandomExt for Context {
    fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random module (seed={base_seed})");
        self.get_data_container_mut::<RngPlugin>().base_seed = base_seed;
    }

    fn get_base_random_seed(&self) -> u64 {
        self.get_data_container::<RngPlugin>()
            .map_or(0, |plugin| plugin.base_seed)
    }

    fn substream<R: RngId>(&self, keys: &[u64]) -> R::RngType {
        let base_seed = self.get_base_random_seed().wrapping_add(hash_str(R::name));
        R::RngType::seed_from_u64(hash_seed(base_seed, keys))
    }
}

#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        $crate::define_rng!($random_id, $crate::rand::rngs::StdRng);
    };
    ($random_id:ident, $rng_type:ty) => {
        pub struct $random_id;

        impl $crate::random::RngId for $random_id {
            #![allow(non_upper_case_globals)]
            const name: &'static str = stringify!($random_id);
            type RngType = $rng_type;
        }
    };
}
pub use define_rng;
