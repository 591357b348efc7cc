//! Deterministic hashing. The hashing data structures in the standard library are randomly
//! seeded per process, which would make anything derived from them (iteration order, rng seeds)
//! irreproducible. We use `rustc_hash`'s Fx hasher instead.
//!
//! `HashMap<K, V, S>` does not have a `new` method for a non-default hasher. Use
//! `HashMap::default()` instead.
//!
//! `hash_str` and `hash_seed` are used in `crate::random` to derive per-stream seeds.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

/// A convenience method to compute the hash of a `&str`.
pub fn hash_str(data: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_bytes());
    hasher.finish()
}

/// Mixes a base seed with a sequence of keys (place, day, disease, ...) into a single seed.
pub fn hash_seed(base_seed: u64, keys: &[u64]) -> u64 {
    let mut hasher = FxHasher::default();
    base_seed.hash(&mut hasher);
    keys.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_strings() {
        assert_eq!(hash_str("HostInfectionRng"), hash_str("HostInfectionRng"));
        assert_ne!(hash_str("HostInfectionRng"), hash_str("SeedingRng"));
    }

    #[test]
    fn seed_depends_on_every_key() {
        let seed = hash_seed(42, &[3, 10, 0]);
        assert_eq!(seed, hash_seed(42, &[3, 10, 0]));
        assert_ne!(seed, hash_seed(43, &[3, 10, 0]));
        assert_ne!(seed, hash_seed(42, &[3, 11, 0]));
        assert_ne!(seed, hash_seed(42, &[3, 10, 1]));
        assert_ne!(seed, hash_seed(42, &[10, 3, 0]));
    }
}
