/*
 * Random Number Module
 *
 * Randomness only enters the simulation at spawn time. Everything that
 * spawns boids takes an explicit generator, and these helpers build one
 * that is reproducible when a seed is given.
 */

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

// Deterministic generator for a fixed seed
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

// Seeded when a seed is supplied, otherwise drawn from OS entropy
pub fn rng_from_option(seed: Option<u64>) -> ChaCha12Rng {
    match seed {
        Some(seed) => create_rng(seed),
        None => ChaCha12Rng::from_entropy(),
    }
}
