//! RNG oracle for deterministic random number generation.
//!
//! Every random event in the game (to-hit rolls, damage dice, confused
//! stumbling) draws from a [`RollStream`] seeded by the session seed, the turn
//! number, the acting entity, and a [`RollPurpose`]. Given the same seed and
//! world state, two runs produce the same sequence of rolls.

use crate::state::EntityId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32(seed) % sides) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: the caller supplies the full state as the seed on every call,
/// which keeps all randomness a pure function of game state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Why a roll stream is being drawn. Keeps independent rolls for the same
/// actor and turn from sharing a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollPurpose {
    Attack = 0,
    Confusion = 1,
}

/// Compute deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at session start
/// * `turn` - Turn number the roll happens on
/// * `actor_id` - Entity performing the action
/// * `context` - Discriminates multiple independent streams in one action
pub fn compute_seed(game_seed: u64, turn: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style multipliers
    let mut hash = game_seed;

    hash ^= turn.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// A sequence of deterministic draws for one (turn, actor, purpose) tuple.
pub struct RollStream<'a> {
    rng: &'a dyn RngOracle,
    seed: u64,
    counter: u64,
}

impl<'a> RollStream<'a> {
    const STRIDE: u64 = 0x9e3779b97f4a7c15;

    /// Opens a stream from a raw seed.
    pub fn new(rng: &'a dyn RngOracle, seed: u64) -> Self {
        Self {
            rng,
            seed,
            counter: 0,
        }
    }

    /// Opens the stream used by `actor` for `purpose` on `turn`.
    pub fn for_action(
        rng: &'a dyn RngOracle,
        game_seed: u64,
        turn: u64,
        actor: EntityId,
        purpose: RollPurpose,
    ) -> Self {
        Self::new(rng, compute_seed(game_seed, turn, actor.0, purpose as u32))
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self
            .seed
            .wrapping_add(self.counter.wrapping_mul(Self::STRIDE));
        self.counter += 1;
        seed
    }

    /// Next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let seed = self.next_seed();
        self.rng.next_u32(seed)
    }

    /// Roll one die with `sides` faces (1..=sides).
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        let seed = self.next_seed();
        self.rng.roll_die(seed, sides)
    }

    /// Pick an index in `0..len`. Returns `None` for an empty range.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next_u32() as usize) % len)
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.counter
    }
}
