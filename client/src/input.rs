//! Scripted input generation for the headless demo client
//!
//! The original demo polled SDL for keyboard and mouse state; input
//! capture stays an external collaborator here, so the demo client
//! drives itself with a scripted wanderer: it walks in a direction for a
//! while, turns, and occasionally fires at a random point in the window.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::game::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// One tick's worth of input: a movement direction per axis (-1, 0 or 1),
/// and optionally a fire action aimed at a window coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFrame {
    pub dx: i32,
    pub dy: i32,
    pub fire: bool,
    pub aim_x: i32,
    pub aim_y: i32,
}

pub struct ScriptedInput {
    rng: StdRng,
    dx: i32,
    dy: i32,
    ticks_until_turn: u32,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            dx: 1,
            dy: 0,
            ticks_until_turn: 0,
        }
    }

    /// Produces the next tick's input frame.
    pub fn next_frame(&mut self) -> InputFrame {
        if self.ticks_until_turn == 0 {
            self.dx = self.rng.gen_range(-1..=1);
            self.dy = self.rng.gen_range(-1..=1);
            self.ticks_until_turn = self.rng.gen_range(10..40);
        } else {
            self.ticks_until_turn -= 1;
        }

        let fire = self.rng.gen_ratio(1, 20);
        InputFrame {
            dx: self.dx,
            dy: self.dy,
            fire,
            aim_x: self.rng.gen_range(0..WINDOW_WIDTH),
            aim_y: self.rng.gen_range(0..WINDOW_HEIGHT),
        }
    }
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self::new()
    }
}
