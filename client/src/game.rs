//! Client-side game state: the local player and its single bullet

use crate::input::InputFrame;
use shared::{Bullet, CharacterType, PlayerState};

pub struct LocalGame {
    pub player: PlayerState,
    pub bullet: Bullet,
}

impl LocalGame {
    pub fn new(character: CharacterType) -> Self {
        Self {
            player: PlayerState::new(character),
            bullet: Bullet::new(),
        }
    }

    /// Applies one input frame. Returns true if a bullet was actually
    /// fired this frame (firing is ignored while one is in flight).
    pub fn apply_frame(&mut self, frame: &InputFrame) -> bool {
        self.player.apply_movement(frame.dx, frame.dy);

        if frame.fire && !self.bullet.active {
            let angle = self.player.aim_at(frame.aim_x, frame.aim_y);
            self.bullet.fire(&self.player, angle);
            return true;
        }
        false
    }

    /// Advances local bullet physics by one tick.
    pub fn tick(&mut self) {
        self.bullet.update();
    }
}
