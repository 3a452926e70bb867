//! Player and bullet state shared between client and server
//!
//! Rendering and input capture live outside this crate; this is only the
//! data model and the bullet integration step.

use crate::protocol::Message;

pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 600;
pub const PLAYER_SIZE: i32 = 50;
pub const BULLET_SIZE: i32 = 20;
pub const BULLET_SPEED: f64 = 10.0;
pub const MOVE_STEP: i32 = 5;
pub const SPAWN_X: i32 = 100;
pub const SPAWN_Y: i32 = 100;

/// The selectable character sprites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterType {
    Ghost,
    Zombie,
    Pumpkin,
    Witch,
}

impl CharacterType {
    /// Maps a CLI name to a character; unknown names fall back to Ghost.
    pub fn from_name(name: &str) -> Self {
        match name {
            "zombie" => CharacterType::Zombie,
            "pumpkin" => CharacterType::Pumpkin,
            "witch" => CharacterType::Witch,
            _ => CharacterType::Ghost,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterType::Ghost => "ghost",
            CharacterType::Zombie => "zombie",
            CharacterType::Pumpkin => "pumpkin",
            CharacterType::Witch => "witch",
        }
    }
}

/// One player's transient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub x: i32,
    pub y: i32,
    pub shots_received: u32,
    pub character: CharacterType,
}

impl PlayerState {
    pub fn new(character: CharacterType) -> Self {
        Self {
            x: SPAWN_X,
            y: SPAWN_Y,
            shots_received: 0,
            character,
        }
    }

    /// Center of the player's sprite box.
    pub fn center(&self) -> (i32, i32) {
        (self.x + PLAYER_SIZE / 2, self.y + PLAYER_SIZE / 2)
    }

    /// Moves the player by whole steps of [`MOVE_STEP`] pixels per axis.
    pub fn apply_movement(&mut self, dx: i32, dy: i32) {
        self.x += dx * MOVE_STEP;
        self.y += dy * MOVE_STEP;
    }

    /// Aim angle in radians from the player's center to a target point.
    pub fn aim_at(&self, target_x: i32, target_y: i32) -> f64 {
        let (cx, cy) = self.center();
        ((target_y - cy) as f64).atan2((target_x - cx) as f64)
    }

    pub fn record_hit(&mut self) {
        self.shots_received += 1;
    }

    /// The wire message carrying this player's current state.
    pub fn position_message(&self) -> Message {
        Message::Position {
            x: self.x,
            y: self.y,
            shots_received: self.shots_received,
        }
    }
}

/// A single projectile. Each player owns exactly one; firing while it is
/// still in flight is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub active: bool,
}

impl Bullet {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            active: false,
        }
    }

    /// Spawns the bullet at the shooter's center, aimed at `angle`.
    /// Does nothing while the bullet is already in flight.
    pub fn fire(&mut self, shooter: &PlayerState, angle: f64) {
        if self.active {
            return;
        }
        let (cx, cy) = shooter.center();
        self.x = cx as f64;
        self.y = cy as f64;
        self.angle = angle;
        self.active = true;
    }

    /// Advances the bullet one step along its angle and deactivates it
    /// once it leaves the window.
    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.x += BULLET_SPEED * self.angle.cos();
        self.y += BULLET_SPEED * self.angle.sin();

        if self.x < 0.0
            || self.x > WINDOW_WIDTH as f64
            || self.y < 0.0
            || self.y > WINDOW_HEIGHT as f64
        {
            self.active = false;
        }
    }
}

impl Default for Bullet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_character_from_name() {
        assert_eq!(CharacterType::from_name("zombie"), CharacterType::Zombie);
        assert_eq!(CharacterType::from_name("pumpkin"), CharacterType::Pumpkin);
        assert_eq!(CharacterType::from_name("witch"), CharacterType::Witch);
        assert_eq!(CharacterType::from_name("ghost"), CharacterType::Ghost);
        // Unknown names fall back to Ghost
        assert_eq!(CharacterType::from_name("vampire"), CharacterType::Ghost);
    }

    #[test]
    fn test_player_spawns_at_origin_position() {
        let player = PlayerState::new(CharacterType::Witch);
        assert_eq!(player.x, SPAWN_X);
        assert_eq!(player.y, SPAWN_Y);
        assert_eq!(player.shots_received, 0);
    }

    #[test]
    fn test_player_movement_steps() {
        let mut player = PlayerState::new(CharacterType::Ghost);
        player.apply_movement(1, -1);
        assert_eq!(player.x, SPAWN_X + MOVE_STEP);
        assert_eq!(player.y, SPAWN_Y - MOVE_STEP);
    }

    #[test]
    fn test_player_center() {
        let player = PlayerState::new(CharacterType::Ghost);
        let (cx, cy) = player.center();
        assert_eq!(cx, SPAWN_X + PLAYER_SIZE / 2);
        assert_eq!(cy, SPAWN_Y + PLAYER_SIZE / 2);
    }

    #[test]
    fn test_aim_angle() {
        let player = PlayerState::new(CharacterType::Ghost);
        let (cx, cy) = player.center();

        // Straight right
        assert_approx_eq!(player.aim_at(cx + 100, cy), 0.0, 1e-9);
        // Straight down (screen coordinates grow downward)
        assert_approx_eq!(player.aim_at(cx, cy + 100), std::f64::consts::FRAC_PI_2, 1e-9);
    }

    #[test]
    fn test_position_message_reflects_state() {
        let mut player = PlayerState::new(CharacterType::Zombie);
        player.apply_movement(2, 3);
        player.record_hit();

        match player.position_message() {
            Message::Position {
                x,
                y,
                shots_received,
            } => {
                assert_eq!(x, player.x);
                assert_eq!(y, player.y);
                assert_eq!(shots_received, 1);
            }
            _ => panic!("expected a position update"),
        }
    }

    #[test]
    fn test_bullet_fires_from_shooter_center() {
        let player = PlayerState::new(CharacterType::Ghost);
        let mut bullet = Bullet::new();
        bullet.fire(&player, 0.0);

        let (cx, cy) = player.center();
        assert!(bullet.active);
        assert_approx_eq!(bullet.x, cx as f64, 1e-9);
        assert_approx_eq!(bullet.y, cy as f64, 1e-9);
    }

    #[test]
    fn test_bullet_travels_along_angle() {
        let player = PlayerState::new(CharacterType::Ghost);
        let mut bullet = Bullet::new();
        bullet.fire(&player, 0.0);

        let start_x = bullet.x;
        bullet.update();
        assert_approx_eq!(bullet.x, start_x + BULLET_SPEED, 1e-9);
        assert_approx_eq!(bullet.y, (player.center().1) as f64, 1e-9);
    }

    #[test]
    fn test_bullet_deactivates_offscreen() {
        let player = PlayerState::new(CharacterType::Ghost);
        let mut bullet = Bullet::new();
        // Aim straight left toward the near window edge
        bullet.fire(&player, std::f64::consts::PI);

        let mut steps = 0;
        while bullet.active {
            bullet.update();
            steps += 1;
            assert!(steps < 1000, "bullet never left the window");
        }
        assert!(!bullet.active);
    }

    #[test]
    fn test_inactive_bullet_does_not_move() {
        let mut bullet = Bullet::new();
        bullet.update();
        assert_approx_eq!(bullet.x, 0.0, 1e-9);
        assert_approx_eq!(bullet.y, 0.0, 1e-9);
    }

    #[test]
    fn test_fire_while_in_flight_is_ignored() {
        let player = PlayerState::new(CharacterType::Ghost);
        let mut bullet = Bullet::new();
        bullet.fire(&player, 0.0);
        bullet.update();

        let (x, y) = (bullet.x, bullet.y);
        bullet.fire(&player, 1.0);
        assert_approx_eq!(bullet.x, x, 1e-9);
        assert_approx_eq!(bullet.y, y, 1e-9);
        assert_approx_eq!(bullet.angle, 0.0, 1e-9);
    }
}
