use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use super::{Behavior, Body, Bullet, EntityKind};
use crate::context::GameContext;
use crate::surface::{Color, Surface};
use crate::vector::Vector2;

/// Facing up the screen.
pub const DEFAULT_ROTATION: f64 = -FRAC_PI_2;
pub const COLLISION_RADIUS: f64 = 10.0;
const ROTATION_SPEED: f64 = 0.052;
const THRUST: f64 = 0.0385;
const MAX_SPEED: f64 = 6.5;
const DRAG: f64 = 0.995;

pub const MAX_BULLETS: usize = 4;
/// Frames between two shots.
pub const FIRE_RATE: u32 = 4;
pub const MAX_CONSECUTIVE_SHOTS: u32 = 8;
/// Frames the gun is locked after a full burst.
pub const OVERHEAT_FRAMES: u32 = 30;

/// What the pilot is asking for this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerControls {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub firing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    body: Body,
    pub controls: PlayerControls,
    fire_cooldown: u32,
    overheat_cooldown: u32,
    consecutive_shots: u32,
}

impl Player {
    pub fn new(position: Vector2) -> Self {
        let mut body = Body::new(position, Vector2::ZERO, COLLISION_RADIUS, 0);
        body.rotation = DEFAULT_ROTATION;
        Self {
            body,
            controls: PlayerControls::default(),
            fire_cooldown: 0,
            overheat_cooldown: 0,
            consecutive_shots: 0,
        }
    }

    /// Back to a standstill at `position`, facing up, gun cooled.
    pub fn reset(&mut self, position: Vector2) {
        self.body.position = position;
        self.body.velocity = Vector2::ZERO;
        self.body.rotation = DEFAULT_ROTATION;
        self.fire_cooldown = 0;
        self.overheat_cooldown = 0;
        self.consecutive_shots = 0;
    }

    pub fn is_overheated(&self) -> bool {
        self.overheat_cooldown > 0
    }

    fn steer(&mut self) {
        if self.controls.rotate_left && !self.controls.rotate_right {
            self.body.rotate(-ROTATION_SPEED);
        } else if self.controls.rotate_right && !self.controls.rotate_left {
            self.body.rotate(ROTATION_SPEED);
        }

        if self.controls.thrust {
            self.body.velocity += Vector2::from_angle(self.body.rotation).scale(THRUST);
            let speed = self.body.velocity.length();
            if speed > MAX_SPEED {
                self.body.velocity = self.body.velocity.scale(MAX_SPEED / speed);
            }
        } else if self.body.velocity != Vector2::ZERO {
            self.body.velocity = self.body.velocity.scale(DRAG);
        }
    }

    fn fire(&mut self, ctx: &mut GameContext<'_>) {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.overheat_cooldown = self.overheat_cooldown.saturating_sub(1);

        if !self.controls.firing {
            self.consecutive_shots = self.consecutive_shots.saturating_sub(1);
            return;
        }
        if self.fire_cooldown > 0 || self.overheat_cooldown > 0 || ctx.player_bullets() >= MAX_BULLETS {
            return;
        }

        ctx.register_entity(Bullet::new(self.body.position, self.body.rotation));
        self.fire_cooldown = FIRE_RATE;
        self.consecutive_shots += 1;
        if self.consecutive_shots >= MAX_CONSECUTIVE_SHOTS {
            self.consecutive_shots = 0;
            self.overheat_cooldown = OVERHEAT_FRAMES;
            debug!("player gun overheated");
        }
    }
}

impl Behavior for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        self.steer();
        self.body.step(ctx.world_size());
        self.fire(ctx);
    }

    fn handle_collision(&mut self, ctx: &mut GameContext<'_>, other: EntityKind) {
        match other {
            EntityKind::Asteroid | EntityKind::AlienBullet => ctx.kill_player(),
            // The saucer reports ramming from its own side.
            EntityKind::AlienShip | EntityKind::Bullet | EntityKind::Player => {}
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_color(Color::White);
        surface.draw_line(-10.0, -8.0, 10.0, 0.0);
        surface.draw_line(10.0, 0.0, -10.0, 8.0);
        surface.draw_line(-6.0, -6.0, -6.0, 6.0);

        if self.controls.thrust {
            surface.set_color(Color::Orange);
            surface.draw_line(-6.0, -3.0, -12.0, 0.0);
            surface.draw_line(-12.0, 0.0, -6.0, 3.0);
        }
    }
}
