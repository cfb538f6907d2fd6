use std::f64::consts::PI;

use super::{Behavior, Body, EntityKind};
use crate::context::GameContext;
use crate::surface::{Color, Surface};
use crate::vector::Vector2;

/// Slower than the player's bullets.
pub const SPEED: f64 = 5.0;
pub const COLLISION_RADIUS: f64 = 3.0;
/// Lives a little longer than a player bullet.
pub const MAX_LIFESPAN: i32 = 80;
const SPIN: f64 = 2.0 * PI / 60.0;

/// Projectile fired by an alien ship.
#[derive(Clone, Debug, PartialEq)]
pub struct AlienBullet {
    body: Body,
    lifespan: i32,
}

impl AlienBullet {
    /// Fire from `origin` along `angle`. Only the origin is copied; the bullet
    /// keeps no link to whoever fired it.
    pub fn new(origin: Vector2, angle: f64) -> Self {
        Self {
            body: Body::new(origin, Vector2::from_angle(angle).scale(SPEED), COLLISION_RADIUS, 0),
            lifespan: MAX_LIFESPAN,
        }
    }

    /// Frames left before the bullet expires.
    pub fn lifespan(&self) -> i32 {
        self.lifespan
    }

    /// Direction of travel.
    pub fn heading(&self) -> f64 {
        self.body.velocity.angle()
    }
}

impl Behavior for AlienBullet {
    fn kind(&self) -> EntityKind {
        EntityKind::AlienBullet
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        self.body.step(ctx.world_size());
        self.body.rotate(SPIN);

        self.lifespan -= 1;
        if self.lifespan <= 0 {
            self.body.flag_for_removal();
        }
    }

    fn handle_collision(&mut self, _ctx: &mut GameContext<'_>, other: EntityKind) {
        match other {
            // The player and the asteroid each resolve their own side.
            EntityKind::Player | EntityKind::Asteroid => self.body.flag_for_removal(),
            // Alien fire passes through its own faction and player bullets.
            EntityKind::AlienShip | EntityKind::AlienBullet | EntityKind::Bullet => {}
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_color(Color::Red);
        surface.fill_oval(-2.0, -2.0, 4.0, 4.0);
    }
}
