use super::{Behavior, Body, EntityKind};
use crate::context::GameContext;
use crate::surface::{Color, Surface};
use crate::vector::Vector2;

pub const SPEED: f64 = 6.75;
pub const COLLISION_RADIUS: f64 = 2.0;
pub const MAX_LIFESPAN: i32 = 60;

/// Projectile fired by the player.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    body: Body,
    lifespan: i32,
}

impl Bullet {
    pub fn new(origin: Vector2, angle: f64) -> Self {
        Self {
            body: Body::new(origin, Vector2::from_angle(angle).scale(SPEED), COLLISION_RADIUS, 0),
            lifespan: MAX_LIFESPAN,
        }
    }

    pub fn lifespan(&self) -> i32 {
        self.lifespan
    }
}

impl Behavior for Bullet {
    fn kind(&self) -> EntityKind {
        EntityKind::Bullet
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        self.body.step(ctx.world_size());

        self.lifespan -= 1;
        if self.lifespan <= 0 {
            self.body.flag_for_removal();
        }
    }

    fn handle_collision(&mut self, _ctx: &mut GameContext<'_>, other: EntityKind) {
        match other {
            EntityKind::Asteroid | EntityKind::AlienShip => self.body.flag_for_removal(),
            EntityKind::Player | EntityKind::Bullet | EntityKind::AlienBullet => {}
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_color(Color::White);
        surface.draw_oval(-1.0, -1.0, 2.0, 2.0);
    }
}
