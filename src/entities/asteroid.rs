use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use tracing::debug;

use super::{Behavior, Body, EntityKind};
use crate::context::GameContext;
use crate::surface::{Color, Surface};
use crate::vector::Vector2;

const MIN_SPEED: f64 = 0.75;
const MAX_SPEED: f64 = 1.65;
const MIN_SPIN: f64 = 0.0075;
const MAX_SPIN: f64 = 0.0175;
const OUTLINE_POINTS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub fn radius(self) -> f64 {
        match self {
            AsteroidSize::Small => 15.0,
            AsteroidSize::Medium => 25.0,
            AsteroidSize::Large => 40.0,
        }
    }

    /// Smaller rocks are harder to hit, so they are worth more.
    pub fn kill_score(self) -> u32 {
        match self {
            AsteroidSize::Small => 100,
            AsteroidSize::Medium => 50,
            AsteroidSize::Large => 20,
        }
    }

    /// Size of the fragments left behind, if any.
    pub fn split(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    body: Body,
    size: AsteroidSize,
    spin: f64,
    outline: Vec<Vector2>,
}

impl Asteroid {
    pub fn new(position: Vector2, size: AsteroidSize, rng: &mut dyn RngCore) -> Self {
        let heading = rng.gen::<f64>() * TAU;
        let speed = MIN_SPEED + rng.gen::<f64>() * (MAX_SPEED - MIN_SPEED);
        let mut spin = MIN_SPIN + rng.gen::<f64>() * (MAX_SPIN - MIN_SPIN);
        if rng.gen_bool(0.5) {
            spin = -spin;
        }

        let radius = size.radius();
        let outline = (0..OUTLINE_POINTS)
            .map(|i| {
                let jag = 0.75 + 0.25 * rng.gen::<f64>();
                Vector2::from_angle(i as f64 * TAU / OUTLINE_POINTS as f64).scale(radius * jag)
            })
            .collect();

        Self {
            body: Body::new(
                position,
                Vector2::from_angle(heading).scale(speed),
                radius,
                size.kill_score(),
            ),
            size,
            spin,
            outline,
        }
    }

    /// A large asteroid drifting in from a random world edge.
    pub fn spawn(rng: &mut dyn RngCore, world_size: f64) -> Self {
        let along = rng.gen::<f64>() * world_size;
        let position = match rng.gen_range(0..4) {
            0 => Vector2::new(along, 0.0),
            1 => Vector2::new(world_size, along),
            2 => Vector2::new(along, world_size),
            _ => Vector2::new(0.0, along),
        };
        Self::new(position, AsteroidSize::Large, rng)
    }

    pub fn size(&self) -> AsteroidSize {
        self.size
    }

    fn break_apart(&mut self, ctx: &mut GameContext<'_>) {
        self.body.flag_for_removal();
        if let Some(smaller) = self.size.split() {
            for _ in 0..2 {
                let fragment = Asteroid::new(self.body.position, smaller, ctx.rng());
                ctx.register_entity(fragment);
            }
        }
        debug!(size = ?self.size, x = self.body.position.x, y = self.body.position.y, "asteroid destroyed");
    }
}

impl Behavior for Asteroid {
    fn kind(&self) -> EntityKind {
        EntityKind::Asteroid
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        self.body.step(ctx.world_size());
        self.body.rotate(self.spin);
    }

    fn handle_collision(&mut self, ctx: &mut GameContext<'_>, other: EntityKind) {
        if self.body.is_flagged() {
            return;
        }
        match other {
            EntityKind::Bullet => {
                ctx.add_score(self.body.kill_score());
                self.break_apart(ctx);
            }
            // Aliens don't score, but their shots still break rock.
            EntityKind::AlienBullet => self.break_apart(ctx),
            EntityKind::Player | EntityKind::Asteroid | EntityKind::AlienShip => {}
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_color(Color::Grey);
        for (i, from) in self.outline.iter().enumerate() {
            let to = self.outline[(i + 1) % self.outline.len()];
            surface.draw_line(from.x, from.y, to.x, to.y);
        }
    }
}
