//! All simulated objects and the contract they share with `Game`.

mod alien_bullet;
mod alien_ship;
mod asteroid;
mod bullet;
mod player;

pub use alien_bullet::AlienBullet;
pub use alien_ship::AlienShip;
pub use asteroid::{Asteroid, AsteroidSize};
pub use bullet::Bullet;
pub use player::{Player, PlayerControls};

use crate::context::GameContext;
use crate::surface::Surface;
use crate::vector::Vector2;

// ── Kinds ────────────────────────────────────────────────────────────────────

/// Closed set of entity kinds. Collision handlers match on this without a
/// wildcard arm, so a new kind forces every handler to decide what it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Bullet,
    AlienBullet,
    Asteroid,
    AlienShip,
}

// ── Shared state ─────────────────────────────────────────────────────────────

/// State every entity carries.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vector2,
    pub velocity: Vector2,
    /// Visual heading in radians.
    pub rotation: f64,
    radius: f64,
    kill_score: u32,
    needs_removal: bool,
}

impl Body {
    pub fn new(position: Vector2, velocity: Vector2, radius: f64, kill_score: u32) -> Self {
        Self {
            position,
            velocity,
            rotation: 0.0,
            radius,
            kill_score,
            needs_removal: false,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn kill_score(&self) -> u32 {
        self.kill_score
    }

    pub fn is_flagged(&self) -> bool {
        self.needs_removal
    }

    /// One-way: a flagged entity is purged at the end of the frame.
    pub fn flag_for_removal(&mut self) {
        self.needs_removal = true;
    }

    pub fn rotate(&mut self, amount: f64) {
        self.rotation += amount;
    }

    /// Move by one frame of velocity, wrapping at the world edges.
    pub fn step(&mut self, world_size: f64) {
        self.position += self.velocity;
        self.position.wrap(world_size);
    }

    pub fn collides_with(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        self.position.distance_squared(&other.position) < reach * reach
    }
}

// ── Behaviour ────────────────────────────────────────────────────────────────

pub trait Behavior {
    fn kind(&self) -> EntityKind;
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        let world_size = ctx.world_size();
        self.body_mut().step(world_size);
    }

    /// React to touching an entity of kind `other`. Pairs that mean nothing
    /// to this entity are silently ignored.
    fn handle_collision(&mut self, ctx: &mut GameContext<'_>, other: EntityKind);

    /// Draw in local coordinates; the surface transform is already set.
    fn draw(&self, surface: &mut dyn Surface);
}

// ── Live-set entities ────────────────────────────────────────────────────────

/// Every entity `Game` keeps in its live list. The player is owned by `Game`
/// directly and only appears here as `EntityKind::Player`.
#[derive(Clone, Debug)]
pub enum Entity {
    Bullet(Bullet),
    AlienBullet(AlienBullet),
    Asteroid(Asteroid),
    AlienShip(AlienShip),
}

impl Entity {
    fn behavior(&self) -> &dyn Behavior {
        match self {
            Entity::Bullet(b) => b,
            Entity::AlienBullet(b) => b,
            Entity::Asteroid(a) => a,
            Entity::AlienShip(s) => s,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn Behavior {
        match self {
            Entity::Bullet(b) => b,
            Entity::AlienBullet(b) => b,
            Entity::Asteroid(a) => a,
            Entity::AlienShip(s) => s,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.behavior().kind()
    }

    pub fn body(&self) -> &Body {
        self.behavior().body()
    }

    pub fn body_mut(&mut self) -> &mut Body {
        self.behavior_mut().body_mut()
    }

    pub fn update(&mut self, ctx: &mut GameContext<'_>) {
        self.behavior_mut().update(ctx);
    }

    pub fn handle_collision(&mut self, ctx: &mut GameContext<'_>, other: EntityKind) {
        self.behavior_mut().handle_collision(ctx, other);
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.behavior().draw(surface);
    }

    pub fn flag_for_removal(&mut self) {
        self.body_mut().flag_for_removal();
    }
}

impl From<Bullet> for Entity {
    fn from(bullet: Bullet) -> Self {
        Entity::Bullet(bullet)
    }
}

impl From<AlienBullet> for Entity {
    fn from(bullet: AlienBullet) -> Self {
        Entity::AlienBullet(bullet)
    }
}

impl From<Asteroid> for Entity {
    fn from(asteroid: Asteroid) -> Self {
        Entity::Asteroid(asteroid)
    }
}

impl From<AlienShip> for Entity {
    fn from(ship: AlienShip) -> Self {
        Entity::AlienShip(ship)
    }
}
