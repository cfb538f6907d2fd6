//! The flying saucer: drifts, jumps to a new spot every few seconds, fires at
//! the player and takes three hits to bring down.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use tracing::{debug, info};

use super::{AlienBullet, Behavior, Body, EntityKind};
use crate::context::GameContext;
use crate::surface::{Color, Surface};
use crate::vector::Vector2;

pub const MAX_HITS: u32 = 3;
/// Frames between teleports (5 seconds at 60 FPS).
pub const CHANGE_INTERVAL: u32 = 300;
pub const MIN_SPEED: f64 = 1.0;
pub const MAX_SPEED: f64 = 2.5;
pub const COLLISION_RADIUS: f64 = 20.0;
pub const KILL_POINTS: u32 = 150;
/// Frames between shots (1.5 seconds at 60 FPS).
pub const FIRE_RATE: u32 = 90;
const SPIN: f64 = 0.03;
const TELEPORT_FLASH: u32 = 15;
const HIT_FLASH: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct AlienShip {
    body: Body,
    hits_received: u32,
    frame_counter: u32,
    fire_counter: u32,
    damage_flash: u32,
}

impl AlienShip {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self {
            body: Body::new(position, velocity, COLLISION_RADIUS, KILL_POINTS),
            hits_received: 0,
            frame_counter: 0,
            // Pre-seeded so the first shot leaves shortly after spawning.
            fire_counter: FIRE_RATE,
            damage_flash: 0,
        }
    }

    /// A ship entering from a uniformly chosen world edge.
    pub fn spawn(rng: &mut dyn RngCore, world_size: f64) -> Self {
        let along = rng.gen::<f64>() * world_size;
        let position = match rng.gen_range(0..4) {
            0 => Vector2::new(along, 0.0),        // top
            1 => Vector2::new(world_size, along), // right
            2 => Vector2::new(along, world_size), // bottom
            _ => Vector2::new(0.0, along),        // left
        };
        Self::new(position, random_velocity(rng))
    }

    pub fn hits_received(&self) -> u32 {
        self.hits_received
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn fire_counter(&self) -> u32 {
        self.fire_counter
    }

    pub fn damage_flash(&self) -> u32 {
        self.damage_flash
    }

    fn teleport(&mut self, rng: &mut dyn RngCore, world_size: f64) {
        self.body.velocity = random_velocity(rng);
        let x = rng.gen::<f64>() * world_size;
        let y = rng.gen::<f64>() * world_size;
        self.body.position.set(x, y);
        self.damage_flash = TELEPORT_FLASH;
        debug!(x, y, "alien ship teleported");
    }

    fn fire_at_player(&self, ctx: &mut GameContext<'_>) {
        let target = ctx.player_position();
        let dx = target.x - self.body.position.x;
        let dy = target.y - self.body.position.y;
        let bearing = dy.atan2(dx);

        ctx.register_entity(AlienBullet::new(self.body.position, bearing));
        debug!(bearing, "alien ship fired");
    }

    fn color(&self) -> Color {
        if self.damage_flash > 0 && self.damage_flash % 4 < 2 {
            return Color::White;
        }
        match self.hits_received {
            0 => Color::Green,
            1 => Color::Yellow,
            2 => Color::Red,
            _ => Color::White,
        }
    }
}

fn random_velocity(rng: &mut dyn RngCore) -> Vector2 {
    let heading = rng.gen::<f64>() * TAU;
    let speed = MIN_SPEED + rng.gen::<f64>() * (MAX_SPEED - MIN_SPEED);
    Vector2::from_angle(heading).scale(speed)
}

impl Behavior for AlienShip {
    fn kind(&self) -> EntityKind {
        EntityKind::AlienShip
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, ctx: &mut GameContext<'_>) {
        let world_size = ctx.world_size();
        self.body.step(world_size);
        self.body.rotate(SPIN);

        self.frame_counter += 1;
        if self.frame_counter >= CHANGE_INTERVAL {
            self.teleport(ctx.rng(), world_size);
            self.frame_counter = 0;
        }

        if self.damage_flash > 0 {
            self.damage_flash -= 1;
        }

        self.fire_counter += 1;
        if self.fire_counter >= FIRE_RATE {
            self.fire_at_player(ctx);
            self.fire_counter = 0;
        }
    }

    fn handle_collision(&mut self, ctx: &mut GameContext<'_>, other: EntityKind) {
        match other {
            // Only the player's bullets hurt; alien fire passes through.
            EntityKind::Bullet => {
                if self.hits_received >= MAX_HITS {
                    return;
                }
                self.hits_received += 1;
                self.damage_flash = HIT_FLASH;

                if self.hits_received >= MAX_HITS {
                    self.body.flag_for_removal();
                    ctx.add_score(self.body.kill_score());
                    info!(points = self.body.kill_score(), "alien ship destroyed");
                }
            }
            EntityKind::Player => ctx.kill_player(),
            EntityKind::AlienBullet | EntityKind::Asteroid | EntityKind::AlienShip => {}
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_color(self.color());

        // hull, dome, underside
        surface.draw_oval(-15.0, -5.0, 30.0, 10.0);
        surface.draw_arc(-10.0, -10.0, 20.0, 10.0, 0.0, 180.0);
        surface.draw_arc(-8.0, 0.0, 16.0, 8.0, 180.0, 180.0);

        surface.draw_line(-12.0, 0.0, -15.0, 3.0);
        surface.draw_line(12.0, 0.0, 15.0, 3.0);

        // one bar per remaining hit
        surface.set_color(Color::White);
        for i in 0..MAX_HITS.saturating_sub(self.hits_received) {
            surface.fill_rect(-10.0 + i as f64 * 8.0, -18.0, 6.0, 3.0);
        }
    }
}
