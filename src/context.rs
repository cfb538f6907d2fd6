//! The per-frame handle `Game` passes to every entity.
//!
//! Entities never touch the game directly while it iterates over them.
//! Instead they read the frame snapshot and queue effects here; `Game`
//! applies the effects once the update and collision passes are done.

use rand::RngCore;

use crate::entities::Entity;
use crate::vector::Vector2;

pub struct GameContext<'a> {
    rng: &'a mut dyn RngCore,
    world_size: f64,
    player_position: Vector2,
    player_bullets: usize,
    spawned: Vec<Entity>,
    score: u32,
    player_killed: bool,
}

/// Everything a frame asked the game to do.
#[derive(Debug, Default)]
pub struct FrameEffects {
    pub spawned: Vec<Entity>,
    pub score: u32,
    pub player_killed: bool,
}

impl<'a> GameContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, world_size: f64, player_position: Vector2) -> Self {
        Self {
            rng,
            world_size,
            player_position,
            player_bullets: 0,
            spawned: Vec::new(),
            score: 0,
            player_killed: false,
        }
    }

    pub fn with_player_bullets(mut self, count: usize) -> Self {
        self.player_bullets = count;
        self
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn world_size(&self) -> f64 {
        self.world_size
    }

    /// Player position as it was before this frame's updates.
    pub fn player_position(&self) -> Vector2 {
        self.player_position
    }

    /// Live player bullets, including ones fired earlier this frame.
    pub fn player_bullets(&self) -> usize {
        self.player_bullets
    }

    /// Queue an entity; it joins the live set at the start of the next frame.
    pub fn register_entity(&mut self, entity: impl Into<Entity>) {
        let entity = entity.into();
        if matches!(entity, Entity::Bullet(_)) {
            self.player_bullets += 1;
        }
        self.spawned.push(entity);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn kill_player(&mut self) {
        self.player_killed = true;
    }

    pub fn spawned(&self) -> &[Entity] {
        &self.spawned
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player_killed(&self) -> bool {
        self.player_killed
    }

    pub fn finish(self) -> FrameEffects {
        FrameEffects {
            spawned: self.spawned,
            score: self.score,
            player_killed: self.player_killed,
        }
    }
}
