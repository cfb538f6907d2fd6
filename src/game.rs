//! The frame loop: update every entity, resolve collisions, apply what the
//! entities asked for, purge the dead, then move the level along.
//!
//! All randomness comes through the `rng` handed to [`Game::new`] and
//! [`Game::tick`], so a seeded RNG replays a game exactly.

use rand::{Rng, RngCore};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::context::GameContext;
use crate::entities::{AlienShip, Asteroid, Behavior, Entity, EntityKind, Player};
use crate::surface::{Surface, Transform};

/// Frames the player stays down after dying.
pub const DEATH_COOLDOWN: u32 = 200;
/// Death-cooldown value at which the player reappears. Until the cooldown
/// reaches zero afterwards the player cannot be killed.
pub const RESPAWN_COOLDOWN: u32 = 100;
/// Frames between clearing the last asteroid and the next level.
pub const LEVEL_RESET_FRAMES: u32 = 120;
/// First level that opens with an alien ship on the board.
pub const FIRST_ALIEN_LEVEL: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

pub struct Game {
    config: GameConfig,
    player: Player,
    entities: Vec<Entity>,
    /// Registered this frame; joins `entities` at the start of the next.
    pending: Vec<Entity>,
    score: u32,
    lives: u32,
    level: u32,
    status: GameStatus,
    frame: u64,
    death_cooldown: u32,
    level_reset_timer: u32,
    alien_spawn_timer: u32,
}

impl Game {
    /// A fresh game on level 1.
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let asteroids = (0..asteroids_for_level(1))
            .map(|_| Entity::from(Asteroid::spawn(rng, config.world_size)))
            .collect();
        let game = Self::from_parts(config, asteroids);
        info!(level = game.level, lives = game.lives, "game started");
        game
    }

    /// A level-1 game whose live set is exactly `entities`.
    pub fn from_parts(config: GameConfig, entities: Vec<Entity>) -> Self {
        let player = Player::new(config.world_center());
        let lives = config.starting_lives;
        Self {
            config,
            player,
            entities,
            pending: Vec::new(),
            score: 0,
            lives,
            level: 1,
            status: GameStatus::Playing,
            frame: 0,
            death_cooldown: 0,
            level_reset_timer: 0,
            alien_spawn_timer: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn pending(&self) -> &[Entity] {
        &self.pending
    }

    /// Live entities of `kind`, not counting ones still pending.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Player => usize::from(!self.is_player_dead()),
            _ => self.entities.iter().filter(|e| e.kind() == kind).count(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_player_dead(&self) -> bool {
        self.death_cooldown > RESPAWN_COOLDOWN
    }

    pub fn is_player_invulnerable(&self) -> bool {
        self.death_cooldown > 0 && !self.is_player_dead()
    }

    pub fn can_kill_player(&self) -> bool {
        self.status == GameStatus::Playing && self.death_cooldown == 0
    }

    // ── Hooks ────────────────────────────────────────────────────────────────

    pub fn register_entity(&mut self, entity: impl Into<Entity>) {
        self.pending.push(entity.into());
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn kill_player(&mut self) {
        if !self.can_kill_player() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        self.death_cooldown = DEATH_COOLDOWN;
        self.player.controls = Default::default();
        info!(lives = self.lives, frame = self.frame, "player killed");

        if self.lives == 0 {
            self.status = GameStatus::GameOver;
            info!(score = self.score, level = self.level, "game over");
        }
    }

    // ── Per-frame tick ───────────────────────────────────────────────────────

    /// Advance the simulation by one frame. Does nothing once the game is over.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.status == GameStatus::GameOver {
            return;
        }
        self.frame += 1;

        // ── 1. Admit last frame's registrations ──────────────────────────────
        self.entities.append(&mut self.pending);

        // ── 2. Death / respawn countdown ─────────────────────────────────────
        self.advance_respawn();

        // ── 3. Update ────────────────────────────────────────────────────────
        let player_bullets = self.count(EntityKind::Bullet);
        let mut ctx = GameContext::new(&mut *rng, self.config.world_size, self.player.body().position)
            .with_player_bullets(player_bullets);

        if !self.is_player_dead() {
            self.player.update(&mut ctx);
        }
        for entity in self.entities.iter_mut() {
            if !entity.body().is_flagged() {
                entity.update(&mut ctx);
            }
        }

        // ── 4. Collisions ────────────────────────────────────────────────────
        self.resolve_collisions(&mut ctx);

        // ── 5. Apply effects ─────────────────────────────────────────────────
        let effects = ctx.finish();
        self.pending.extend(effects.spawned);
        self.add_score(effects.score);
        if effects.player_killed {
            self.kill_player();
        }

        // ── 6. Purge ─────────────────────────────────────────────────────────
        self.entities.retain(|e| !e.body().is_flagged());

        // ── 7. Level flow ────────────────────────────────────────────────────
        if self.status == GameStatus::Playing {
            self.advance_level(rng);
            self.advance_alien_spawner(rng);
        }
    }

    fn advance_respawn(&mut self) {
        if self.death_cooldown == 0 {
            return;
        }
        self.death_cooldown -= 1;
        if self.death_cooldown == RESPAWN_COOLDOWN {
            self.player.reset(self.config.world_center());
            info!(frame = self.frame, "player respawned");
        }
    }

    fn resolve_collisions(&mut self, ctx: &mut GameContext<'_>) {
        if self.can_kill_player() {
            for entity in self.entities.iter_mut() {
                if entity.body().is_flagged() || !self.player.body().collides_with(entity.body()) {
                    continue;
                }
                self.player.handle_collision(ctx, entity.kind());
                entity.handle_collision(ctx, EntityKind::Player);
                if ctx.player_killed() {
                    break;
                }
            }
        }

        let len = self.entities.len();
        for j in 1..len {
            let (head, tail) = self.entities.split_at_mut(j);
            let b = &mut tail[0];
            for a in head.iter_mut() {
                if a.body().is_flagged() || b.body().is_flagged() {
                    continue;
                }
                if !a.body().collides_with(b.body()) {
                    continue;
                }
                let (kind_a, kind_b) = (a.kind(), b.kind());
                a.handle_collision(ctx, kind_b);
                b.handle_collision(ctx, kind_a);
            }
        }
    }

    fn asteroids_remaining(&self) -> bool {
        self.entities
            .iter()
            .chain(self.pending.iter())
            .any(|e| e.kind() == EntityKind::Asteroid)
    }

    fn advance_level(&mut self, rng: &mut dyn RngCore) {
        if self.asteroids_remaining() {
            self.level_reset_timer = 0;
            return;
        }
        self.level_reset_timer += 1;
        if self.level_reset_timer < LEVEL_RESET_FRAMES {
            return;
        }
        self.level_reset_timer = 0;
        self.level += 1;

        let world_size = self.config.world_size;
        for _ in 0..asteroids_for_level(self.level) {
            self.entities.push(Asteroid::spawn(rng, world_size).into());
        }
        if self.level >= FIRST_ALIEN_LEVEL && self.alien_ships() < self.config.max_alien_ships {
            self.entities.push(AlienShip::spawn(rng, world_size).into());
        }
        info!(level = self.level, "level started");
    }

    fn advance_alien_spawner(&mut self, rng: &mut dyn RngCore) {
        self.alien_spawn_timer += 1;
        if self.alien_spawn_timer < self.config.alien_spawn_interval {
            return;
        }
        self.alien_spawn_timer = 0;
        if self.alien_ships() >= self.config.max_alien_ships {
            return;
        }
        let ship = AlienShip::spawn(rng, self.config.world_size);
        debug!(x = ship.body().position.x, y = ship.body().position.y, "alien ship inbound");
        self.register_entity(ship);
    }

    fn alien_ships(&self) -> usize {
        self.entities
            .iter()
            .chain(self.pending.iter())
            .filter(|e| e.kind() == EntityKind::AlienShip)
            .count()
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Draw every live entity, each with the surface transformed to its
    /// position and heading.
    pub fn render(&self, surface: &mut dyn Surface) {
        for entity in &self.entities {
            let body = entity.body();
            surface.set_transform(Transform::new(body.position, body.rotation));
            entity.draw(surface);
        }

        if self.player_visible() {
            let body = self.player.body();
            surface.set_transform(Transform::new(body.position, body.rotation));
            self.player.draw(surface);
        }
        surface.set_transform(Transform::IDENTITY);
    }

    /// Hidden while dead; blinks while invulnerable after a respawn.
    fn player_visible(&self) -> bool {
        if self.status == GameStatus::GameOver || self.is_player_dead() {
            return false;
        }
        !self.is_player_invulnerable() || (self.frame / 5) % 2 == 0
    }
}

fn asteroids_for_level(level: u32) -> u32 {
    (level + 2).min(12)
}
