use asteroids::config::GameConfig;
use asteroids::entities::*;
use asteroids::game::*;
use asteroids::surface::{CommandLog, DrawCommand, Transform};
use asteroids::vector::Vector2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// No surprise alien ships unless a test asks for them.
fn quiet_config() -> GameConfig {
    GameConfig {
        max_alien_ships: 0,
        ..GameConfig::default()
    }
}

fn resting_ship_at(x: f64, y: f64) -> AlienShip {
    AlienShip::new(Vector2::new(x, y), Vector2::ZERO)
}

fn first_ship(game: &Game) -> Option<&AlienShip> {
    game.entities().iter().find_map(|e| match e {
        Entity::AlienShip(s) => Some(s),
        _ => None,
    })
}

fn first_alien_bullet(entities: &[Entity]) -> Option<&AlienBullet> {
    entities.iter().find_map(|e| match e {
        Entity::AlienBullet(b) => Some(b),
        _ => None,
    })
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_on_level_one() {
    let mut rng = seeded_rng();
    let game = Game::new(GameConfig::default(), &mut rng);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.score(), 0);
    assert_eq!(game.frame(), 0);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.count(EntityKind::Asteroid), 3);
    assert_eq!(game.count(EntityKind::Player), 1);
    assert_eq!(game.player().body().position, Vector2::new(275.0, 275.0));
}

#[test]
fn tick_increments_frame() {
    let mut rng = seeded_rng();
    let mut game = Game::new(GameConfig::default(), &mut rng);
    game.tick(&mut rng);
    game.tick(&mut rng);
    assert_eq!(game.frame(), 2);
}

// ── Registration ──────────────────────────────────────────────────────────────

#[test]
fn registered_entity_joins_on_next_frame() {
    let mut game = Game::from_parts(quiet_config(), Vec::new());
    game.register_entity(AlienBullet::new(Vector2::new(10.0, 10.0), 0.0));
    assert!(game.entities().is_empty());
    assert_eq!(game.pending().len(), 1);

    let mut rng = seeded_rng();
    game.tick(&mut rng);
    assert_eq!(game.entities().len(), 1);
    assert!(game.pending().is_empty());
}

#[test]
fn bullet_fired_this_frame_waits_a_frame() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), vec![resting_ship_at(100.0, 100.0).into()]);

    game.tick(&mut rng);
    // The ship's first shot is queued, untouched by this frame's update.
    let queued = first_alien_bullet(game.pending()).expect("ship should have fired");
    assert_eq!(queued.lifespan(), 80);
    assert!(first_alien_bullet(game.entities()).is_none());

    game.tick(&mut rng);
    let live = first_alien_bullet(game.entities()).expect("bullet should be live");
    assert_eq!(live.lifespan(), 79);
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[test]
fn three_hits_over_three_frames_destroy_ship_and_score_once() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), vec![resting_ship_at(100.0, 100.0).into()]);

    for hit in 1..=3u32 {
        game.register_entity(Bullet::new(Vector2::new(100.0, 100.0), 0.0));
        game.tick(&mut rng);
        if hit < 3 {
            let ship = first_ship(&game).expect("ship should survive");
            assert_eq!(ship.hits_received(), hit);
            assert_eq!(game.score(), 0);
        }
    }

    assert!(first_ship(&game).is_none());
    assert_eq!(game.score(), 150);
    // The bullets that landed are gone too.
    assert_eq!(game.count(EntityKind::Bullet), 0);

    for _ in 0..10 {
        game.tick(&mut rng);
    }
    assert_eq!(game.score(), 150);
}

#[test]
fn alien_bullet_and_alien_ship_ignore_each_other() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(
        quiet_config(),
        vec![
            resting_ship_at(100.0, 100.0).into(),
            AlienBullet::new(Vector2::new(100.0, 100.0), 1.0).into(),
        ],
    );

    game.tick(&mut rng);

    let ship = first_ship(&game).expect("ship untouched");
    assert_eq!(ship.hits_received(), 0);
    assert!(!ship.body().is_flagged());
    let bullet = first_alien_bullet(game.entities()).expect("bullet untouched");
    assert_eq!(bullet.lifespan(), 79);
    assert_eq!(game.score(), 0);
}

#[test]
fn ship_ramming_player_kills_player_and_survives() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), vec![resting_ship_at(275.0, 275.0).into()]);

    game.tick(&mut rng);

    assert_eq!(game.lives(), 2);
    assert!(game.is_player_dead());
    let ship = first_ship(&game).expect("ship survives ramming");
    assert_eq!(ship.hits_received(), 0);
    assert!(!ship.body().is_flagged());
}

#[test]
fn player_bullet_scores_on_asteroid() {
    let mut rng = seeded_rng();
    let rock = Asteroid::new(Vector2::new(100.0, 100.0), AsteroidSize::Small, &mut rng);
    let mut game = Game::from_parts(quiet_config(), vec![rock.into()]);
    game.register_entity(Bullet::new(Vector2::new(100.0, 100.0), 0.0));

    game.tick(&mut rng);

    assert_eq!(game.score(), 100);
    assert_eq!(game.count(EntityKind::Asteroid), 0);
    assert_eq!(game.count(EntityKind::Bullet), 0);
}

#[test]
fn fragments_arrive_on_the_following_frame() {
    let mut rng = seeded_rng();
    let rock = Asteroid::new(Vector2::new(100.0, 100.0), AsteroidSize::Large, &mut rng);
    let mut game = Game::from_parts(quiet_config(), vec![rock.into()]);
    game.register_entity(Bullet::new(Vector2::new(100.0, 100.0), 0.0));

    game.tick(&mut rng);
    assert_eq!(game.count(EntityKind::Asteroid), 0);
    assert_eq!(game.pending().len(), 2);

    game.tick(&mut rng);
    assert_eq!(game.count(EntityKind::Asteroid), 2);
    assert_eq!(game.score(), 20);
}

#[test]
fn one_bullet_breaks_only_one_of_two_overlapping_rocks() {
    let mut rng = seeded_rng();
    let first = Asteroid::new(Vector2::new(100.0, 100.0), AsteroidSize::Small, &mut rng);
    let second = Asteroid::new(Vector2::new(100.0, 100.0), AsteroidSize::Small, &mut rng);
    let mut game = Game::from_parts(quiet_config(), vec![first.into(), second.into()]);
    game.register_entity(Bullet::new(Vector2::new(100.0, 100.0), 0.0));

    game.tick(&mut rng);

    // The bullet is spent on the first rock it meets.
    assert_eq!(game.score(), 100);
    assert_eq!(game.count(EntityKind::Asteroid), 1);
    assert_eq!(game.count(EntityKind::Bullet), 0);
}

#[test]
fn surplus_bullets_in_one_frame_do_not_rescore_a_destroyed_ship() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), vec![resting_ship_at(100.0, 100.0).into()]);
    for _ in 0..4 {
        game.register_entity(Bullet::new(Vector2::new(100.0, 100.0), 0.0));
    }

    game.tick(&mut rng);

    assert!(first_ship(&game).is_none());
    assert_eq!(game.score(), 150);
    // Three bullets land; the fourth meets an already-destroyed ship.
    assert_eq!(game.count(EntityKind::Bullet), 1);
}

// ── Purging ───────────────────────────────────────────────────────────────────

#[test]
fn expired_bullet_is_purged() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), Vec::new());
    game.register_entity(Bullet::new(Vector2::new(10.0, 10.0), 0.0));

    for _ in 0..59 {
        game.tick(&mut rng);
    }
    assert_eq!(game.count(EntityKind::Bullet), 1);
    game.tick(&mut rng);
    assert_eq!(game.count(EntityKind::Bullet), 0);
}

// ── Player lifecycle ──────────────────────────────────────────────────────────

#[test]
fn kill_respawn_and_invulnerability_cycle() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), Vec::new());

    game.kill_player();
    assert_eq!(game.lives(), 2);
    assert!(game.is_player_dead());
    assert!(!game.can_kill_player());

    // Already down: a second kill is ignored.
    game.kill_player();
    assert_eq!(game.lives(), 2);

    for _ in 0..(DEATH_COOLDOWN - RESPAWN_COOLDOWN) {
        game.tick(&mut rng);
    }
    assert!(!game.is_player_dead());
    assert!(game.is_player_invulnerable());
    assert_eq!(game.player().body().position, Vector2::new(275.0, 275.0));

    for _ in 0..RESPAWN_COOLDOWN {
        game.tick(&mut rng);
    }
    assert!(game.can_kill_player());
    assert!(!game.is_player_invulnerable());
}

#[test]
fn last_life_ends_the_game() {
    let mut rng = seeded_rng();
    let config = GameConfig {
        starting_lives: 1,
        ..quiet_config()
    };
    let mut game = Game::from_parts(config, Vec::new());

    game.kill_player();
    assert_eq!(game.lives(), 0);
    assert_eq!(game.status(), GameStatus::GameOver);

    let frame = game.frame();
    game.tick(&mut rng);
    assert_eq!(game.frame(), frame, "tick is a no-op after game over");
}

#[test]
fn player_fire_is_capped_in_game() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), Vec::new());
    game.player_mut().controls.firing = true;

    for _ in 0..20 {
        game.tick(&mut rng);
        assert!(game.count(EntityKind::Bullet) <= 4);
    }
    assert!(game.count(EntityKind::Bullet) >= 1);
}

// ── Level flow ────────────────────────────────────────────────────────────────

#[test]
fn clearing_the_field_starts_the_next_level() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(quiet_config(), Vec::new());

    for _ in 0..(LEVEL_RESET_FRAMES - 1) {
        game.tick(&mut rng);
    }
    assert_eq!(game.level(), 1);

    game.tick(&mut rng);
    assert_eq!(game.level(), 2);
    assert_eq!(game.count(EntityKind::Asteroid), 4);
    assert_eq!(game.count(EntityKind::AlienShip), 0);
}

#[test]
fn later_levels_open_with_an_alien_ship() {
    let mut rng = seeded_rng();
    let mut game = Game::from_parts(GameConfig::default(), Vec::new());
    for _ in 0..LEVEL_RESET_FRAMES {
        game.tick(&mut rng);
    }
    assert_eq!(game.level(), 2);
    assert_eq!(game.count(EntityKind::AlienShip), 1);
}

#[test]
fn alien_spawner_respects_interval_and_cap() {
    let mut rng = seeded_rng();
    let config = GameConfig {
        alien_spawn_interval: 10,
        max_alien_ships: 1,
        ..GameConfig::default()
    };
    // A rock in the corner keeps the level from ending.
    let rock = Asteroid::new(Vector2::new(20.0, 20.0), AsteroidSize::Small, &mut rng);
    let mut game = Game::from_parts(config, vec![rock.into()]);

    for _ in 0..9 {
        game.tick(&mut rng);
    }
    assert!(game.pending().is_empty());
    assert_eq!(game.count(EntityKind::AlienShip), 0);

    game.tick(&mut rng);
    assert_eq!(game.pending().len(), 1);

    for _ in 0..15 {
        game.tick(&mut rng);
    }
    assert_eq!(game.count(EntityKind::AlienShip), 1);
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn render_places_each_entity_then_resets_transform() {
    let mut game = Game::from_parts(quiet_config(), vec![resting_ship_at(100.0, 100.0).into()]);
    let mut log = CommandLog::new();
    game.render(&mut log);

    let transforms: Vec<Transform> = log
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Transform(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(transforms.len(), 3); // ship, player, identity
    assert_eq!(transforms[0].translation, Vector2::new(100.0, 100.0));
    assert_eq!(transforms[1].translation, Vector2::new(275.0, 275.0));
    assert_eq!(transforms[2], Transform::IDENTITY);

    game.kill_player();
    log.clear();
    game.render(&mut log);
    let count = log
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Transform(_)))
        .count();
    assert_eq!(count, 2, "dead player is not drawn");
}
