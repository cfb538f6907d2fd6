use asteroids::config::{GameConfig, MAX_FPS, MIN_WORLD_SIZE};
use asteroids::error::ConfigError;

#[test]
fn default_config_is_valid() {
    let config = GameConfig::default();
    assert_eq!(config.clone().validate(), Ok(config));
}

#[test]
fn rejects_non_positive_world() {
    for size in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let config = GameConfig {
            world_size: size,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::WorldSize(_))));
    }
}

#[test]
fn rejects_a_world_too_small_to_render() {
    let config = GameConfig {
        world_size: 1e-9,
        ..GameConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::WorldTooSmall {
            got: 1e-9,
            min: MIN_WORLD_SIZE,
        })
    );

    let smallest = GameConfig {
        world_size: MIN_WORLD_SIZE,
        ..GameConfig::default()
    };
    assert!(smallest.validate().is_ok());
}

#[test]
fn rejects_out_of_range_frame_rate() {
    let config = GameConfig {
        fps: MAX_FPS + 1,
        ..GameConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::FrameRate {
            got: MAX_FPS + 1,
            max: MAX_FPS,
        })
    );
}

#[test]
fn rejects_zero_lives_and_zero_interval() {
    let no_lives = GameConfig {
        starting_lives: 0,
        ..GameConfig::default()
    };
    assert_eq!(no_lives.validate(), Err(ConfigError::NoLives));

    let no_interval = GameConfig {
        alien_spawn_interval: 0,
        ..GameConfig::default()
    };
    assert_eq!(no_interval.validate(), Err(ConfigError::SpawnInterval));
}
