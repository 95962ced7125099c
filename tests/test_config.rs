use street_puncher::config::*;
use street_puncher::error::ConfigError;

#[test]
fn defaults_match_stock_game() {
    let c = GameConfig::default();
    assert!(c.validate().is_ok());
    assert_eq!(c.spawn_interval, 2.0);
    assert_eq!(c.spawn_offset, 15.0);
    assert_eq!((c.dead_zone_left, c.dead_zone_right), (-45.0, 45.0));
    assert_eq!(c.speed_increment, 2.5);
    assert_eq!(c.speed_score_step, 5);
    assert_eq!(c.background_score_step, 6);
    assert_eq!(c.starting_health, 3);
    assert_eq!(c.punch_duration, 0.2);
    assert_eq!(c.points_per_enemy, 1);
    assert_eq!(c.timer_mode, TimerMode::DropExcess);
    assert_eq!(c.cycle_mode, CycleMode::ExactMultiple);
    assert!(c.enemies.iter().all(|e| e.base_speed == 5.0));
}

#[test]
fn partial_file_overrides_only_listed_fields() {
    let c = GameConfig::from_ron("(spawn_interval: 1.5, timer_mode: CarryExcess)").unwrap();
    assert_eq!(c.spawn_interval, 1.5);
    assert_eq!(c.timer_mode, TimerMode::CarryExcess);
    assert_eq!(c.starting_health, 3);
    assert_eq!(c.backgrounds.len(), 4);
}

#[test]
fn custom_catalog() {
    let c = GameConfig::from_ron(
        r#"(enemies: [(name: "ninja", base_speed: 9.0, glyphs: ["-_-"])], backgrounds: [])"#,
    )
    .unwrap();
    assert_eq!(c.enemies, vec![EnemyTemplate::new("ninja", 9.0, &["-_-"])]);
    assert!(c.backgrounds.is_empty());
}

#[test]
fn zero_interval_rejected() {
    let err = GameConfig::from_ron("(spawn_interval: 0.0)").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "spawn_interval",
            ..
        }
    ));
}

#[test]
fn inverted_dead_zones_rejected() {
    let c = GameConfig {
        dead_zone_left: 10.0,
        dead_zone_right: -10.0,
        ..GameConfig::default()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::Invalid {
            field: "dead_zone_left",
            ..
        })
    ));
}

#[test]
fn spawn_point_inside_dead_zone_rejected() {
    let c = GameConfig {
        spawn_offset: 50.0,
        ..GameConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn zero_score_steps_rejected() {
    let c = GameConfig {
        speed_score_step: 0,
        ..GameConfig::default()
    };
    assert!(c.validate().is_err());
    let c = GameConfig {
        background_score_step: 0,
        ..GameConfig::default()
    };
    assert!(c.validate().is_err());
}

#[test]
fn malformed_config_is_parse_error() {
    assert!(matches!(
        GameConfig::from_ron("spawn_interval = 2"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn missing_config_file_is_io_error() {
    let err = GameConfig::load(std::path::Path::new("/definitely/not/here.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
