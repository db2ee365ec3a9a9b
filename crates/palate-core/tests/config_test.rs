use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use palate_core::config::*;
use palate_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = PalateConfig::from_toml("").unwrap();

    assert_eq!(config.storage.db_path, PathBuf::from("recommendation.db"));
    assert_eq!(config.storage.read_pool_size, 4);

    assert_eq!(config.model.n_trees, 100);
    assert_eq!(config.model.max_depth, None);
    assert_eq!(config.model.min_samples_split, 2);
    assert_eq!(config.model.seed, 42);

    assert_eq!(config.retrain.join_strategy, JoinStrategy::MostRecent);
    assert_eq!(config.retrain.min_interval_secs, 0);
    assert_eq!(config.retrain.min_new_interactions, 0);
    assert!(!config.retrain.background);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[storage]
db_path = "/custom/palate.db"

[model]
n_trees = 25
max_depth = 6

[retrain]
join_strategy = "nearest_preceding"
background = true
"#;
    let config = PalateConfig::from_toml(toml).unwrap();
    assert_eq!(config.storage.db_path, PathBuf::from("/custom/palate.db"));
    assert_eq!(config.storage.read_pool_size, 4, "unset keys keep defaults");
    assert_eq!(config.model.n_trees, 25);
    assert_eq!(config.model.max_depth, Some(6));
    assert_eq!(config.model.seed, 42);
    assert_eq!(config.retrain.join_strategy, JoinStrategy::NearestPreceding);
    assert!(config.retrain.background);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = PalateConfig::from_toml("[model\nn_trees = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn env_overrides_take_priority_over_file_values() {
    let mut config = PalateConfig::from_toml("[model]\nn_trees = 10").unwrap();
    let env: HashMap<&str, &str> = [
        ("PALATE_MODEL_TREES", "7"),
        ("PALATE_MODEL_SEED", "1234"),
        ("PALATE_RETRAIN_JOIN", "nearest_preceding"),
        ("PALATE_DB_PATH", "/tmp/override.db"),
        ("PALATE_RETRAIN_BACKGROUND", "true"),
    ]
    .into_iter()
    .collect();

    config
        .apply_env_overrides_with(|key| env.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.model.n_trees, 7);
    assert_eq!(config.model.seed, 1234);
    assert_eq!(config.retrain.join_strategy, JoinStrategy::NearestPreceding);
    assert_eq!(config.storage.db_path, PathBuf::from("/tmp/override.db"));
    assert!(config.retrain.background);
}

#[test]
fn unparsable_env_value_is_rejected() {
    let mut config = PalateConfig::default();
    let err = config
        .apply_env_overrides_with(|key| (key == "PALATE_MODEL_TREES").then(|| "many".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "PALATE_MODEL_TREES"));
}

#[test]
fn unknown_join_strategy_is_rejected() {
    let err = "closest".parse::<JoinStrategy>().unwrap_err();
    assert!(err.to_string().contains("closest"));
}

#[test]
fn validation_rejects_zero_trees_and_zero_depth() {
    let mut config = PalateConfig::default();
    config.model.n_trees = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "model.n_trees"
    ));

    let mut config = PalateConfig::default();
    config.model.max_depth = Some(0);
    assert!(config.validate().is_err());

    let mut config = PalateConfig::default();
    config.model.min_samples_split = 1;
    assert!(config.validate().is_err());
}

#[test]
fn load_reads_an_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[model]\nseed = 9\n[retrain]\nmin_interval_secs = 30").unwrap();

    let config = PalateConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.model.seed, 9);
    assert_eq!(config.retrain.min_interval_secs, 30);
}

#[test]
fn load_fails_for_missing_explicit_file() {
    let err = PalateConfig::load(Some(std::path::Path::new("/nonexistent/palate.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
