//! Unit tests for configuration loading
//!
//! Loader tests run inside `figment::Jail`, which serializes them and gives
//! each one a private working directory and environment.

use figment::Jail;
use graft_domain::error::Error;
use graft_domain::value_objects::{Marker, TypeKey};
use graft_infrastructure::config::{ConfigLoader, GraftConfig};

fn load(path: &str) -> figment::error::Result<GraftConfig> {
    ConfigLoader::new()
        .with_config_path(path)
        .load()
        .map_err(|e| e.to_string().into())
}

#[test]
fn test_missing_file_yields_defaults() {
    Jail::expect_with(|_jail| {
        let config = load("absent.toml")?;

        assert_eq!(config, GraftConfig::default());
        assert!(config.wait_until_completion);
        assert!(config.default_markers);
        assert_eq!(config.workers, None);
        Ok(())
    });
}

#[test]
fn test_toml_file_is_merged_over_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "graft.toml",
            r#"
                markers = ["Gateway"]
                workers = 4
                wait_until_completion = false

                [bindings]
                "dyn app::Store" = "app::RedisStore"

                [properties]
                files = ["application.toml"]
                env_prefix = "APP"

                [logging]
                level = "debug"
                json_format = true
            "#,
        )?;

        let config = load("graft.toml")?;

        assert_eq!(config.workers, Some(4));
        assert!(!config.wait_until_completion);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        assert_eq!(config.properties.env_prefix.as_deref(), Some("APP"));
        assert_eq!(
            config.explicit_bindings(),
            vec![(
                TypeKey::named("dyn app::Store"),
                TypeKey::named("app::RedisStore")
            )]
        );
        let markers = config.recognized_markers();
        assert!(markers.contains(&Marker::new("Gateway")));
        assert!(markers.contains(&Marker::new("Service")));
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("graft.toml", "workers = 2")?;
        jail.set_env("GRAFT__WORKERS", "6");
        jail.set_env("GRAFT__LOGGING__LEVEL", "warn");

        let config = load("graft.toml")?;

        assert_eq!(config.workers, Some(6));
        assert_eq!(config.logging.level, "warn");
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("MYAPP__DEFAULT_MARKERS", "false");
        jail.set_env("GRAFT__DEFAULT_MARKERS", "false");
        jail.create_file("graft.toml", r#"markers = ["Gateway"]"#)?;

        let config = ConfigLoader::new()
            .with_env_prefix("MYAPP")
            .with_config_path("graft.toml")
            .load()
            .map_err(|e| e.to_string())?;

        assert!(!config.default_markers);
        assert_eq!(config.recognized_markers().len(), 1);
        Ok(())
    });
}

#[test]
fn test_invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("zero.toml", "workers = 0")?;
        jail.create_file("level.toml", "[logging]\nlevel = \"loud\"")?;
        jail.create_file("markers.toml", "default_markers = false")?;
        jail.create_file("binding.toml", "[bindings]\n\"dyn app::Store\" = \" \"")?;

        for file in ["zero.toml", "level.toml", "markers.toml", "binding.toml"] {
            let result = ConfigLoader::new().with_config_path(file).load();
            assert!(
                matches!(result, Err(Error::Configuration { .. })),
                "{file} should be rejected"
            );
        }
        Ok(())
    });
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("graft.toml");
    let mut config = GraftConfig::default();
    config.workers = Some(3);
    config.markers.push("Gateway".to_string());
    config
        .bindings
        .insert("dyn app::Store".to_string(), "app::MemoryStore".to_string());

    ConfigLoader::new()
        .save_to_file(&config, &path)
        .expect("config should save");
    let saved = std::fs::read_to_string(&path).expect("saved file");
    let parsed: GraftConfig = toml::from_str(&saved).expect("saved file is valid TOML");

    assert_eq!(parsed, config);
}
