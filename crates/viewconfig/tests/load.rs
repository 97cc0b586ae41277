use std::fs;

use viewconfig::{ConfigError, ViewerConfig};

#[test]
fn relative_paths_resolve_against_config_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("filterview.toml");
    fs::write(
        &path,
        r#"
[images]
directory = "images"

[shaders]
vertex = "shaders/quad.vert"
fragment = "/abs/filter.frag"
"#,
    )
    .expect("write config");

    let config = ViewerConfig::load(&path).expect("load config");
    assert_eq!(config.images.directory, Some(dir.path().join("images")));
    assert_eq!(
        config.shaders.vertex,
        Some(dir.path().join("shaders/quad.vert"))
    );
    assert_eq!(
        config.shaders.fragment.as_deref(),
        Some(std::path::Path::new("/abs/filter.frag"))
    );
}

#[test]
fn missing_file_is_an_io_error_unless_defaulted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");

    let err = ViewerConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));

    let config = ViewerConfig::load_or_default(&path).expect("defaults");
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn invalid_file_is_not_defaulted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("filterview.toml");
    fs::write(&path, "version = 7\n").expect("write config");

    let err = ViewerConfig::load_or_default(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
