//! Unit tests for the configuration layering system.

use netwatch_discovery::config::{load_config, DiscoveryConfig};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn defaults_require_no_file() {
    let config = load_config(None).expect("defaults must always load");
    assert_eq!(config.bind.port, 8787);
    assert_eq!(config.timing.t_passive_secs, 5);
}

#[test]
fn yaml_overlay_replaces_selected_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "bind:\n  host: \"127.0.0.1\"\n  port: 9191\ntiming:\n  t_passive_secs: 2\n"
    )
    .unwrap();

    let config = load_config(Some(file.path())).expect("overlay must parse");
    assert_eq!(config.bind.host, "127.0.0.1");
    assert_eq!(config.bind.port, 9191);
    assert_eq!(config.timing.t_passive_secs, 2);
    // Fields absent from the overlay keep their defaults.
    assert_eq!(config.timing.t_active_secs, 10);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = load_config(Some(std::path::Path::new("/nonexistent/path.yaml")))
        .expect("a missing overlay path is not an error");
    let defaults = DiscoveryConfig::default();
    assert_eq!(config.bind.port, defaults.bind.port);
    assert_eq!(config.snapshot_path, defaults.snapshot_path);
    assert_eq!(config.cors_origins, defaults.cors_origins);
}

// `HOST`/`PORT` are process-global; run these serially so they don't race
// against each other or against any other test that reads them.
#[test]
#[serial_test::serial]
fn host_env_var_overrides_the_bind_host() {
    std::env::set_var("HOST", "10.0.0.5");
    let config = load_config(None).expect("env override must not fail config load");
    assert_eq!(config.bind.host, "10.0.0.5");
    std::env::remove_var("HOST");
}

#[test]
#[serial_test::serial]
fn port_env_var_overrides_the_bind_port() {
    std::env::set_var("PORT", "9999");
    let config = load_config(None).expect("env override must not fail config load");
    assert_eq!(config.bind.port, 9999);
    std::env::remove_var("PORT");
}

#[test]
#[serial_test::serial]
fn non_numeric_port_env_var_is_ignored() {
    std::env::set_var("PORT", "not-a-port");
    let config = load_config(None).expect("a malformed PORT must not fail config load");
    assert_eq!(config.bind.port, DiscoveryConfig::default().bind.port);
    std::env::remove_var("PORT");
}
