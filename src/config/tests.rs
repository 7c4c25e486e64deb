use super::*;
use tempfile::{tempdir, TempDir};
use std::fs::File;
use std::io::Write;

/// Helper function to create a test configuration file
fn create_test_config_file(dir: &TempDir, content: &str) -> PathBuf {
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    let mut file = File::create(&config_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    config_path
}

fn sample_config() -> Config {
    Config {
        database_url: "original.db".to_string(),
        port: 4000,
        backup_interval_minutes: 30,
        backup_count: 5,
        backup_dir: PathBuf::from("old-backups"),
        server_url: None,
    }
}

#[test]
fn test_apply_update_with_all_values() {
    let update = ConfigUpdate {
        database_url: Some("updated.db".to_string()),
        port: Some(4100),
        backup_interval_minutes: Some(60),
        backup_count: Some(10),
        backup_dir: Some(PathBuf::from("new-backups")),
        server_url: Some("http://example:4100".to_string()),
    };

    let updated = sample_config().apply_update(update);

    assert_eq!(updated.database_url, "updated.db");
    assert_eq!(updated.port, 4100);
    assert_eq!(updated.backup_interval_minutes, 60);
    assert_eq!(updated.backup_count, 10);
    assert_eq!(updated.backup_dir, PathBuf::from("new-backups"));
    assert_eq!(updated.server_url.as_deref(), Some("http://example:4100"));
}

#[test]
fn test_apply_update_with_partial_values() {
    let update = ConfigUpdate {
        database_url: Some("updated.db".to_string()),
        ..Default::default()
    };

    let updated = sample_config().apply_update(update);

    assert_eq!(updated.database_url, "updated.db");
    assert_eq!(updated.port, 4000); // Unchanged
    assert_eq!(updated.backup_interval_minutes, 30); // Unchanged
    assert_eq!(updated.backup_count, 5); // Unchanged
}

#[test]
fn test_apply_update_with_no_values() {
    let updated = sample_config().apply_update(ConfigUpdate::default());
    assert_eq!(updated, sample_config());
}

#[test]
fn test_backup_interval_conversion() {
    let config = sample_config();
    assert_eq!(config.backup_interval(), Some(Duration::from_secs(30 * 60)));
}

#[test]
fn test_backup_interval_zero_disables() {
    let config = Config {
        backup_interval_minutes: 0,
        ..sample_config()
    };
    assert_eq!(config.backup_interval(), None);
}

#[test]
fn test_base_config_defaults() {
    let config = base_config(None);

    assert_eq!(config.database_url, "flashdeck.db");
    assert_eq!(config.port, default_port());
    assert_eq!(config.backup_interval_minutes, 20);
    assert_eq!(config.backup_count, 10);
    assert_eq!(config.backup_dir, PathBuf::from("backups"));
    assert_eq!(config.server_url, None);
}

#[test]
fn test_base_config_with_path() {
    let temp_dir = tempdir().unwrap();
    let config = base_config(Some(temp_dir.path().to_path_buf()));

    let expected_db_path = temp_dir.path().join("flashdeck.db").to_string_lossy().to_string();
    assert_eq!(config.database_url, expected_db_path);
    assert_eq!(config.backup_dir, temp_dir.path().join("backups"));
}

#[test]
fn test_config_from_args_with_all_values() {
    let args = CliArgs {
        database_url: Some("args.db".to_string()),
        port: Some(5000),
        backup_interval_minutes: Some(45),
        backup_count: Some(15),
        backup_dir: Some(PathBuf::from("args-backups")),
        debug: true,
        json_logs: false,
    };

    let update = config_from_args(&args);

    assert_eq!(update.database_url, Some("args.db".to_string()));
    assert_eq!(update.port, Some(5000));
    assert_eq!(update.backup_interval_minutes, Some(45));
    assert_eq!(update.backup_count, Some(15));
    assert_eq!(update.backup_dir, Some(PathBuf::from("args-backups")));
    assert_eq!(update.server_url, None);
}

#[test]
fn test_config_from_args_with_no_values() {
    let update = config_from_args(&CliArgs::default());
    assert_eq!(update, ConfigUpdate::default());
}

#[test]
fn test_config_from_file_with_no_path() {
    let update = config_from_file(None).unwrap();
    assert_eq!(update, ConfigUpdate::default());
}

#[test]
fn test_config_from_file_with_valid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = create_test_config_file(
        &temp_dir,
        r#"
            database_url = "file.db"
            port = 3900
            backup_interval_minutes = 40
            backup_count = 20
            backup_dir = "/var/backups/flashdeck"
            server_url = "http://localhost:3900"
        "#,
    );

    let result = config_from_file(Some(config_path));

    assert!(result.is_ok(), "Failed to parse config file: {}", result.err().unwrap());
    let update = result.unwrap();
    assert_eq!(update.database_url, Some("file.db".to_string()));
    assert_eq!(update.port, Some(3900));
    assert_eq!(update.backup_interval_minutes, Some(40));
    assert_eq!(update.backup_count, Some(20));
    assert_eq!(update.backup_dir, Some(PathBuf::from("/var/backups/flashdeck")));
    assert_eq!(update.server_url, Some("http://localhost:3900".to_string()));
}

#[test]
fn test_config_from_file_with_partial_values() {
    let temp_dir = tempdir().unwrap();
    let config_path = create_test_config_file(
        &temp_dir,
        r#"
            database_url = "file.db"
            # Intentionally missing other fields
        "#,
    );

    let update = config_from_file(Some(config_path)).unwrap();

    assert_eq!(update.database_url, Some("file.db".to_string()));
    assert_eq!(update.port, None);
    assert_eq!(update.backup_count, None);
}

#[test]
fn test_config_from_file_with_invalid_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = create_test_config_file(
        &temp_dir,
        r#"
            backup_interval_minutes = "not a number" # Type error
        "#,
    );

    assert!(config_from_file(Some(config_path)).is_err());
}

#[test]
fn test_config_from_file_with_nonexistent_file() {
    let temp_dir = tempdir().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent_config.toml");

    let update = config_from_file(Some(nonexistent_path)).unwrap();
    assert_eq!(update, ConfigUpdate::default());
}

#[test]
fn test_config_precedence() {
    let args = CliArgs {
        database_url: Some("args.db".to_string()),
        backup_count: Some(25),
        ..Default::default()
    };

    let file_config = ConfigUpdate {
        database_url: Some("file.db".to_string()),
        backup_interval_minutes: Some(50),
        ..Default::default()
    };

    let config = base_config(None)
        .apply_update(file_config)
        .apply_update(config_from_args(&args));

    assert_eq!(config.database_url, "args.db"); // From args
    assert_eq!(config.backup_interval_minutes, 50); // From file
    assert_eq!(config.backup_count, 25); // From args
    assert_eq!(config.port, default_port()); // From base
}
