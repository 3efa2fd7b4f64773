//! Tests for the registry module

use super::*;
use crate::error::Error;
use crate::settings::{ConnectionSettings, SettingsResolver};
use crate::types::ConnectionMode;
use serde_json::json;

#[cfg(feature = "mock")]
fn mock_settings(alias: &str, database: &str) -> ConnectionSettings {
    SettingsResolver::default()
        .testing(true)
        .resolve(&json!({
            "alias": alias,
            "host": "mongomock://localhost",
            "db": database,
        }))
        .unwrap()
        .remove(0)
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_lookup() {
    let registry = ConnectionRegistry::new();
    registry
        .register(ConnectionSettings::new("reporting"))
        .await
        .unwrap();

    assert_eq!(registry.aliases().await, vec!["reporting".to_string()]);
    let settings = registry.settings("reporting").await.unwrap();
    assert_eq!(settings.alias, "reporting");
    assert!(!registry.is_live("reporting").await);
}

#[tokio::test]
async fn test_register_overwrites_while_not_live() {
    let registry = ConnectionRegistry::new();

    let mut settings = ConnectionSettings::new("default");
    settings.database = "first".to_string();
    registry.register(settings).await.unwrap();

    let mut settings = ConnectionSettings::new("default");
    settings.database = "second".to_string();
    registry.register(settings).await.unwrap();

    assert_eq!(registry.settings("default").await.unwrap().database, "second");
}

#[cfg(feature = "mock")]
#[tokio::test]
async fn test_register_refused_while_live() {
    let registry = ConnectionRegistry::new();
    registry.register(mock_settings("default", "test")).await.unwrap();
    registry.get_or_create("default").await.unwrap();

    let err = registry
        .register(mock_settings("default", "other"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Acquisition Tests
// ============================================================================

#[tokio::test]
async fn test_unknown_alias_fails() {
    let registry = ConnectionRegistry::new();

    let err = registry.get_or_create("reporting").await.unwrap_err();
    assert!(matches!(err, Error::AliasNotDefined { .. }));

    // the default alias gets the friendlier message
    let err = registry.get_or_create("default").await.unwrap_err();
    assert!(matches!(err, Error::DefaultAliasNotDefined));
    assert_eq!(err.to_string(), "You have not defined a default connection");
}

#[tokio::test]
async fn test_real_mode_opens_lazily() {
    // driver clients open without I/O, so acquisition succeeds with no
    // server listening
    let registry = ConnectionRegistry::new();
    registry
        .register(ConnectionSettings::new("default"))
        .await
        .unwrap();

    let handle = registry.get_or_create("default").await.unwrap();
    assert!(!handle.is_mock());
    assert!(registry.is_live("default").await);
}

#[cfg(feature = "mock")]
#[tokio::test]
async fn test_get_or_create_is_idempotent() {
    let registry = ConnectionRegistry::new();
    registry.register(mock_settings("unittest", "test")).await.unwrap();

    let first = registry.get_or_create("unittest").await.unwrap();
    let second = registry.get_or_create("unittest").await.unwrap();

    assert_eq!(first.mock().unwrap(), second.mock().unwrap());
}

// ============================================================================
// Sharing Tests
// ============================================================================

#[cfg(feature = "mock")]
#[tokio::test]
async fn test_equal_settings_share_one_handle() {
    let registry = ConnectionRegistry::new();
    // same target, different database and credentials
    let mut first = mock_settings("first", "db_one");
    first.username = Some("u1".to_string());
    let mut second = mock_settings("second", "db_two");
    second.username = Some("u2".to_string());
    second.set_password(Some("pw".to_string()));

    registry.register(first).await.unwrap();
    registry.register(second).await.unwrap();

    let a = registry.get_or_create("first").await.unwrap();
    let b = registry.get_or_create("second").await.unwrap();

    assert_eq!(a.mock().unwrap(), b.mock().unwrap());
    assert!(registry.is_live("first").await);
    assert!(registry.is_live("second").await);
}

#[cfg(feature = "mock")]
#[tokio::test]
async fn test_different_targets_do_not_share() {
    let registry = ConnectionRegistry::new();
    let first = mock_settings("first", "test");
    let mut second = mock_settings("second", "test");
    second.port = 27020;

    registry.register(first).await.unwrap();
    registry.register(second).await.unwrap();

    let a = registry.get_or_create("first").await.unwrap();
    let b = registry.get_or_create("second").await.unwrap();

    assert_ne!(a.mock().unwrap(), b.mock().unwrap());
}

// ============================================================================
// Disconnect Tests
// ============================================================================

#[cfg(feature = "mock")]
#[tokio::test]
async fn test_disconnect_removes_alias() {
    let registry = ConnectionRegistry::new();
    registry.register(mock_settings("unittest", "test")).await.unwrap();
    registry.get_or_create("unittest").await.unwrap();

    assert!(registry.disconnect("unittest").await.unwrap());
    assert!(registry.aliases().await.is_empty());
    assert!(!registry.disconnect("unittest").await.unwrap());

    let err = registry.get_or_create("unittest").await.unwrap_err();
    assert!(matches!(err, Error::AliasNotDefined { .. }));
}

#[cfg(feature = "mock")]
#[tokio::test]
async fn test_disconnect_all() {
    let registry = ConnectionRegistry::new();
    registry.register(mock_settings("a", "one")).await.unwrap();
    registry.register(mock_settings("b", "two")).await.unwrap();
    registry.get_or_create("a").await.unwrap();

    registry.disconnect_all().await.unwrap();
    assert!(registry.aliases().await.is_empty());
}

// ============================================================================
// Mode Tests
// ============================================================================

#[tokio::test]
async fn test_ephemeral_mode_is_stored_not_rederived() {
    let settings = SettingsResolver::default()
        .testing(true)
        .temp_db(true)
        .resolve(&json!({"alias": "temp"}))
        .unwrap()
        .remove(0);
    assert_eq!(settings.mode, ConnectionMode::Ephemeral);

    // registering under a non-test registry keeps the resolved mode
    let registry = ConnectionRegistry::new();
    registry.register(settings).await.unwrap();
    assert_eq!(
        registry.settings("temp").await.unwrap().mode,
        ConnectionMode::Ephemeral
    );
}
