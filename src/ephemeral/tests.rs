//! Tests for the ephemeral module

use super::*;
use crate::types::DEFAULT_PORT;
use std::path::Path;

// ============================================================================
// Port Selection Tests
// ============================================================================

#[test]
fn test_effective_port_falls_back_from_production_port() {
    assert_eq!(EphemeralMongo::effective_port(DEFAULT_PORT), FALLBACK_PORT);
}

#[test]
fn test_effective_port_keeps_explicit_port() {
    assert_eq!(EphemeralMongo::effective_port(27120), 27120);
    assert_eq!(EphemeralMongo::effective_port(FALLBACK_PORT), FALLBACK_PORT);
}

// ============================================================================
// Invocation Tests
// ============================================================================

#[test]
fn test_mongod_args() {
    let args = EphemeralMongo::mongod_args(27111, Path::new("/tmp/scratch"));

    let joined = args.join(" ");
    assert!(joined.starts_with("--bind_ip localhost --port 27111 --dbpath /tmp/scratch"));
    assert!(joined.contains("--nojournal"));
    assert!(joined.contains("--nohttpinterface"));
    assert!(joined.contains("--noauth"));
    assert!(joined.contains("--smallfiles"));
    assert!(joined.contains("--syncdelay 0"));
    assert!(joined.contains("--maxConns 10"));
    assert!(joined.contains("--nssize 1"));
}

// ============================================================================
// Lifecycle Tests (require a local mongod binary)
// ============================================================================

#[tokio::test]
#[ignore = "requires a local mongod binary"]
async fn test_start_ready_shutdown() {
    let mut instance = EphemeralMongo::start(DEFAULT_PORT, false).await.unwrap();
    assert!(instance.is_ready());
    assert_eq!(instance.port(), FALLBACK_PORT);

    let dbpath = instance.dbpath().unwrap().to_path_buf();
    assert!(dbpath.exists());

    let handle = instance.handle().unwrap();
    handle.ping().await.unwrap();

    instance.shutdown().await.unwrap();
    assert_eq!(instance.state(), InstanceState::NotStarted);
    assert!(!dbpath.exists());
}

#[tokio::test]
#[ignore = "requires a local mongod binary"]
async fn test_preserve_keeps_scratch_directory() {
    let mut instance = EphemeralMongo::start(27121, true).await.unwrap();
    let dbpath = instance.dbpath().unwrap().to_path_buf();

    instance.shutdown().await.unwrap();
    assert!(dbpath.exists());

    std::fs::remove_dir_all(dbpath).unwrap();
}
