//! In-memory mock client
//!
//! A stand-in for a real driver client used by test-mode connections with a
//! `mongomock://` host. It satisfies the handle surface without any I/O and
//! identifies itself through the `sysInfo` field of its server info.

use crate::types::Document;
use mongodb::bson::doc;
use std::sync::Arc;

/// Mock connection target
#[derive(Debug)]
struct MockTarget {
    host: String,
    port: u16,
}

/// An in-memory stand-in connection
///
/// Cloning shares the same target, mirroring the clone semantics of a real
/// driver client.
#[derive(Debug, Clone)]
pub struct MockClient {
    target: Arc<MockTarget>,
}

impl MockClient {
    /// "Connect" to the given target
    pub fn connect(host: impl Into<String>, port: u16) -> Self {
        Self {
            target: Arc::new(MockTarget {
                host: host.into(),
                port,
            }),
        }
    }

    /// The configured target address
    pub fn address(&self) -> (&str, u16) {
        (&self.target.host, self.target.port)
    }

    /// Server info document carrying the mock signature
    pub fn server_info(&self) -> Document {
        doc! {
            "version": "4.0.0",
            "versionArray": [4, 0, 0, 0],
            "sysInfo": "Mock",
            "bits": 64,
            "ok": 1.0,
        }
    }
}

impl PartialEq for MockClient {
    /// Two mock clients are equal when they are clones of one connection
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.target, &other.target)
    }
}

impl Eq for MockClient {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_signature() {
        let client = MockClient::connect("localhost", 27017);
        let info = client.server_info();
        assert_eq!(info.get_str("sysInfo").unwrap(), "Mock");
        assert_eq!(info.get_f64("ok").unwrap(), 1.0);
    }

    #[test]
    fn test_clone_shares_target() {
        let client = MockClient::connect("localhost", 27018);
        let clone = client.clone();
        assert_eq!(client.address(), clone.address());
        assert_eq!(clone.address(), ("localhost", 27018));
    }
}
