//! Connection handles
//!
//! A [`ConnectionHandle`] is the clonable value the registry hands back to
//! callers: either a real driver client or, behind the `mock` feature, an
//! in-memory mock client. Real driver clients connect lazily and manage
//! their own pooling, so cloning a handle is cheap and closing is dropping
//! the last clone.

use crate::error::{Error, Result};
use crate::settings::ConnectionSettings;
use crate::types::Document;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential, SelectionCriteria, ServerAddress};
use mongodb::Client;

#[cfg(feature = "mock")]
use crate::mock::MockClient;

/// A live connection for one registered alias
#[derive(Debug, Clone)]
pub enum ConnectionHandle {
    /// Real driver client
    Real(Client),

    /// In-memory mock client
    #[cfg(feature = "mock")]
    Mock(MockClient),
}

impl ConnectionHandle {
    /// Open a real driver connection for the given settings
    ///
    /// URI-style settings are re-parsed by the driver so options this crate
    /// does not model survive; discrete settings are assembled into client
    /// options directly. No I/O happens here — the driver connects on first
    /// operation.
    pub async fn open_real(settings: &ConnectionSettings) -> Result<Self> {
        let options = if let Some(uri) = &settings.uri {
            let mut options = ClientOptions::parse(uri)
                .await
                .map_err(|e| Error::invalid_uri(uri, e.to_string()))?;
            if options.default_database.is_none() {
                options.default_database = Some(settings.database.clone());
            }
            options
        } else {
            let mut options = ClientOptions::builder()
                .hosts(vec![ServerAddress::Tcp {
                    host: settings.host.clone(),
                    port: Some(settings.port),
                }])
                .build();
            options.default_database = Some(settings.database.clone());
            options.repl_set_name = settings.replica_set.clone();
            if let Some(pref) = settings.read_preference {
                options.selection_criteria = Some(SelectionCriteria::ReadPreference(pref.into()));
            }
            if let Some(username) = &settings.username {
                let mut credential = Credential::default();
                credential.username = Some(username.clone());
                credential.password = settings.password().map(ToString::to_string);
                credential.source = settings.auth_source.clone();
                options.credential = Some(credential);
            }
            options
        };

        Ok(Self::Real(Client::with_options(options)?))
    }

    /// The underlying driver client, if this is a real connection
    pub fn client(&self) -> Option<&Client> {
        match self {
            Self::Real(client) => Some(client),
            #[cfg(feature = "mock")]
            Self::Mock(_) => None,
        }
    }

    /// The underlying mock client, if this is a mock connection
    #[cfg(feature = "mock")]
    pub fn mock(&self) -> Option<&MockClient> {
        match self {
            Self::Real(_) => None,
            Self::Mock(mock) => Some(mock),
        }
    }

    /// Whether this handle is a mock connection
    pub fn is_mock(&self) -> bool {
        match self {
            Self::Real(_) => false,
            #[cfg(feature = "mock")]
            Self::Mock(_) => true,
        }
    }

    /// A database on this connection, if this is a real connection
    pub fn database(&self, name: &str) -> Option<mongodb::Database> {
        self.client().map(|c| c.database(name))
    }

    /// Server build information
    ///
    /// Mock connections answer locally with the mock signature.
    pub async fn server_info(&self) -> Result<Document> {
        match self {
            Self::Real(client) => {
                let info = client
                    .database("admin")
                    .run_command(doc! { "buildInfo": 1 }, None)
                    .await?;
                Ok(info)
            }
            #[cfg(feature = "mock")]
            Self::Mock(mock) => Ok(mock.server_info()),
        }
    }

    /// Round-trip liveness check
    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Real(client) => {
                client
                    .database("admin")
                    .run_command(doc! { "ping": 1 }, None)
                    .await?;
                Ok(())
            }
            #[cfg(feature = "mock")]
            Self::Mock(_) => Ok(()),
        }
    }
}
