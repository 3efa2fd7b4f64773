//! Ephemeral instance manager

use crate::error::{Error, Result};
use crate::handle::ConnectionHandle;
use crate::types::DEFAULT_PORT;
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerAddress};
use mongodb::Client;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::{Child, Command};

/// Port used when the requested port is the default production port
pub const FALLBACK_PORT: u16 = 27111;

/// Bounded readiness loop: attempts and fixed delay before each attempt
const READY_ATTEMPTS: u32 = 3;
const READY_DELAY: Duration = Duration::from_millis(100);

/// Server-selection timeout for readiness pings
const READY_TIMEOUT: Duration = Duration::from_millis(500);

// ============================================================================
// Instance State
// ============================================================================

/// Lifecycle state of an ephemeral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// No subprocess
    NotStarted,
    /// Subprocess launched, readiness not yet confirmed
    Starting,
    /// Readiness confirmed, handle available
    Ready,
    /// Readiness polling exhausted
    Failed,
}

// ============================================================================
// EphemeralMongo
// ============================================================================

/// A throwaway local `mongod` instance bound to a scratch directory
///
/// The instance is owned by whichever component created it; teardown happens
/// on [`EphemeralMongo::shutdown`] or on drop, never via a process-exit hook.
/// Unless the preserve flag is set, the scratch directory is removed
/// recursively, ignoring deletion errors.
#[derive(Debug)]
pub struct EphemeralMongo {
    state: InstanceState,
    dir: Option<TempDir>,
    child: Option<Child>,
    client: Option<Client>,
    port: u16,
    preserve: bool,
    started_at: DateTime<Utc>,
}

impl EphemeralMongo {
    /// The port an instance requested on `requested` will actually bind
    ///
    /// The default production port is never used for throwaway instances.
    pub fn effective_port(requested: u16) -> u16 {
        if requested == DEFAULT_PORT {
            FALLBACK_PORT
        } else {
            requested
        }
    }

    /// Spawn an instance and wait for it to become ready
    ///
    /// Launch failures propagate as I/O errors; an instance that never
    /// answers within the bounded readiness loop is killed and surfaces as a
    /// terminal connection error.
    pub async fn start(port: u16, preserve: bool) -> Result<Self> {
        let port = Self::effective_port(port);
        let dir = TempDir::new().map_err(Error::Io)?;

        tracing::info!(port, dbpath = %dir.path().display(), "starting ephemeral mongod");
        let child = Self::mongod_command(port, dir.path()).spawn()?;

        let mut instance = Self {
            state: InstanceState::Starting,
            dir: Some(dir),
            child: Some(child),
            client: None,
            port,
            preserve,
            started_at: Utc::now(),
        };

        match instance.wait_ready().await {
            Ok(client) => {
                instance.client = Some(client);
                instance.state = InstanceState::Ready;
                tracing::info!(port, "ephemeral mongod ready");
                Ok(instance)
            }
            Err(e) => {
                instance.state = InstanceState::Failed;
                instance.kill_child().await;
                Err(e)
            }
        }
    }

    /// The `mongod` invocation for a given port and scratch directory
    pub(crate) fn mongod_args(port: u16, dbpath: &Path) -> Vec<String> {
        vec![
            "--bind_ip".to_string(),
            "localhost".to_string(),
            "--port".to_string(),
            port.to_string(),
            "--dbpath".to_string(),
            dbpath.display().to_string(),
            "--nojournal".to_string(),
            "--nohttpinterface".to_string(),
            "--noauth".to_string(),
            "--smallfiles".to_string(),
            "--syncdelay".to_string(),
            "0".to_string(),
            "--maxConns".to_string(),
            "10".to_string(),
            "--nssize".to_string(),
            "1".to_string(),
        ]
    }

    fn mongod_command(port: u16, dbpath: &Path) -> Command {
        let mut command = Command::new("mongod");
        command
            .args(Self::mongod_args(port, dbpath))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }

    /// Bounded readiness loop
    async fn wait_ready(&self) -> Result<Client> {
        for attempt in 1..=READY_ATTEMPTS {
            tokio::time::sleep(READY_DELAY).await;
            match Self::try_connect(self.port).await {
                Ok(client) => return Ok(client),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "ephemeral instance not ready");
                }
            }
        }
        Err(Error::connection("cannot connect to the mongodb test instance"))
    }

    /// One readiness attempt: short-timeout client plus a ping
    async fn try_connect(port: u16) -> Result<Client> {
        let mut options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: "localhost".to_string(),
                port: Some(port),
            }])
            .build();
        options.direct_connection = Some(true);
        options.server_selection_timeout = Some(READY_TIMEOUT);

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(client)
    }

    /// A connection handle onto the running instance
    pub fn handle(&self) -> Result<ConnectionHandle> {
        self.client
            .clone()
            .map(ConnectionHandle::Real)
            .ok_or_else(|| Error::connection("ephemeral instance is not ready"))
    }

    /// Current lifecycle state
    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Whether the instance is ready to hand out connections
    pub fn is_ready(&self) -> bool {
        self.state == InstanceState::Ready
    }

    /// The bound port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the scratch directory survives teardown
    pub fn preserve(&self) -> bool {
        self.preserve
    }

    /// The scratch directory, while the instance holds one
    pub fn dbpath(&self) -> Option<&Path> {
        self.dir.as_ref().map(TempDir::path)
    }

    /// When the subprocess was launched
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Terminate the subprocess and release the scratch directory
    pub async fn shutdown(&mut self) -> Result<()> {
        self.client = None;
        self.kill_child().await;
        if let Some(dir) = self.dir.take() {
            if self.preserve {
                let path = dir.keep();
                tracing::info!(path = %path.display(), "preserving ephemeral data directory");
            }
            // dropping the TempDir removes the directory, errors ignored
        }
        self.state = InstanceState::NotStarted;
        Ok(())
    }

    async fn kill_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
    }
}

impl Drop for EphemeralMongo {
    fn drop(&mut self) {
        // the child is killed by kill_on_drop; only the preserve flag needs
        // handling before the TempDir goes away with the instance
        if self.preserve {
            if let Some(dir) = self.dir.take() {
                let _ = dir.keep();
            }
        }
    }
}
