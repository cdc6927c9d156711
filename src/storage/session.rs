//! Execution session shared by the loader and writer

use crate::config::{CredentialsDefinition, PipelineConfig};
use crate::error::{Error, Result};
use crate::storage::location::StorageLocation;
use chrono::Utc;
use object_store::ObjectStore;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Access key pair for S3-compatible stores
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Create credentials from an access key id and secret
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Read credentials from the process environment
    pub fn from_env(definition: &CredentialsDefinition) -> Result<Self> {
        Self::from_lookup(definition, |name| std::env::var(name).ok())
    }

    /// Read credentials through a variable lookup
    pub fn from_lookup<F>(definition: &CredentialsDefinition, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::missing_credentials(name))
        };

        Ok(Self {
            access_key_id: read(&definition.access_key_id_env)?,
            secret_access_key: read(&definition.secret_access_key_env)?,
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

/// Execution context for one pipeline run.
///
/// Opened before any storage access and closed after the write. Locations are
/// resolved through the session so that every store shares its credentials.
pub struct Session {
    /// Storage credentials, when any location needs them
    credentials: Option<Credentials>,
    /// Pre-built stores keyed by URL scheme
    mounts: HashMap<String, Arc<dyn ObjectStore>>,
    /// Identifier used for staging output
    run_id: String,
    /// When the session was opened
    opened_at: Instant,
}

impl Session {
    /// Create a session with explicit credentials
    pub fn new(credentials: Option<Credentials>) -> Self {
        let run_id = Utc::now().format("%Y%m%dT%H%M%S%3fZ").to_string();
        tracing::debug!(run_id = %run_id, "Session opened");
        Self {
            credentials,
            mounts: HashMap::new(),
            run_id,
            opened_at: Instant::now(),
        }
    }

    /// Open a session for a pipeline, loading credentials from the environment
    /// when any configured location is S3-compatible.
    pub fn open(config: &PipelineConfig) -> Result<Self> {
        let needs_credentials = config
            .locations()
            .into_iter()
            .any(StorageLocation::requires_credentials);

        let credentials = if needs_credentials {
            Some(Credentials::from_env(&config.credentials)?)
        } else {
            None
        };

        Ok(Self::new(credentials))
    }

    /// Route every `scheme://` URL to an existing store
    #[must_use]
    pub fn with_mount(mut self, scheme: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        self.mounts.insert(scheme.into(), store);
        self
    }

    /// Resolve a URL or local path to a storage location
    pub fn location(&self, url: &str) -> Result<StorageLocation> {
        if let Some((scheme, path)) = url.split_once("://") {
            if let Some(store) = self.mounts.get(scheme) {
                return Ok(StorageLocation::new(Arc::clone(store), path, scheme));
            }
        }
        StorageLocation::parse(url, self.credentials.as_ref())
    }

    /// Identifier of this run
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Close the session and release its stores
    pub fn close(self) {
        tracing::debug!(
            run_id = %self.run_id,
            elapsed_ms = self.opened_at.elapsed().as_millis() as u64,
            "Session closed"
        );
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("run_id", &self.run_id)
            .field("credentials", &self.credentials)
            .field("mounts", &self.mounts.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
