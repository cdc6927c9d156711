//! Storage locations (S3, R2, GCS, Azure, local filesystem)

use crate::error::{Error, Result};
use crate::storage::session::Credentials;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;

/// A path inside an object store, parsed from a URL
#[derive(Debug, Clone)]
pub struct StorageLocation {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Object (or prefix) within the bucket/container
    path: ObjectPath,
    /// URL scheme for logging
    scheme: String,
    /// Location as configured
    url: String,
}

impl StorageLocation {
    /// Wrap an existing store
    pub fn new(store: Arc<dyn ObjectStore>, path: &str, scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        let path = path.trim_matches('/');
        Self {
            store,
            path: ObjectPath::from(path),
            url: format!("{scheme}://{path}"),
            scheme,
        }
    }

    /// Parse a location URL and create the appropriate object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path` - AWS S3
    /// - `r2://bucket/path` - Cloudflare R2 (S3-compatible)
    /// - `gs://bucket/path` - Google Cloud Storage
    /// - `az://container/path` - Azure Blob Storage
    /// - `/local/path`, `./path` or `file:///path` - Local filesystem
    pub fn parse(url: &str, credentials: Option<&Credentials>) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url, false, credentials)
        } else if url.starts_with("r2://") {
            Self::parse_s3(url, true, credentials)
        } else if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else {
            Self::parse_local(url)
        }
    }

    /// Whether a URL needs S3-style access keys
    pub fn requires_credentials(url: &str) -> bool {
        url.starts_with("s3://") || url.starts_with("r2://")
    }

    /// Split `scheme://bucket/prefix` into bucket and prefix
    fn split_bucket<'a>(url: &'a str, scheme: &str) -> Result<(&'a str, &'a str)> {
        let without_scheme = url
            .strip_prefix(&format!("{scheme}://"))
            .ok_or_else(|| Error::config(format!("Invalid {scheme} URL: {url}")))?;

        let (bucket, prefix) = without_scheme
            .split_once('/')
            .unwrap_or((without_scheme, ""));

        if bucket.is_empty() {
            return Err(Error::config(format!("Missing bucket in URL: {url}")));
        }
        Ok((bucket, prefix.trim_matches('/')))
    }

    /// Parse S3 or R2 URL
    fn parse_s3(url: &str, is_r2: bool, credentials: Option<&Credentials>) -> Result<Self> {
        let scheme = if is_r2 { "r2" } else { "s3" };
        let (bucket, prefix) = Self::split_bucket(url, scheme)?;

        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);

        if let Some(credentials) = credentials {
            builder = builder
                .with_access_key_id(credentials.access_key_id())
                .with_secret_access_key(credentials.secret_access_key());
        }

        // R2 endpoint: https://<account_id>.r2.cloudflarestorage.com
        if is_r2 {
            if let Ok(endpoint) = std::env::var("R2_ENDPOINT_URL") {
                builder = builder.with_endpoint(endpoint);
            }
        }

        let store = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create {scheme} client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            path: ObjectPath::from(prefix),
            scheme: scheme.to_string(),
            url: url.to_string(),
        })
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let (bucket, prefix) = Self::split_bucket(url, "gs")?;

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            path: ObjectPath::from(prefix),
            scheme: "gs".to_string(),
            url: url.to_string(),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let (container, prefix) = Self::split_bucket(url, "az")?;

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            path: ObjectPath::from(prefix),
            scheme: "az".to_string(),
            url: url.to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(url: &str) -> Result<Self> {
        let path = url.strip_prefix("file://").unwrap_or(url);
        if path.is_empty() {
            return Err(Error::config("Empty local path"));
        }

        let absolute = std::path::absolute(path)
            .map_err(|e| Error::config(format!("Invalid local path {path}: {e}")))?;
        let object_path = ObjectPath::from_absolute_path(&absolute)
            .map_err(|e| Error::config(format!("Invalid local path {path}: {e}")))?;

        Ok(Self {
            store: Arc::new(LocalFileSystem::new()),
            path: object_path,
            scheme: "file".to_string(),
            url: url.to_string(),
        })
    }

    /// Get the scheme (s3, r2, gs, az, file, or a mounted scheme)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Location as configured
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Object path (or prefix) inside the store
    pub fn path(&self) -> &ObjectPath {
        &self.path
    }

    /// Underlying object store
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// Read the whole object at this location
    pub async fn read(&self) -> Result<Bytes> {
        let result = self.store.get(&self.path).await?;
        Ok(result.bytes().await?)
    }
}
