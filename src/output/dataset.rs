//! Partitioned dataset writing and reading
//!
//! Layout: `{destination}/IPC_Description={category}/Country={country}/part-00000.parquet`
//!
//! Every partition is encoded before the destination is touched. Files are
//! first staged under `{destination}/_temporary/{run_id}/`. Once all of them
//! are staged they are renamed into place, and only then are previous objects
//! without a replacement deleted. The staging directory is removed whether or
//! not the swap succeeds.

use crate::aggregate::FinalRecord;
use crate::error::{Error, Result};
use crate::output::schema::{batch_to_records, records_to_batch};
use crate::output::writer::{decode_parquet, encode_parquet, ParquetWriterConfig};
use crate::storage::{Session, StorageLocation};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::path::{Path as ObjectPath, PathPart};
use object_store::{ObjectMeta, ObjectStore};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

/// Partition key for the category label
pub const CATEGORY_PARTITION: &str = "IPC_Description";

/// Partition key for the origin country
pub const COUNTRY_PARTITION: &str = "Country";

/// Directory holding in-flight files
pub const STAGING_DIR: &str = "_temporary";

/// Empty object written after a successful swap
pub const SUCCESS_MARKER: &str = "_SUCCESS";

const PART_FILE: &str = "part-00000.parquet";

/// Outcome of one dataset write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub destination: String,
    pub partitions: usize,
    pub rows: usize,
    pub bytes: usize,
    /// Objects from the previous dataset that were removed or overwritten
    pub replaced_objects: usize,
    pub duration_ms: u64,
}

/// Path of a partition's data file, relative to the dataset root
pub fn partition_path(category: &str, country: &str) -> ObjectPath {
    ObjectPath::from_iter([
        PathPart::from(format!("{CATEGORY_PARTITION}={category}")),
        PathPart::from(format!("{COUNTRY_PARTITION}={country}")),
        PathPart::from(PART_FILE),
    ])
}

/// Write final records to a location resolved through the session.
///
/// Every failure is reported as `WriteFailure`.
pub async fn write_dataset(
    session: &Session,
    location: &str,
    records: &[FinalRecord],
    config: &ParquetWriterConfig,
) -> Result<WriteReport> {
    let target = session
        .location(location)
        .map_err(|e| Error::write_failure(location, e.to_string()))?;

    write_partitioned(&target, records, config, session.run_id())
        .await
        .map_err(|e| match e {
            Error::WriteFailure { .. } => e,
            other => Error::write_failure(target.url(), other.to_string()),
        })
}

/// Replace the dataset at `target` with `records`
pub async fn write_partitioned(
    target: &StorageLocation,
    records: &[FinalRecord],
    config: &ParquetWriterConfig,
    run_id: &str,
) -> Result<WriteReport> {
    let started = Instant::now();

    let mut partitions: BTreeMap<(&str, &str), Vec<&FinalRecord>> = BTreeMap::new();
    for record in records {
        partitions
            .entry((record.category.as_str(), record.country.as_str()))
            .or_default()
            .push(record);
    }

    let mut files: Vec<(ObjectPath, Bytes)> = Vec::with_capacity(partitions.len());
    for ((category, country), rows) in &partitions {
        let batch = records_to_batch(rows)?;
        files.push((partition_path(category, country), encode_parquet(&batch, config)?));
    }

    let store = target.store();
    let root = target.path();
    let staging = join(root, &ObjectPath::from_iter([STAGING_DIR, run_id]));

    for (relative, data) in &files {
        let staged = join(&staging, relative);
        if let Err(e) = store.put(&staged, data.clone().into()).await {
            discard(store, &staging).await;
            return Err(Error::write_failure(
                target.url(),
                format!("staging {staged} failed: {e}"),
            ));
        }
    }
    tracing::debug!(
        staging = %staging,
        files = files.len(),
        compression = ?config.compression(),
        row_group_size = config.row_group_size(),
        "Staged partition files"
    );

    let relatives: Vec<&ObjectPath> = files.iter().map(|(relative, _)| relative).collect();
    let swapped = swap(store, root, &staging, &relatives).await;
    discard(store, &staging).await;
    let replaced = swapped.map_err(|e| Error::write_failure(target.url(), format!("swap failed: {e}")))?;

    let report = WriteReport {
        destination: target.url().to_string(),
        partitions: files.len(),
        rows: records.len(),
        bytes: files.iter().map(|(_, data)| data.len()).sum(),
        replaced_objects: replaced,
        duration_ms: started.elapsed().as_millis() as u64,
    };

    tracing::info!(
        destination = %report.destination,
        partitions = report.partitions,
        rows = report.rows,
        bytes = report.bytes,
        replaced = report.replaced_objects,
        "Wrote partitioned dataset"
    );

    Ok(report)
}

/// Read a dataset back from a location resolved through the session
pub async fn read_dataset(session: &Session, location: &str) -> Result<Vec<FinalRecord>> {
    read_partitioned(&session.location(location)?).await
}

/// Read every partition file under `target`, restoring partition columns from the path
pub async fn read_partitioned(target: &StorageLocation) -> Result<Vec<FinalRecord>> {
    let store = target.store();
    let root = target.path();
    let mut records = Vec::new();

    for path in list_objects(store, root).await? {
        if is_staging(&path, root) || path.extension() != Some("parquet") {
            continue;
        }

        let (category, country) = partition_values(&path, root)?;
        let data = store.get(&path).await?.bytes().await?;
        for batch in decode_parquet(data)? {
            records.extend(batch_to_records(&batch, &category, &country)?);
        }
    }

    Ok(records)
}

/// Append a relative path to a base path
fn join(base: &ObjectPath, relative: &ObjectPath) -> ObjectPath {
    base.parts().chain(relative.parts()).collect()
}

async fn list_objects(store: &Arc<dyn ObjectStore>, prefix: &ObjectPath) -> Result<Vec<ObjectPath>> {
    let prefix = (!prefix.as_ref().is_empty()).then_some(prefix);
    let objects: Vec<ObjectMeta> = store.list(prefix).try_collect().await?;
    Ok(objects.into_iter().map(|meta| meta.location).collect())
}

/// Whether `path` lives in the staging directory under `root`
fn is_staging(path: &ObjectPath, root: &ObjectPath) -> bool {
    path.prefix_match(root)
        .and_then(|mut rest| rest.next())
        .is_some_and(|first| first.as_ref() == STAGING_DIR)
}

/// Move staged files over the dataset at `root` and write the success marker.
///
/// Staged files are renamed onto their final paths before any previous
/// partition is deleted. Returns the number of previous objects removed or
/// overwritten.
async fn swap(
    store: &Arc<dyn ObjectStore>,
    root: &ObjectPath,
    staging: &ObjectPath,
    relatives: &[&ObjectPath],
) -> Result<usize> {
    let marker = join(root, &ObjectPath::from(SUCCESS_MARKER));
    let previous: Vec<ObjectPath> = list_objects(store, root)
        .await?
        .into_iter()
        .filter(|path| !is_staging(path, root))
        .collect();

    if previous.contains(&marker) {
        store.delete(&marker).await?;
    }

    let mut current = HashSet::with_capacity(relatives.len());
    for relative in relatives {
        let destination = join(root, relative);
        store.rename(&join(staging, relative), &destination).await?;
        current.insert(destination);
    }

    for path in previous.iter().filter(|path| **path != marker && !current.contains(*path)) {
        store.delete(path).await?;
    }

    store.put(&marker, Bytes::new().into()).await?;
    Ok(previous.len())
}

/// Remove a staging directory, logging failures
async fn discard(store: &Arc<dyn ObjectStore>, staging: &ObjectPath) {
    let leftovers = match list_objects(store, staging).await {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(staging = %staging, error = %e, "Failed to list staging files");
            return;
        }
    };

    for path in leftovers {
        if let Err(e) = store.delete(&path).await {
            tracing::warn!(path = %path, error = %e, "Failed to remove staging file");
        }
    }
}

/// Category and country encoded in a data file's path
fn partition_values(path: &ObjectPath, root: &ObjectPath) -> Result<(String, String)> {
    let mut category = None;
    let mut country = None;

    for part in path.prefix_match(root).into_iter().flatten() {
        let Some((key, value)) = part.as_ref().split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value)
            .map_err(|e| Error::output(format!("invalid partition value in {path}: {e}")))?
            .into_owned();
        match key {
            CATEGORY_PARTITION => category = Some(value),
            COUNTRY_PARTITION => country = Some(value),
            _ => {}
        }
    }

    match (category, country) {
        (Some(category), Some(country)) => Ok((category, country)),
        _ => Err(Error::output(format!(
            "{path} is not inside {CATEGORY_PARTITION}=/{COUNTRY_PARTITION}= directories"
        ))),
    }
}
