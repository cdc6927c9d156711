//! Output module
//!
//! Writes final records as a Hive-style partitioned Parquet dataset.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting final records to Arrow RecordBatches and back
//! - Encoding Parquet files in memory
//! - Writing the dataset partitioned by category and country, replacing
//!   whatever the destination held before
//! - Reading a written dataset back

mod dataset;
mod schema;
mod writer;

pub use dataset::{
    partition_path, read_dataset, read_partitioned, write_dataset, write_partitioned, WriteReport,
    CATEGORY_PARTITION, COUNTRY_PARTITION, STAGING_DIR, SUCCESS_MARKER,
};
pub use schema::{batch_to_records, file_schema, records_to_batch};
pub use writer::{decode_parquet, encode_parquet, ParquetWriterConfig};
