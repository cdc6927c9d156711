//! Source loader module
//!
//! Reads delimited text tables from storage.
//!
//! # Overview
//!
//! The source module provides:
//! - `RawTable` - headers plus rows of optional cells, in file order
//! - `load_table` - a single read of one storage location into a `RawTable`
//! - `load_dictionary` - the classification dictionary (input B)

mod loader;
mod table;

pub use loader::{load_dictionary, load_table};
pub use table::RawTable;
