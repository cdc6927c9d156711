//! Classifier module
//!
//! Expands each patent record into one row per classification code and maps
//! every code to an IPC section category.
//!
//! # Overview
//!
//! - `Section` - the closed set of IPC sections `A`..=`H`
//! - `ClassificationDictionary` - total mapping from section to category label
//! - `resolve` - primary lookup on the first character, then a left-to-right
//!   fallback scan for the first section letter
//! - `classify` - one `ExpandedRecord` per code token
//!
//! Tokens with no section letter at all are labelled [`UNCLASSIFIED`].

mod dictionary;
mod resolver;

pub use dictionary::{ClassificationDictionary, Section, UNCLASSIFIED};
pub use resolver::{
    classify, resolve, split_codes, ClassifyReport, ExpandedRecord, Resolution, CODE_DELIMITER,
};

#[cfg(test)]
mod tests;
