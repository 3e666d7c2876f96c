//! # Skeleton Documents
//!
//! Every receipt starts from two fixed fragments:
//!
//! - **head**: a full template document (`{"panels": [...]}`) carrying the
//!   shop title, the order-time field and panel metadata.
//! - **tail**: a bare element list (`{"printElements": [...]}`) appended
//!   after the order details.
//!
//! Defaults are compiled into the binary from `assets/skeleton/`. A
//! deployment can point at another directory holding files with the same
//! names.

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::types::{PrintElement, TemplateDocument};
use crate::error::ReceiptError;

/// Embedded default skeletons.
static SKELETON_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets/skeleton");

/// File name of the head fragment.
pub const HEAD_FILE: &str = "print_empty_head.json";

/// File name of the tail fragment.
pub const TAIL_FILE: &str = "print_empty_tail.json";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TailFragment {
    print_elements: Vec<PrintElement>,
}

/// The pair of skeleton fragments a build clones from.
///
/// Immutable after construction; builds only ever clone out of it, so one
/// instance can back any number of concurrent builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    head: TemplateDocument,
    tail: Vec<PrintElement>,
}

impl Skeleton {
    /// Wrap already-parsed fragments. The head must have at least one panel.
    pub fn new(head: TemplateDocument, tail: Vec<PrintElement>) -> Result<Self, ReceiptError> {
        if head.panels.is_empty() {
            return Err(ReceiptError::Skeleton(
                "head skeleton has no panels".to_string(),
            ));
        }
        Ok(Self { head, tail })
    }

    /// Parse both fragments from JSON text.
    pub fn from_json(head: &str, tail: &str) -> Result<Self, ReceiptError> {
        let head: TemplateDocument = serde_json::from_str(head)
            .map_err(|e| ReceiptError::Skeleton(format!("head: {}", e)))?;
        let tail: TailFragment = serde_json::from_str(tail)
            .map_err(|e| ReceiptError::Skeleton(format!("tail: {}", e)))?;
        Self::new(head, tail.print_elements)
    }

    /// The skeletons shipped with the crate.
    pub fn embedded() -> Result<Self, ReceiptError> {
        let head = embedded_file(HEAD_FILE)?;
        let tail = embedded_file(TAIL_FILE)?;
        Self::from_json(head, tail)
    }

    /// Load `print_empty_head.json` and `print_empty_tail.json` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, ReceiptError> {
        let head = fs::read_to_string(dir.join(HEAD_FILE))?;
        let tail = fs::read_to_string(dir.join(TAIL_FILE))?;
        Self::from_json(&head, &tail)
    }

    /// The head document.
    pub fn head(&self) -> &TemplateDocument {
        &self.head
    }

    /// The tail elements.
    pub fn tail(&self) -> &[PrintElement] {
        &self.tail
    }
}

fn embedded_file(name: &str) -> Result<&'static str, ReceiptError> {
    SKELETON_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| ReceiptError::Skeleton(format!("embedded {} missing", name)))
}
