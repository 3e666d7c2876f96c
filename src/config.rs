//! # Layout Configuration
//!
//! Where the skeletons and style tokens come from. Everything defaults to
//! what ships inside the crate; a deployment can override the skeleton
//! directory, the style sheet, or both.
//!
//! ```
//! use canteen_receipt::config::LayoutConfig;
//!
//! let layout = LayoutConfig::default().load()?;
//! assert_eq!(layout.styles().h6.font_size, Some(12.0));
//! # Ok::<(), canteen_receipt::ReceiptError>(())
//! ```

use std::fs;
use std::path::PathBuf;

use crate::error::ReceiptError;
use crate::layout::ReceiptLayout;
use crate::template::{Skeleton, StyleSheet};

/// Sources for a [`ReceiptLayout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Directory holding `print_empty_head.json` and `print_empty_tail.json`.
    /// `None` uses the embedded skeletons.
    pub skeleton_dir: Option<PathBuf>,
    /// JSON style sheet; tokens it omits keep their defaults.
    pub styles_path: Option<PathBuf>,
}

impl LayoutConfig {
    /// Load skeletons and styles and assemble the layout builder.
    pub fn load(&self) -> Result<ReceiptLayout, ReceiptError> {
        let skeleton = match &self.skeleton_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "loading skeletons");
                Skeleton::from_dir(dir)?
            }
            None => Skeleton::embedded()?,
        };

        let styles = match &self.styles_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading style sheet");
                let json = fs::read_to_string(path)?;
                serde_json::from_str::<StyleSheet>(&json)?
            }
            None => StyleSheet::default(),
        };

        Ok(ReceiptLayout::new(skeleton).with_styles(styles))
    }
}
