//! Node descriptor loading: implements `NodeSource` for files and stdin.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use waypoint_common::NodeDescriptor;

use crate::application::ports::NodeSource;

/// Reads a descriptor from a JSON or YAML file, or JSON on stdin for `-`.
pub struct FileNodeSource {
    path: PathBuf,
}

impl FileNodeSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_yaml(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
    }
}

impl NodeSource for FileNodeSource {
    async fn descriptor(&self) -> Result<NodeDescriptor> {
        if self.path.as_os_str() == "-" {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("cannot read node descriptor from stdin")?;
            return serde_json::from_str(&buf).context("cannot parse node descriptor from stdin");
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("cannot read {}", self.path.display()))?;
        if self.is_yaml() {
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", self.path.display()))
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("cannot parse {}", self.path.display()))
        }
    }
}
