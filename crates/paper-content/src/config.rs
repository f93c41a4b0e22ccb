/*
 * config.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Content directory configuration (`_paper.yml`).
 */

//! Content directory configuration.
//!
//! A content directory may carry a `_paper.yml` next to its JSON records:
//!
//! ```yaml
//! toc: toc.json
//! bibliography: bibliography.json
//! bibliography-file: bibliography
//! parallel: true
//! derive-toc: true
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the configuration file inside a content directory.
pub const CONFIG_FILE: &str = "_paper.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContentConfig {
    /// TOC record file name.
    pub toc: String,
    /// Bibliography record file name.
    pub bibliography: String,
    /// Content file (without extension) whose `\bibitem` text supplies the
    /// bibliography when no bibliography record exists. It is never treated
    /// as a paper section.
    pub bibliography_file: String,
    /// Resolve content files on the rayon pool.
    pub parallel: bool,
    /// Derive the TOC from section records and headings when the TOC record
    /// is missing or degraded.
    pub derive_toc: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            toc: "toc.json".to_string(),
            bibliography: "bibliography.json".to_string(),
            bibliography_file: "bibliography".to_string(),
            parallel: true,
            derive_toc: true,
        }
    }
}

impl ContentConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read `_paper.yml` from `dir`, or return the defaults if there is none.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded content configuration");
        Ok(config)
    }
}
