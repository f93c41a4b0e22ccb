/*
 * error.rs
 * Copyright (c) 2025 HAPD Paper Authors
 *
 * Error types for paper-content.
 */

//! Error types for paper-content.
//!
//! Only text that cannot be read or parsed at all is an error. A record that
//! parses but has the wrong shape degrades and is reported as a diagnostic
//! instead (see [`crate::Loaded`]).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            name: name.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
