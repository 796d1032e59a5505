//! TOML route tables.
//!
//! ```toml
//! [[route]]
//! pattern = "/"
//! handler = "Home"
//!
//! [[route]]
//! pattern = "/users/:number"
//! handler = "UserHandler?tab=profile"
//! ```
//!
//! Routes keep the order they are declared in, so the first matching
//! `[[route]]` entry wins.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toro_core::{RouteError, RouteTable};

/// Error loading a route table from TOML.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read route file `{path}`")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not valid TOML or has the wrong shape.
    #[error("invalid route configuration")]
    Parse(#[from] toml::de::Error),
    /// The routes are valid TOML but do not form a valid table.
    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Document root.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteConfig {
    #[serde(default)]
    route: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteEntry {
    pattern: String,
    handler: String,
}

/// Parse a TOML document into a route table.
pub fn load_routes(source: &str) -> Result<RouteTable, ConfigError> {
    let config: RouteConfig = toml::from_str(source)?;

    let mut builder = RouteTable::builder();
    for entry in config.route {
        builder.push(entry.pattern, entry.handler);
    }
    let routes = builder.build()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(routes = routes.len(), "loaded route table");

    Ok(routes)
}

/// Read and parse a TOML route file.
pub fn load_routes_file(path: impl AsRef<Path>) -> Result<RouteTable, ConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_routes(&source)
}
