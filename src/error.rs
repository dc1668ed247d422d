//! Error types for catalog introspection and declaration generation.

use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a generation run.
///
/// Unmappable column types are deliberately absent: the type mapper
/// degrades them to `any` and reports a warning instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The connection string could not be parsed.
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// The connection string names a scheme no backend handles.
    #[error("unsupported database driver: {0}. Supported: postgres, mysql")]
    UnsupportedDriver(String),

    /// The database could not be reached or rejected the credentials.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A catalog query failed.
    #[error("catalog query failed while {context}: {source}")]
    CatalogQuery {
        /// What the query was loading.
        context: String,
        /// Driver error.
        #[source]
        source: sqlx::Error,
    },

    /// A catalog row did not have the expected shape.
    #[error("malformed catalog row: missing column `{column}`")]
    MalformedRow {
        /// Column label that was expected.
        column: String,
    },

    /// Two synthesized enumerations share a name but not their labels.
    #[error(
        "Multiple enums with the same name and contradicting types were found: {column}: {existing:?} and {found:?}"
    )]
    EnumConflict {
        /// Column the second definition came from.
        column: String,
        /// Labels already recorded under the name.
        existing: Vec<String>,
        /// Labels that contradict them.
        found: Vec<String>,
    },
}

impl Error {
    /// Create a catalog query error with context about what was being loaded.
    pub fn catalog(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::CatalogQuery {
            context: context.into(),
            source,
        }
    }

    /// Check if this error happened before any catalog query ran.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConnectionString(_) | Self::UnsupportedDriver(_) | Self::Connection(_)
        )
    }

    /// Format error with full details including the error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}
