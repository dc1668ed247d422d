//! Generation options.

use serde::{Deserialize, Serialize};

/// Options resolved once per invocation.
///
/// Only naming and the optional output blocks depend on these; catalog
/// introspection ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// Convert table and column names to camel case.
    pub camel_case: bool,

    /// Prepend the auto-generated banner.
    pub write_header: bool,

    /// Convert table names from plural to singular.
    pub singular_table_names: bool,

    /// Emit a meta object per table describing its database types.
    pub meta: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            camel_case: false,
            write_header: true,
            singular_table_names: false,
            meta: false,
        }
    }
}

impl Options {
    /// Options with every transform and optional block turned off.
    pub fn plain() -> Self {
        Self {
            write_header: false,
            ..Self::default()
        }
    }

    pub fn with_camel_case(mut self, enabled: bool) -> Self {
        self.camel_case = enabled;
        self
    }

    pub fn with_header(mut self, enabled: bool) -> Self {
        self.write_header = enabled;
        self
    }

    pub fn with_singular_table_names(mut self, enabled: bool) -> Self {
        self.singular_table_names = enabled;
        self
    }

    pub fn with_meta(mut self, enabled: bool) -> Self {
        self.meta = enabled;
        self
    }
}
