//! Identifier naming for emitted declarations.
//!
//! Every identifier the emitter writes goes through a [`NameTransformer`]:
//!
//! ```text
//! type names:    raw ──► singularize? ──► camelCase? ──► upper first
//! column names:  raw ──► camelCase?
//! ```
//!
//! Singularization runs before camel-casing because plural detection works
//! on whole `_`-separated words, which camel-casing would merge.

pub mod inflection;

use crate::config::Options;

/// Options-driven identifier transform.
#[derive(Debug, Clone, Copy)]
pub struct NameTransformer {
    camel_case: bool,
    singularize: bool,
}

impl NameTransformer {
    pub fn new(options: &Options) -> Self {
        Self {
            camel_case: options.camel_case,
            singularize: options.singular_table_names,
        }
    }

    /// Name of an emitted type (table interface, enum alias).
    ///
    /// The first character is always uppercased, even when camel-casing is
    /// off.
    pub fn transform_type_name(&self, raw: &str) -> String {
        let name = if self.singularize {
            inflection::singularize(raw)
        } else {
            raw.to_string()
        };
        let name = self.camel_case_name(&name);
        inflection::upper_first(&name)
    }

    /// Name of an emitted column member.
    pub fn transform_column_name(&self, raw: &str) -> String {
        self.camel_case_name(raw)
    }

    fn camel_case_name(&self, name: &str) -> String {
        if self.camel_case {
            inflection::camel_case(name)
        } else {
            name.to_string()
        }
    }
}

impl Default for NameTransformer {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}
