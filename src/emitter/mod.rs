//! TypeScript declaration emission.
//!
//! Every renderer writes through an [`IndentWriter`] with four-space
//! indentation, and every identifier goes through a
//! [`NameTransformer`](crate::naming::NameTransformer) and
//! [`normalize_name`].

pub mod declarations;
pub mod format;
pub mod header;

pub use declarations::{
    entity_name, render_entity, render_enumerations, render_field_namespace, render_meta,
};
pub use format::{is_reserved, normalize_name, quote_string, reserved_words, IndentWriter};
pub use header::{command_line, render_header, HeaderInfo};
