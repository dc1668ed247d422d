//! # schema-ts
//!
//! Generate TypeScript declarations from PostgreSQL and MySQL catalog
//! metadata.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │           SchemaSource (PostgreSQL / MySQL)              │
//! │   tables, columns, enumerations from the catalog         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [typemap]
//! ┌─────────────────────────────────────────────────────────┐
//! │        TableDefinition with TypeScript target types      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [emitter + naming]
//! ┌─────────────────────────────────────────────────────────┐
//! │   interface / Fields namespace / enum unions / meta      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod emitter;
pub mod error;
pub mod generate;
pub mod metadata;
pub mod naming;
pub mod typemap;

pub use config::Options;
pub use error::{Error, Result};
pub use generate::{generate, generate_with_pool_size, Generator};
pub use naming::NameTransformer;
