//! Auto-generated file banner.

use chrono::{DateTime, Utc};

use super::format::IndentWriter;
use crate::config::Options;

/// What the banner records about a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    /// Equivalent command line; the connection password must already be
    /// masked.
    pub command: String,
}

impl HeaderInfo {
    /// Banner for a run starting now.
    pub fn now(command: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.into(),
        }
    }
}

/// Reconstruct the CLI invocation that reproduces a run.
pub fn command_line(connection: &str, tables: &[String], schema: &str, options: &Options) -> String {
    let mut parts = vec![
        "schema-ts".to_string(),
        "generate".to_string(),
        "-c".to_string(),
        connection.to_string(),
    ];
    for table in tables {
        parts.push("-t".to_string());
        parts.push(table.clone());
    }
    parts.push("-s".to_string());
    parts.push(schema.to_string());

    if options.camel_case {
        parts.push("-C".to_string());
    }
    if options.singular_table_names {
        parts.push("--singular".to_string());
    }
    if options.meta {
        parts.push("-m".to_string());
    }
    parts.join(" ")
}

pub fn emit_header(w: &mut IndentWriter, info: &HeaderInfo) {
    w.write_line("/**");
    w.write_line(&format!(
        " * AUTO-GENERATED FILE @ {} - DO NOT EDIT!",
        info.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    w.write_line(" *");
    w.write_line(&format!(
        " * This file was automatically generated by schema-ts v{}",
        info.version
    ));
    w.write_line(&format!(" * $ {}", info.command));
    w.write_line(" *");
    w.write_line(" */");
    w.write_line("/* eslint-disable */");
}

pub fn render_header(info: &HeaderInfo) -> String {
    let mut w = IndentWriter::default();
    emit_header(&mut w, info);
    w.into_string()
}
