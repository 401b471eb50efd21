//! Output rendering (JSON, YAML, tables, plain text)

use anyhow::Result;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::config::value_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
    Text,
    Yaml,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["json", "table", "text", "yaml"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Text => "text",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "text" => Ok(OutputFormat::Text),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// One output row; fields keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self.fields.iter().cloned().collect();
        Value::Object(map)
    }
}

/// Render records in `format`. A single record renders as an object in
/// JSON/YAML, several as a list.
pub fn render_records(format: OutputFormat, records: &[Record]) -> Result<String> {
    let document = match records {
        [single] => single.to_value(),
        many => Value::Array(many.iter().map(Record::to_value).collect()),
    };

    let rendered = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&document)?),
        OutputFormat::Yaml => serde_yaml::to_string(&document)?,
        OutputFormat::Table => render_table(records),
        OutputFormat::Text => render_text(records),
    };
    Ok(rendered)
}

fn render_text(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| {
            record
                .fields
                .iter()
                .map(|(key, value)| format!("{}: {}\n", key, value_to_string(value)))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let headers: Vec<String> = first.fields.iter().map(|(k, _)| k.to_uppercase()).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| record.fields.iter().map(|(_, v)| value_to_string(v)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_row = |cells: &[String]| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{}\n", line.trim_end())
    };

    let mut out = format_row(headers.as_slice());
    for row in &rows {
        out.push_str(&format_row(row.as_slice()));
    }
    out
}
