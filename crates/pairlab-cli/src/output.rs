use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::envelope::Envelope;
use crate::error::CliError;

/// Flat tabular view of a command result, used by the table and CSV formats.
///
/// Nested objects become dotted columns (`critical_values.5%`); `null`
/// cells are undefined values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Columns are the union of every record's keys in first-seen order;
    /// a record missing a column gets `null` there.
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self, CliError> {
        let mut flattened = Vec::with_capacity(records.len());
        let mut columns = Vec::<String>::new();
        for record in records {
            let mut flat = Map::new();
            flatten_into(&mut flat, None, serde_json::to_value(record)?);
            for key in flat.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
            flattened.push(flat);
        }

        let rows = flattened
            .iter()
            .map(|flat| {
                columns
                    .iter()
                    .map(|column| flat.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }
}

fn flatten_into(out: &mut Map<String, Value>, prefix: Option<&str>, value: Value) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                let key = match prefix {
                    Some(prefix) => format!("{prefix}.{key}"),
                    None => key,
                };
                flatten_into(out, Some(&key), field);
            }
        }
        other => {
            out.insert(prefix.unwrap_or("value").to_owned(), other);
        }
    }
}

pub fn render(
    envelope: &Envelope<Value>,
    table: &Table,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, envelope, table, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn render_to<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    table: &Table,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(out, envelope, table)?,
        OutputFormat::Csv => render_csv(out, table)?,
    }
    Ok(())
}

fn render_table<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    table: &Table,
) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    if table.is_empty() {
        writeln!(out, "data:")?;
        let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
        for line in pretty_data.lines() {
            writeln!(out, "  {line}")?;
        }
    } else {
        write_ascii_table(out, table)?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

fn write_ascii_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let cells = table
        .rows
        .iter()
        .map(|row| row.iter().map(table_cell).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let widths = table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].len())
                .chain([column.len()])
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    writeln!(out, "+{separator}+")?;
    write_row(out, &table.columns, &widths)?;
    writeln!(out, "+{separator}+")?;
    for row in &cells {
        write_row(out, row, &widths)?;
    }
    writeln!(out, "+{separator}+")
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!(" {cell:<width$} "))
        .collect::<Vec<_>>()
        .join("|");
    writeln!(out, "|{line}|")
}

fn table_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("n/a"),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => integer.to_string(),
            (None, Some(float)) => format!("{float:.4}"),
            _ => number.to_string(),
        },
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn render_csv<W: Write>(out: &mut W, table: &Table) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_writer(out);
    let csv_error = |source| CliError::Csv {
        path: "<stdout>".into(),
        source,
    };
    writer.write_record(&table.columns).map_err(csv_error)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(csv_cell))
            .map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
