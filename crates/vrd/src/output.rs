//! Output formatting: table, JSON, plain.
//!
//! Table uses `tabled`, JSON uses serde, plain emits one value per line.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Plain => data.iter().map(id_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single item. Table mode uses `detail_fn` for a key/value view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::Plain => id_fn(data),
    })
}

pub fn print_output(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Aligned `key  value` lines for detail views.
pub fn detail_lines(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Item {
        name: &'static str,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![Item { name: "WAN" }, Item { name: "LAN" }]
    }

    #[test]
    fn plain_lists_one_per_line() {
        let out = render_list(
            OutputFormat::Plain,
            &items(),
            |i| Row { name: i.name },
            |i| i.name.to_string(),
        )
        .unwrap();
        assert_eq!(out, "WAN\nLAN");
    }

    #[test]
    fn table_has_header() {
        let out = render_list(
            OutputFormat::Table,
            &items(),
            |i| Row { name: i.name },
            |i| i.name.to_string(),
        )
        .unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains("WAN"));
    }

    #[test]
    fn json_serializes_source_data() {
        let out = render_list(
            OutputFormat::Json,
            &items(),
            |i| Row { name: i.name },
            |i| i.name.to_string(),
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["name"], "LAN");
    }

    #[test]
    fn detail_lines_align_keys() {
        let out = detail_lines(&[("Network", "WAN".into()), ("IP", "203.0.113.7".into())]);
        assert_eq!(out, "Network  WAN\nIP       203.0.113.7");
    }
}
