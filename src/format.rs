//! Output formatting for schemas and validation results: text tables and JSON.

use crate::reconcile::{Provided, Summary, Verdict};
use crate::schema::{Annotation, Property};
use serde::Serialize;
use serde_json::Value;

/// Widest a table cell may get before it is clipped.
pub const MAX_CELL_WIDTH: usize = 80;

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: table, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct ValidationReport<'a> {
    verdicts: Vec<&'a Verdict>,
    summary: Summary,
}

/// Render declared properties: name, default, annotations, description.
pub fn render_schema(properties: &[Property], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(properties),
        OutputFormat::Table => {
            let mut table = Table::new(&["Property", "Default", "Annotations", "Description"]);
            for property in properties {
                table.push(vec![
                    property.name.clone(),
                    format_value(&property.default),
                    format_annotations(&property.annotations),
                    property.description.clone(),
                ]);
            }
            Ok(table.render())
        }
    }
}

/// Render verdicts, declared properties first and then obsolete keys by path.
pub fn render_verdicts(verdicts: &[Verdict], format: OutputFormat) -> serde_json::Result<String> {
    let ordered = presentation_order(verdicts);
    let summary = Summary::of(verdicts);

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&ValidationReport {
            verdicts: ordered,
            summary,
        }),
        OutputFormat::Table => {
            let mut table = Table::new(&[
                "Property",
                "Annotations",
                "Provided",
                "Status",
                "Default Value",
                "Actual Value",
            ]);
            for verdict in ordered {
                table.push(vec![
                    verdict.property.clone(),
                    format_annotations(&verdict.annotations),
                    verdict.provided.to_string(),
                    verdict.status.to_string(),
                    format_value(&verdict.default_value),
                    format_value(&verdict.actual_value),
                ]);
            }
            let mut out = table.render();
            out.push('\n');
            out.push_str(&format_summary(&summary));
            out.push('\n');
            Ok(out)
        }
    }
}

/// One-line verdict counts.
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "{} provided, {} missing, {} obsolete: {} flaw(s)",
        summary.provided, summary.missing, summary.obsolete, summary.flaws
    )
}

fn presentation_order(verdicts: &[Verdict]) -> Vec<&Verdict> {
    let (mut obsolete, mut ordered): (Vec<&Verdict>, Vec<&Verdict>) = verdicts
        .iter()
        .partition(|v| v.provided == Provided::Obsolete);
    obsolete.sort_by(|a, b| a.property.cmp(&b.property));
    ordered.extend(obsolete);
    ordered
}

/// Format a value for a table cell.
///
/// Null is `<nil>`, strings are bare, sequences are space-separated in
/// brackets and mappings are compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "<nil>".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", items.join(" "))
        }
        Value::Object(_) => value.to_string(),
    }
}

pub fn format_annotations(annotations: &[Annotation]) -> String {
    let names: Vec<&str> = annotations.iter().map(|a| a.as_str()).collect();
    format!("[{}]", names.join(" "))
}

/// Left-aligned pipe table with a header separator row.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row.into_iter().map(|cell| clean_cell(&cell)).collect());
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&render_row(&self.headers, &widths));
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&render_row(&separator, &widths));
        for row in &self.rows {
            out.push_str(&render_row(row, &widths));
        }
        out
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

/// Single-line, pipe-escaped, clipped cell text.
fn clean_cell(text: &str) -> String {
    let flat = text.replace(['\r', '\n'], " ").replace('|', "\\|");
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let clipped: String = flat.chars().take(MAX_CELL_WIDTH - 3).collect();
    format!("{}...", clipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::Status;
    use serde_json::json;

    fn verdict(property: &str, provided: Provided, status: Status) -> Verdict {
        Verdict {
            property: property.to_string(),
            annotations: Vec::new(),
            provided,
            status,
            default_value: Value::Null,
            actual_value: json!("x"),
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!(null)), "<nil>");
        assert_eq!(format_value(&json!("abc")), "abc");
        assert_eq!(format_value(&json!(3.5)), "3.5");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(["a", "b", null])), "[a b <nil>]");
        assert_eq!(format_value(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn test_format_annotations() {
        assert_eq!(format_annotations(&[]), "[]");
        assert_eq!(
            format_annotations(&[Annotation::Required, Annotation::Deprecated]),
            "[required deprecated]"
        );
    }

    #[test]
    fn test_render_schema_table() {
        let properties = vec![
            Property::new("server.port")
                .with_annotation(Annotation::Required)
                .with_default(json!(8080))
                .with_description("Listen port"),
        ];
        let out = render_schema(&properties, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "| Property    | Default | Annotations | Description |"
        );
        assert_eq!(
            lines[1],
            "| ----------- | ------- | ----------- | ----------- |"
        );
        assert_eq!(
            lines[2],
            "| server.port | 8080    | [required]  | Listen port |"
        );
    }

    #[test]
    fn test_render_verdicts_orders_obsolete_by_path() {
        let verdicts = vec![
            verdict("declared", Provided::Provided, Status::Valid),
            verdict("zeta", Provided::Obsolete, Status::Flaw),
            verdict("alpha", Provided::Obsolete, Status::Flaw),
        ];
        let out = render_verdicts(&verdicts, OutputFormat::Table).unwrap();
        let names: Vec<&str> = out
            .lines()
            .skip(2)
            .filter_map(|l| l.strip_prefix("| "))
            .filter_map(|l| l.split_whitespace().next())
            .collect();

        assert_eq!(names, vec!["declared", "alpha", "zeta"]);
        assert!(out.ends_with("1 provided, 0 missing, 2 obsolete: 2 flaw(s)\n"));
    }

    #[test]
    fn test_render_verdicts_json() {
        let verdicts = vec![verdict("a", Provided::Missing, Status::Flaw)];
        let out = render_verdicts(&verdicts, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed["verdicts"][0]["property"], "a");
        assert_eq!(parsed["verdicts"][0]["provided"], "missing");
        assert_eq!(parsed["verdicts"][0]["status"], "flaw");
        assert_eq!(parsed["summary"]["flaws"], 1);
    }

    #[test]
    fn test_cells_are_cleaned() {
        assert_eq!(clean_cell("a|b\nc"), "a\\|b c");
        let long = "x".repeat(200);
        let clipped = clean_cell(&long);
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with("..."));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("table".parse::<OutputFormat>(), Ok(OutputFormat::Table));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
