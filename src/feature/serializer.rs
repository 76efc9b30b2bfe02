//! Rendering of [`FeatureFile`] values.
//!
//! Gherkin and Markdown go through askama templates under `templates/`; the
//! view structs below pre-format every line (table alignment, indentation,
//! blank separators) so the templates only lay sections out. JSON is the
//! serde encoding of the feature itself.

use super::model::FeatureFile;
use crate::error::{Result, ScenarioError};
use crate::scenario::{DataTable, Step, TestScenario};
use askama::Template;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "feature")]
    Gherkin,
    Json,
    #[serde(alias = "md")]
    Markdown,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Gherkin => "gherkin",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// Extension used for files written in this format.
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Gherkin => "feature",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ScenarioError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gherkin" | "feature" => Ok(OutputFormat::Gherkin),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(ScenarioError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// A group of output lines, each already indented. `""` renders a blank line.
struct Block {
    lines: Vec<String>,
}

#[derive(Template)]
#[template(path = "feature.gherkin.txt", escape = "none")]
struct GherkinTemplate {
    tags: Option<String>,
    name: String,
    description: Vec<String>,
    blocks: Vec<Block>,
}

#[derive(Template)]
#[template(path = "feature.md.txt", escape = "none")]
struct MarkdownTemplate {
    name: String,
    description: Vec<String>,
    properties: Vec<String>,
    blocks: Vec<Block>,
}

fn escape_cell(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', "\\n")
}

/// Table rows with columns padded to a common width.
fn aligned_rows(headers: &[String], rows: &[Vec<String>], indent: &str) -> Vec<String> {
    let escaped: Vec<Vec<String>> = std::iter::once(headers)
        .chain(rows.iter().map(Vec::as_slice))
        .map(|row| row.iter().map(|c| escape_cell(c)).collect())
        .collect();

    let columns = escaped.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            escaped
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    escaped
        .iter()
        .map(|row| {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or_default();
                    let pad = width - cell.chars().count();
                    format!(" {cell}{} ", " ".repeat(pad))
                })
                .collect();
            format!("{indent}|{}|", cells.join("|"))
        })
        .collect()
}

fn gherkin_steps(steps: &[Step], lines: &mut Vec<String>) {
    for step in steps {
        lines.push(format!("    {} {}", step.keyword, step.text));
        if let Some(table) = &step.table {
            lines.extend(aligned_rows(&table.headers, &table.rows, "      "));
        }
    }
}

fn gherkin_scenario(scenario: &TestScenario) -> Block {
    let mut lines = vec![String::new()];
    if !scenario.tags.is_empty() {
        lines.push(format!("  {}", scenario.tags.join(" ")));
    }
    let keyword = if scenario.is_outline() {
        "Scenario Outline"
    } else {
        "Scenario"
    };
    lines.push(format!("  {keyword}: {}", scenario.title));
    if let Some(description) = &scenario.description {
        lines.extend(description.lines().map(|l| format!("    {l}")));
    }
    gherkin_steps(&scenario.steps, &mut lines);
    if let Some(examples) = &scenario.examples {
        lines.push(String::new());
        match &examples.name {
            Some(name) => lines.push(format!("    Examples: {name}")),
            None => lines.push("    Examples:".to_string()),
        }
        lines.extend(aligned_rows(&examples.headers, &examples.rows, "      "));
    }
    Block { lines }
}

fn markdown_table(table: &DataTable, indent: &str) -> Vec<String> {
    let mut rows = aligned_rows(&table.headers, &table.rows, indent);
    let separator = format!(
        "{indent}|{}|",
        vec![" --- "; table.headers.len()].join("|")
    );
    rows.insert(1.min(rows.len()), separator);
    rows
}

fn markdown_steps(steps: &[Step], lines: &mut Vec<String>) {
    for step in steps {
        lines.push(format!("- **{}** {}", step.keyword, step.text));
        if let Some(table) = &step.table {
            lines.push(String::new());
            lines.extend(markdown_table(table, "  "));
            lines.push(String::new());
        }
    }
}

fn markdown_scenario(scenario: &TestScenario) -> Block {
    let keyword = if scenario.is_outline() {
        "Scenario Outline"
    } else {
        "Scenario"
    };
    let mut lines = vec![
        String::new(),
        format!("## {keyword}: {}", scenario.title),
        String::new(),
        format!(
            "Type: `{}` | Tags: {}",
            scenario.scenario_type,
            scenario
                .tags
                .iter()
                .map(|t| format!("`{t}`"))
                .collect::<Vec<_>>()
                .join(" ")
        ),
    ];
    if let Some(description) = &scenario.description {
        lines.push(String::new());
        lines.extend(description.lines().map(str::to_string));
    }
    lines.push(String::new());
    markdown_steps(&scenario.steps, &mut lines);
    if let Some(examples) = &scenario.examples {
        if lines.last().is_some_and(|l| !l.is_empty()) {
            lines.push(String::new());
        }
        lines.push("### Examples".to_string());
        lines.push(String::new());
        let table = DataTable {
            headers: examples.headers.clone(),
            rows: examples.rows.clone(),
        };
        lines.extend(markdown_table(&table, ""));
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    Block { lines }
}

/// Trim the template's leading separator and end with exactly one newline.
fn finish(rendered: String) -> String {
    let mut out = rendered
        .strip_prefix('\n')
        .unwrap_or(&rendered)
        .trim_end_matches('\n')
        .to_string();
    out.push('\n');
    out
}

/// Renders features to text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureSerializer;

impl FeatureSerializer {
    pub fn new() -> Self {
        FeatureSerializer
    }

    /// Render `feature` in `format`. Identical input renders identical bytes.
    pub fn serialize(&self, feature: &FeatureFile, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Gherkin => self.to_gherkin(feature),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(feature)?;
                out.push('\n');
                Ok(out)
            }
            OutputFormat::Markdown => self.to_markdown(feature),
        }
    }

    /// Like [`serialize`](Self::serialize) with the format given by name.
    ///
    /// # Errors
    ///
    /// `unsupported_format` for names other than gherkin, json or markdown.
    pub fn serialize_named(&self, feature: &FeatureFile, format: &str) -> Result<String> {
        self.serialize(feature, format.parse()?)
    }

    fn to_gherkin(&self, feature: &FeatureFile) -> Result<String> {
        let mut blocks = Vec::with_capacity(feature.scenarios.len() + 1);
        if let Some(background) = &feature.background {
            let mut lines = vec![String::new(), "  Background:".to_string()];
            gherkin_steps(&background.steps, &mut lines);
            blocks.push(Block { lines });
        }
        blocks.extend(feature.scenarios.iter().map(gherkin_scenario));

        let template = GherkinTemplate {
            tags: (!feature.tags.is_empty()).then(|| feature.tags.join(" ")),
            name: feature.name.clone(),
            description: feature
                .description
                .as_deref()
                .map(|d| d.lines().map(str::to_string).collect())
                .unwrap_or_default(),
            blocks,
        };
        Ok(finish(template.render()?))
    }

    fn to_markdown(&self, feature: &FeatureFile) -> Result<String> {
        let meta = &feature.metadata;
        let mut properties = vec![
            format!("| Method | `{}` |", feature.method),
            format!("| Path | `{}` |", escape_cell(&feature.path)),
            format!("| Operation | `{}` |", escape_cell(&meta.operation_id)),
            format!(
                "| Specification | {} {} |",
                escape_cell(&meta.spec_title),
                escape_cell(&meta.spec_version)
            ),
        ];
        if !feature.tags.is_empty() {
            properties.push(format!("| Tags | {} |", feature.tags.join(" ")));
        }
        properties.push(format!("| Scenarios | {} |", feature.scenarios.len()));

        let mut blocks = Vec::with_capacity(feature.scenarios.len() + 1);
        if let Some(background) = &feature.background {
            let mut lines = vec![String::new(), "## Background".to_string(), String::new()];
            markdown_steps(&background.steps, &mut lines);
            while lines.last().is_some_and(String::is_empty) {
                lines.pop();
            }
            blocks.push(Block { lines });
        }
        blocks.extend(feature.scenarios.iter().map(markdown_scenario));

        let template = MarkdownTemplate {
            name: feature.name.clone(),
            description: feature
                .description
                .as_deref()
                .map(|d| d.lines().map(str::to_string).collect())
                .unwrap_or_default(),
            properties,
            blocks,
        };
        Ok(finish(template.render()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_names() {
        assert_eq!("gherkin".parse::<OutputFormat>().unwrap(), OutputFormat::Gherkin);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err,
            ScenarioError::UnsupportedFormat {
                format: "yaml".to_string()
            }
        );
        assert_eq!(OutputFormat::Gherkin.file_extension(), "feature");
    }

    #[test]
    fn test_aligned_rows_pad_and_escape() {
        let rows = aligned_rows(
            &["field".to_string(), "value".to_string()],
            &[vec!["name".to_string(), "\"a|b\"".to_string()]],
            "  ",
        );
        assert_eq!(
            rows,
            vec![
                "  | field | value   |".to_string(),
                "  | name  | \"a\\|b\" |".to_string(),
            ]
        );
    }

    #[test]
    fn test_finish_normalizes_edges() {
        assert_eq!(finish("\nFeature: x\n\n".to_string()), "Feature: x\n");
        assert_eq!(finish("Feature: x".to_string()), "Feature: x\n");
    }
}
