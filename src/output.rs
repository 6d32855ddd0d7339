//! Emitter selection and text rendering for the CLI.

use std::fmt::Write as _;
use synth_core::{GeneratorInfo, Value};
use synth_emit::{OutputFormat, RowEmitter};
use synth_emit_csv::CsvEmitter;
use synth_emit_json::JsonEmitter;
use synth_emit_sql::SqlEmitter;
use synth_generator::Registry;

/// Sink family for an output format.
pub fn emitter_for(format: OutputFormat) -> Box<dyn RowEmitter> {
    match format {
        OutputFormat::Csv => Box::new(CsvEmitter::new()),
        OutputFormat::Json => Box::new(JsonEmitter::new()),
        OutputFormat::Sql => Box::new(SqlEmitter::new()),
    }
}

/// One generated value as printed by `generate`: plain text, or a JSON
/// document with `json` set.
pub fn render_value(value: &Value, json: bool) -> String {
    if json {
        value.to_json_string()
    } else {
        value.to_string()
    }
}

/// `industry/name  description` lines, one per generator.
pub fn render_list(registry: &Registry, industries: &[&str]) -> String {
    let entries: Vec<(String, &str)> = industries
        .iter()
        .flat_map(|industry| registry.generators(industry))
        .map(|info| {
            (
                format!("{}/{}", info.industry, info.name),
                info.description.as_str(),
            )
        })
        .collect();
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (key, description) in entries {
        let _ = writeln!(out, "{key:<width$}  {description}");
    }
    out
}

/// Full description of one generator and its parameters.
pub fn render_info(info: &GeneratorInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}/{}", info.industry, info.name);
    let _ = writeln!(out, "  {}", info.description);
    if let Some(example) = &info.example {
        let _ = writeln!(out, "  example: {}", example.to_json_string());
    }
    if info.parameters.is_empty() {
        return out;
    }

    let _ = writeln!(out, "\nParameters:");
    for param in &info.parameters {
        let mut line = format!("  {} ({})", param.name, param.param_type);
        if param.required {
            line.push_str(" required");
        }
        if let Some(default) = param.default_as_text() {
            let _ = write!(line, " default={default}");
        }
        if let Some(min) = &param.min {
            let _ = write!(line, " min={min}");
        }
        if let Some(max) = &param.max {
            let _ = write!(line, " max={max}");
        }
        if !param.options.is_empty() {
            let _ = write!(line, " options={}", param.options.join("|"));
        }
        if !param.description.is_empty() {
            let _ = write!(line, "  {}", param.description);
        }
        let _ = writeln!(out, "{line}");
    }
    out
}
