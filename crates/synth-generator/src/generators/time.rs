//! Date and time producers.
//!
//! Windows default to the year before the engine reference time. `start` and
//! `end` accept RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.

use super::identifiers::YEAR_SECS;
use super::{int_in, BASE};
use crate::error::ProducerError;
use crate::producer::Params;
use crate::registry::RegistryBuilder;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use rand::Rng;
use std::fmt::Write;
use synth_core::{GeneratorInfo, ParamType, ParameterDef, Value};

pub fn register(builder: &mut RegistryBuilder) {
    builder
        .register(
            window_info("date", "Calendar date (default format %Y-%m-%d)", "2024-03-14"),
            |p| {
                let dt = p.window_time()?;
                format_or(p, &dt, "%Y-%m-%d")
            },
        )
        .register(
            window_info("datetime", "RFC 3339 date and time", "2024-03-14T15:09:26Z"),
            |p| {
                let dt = p.window_time()?;
                match p.opt_str("format") {
                    Some(_) => format_or(p, &dt, ""),
                    None => Ok(Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true))),
                }
            },
        )
        .register(
            GeneratorInfo::new(BASE, "time", "Time of day")
                .example("15:09:26")
                .param(format_param()),
            |p| {
                let secs = int_in(p.rand(), 0, 86_399) as u32;
                let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
                    .ok_or_else(|| ProducerError::failed("time of day out of range"))?;
                let fmt = p.opt_str("format").unwrap_or("%H:%M:%S");
                render(&time.format(fmt)).map(Value::String)
            },
        )
        .register(
            window_info("timestamp", "Unix timestamp in seconds", 1710428966),
            |p| Ok(Value::Int(p.window_time()?.timestamp())),
        );
}

fn format_param() -> ParameterDef {
    ParameterDef::new("format", ParamType::String)
        .describe("strftime-style format")
        .default_value("")
}

fn window_info(name: &str, description: &str, example: impl Into<Value>) -> GeneratorInfo {
    GeneratorInfo::new(BASE, name, description)
        .example(example)
        .param(
            ParameterDef::new("start", ParamType::String)
                .describe("Window start (default: one year before now)")
                .default_value(""),
        )
        .param(
            ParameterDef::new("end", ParamType::String)
                .describe("Window end (default: now)")
                .default_value(""),
        )
        .param(format_param())
}

/// Parse a timestamp given as text.
pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Random instant in `[start, end]` at one-second resolution.
pub fn time_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let secs = int_in(rng, start.timestamp(), end.timestamp());
    DateTime::from_timestamp(secs, 0).unwrap_or(start)
}

fn render(formatted: &impl std::fmt::Display) -> Result<String, ProducerError> {
    let mut out = String::new();
    write!(out, "{formatted}")
        .map_err(|_| ProducerError::invalid("format", "invalid format string"))?;
    Ok(out)
}

fn format_or(p: &Params<'_>, dt: &DateTime<Utc>, default: &str) -> Result<Value, ProducerError> {
    let fmt = p.opt_str("format").unwrap_or(default);
    render(&dt.format(fmt)).map(Value::String)
}

impl Params<'_> {
    /// The `[start, end]` window declared by `start`/`end`.
    pub fn window(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), ProducerError> {
        let bound = |name: &str, default: DateTime<Utc>| match self.opt_str(name) {
            None => Ok(default),
            Some(text) => parse_time(text)
                .ok_or_else(|| ProducerError::invalid(name, format!("cannot parse '{text}' as a date"))),
        };
        let now = self.now();
        let start = bound("start", now - chrono::Duration::seconds(YEAR_SECS))?;
        let end = bound("end", now)?;
        if start > end {
            return Err(ProducerError::invalid("start", "start is after end"));
        }
        Ok((start, end))
    }

    /// A random instant in the declared window.
    pub fn window_time(&mut self) -> Result<DateTime<Utc>, ProducerError> {
        let (start, end) = self.window()?;
        Ok(time_between(self.rand(), start, end))
    }
}
