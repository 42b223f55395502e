//! Shared output formatting for check results.
//!
//! Each format is a [`DiagnosticSink`]; the result is emitted into it.

use anyhow::Result;
use miette::GraphicalReportHandler;
use schema_lint_core::{DiagnosticSink, LintResult, Severity, Violation, ViolationDiagnostic};
use serde::Serialize;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, fail_on: Severity) -> Result<()> {
    match format {
        OutputFormat::Text => result.emit(&mut TextSink),
        OutputFormat::Compact => result.emit(&mut CompactSink),
        OutputFormat::Pretty => result.emit(&mut PrettySink::new()),
        OutputFormat::Json => return print_json(result, fail_on),
    }
    Ok(())
}

struct TextSink;

impl DiagnosticSink for TextSink {
    fn report(&mut self, violation: &Violation) {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}",
            violation.code(),
            violation.rule(),
            violation.location,
        );
        println!("  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    fn finish(&mut self, result: &LintResult) {
        print_summary(result);
    }
}

struct CompactSink;

impl DiagnosticSink for CompactSink {
    fn report(&mut self, violation: &Violation) {
        println!("{violation}");
    }
}

struct PrettySink {
    handler: GraphicalReportHandler,
}

impl PrettySink {
    fn new() -> Self {
        Self {
            handler: GraphicalReportHandler::new(),
        }
    }
}

impl DiagnosticSink for PrettySink {
    fn report(&mut self, violation: &Violation) {
        let diagnostic = ViolationDiagnostic::from(violation);
        let mut rendered = String::new();
        match self.handler.render_report(&mut rendered, &diagnostic) {
            Ok(()) => print!("{rendered}"),
            Err(_) => println!("{violation}"),
        }
    }

    fn finish(&mut self, result: &LintResult) {
        print_summary(result);
    }
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    #[serde(flatten)]
    result: &'a LintResult,
}

fn print_json(result: &LintResult, fail_on: Severity) -> Result<()> {
    let report = JsonReport {
        passed: !result.has_violations_at(fail_on),
        result,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}
