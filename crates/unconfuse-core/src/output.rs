use std::io::Write;

use crate::report::{Finding, ScanReport, Status};

pub const SCHEMA_VERSION: u32 = 1;

/// JSON output wrapper with schema version.
#[derive(serde::Serialize)]
pub struct JsonOutput<'a> {
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub status: Status,
    pub findings: &'a [Finding],
}

/// Write a report as a single JSON line. `line` is the 1-based input line
/// the report belongs to, when scanning line by line.
pub fn write_json(report: &ScanReport, line: Option<usize>, mut w: impl Write) -> std::io::Result<()> {
    let output = JsonOutput {
        schema_version: SCHEMA_VERSION,
        line,
        status: report.status,
        findings: &report.findings,
    };
    serde_json::to_writer(&mut w, &output)?;
    writeln!(w)?;
    Ok(())
}

/// Write a report as `CLEAN` or `CONFUSABLES_DETECTED: 'x', 'y'`, with color.
pub fn write_human(report: &ScanReport, w: impl Write) -> std::io::Result<()> {
    write_status_line(report, w, true)
}

/// Write human-readable output without ANSI colors.
pub fn write_human_no_color(report: &ScanReport, w: impl Write) -> std::io::Result<()> {
    write_status_line(report, w, false)
}

fn write_status_line(report: &ScanReport, mut w: impl Write, color: bool) -> std::io::Result<()> {
    let (paint, reset) = match (color, report.status) {
        (false, _) => ("", ""),
        (true, Status::Clean) => ("\x1b[32m", "\x1b[0m"), // green
        (true, Status::Confusable) => ("\x1b[31m", "\x1b[0m"), // red
    };

    if report.is_clean() {
        return writeln!(w, "{paint}{}{reset}", report.status);
    }

    let chars: Vec<String> = report.characters().map(|c| format!("'{c}'")).collect();
    writeln!(w, "{paint}{}{reset}: {}", report.status, chars.join(", "))
}
