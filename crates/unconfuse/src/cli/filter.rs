use std::fmt;
use std::io::{self, BufRead, Write};

use unconfuse_core::output;
use unconfuse_core::{Engine, Error, OutputFormat, Settings, TextInput};

use super::FilterOptions;

/// Failure while processing stdin, tagged with the 1-based line number.
#[derive(Debug)]
pub struct LineError {
    pub line: usize,
    pub error: Error,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normalize and replace confusables, one output line per input line.
    Sanitize,
    /// Report confusables per line; exit 1 if any line has them.
    Check,
}

pub fn run(opts: &FilterOptions) -> i32 {
    let settings = match opts.resolve_settings() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("unconfuse: {e}");
            return 2;
        }
    };
    tracing::debug!(?settings, check = opts.check, "filtering stdin");

    let mode = if opts.check { Mode::Check } else { Mode::Sanitize };
    let stdout = io::stdout();
    let color = is_terminal::is_terminal(&stdout);

    match process(
        Engine::global(),
        &settings,
        mode,
        io::stdin().lock(),
        stdout.lock(),
        color,
    ) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("unconfuse: {e}");
            2
        }
    }
}

/// Run `mode` over every line of `input`. Returns the exit code.
pub fn process(
    engine: &Engine,
    settings: &Settings,
    mode: Mode,
    mut input: impl BufRead,
    mut out: impl Write,
    color: bool,
) -> Result<i32, LineError> {
    let mut exit_code = 0;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .map_err(|e| LineError { line: line_no + 1, error: e.into() })?;
        if read == 0 {
            break;
        }
        line_no += 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        let at_line = |error: Error| LineError { line: line_no, error };
        let text = buf.as_slice().to_text().map_err(at_line)?;

        match mode {
            Mode::Check => {
                let report = engine.report(text.as_ref()).map_err(at_line)?;
                if !report.is_clean() {
                    exit_code = 1;
                }
                let written = match settings.output {
                    OutputFormat::Json => output::write_json(&report, Some(line_no), &mut out),
                    OutputFormat::Human if color => output::write_human(&report, &mut out),
                    OutputFormat::Human => output::write_human_no_color(&report, &mut out),
                };
                written.map_err(|e| at_line(e.into()))?;
            }
            Mode::Sanitize => {
                let sanitized = engine.sanitize(text.as_ref(), settings).map_err(at_line)?;
                writeln!(out, "{sanitized}").map_err(|e| at_line(e.into()))?;
            }
        }
    }

    out.flush()
        .map_err(|e| LineError { line: line_no, error: e.into() })?;
    Ok(exit_code)
}
