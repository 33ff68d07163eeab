pub mod doctor;
pub mod filter;

use std::path::PathBuf;

use unconfuse_core::{NormalizationForm, OutputFormat, Settings};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "UNCONFUSE_LOG";

const USAGE: &str = "\
Usage: unconfuse [options]
       unconfuse doctor [--json]

Normalizes Unicode confusable characters from stdin to stdout.

Options:
  -h, --help              Show this help message
  -V, --version           Show version
  -c, --check             Only check if input contains confusables
                          (exit code 0=clean, 1=contains confusables)
  -n, --normalize TYPE    Apply Unicode normalization before confusables normalization
                          TYPE can be: nfc, nfd, nfkc, nfkd, none (default: none)
      --keep-zero-width   Keep zero-width characters when normalizing
      --json              Emit --check reports as JSON, one object per line
      --config PATH       Read settings from PATH instead of discovering them

Examples:
  echo 'Hello W\u{3bf}rld' | unconfuse
  echo 'caf\u{e9}' | unconfuse --normalize nfd
  echo '\u{fb01}le' | unconfuse -n nfkc
  echo 'suspicious text' | unconfuse --check
";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Filter(FilterOptions),
    Doctor { json: bool },
    Help,
    Version,
}

/// Command-line overrides on top of the discovered settings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub check: bool,
    /// `Some(None)` is an explicit `--normalize none`.
    pub normalize: Option<Option<NormalizationForm>>,
    pub keep_zero_width: bool,
    pub json: bool,
    pub config: Option<PathBuf>,
}

impl FilterOptions {
    pub fn resolve_settings(&self) -> unconfuse_core::Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(form) = self.normalize {
            settings.normalization = form;
        }
        if self.keep_zero_width {
            settings.strip_zero_width = false;
        }
        if self.json {
            settings.output = OutputFormat::Json;
        }
        Ok(settings)
    }
}

pub fn run<I: IntoIterator<Item = String>>(args: I) -> i32 {
    match parse_args(args) {
        Ok(Command::Help) => {
            print!("{USAGE}");
            0
        }
        Ok(Command::Version) => {
            println!("unconfuse {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Ok(Command::Doctor { json }) => doctor::run(json),
        Ok(Command::Filter(opts)) => filter::run(&opts),
        Err(msg) => {
            eprintln!("unconfuse: {msg}");
            eprintln!("Use --help for usage information.");
            2
        }
    }
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, String> {
    let mut args = args.into_iter().peekable();

    if args.peek().map(String::as_str) == Some("doctor") {
        args.next();
        let mut json = false;
        for arg in args {
            match arg.as_str() {
                "--json" => json = true,
                "-h" | "--help" => return Ok(Command::Help),
                other => return Err(format!("unknown doctor option: {other}")),
            }
        }
        return Ok(Command::Doctor { json });
    }

    let mut opts = FilterOptions::default();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg, None),
        };
        match flag.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--check" => opts.check = true,
            "--keep-zero-width" => opts.keep_zero_width = true,
            "--json" => opts.json = true,
            "-n" | "--normalize" => {
                let value = inline.or_else(|| args.next()).ok_or_else(|| {
                    "--normalize requires a type (nfc, nfd, nfkc, nfkd, or none)".to_string()
                })?;
                opts.normalize = Some(parse_normalization(&value)?);
            }
            "--config" => {
                let value = inline
                    .or_else(|| args.next())
                    .ok_or_else(|| "--config requires a path".to_string())?;
                opts.config = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(Command::Filter(opts))
}

fn parse_normalization(value: &str) -> Result<Option<NormalizationForm>, String> {
    NormalizationForm::parse_optional(value).map_err(|_| {
        format!("invalid normalization type '{value}' (valid types are: nfc, nfd, nfkc, nfkd, none)")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_is_filter() {
        assert_eq!(parse(&[]).unwrap(), Command::Filter(FilterOptions::default()));
    }

    #[test]
    fn test_check_and_normalize() {
        let Command::Filter(opts) = parse(&["-c", "--normalize", "nfkd"]).unwrap() else {
            panic!("expected filter command");
        };
        assert!(opts.check);
        assert_eq!(opts.normalize, Some(Some(NormalizationForm::Nfkd)));
    }

    #[test]
    fn test_normalize_none_and_inline_value() {
        let Command::Filter(opts) = parse(&["-n", "none"]).unwrap() else {
            panic!("expected filter command");
        };
        assert_eq!(opts.normalize, Some(None));

        let Command::Filter(opts) = parse(&["--normalize=NFC", "--config=/tmp/x.yaml"]).unwrap()
        else {
            panic!("expected filter command");
        };
        assert_eq!(opts.normalize, Some(Some(NormalizationForm::Nfc)));
        assert_eq!(opts.config, Some(PathBuf::from("/tmp/x.yaml")));
    }

    #[test]
    fn test_missing_normalize_value() {
        let err = parse(&["--normalize"]).unwrap_err();
        assert!(err.contains("requires a type"));
    }

    #[test]
    fn test_invalid_normalize_value() {
        let err = parse(&["-n", "nfx"]).unwrap_err();
        assert!(err.contains("invalid normalization type 'nfx'"));
    }

    #[test]
    fn test_unknown_option() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert_eq!(run(["--frobnicate".to_string()]), 2);
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse(&["-c", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_doctor() {
        assert_eq!(parse(&["doctor"]).unwrap(), Command::Doctor { json: false });
        assert_eq!(parse(&["doctor", "--json"]).unwrap(), Command::Doctor { json: true });
        assert!(parse(&["doctor", "--check"]).is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "normalization: nfc\nstrip_zero_width: true\n").unwrap();

        let opts = FilterOptions {
            normalize: Some(None),
            keep_zero_width: true,
            json: true,
            config: Some(path),
            ..FilterOptions::default()
        };
        let settings = opts.resolve_settings().unwrap();
        assert_eq!(settings.normalization, None);
        assert!(!settings.strip_zero_width);
        assert_eq!(settings.output, OutputFormat::Json);
    }
}
