use unconfuse_core::config::{self, CONFIG_ENV};
use unconfuse_core::{Engine, Settings};

use super::LOG_ENV;

pub fn run(json: bool) -> i32 {
    let info = gather_info(Settings::discover());

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("unconfuse: JSON serialization failed: {e}");
                return 1;
            }
        }
    } else {
        print_human(&info);
    }
    0
}

#[derive(serde::Serialize)]
struct DoctorInfo {
    version: String,
    binary_path: String,
    table_entries: usize,
    data_version: Option<String>,
    normalization_provider: Option<String>,
    config_dir: Option<String>,
    config_env: Option<String>,
    config_path: Option<String>,
    normalization: Option<String>,
    strip_zero_width: bool,
    log_filter: Option<String>,
    stdout_is_terminal: bool,
}

fn gather_info(settings: Settings) -> DoctorInfo {
    let binary_path = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let engine = Engine::global();
    let table = engine.table();

    DoctorInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        binary_path,
        table_entries: table.len(),
        data_version: table.data_version().map(String::from),
        normalization_provider: engine.provider_name().map(String::from),
        config_dir: config::config_dir().map(|d| d.display().to_string()),
        config_env: std::env::var(CONFIG_ENV).ok(),
        config_path: settings.path.map(|p| p.display().to_string()),
        normalization: settings.normalization.map(|f| f.to_string()),
        strip_zero_width: settings.strip_zero_width,
        log_filter: std::env::var(LOG_ENV).ok(),
        stdout_is_terminal: is_terminal::is_terminal(std::io::stdout()),
    }
}

fn print_human(info: &DoctorInfo) {
    eprintln!("unconfuse {}", info.version);
    eprintln!("  binary:       {}", info.binary_path);
    eprintln!(
        "  table:        {} entries (data {})",
        info.table_entries,
        info.data_version.as_deref().unwrap_or("unversioned")
    );
    eprintln!(
        "  provider:     {}",
        info.normalization_provider.as_deref().unwrap_or("none")
    );
    eprintln!(
        "  config dir:   {}",
        info.config_dir.as_deref().unwrap_or("not found")
    );
    if let Some(ref env) = info.config_env {
        eprintln!("  {CONFIG_ENV}: {env}");
    }
    eprintln!(
        "  config:       {}",
        info.config_path.as_deref().unwrap_or("defaults")
    );
    eprintln!(
        "  normalize:    {}",
        info.normalization.as_deref().unwrap_or("none")
    );
    eprintln!("  strip zw:     {}", info.strip_zero_width);
    eprintln!(
        "  log filter:   {}",
        info.log_filter.as_deref().unwrap_or("warn (default)")
    );
    eprintln!("  terminal:     {}", info.stdout_is_terminal);
}
