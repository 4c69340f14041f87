#![deny(missing_docs)]
#![deny(warnings)]

//! Command-line entry point: prints clock strings for millisecond values.
use clipclock::{ClockStyle, config, format_millis_f64_lossy, logging, try_format_millis_f64};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let style = match options.style {
        Some(style) => style,
        None => configured_style(),
    };
    tracing::info!(
        "Formatting {} value(s) with {style:?} style",
        options.values.len()
    );
    for line in render_values(&options.values, style, options.lossy)? {
        println!("{line}");
    }
    Ok(())
}

fn configured_style() -> ClockStyle {
    match config::load_or_default() {
        Ok(settings) => settings.style,
        Err(err) => {
            tracing::warn!("Using default clock style: {err}");
            ClockStyle::default()
        }
    }
}

fn render_values(values: &[String], style: ClockStyle, lossy: bool) -> Result<Vec<String>, String> {
    values
        .iter()
        .map(|raw| {
            let millis: f64 = raw
                .trim()
                .parse()
                .map_err(|err| format!("Invalid millisecond value {raw:?}: {err}"))?;
            if lossy {
                return Ok(format_millis_f64_lossy(millis, style));
            }
            try_format_millis_f64(millis, style).map_err(|err| format!("{raw}: {err}"))
        })
        .collect()
}

#[derive(Debug, Default)]
struct Options {
    style: Option<ClockStyle>,
    lossy: bool,
    values: Vec<String>,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut positional_only = false;
    for arg in args {
        if positional_only {
            options.values.push(arg);
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--padded" => options.style = Some(ClockStyle::Padded),
            "--unpadded" => options.style = Some(ClockStyle::Unpadded),
            "--lossy" => options.lossy = true,
            "--" => positional_only = true,
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown argument: {flag}\n\n{}", help_text()));
            }
            _ => options.values.push(arg),
        }
    }
    if options.values.is_empty() {
        return Err(format!("At least one millisecond value is required\n\n{}", help_text()));
    }
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "clipclock",
        "",
        "Formats millisecond durations as H:M:S or M:S clock strings.",
        "",
        "Usage:",
        "  clipclock [--padded | --unpadded] [--lossy] <millis>...",
        "",
        "Options:",
        "  --padded     Zero-pad minutes and seconds (1:05).",
        "  --unpadded   Plain components (1:5). Default unless config.toml sets style.",
        "  --lossy      Clamp negative or invalid values instead of failing.",
        "  --           Treat remaining arguments as values.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipclock::app_dirs::CONFIG_HOME_ENV;
    use std::{
        path::Path,
        sync::{Mutex, MutexGuard},
    };
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ConfigHomeGuard {
        previous: Option<String>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ConfigHomeGuard {
        fn set(path: &Path) -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
            let previous = std::env::var(CONFIG_HOME_ENV).ok();
            // SAFETY: env mutations in this binary's tests are serialized by ENV_LOCK.
            unsafe {
                std::env::set_var(CONFIG_HOME_ENV, path);
            }
            Self {
                previous,
                _lock: lock,
            }
        }
    }

    impl Drop for ConfigHomeGuard {
        fn drop(&mut self) {
            // SAFETY: env mutations in this binary's tests are serialized by ENV_LOCK.
            unsafe {
                match self.previous.take() {
                    Some(value) => std::env::set_var(CONFIG_HOME_ENV, value),
                    None => std::env::remove_var(CONFIG_HOME_ENV),
                }
            }
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_style_flags_and_values() {
        let options = parse_args(args(&["--padded", "65000", "0"])).unwrap().unwrap();
        assert_eq!(options.style, Some(ClockStyle::Padded));
        assert!(!options.lossy);
        assert_eq!(options.values, args(&["65000", "0"]));
    }

    #[test]
    fn last_style_flag_wins() {
        let options = parse_args(args(&["--padded", "--unpadded", "1"])).unwrap().unwrap();
        assert_eq!(options.style, Some(ClockStyle::Unpadded));
    }

    #[test]
    fn negative_values_follow_separator() {
        let options = parse_args(args(&["--lossy", "--", "-5"])).unwrap().unwrap();
        assert!(options.lossy);
        assert_eq!(options.values, args(&["-5"]));
    }

    #[test]
    fn rejects_missing_values_and_unknown_flags() {
        assert!(parse_args(Vec::new()).is_err());
        let err = parse_args(args(&["--fancy", "1"])).unwrap_err();
        assert!(err.starts_with("Unknown argument: --fancy"));
    }

    #[test]
    fn renders_each_value() {
        let lines = render_values(&args(&["65000", "3661000.5"]), ClockStyle::Unpadded, false)
            .unwrap();
        assert_eq!(lines, args(&["1:5", "1:1:1"]));
    }

    #[test]
    fn strict_rendering_names_bad_value() {
        let err = render_values(&args(&["-1"]), ClockStyle::Unpadded, false).unwrap_err();
        assert!(err.starts_with("-1: "));
        let err = render_values(&args(&["abc"]), ClockStyle::Unpadded, false).unwrap_err();
        assert!(err.contains("\"abc\""));
    }

    #[test]
    fn lossy_rendering_clamps() {
        let lines = render_values(&args(&["-1", "NaN"]), ClockStyle::Padded, true).unwrap();
        assert_eq!(lines, args(&["0:00", "0:00"]));
    }

    #[test]
    fn configured_style_reads_config_and_falls_back_on_invalid_file() {
        let base = tempdir().unwrap();
        let _guard = ConfigHomeGuard::set(base.path());
        let path = config::config_path().unwrap();

        assert_eq!(configured_style(), ClockStyle::Unpadded);

        std::fs::write(&path, "style = \"padded\"\n").unwrap();
        assert_eq!(configured_style(), ClockStyle::Padded);

        std::fs::write(&path, "style = 3\n").unwrap();
        assert!(config::load_or_default().is_err());
        assert_eq!(configured_style(), ClockStyle::Unpadded);
    }
}
