use std::any::Any;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "info";

/// Logging knobs read from the environment.
///
/// - `RUST_LOG`: filter directives; `JB_LOG_LEVEL` is the fallback, then `info`.
/// - `JB_LOG_DIR`: write `<dir>/<app>.log`, rotated daily, instead of stdout.
/// - `JB_LOG_INCLUDE_BACKTRACE`: also run the default panic hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub default_directive: String,
    pub dir: Option<PathBuf>,
    pub include_backtrace: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            default_directive: DEFAULT_DIRECTIVE.to_string(),
            dir: None,
            include_backtrace: false,
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        let default_directive = std::env::var("JB_LOG_LEVEL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string());

        Self {
            default_directive,
            dir: std::env::var_os("JB_LOG_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            include_backtrace: env_flag("JB_LOG_INCLUDE_BACKTRACE"),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.default_directive))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    }
}

/// Where [`init_tracing_subscriber`] sent the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    File(PathBuf),
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic payload not string".into())
}

/// Route panics through `tracing` with thread and location. Installed once per
/// process; later calls are no-ops.
pub fn install_tracing_panic_hook(app_name: &'static str) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let default_hook = panic::take_hook();
        let include_backtrace = LogSettings::from_env().include_backtrace;

        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));

            tracing::error!(
                application = app_name,
                thread_name = thread.name().unwrap_or("unknown"),
                location = location.as_deref().unwrap_or("unknown"),
                panic_message = %panic_message(info.payload()),
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

fn rotating_file_writer(dir: &Path, app_name: &str) -> std::io::Result<BoxMakeWriter> {
    std::fs::create_dir_all(dir)?;

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Ok(BoxMakeWriter::new(non_blocking))
}

/// Install the global subscriber from [`LogSettings::from_env`]. A log dir that
/// cannot be created falls back to stdout with a warning.
pub fn init_tracing_subscriber(app_name: &'static str) -> LogTarget {
    init_with_settings(app_name, &LogSettings::from_env())
}

pub fn init_with_settings(app_name: &'static str, settings: &LogSettings) -> LogTarget {
    let builder = tracing_subscriber::fmt().with_env_filter(settings.env_filter());

    let Some(dir) = settings.dir.as_ref() else {
        let _ = builder.try_init();
        return LogTarget::Stdout;
    };

    match rotating_file_writer(dir, app_name) {
        Ok(writer) => {
            let _ = builder.with_writer(writer).try_init();
            LogTarget::File(dir.join(format!("{app_name}.log")))
        }
        Err(err) => {
            let _ = builder.try_init();
            tracing::warn!(
                error = %err,
                dir = %dir.display(),
                "failed to create JB_LOG_DIR; logging to stdout"
            );
            LogTarget::Stdout
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn settings_read_env() {
        let _guard = ENV_GUARD.lock().unwrap();
        std::env::set_var("JB_LOG_LEVEL", " debug ");
        std::env::set_var("JB_LOG_DIR", "/tmp/jb-logs");
        std::env::set_var("JB_LOG_INCLUDE_BACKTRACE", "TRUE");

        let settings = LogSettings::from_env();

        std::env::remove_var("JB_LOG_LEVEL");
        std::env::remove_var("JB_LOG_DIR");
        std::env::remove_var("JB_LOG_INCLUDE_BACKTRACE");

        assert_eq!(
            settings,
            LogSettings {
                default_directive: "debug".into(),
                dir: Some(PathBuf::from("/tmp/jb-logs")),
                include_backtrace: true,
            }
        );
    }

    #[test]
    fn settings_default_when_unset() {
        let _guard = ENV_GUARD.lock().unwrap();
        std::env::remove_var("JB_LOG_LEVEL");
        std::env::set_var("JB_LOG_DIR", "");
        std::env::remove_var("JB_LOG_INCLUDE_BACKTRACE");

        let settings = LogSettings::from_env();
        std::env::remove_var("JB_LOG_DIR");

        assert_eq!(settings, LogSettings::default());
    }

    #[test]
    fn panic_payloads_are_stringified() {
        let static_str: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(static_str.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "panic payload not string");
    }

    #[test]
    fn file_writer_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");

        assert!(rotating_file_writer(&dir, "jb-test").is_ok());
        assert!(dir.is_dir());
    }
}
