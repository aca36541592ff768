//! Rolling Logger
//!
//! File logger for the app backend. Output goes through a `tracing-subscriber`
//! fmt layer into a bounded line buffer that is mirrored to `<app_name>.log`,
//! so the file never grows past the newest `max_lines` lines.
//! Records emitted through the `log` facade are bridged into the same sink.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Lines kept by the writer installed through [`init_logger`]
pub const DEFAULT_MAX_LINES: usize = 2000;

static GLOBAL_WRITER: OnceLock<RollingWriter> = OnceLock::new();

/// Circular buffer of log lines backed by a file
struct RollingBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
    path: PathBuf,
    /// Bytes received after the last newline
    partial: String,
}

impl RollingBuffer {
    fn push(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.partial.push_str(&String::from_utf8_lossy(bytes));

        let mut complete_line = false;
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            self.lines.push_back(line.trim_end_matches(['\r', '\n']).to_string());
            while self.lines.len() > self.max_lines {
                self.lines.pop_front();
            }
            complete_line = true;
        }

        if complete_line {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> io::Result<()> {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        fs::write(&self.path, out)
    }
}

/// Cloneable handle to a rolling log file
///
/// Implements [`io::Write`] and [`MakeWriter`] so it can be handed straight to
/// `tracing_subscriber::fmt().with_writer(..)`.
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingBuffer>>,
    path: PathBuf,
}

impl RollingWriter {
    /// Open `<log_dir>/<app_name>.log`, keeping the newest `max_lines` of any
    /// previous content.
    pub fn open(log_dir: &Path, app_name: &str, max_lines: usize) -> io::Result<Self> {
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(format!("{}.log", app_name));
        let max_lines = max_lines.max(1);

        let mut lines: VecDeque<String> = match fs::read_to_string(&path) {
            Ok(existing) => existing.lines().map(str::to_string).collect(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => VecDeque::new(),
            Err(e) => return Err(e),
        };
        while lines.len() > max_lines {
            lines.pop_front();
        }

        let buffer = RollingBuffer {
            lines,
            max_lines,
            path: path.clone(),
            partial: String::new(),
        };
        buffer.persist()?;

        Ok(Self {
            inner: Arc::new(Mutex::new(buffer)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.inner.lock() {
            Ok(buffer) => buffer.lines.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl io::Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log buffer poisoned"))?;
        buffer.push(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Local wall-clock timestamps, millisecond precision
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Initialize the global logger writing into `<log_dir>/<app_name>.log`.
///
/// Can only succeed once per process.
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), String> {
    let writer = RollingWriter::open(&log_dir, app_name, DEFAULT_MAX_LINES)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;

    GLOBAL_WRITER
        .set(writer.clone())
        .map_err(|_| "Logger already initialized".to_string())?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    #[cfg(target_os = "android")]
    {
        // logcat owns the `log` facade on Android, tracing events go to the file only
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Info)
                .with_tag(app_name),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| format!("Failed to install subscriber: {}", e))?;
    }

    #[cfg(not(target_os = "android"))]
    {
        use tracing_subscriber::util::SubscriberInitExt;
        subscriber
            .try_init()
            .map_err(|e| format!("Failed to install subscriber: {}", e))?;
    }

    log::info!("Logger initialized for {}", app_name);
    Ok(())
}

/// Path of the active log file, if [`init_logger`] has run
pub fn log_file_path() -> Option<PathBuf> {
    GLOBAL_WRITER.get().map(|w| w.path().to_path_buf())
}

/// Newest buffered lines of the active log, oldest first
pub fn recent_lines() -> Vec<String> {
    GLOBAL_WRITER.get().map(RollingWriter::lines).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), String> {
    if GLOBAL_WRITER.get().is_some() {
        Ok(())
    } else {
        Err("Logger not initialized".to_string())
    }
}

/// Log an informational message to the rolling file
pub fn info(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

/// Log an error message to the rolling file
pub fn error(message: &str) -> Result<(), String> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}
