//! Startup log written beside the executable
//!
//! Every line carries the milliseconds elapsed since `init`, which is what
//! matters when checking how long the splash stayed up.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

/// Log file name, created in the executable's directory
pub const LOG_FILE_NAME: &str = "splash.log";

struct LogSink {
    out: BufWriter<File>,
    started: Instant,
}

static SINK: Mutex<Option<LogSink>> = Mutex::new(None);

/// Directory holding the running executable, or `.` if it cannot be found
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Start logging to `splash.log` next to the executable
pub fn init() {
    init_at(&exe_dir().join(LOG_FILE_NAME));
}

/// Start logging to `path`, replacing any earlier log there.
///
/// Logging stays off if the file cannot be created.
pub fn init_at(path: &Path) {
    let Ok(file) = File::create(path) else {
        return;
    };

    if let Ok(mut sink) = SINK.lock() {
        *sink = Some(LogSink {
            out: BufWriter::new(file),
            started: Instant::now(),
        });
    }

    log(&format!("splash log started: {}", path.display()));
}

/// Append one line. A no-op until `init` has run.
pub fn log(msg: &str) {
    let Ok(mut guard) = SINK.lock() else {
        return;
    };
    if let Some(sink) = guard.as_mut() {
        let elapsed = sink.started.elapsed().as_millis();
        let _ = writeln!(sink.out, "[+{:>6}ms] {}", elapsed, msg);
        // Flushed per line so a crash during startup keeps the tail
        let _ = sink.out.flush();
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}
