// Small helpers shared by the engine and the views.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

const SPINAL_LEVELS: [&str; 10] = ["C1", "C2", "C3", "C4", "C5", "C6", "C7", "C8", "T1", "T2"];

/// `["C5", "C6", "C7"]` -> `C5–C7`; gaps fall back to a comma list.
pub fn format_root_range(roots: &[String]) -> String {
    let positions: Vec<Option<usize>> = roots
        .iter()
        .map(|r| SPINAL_LEVELS.iter().position(|l| l == r))
        .collect();
    match (roots.first(), roots.last()) {
        (Some(first), _) if roots.len() == 1 => first.clone(),
        (Some(first), Some(last)) => {
            let contiguous = positions.windows(2).all(|w| match (w[0], w[1]) {
                (Some(a), Some(b)) => b == a + 1,
                _ => false,
            });
            if contiguous {
                format!("{first}–{last}")
            } else {
                roots.join(", ")
            }
        }
        _ => String::new(),
    }
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let time = js_sys::Date::new_0().to_iso_string();
        let msg = JsValue::from_str(&format!("{} [{}] {}", String::from(time), record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Only meaningful in the browser; a second call is ignored.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
