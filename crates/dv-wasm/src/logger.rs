//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct ConsoleLogger;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}", record.target(), record.args());
        let msg = wasm_bindgen::JsValue::from_str(&msg);
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger and the panic hook. Safe to call repeatedly.
pub(crate) fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(level);
            }
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("DragVoice WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = level;
}
