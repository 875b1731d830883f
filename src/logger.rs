//! `log` backend: the browser console on wasm, `env_logger` elsewhere.

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};

    pub struct ConsoleLogger {
        pub level: LevelFilter,
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= self.level
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg: wasm_bindgen::JsValue =
                format!("[{}] {}", record.target(), record.args()).into();
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the logger. Safe to call more than once; later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init(level: log::LevelFilter) {
    let logger = Box::new(console::ConsoleLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: log::LevelFilter) {
    // RUST_LOG still overrides the default level.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
