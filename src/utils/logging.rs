/// Routes `log` output to the browser console and panics to
/// `console.error`. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init(level: log::Level) {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(level).is_err() {
        log::debug!("Logger already initialised");
    }
}

/// No-op off the web; native embedders install their own logger.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(_level: log::Level) {}
