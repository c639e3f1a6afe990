use leptos::prelude::*;
use salesdesk_frontend::App;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

fn log_level() -> log::Level {
    option_env!("SALESDESK_LOG_LEVEL")
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::Level::Info)
}

pub fn main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log_level()).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    mount_to_body(App);
}
