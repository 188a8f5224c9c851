use std::panic;
use leptos::logging::log;

/// Sets up a custom panic hook that provides more context for Leptos owner disposal panics
pub fn set_custom_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Call the original hook first
        original_hook(panic_info);

        // Extract panic message
        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        // Check if this is an owner disposal panic
        if message.contains("OwnerDisposed") {
            log!("[PANIC] Leptos owner disposal detected. This usually happens when:");
            log!("[PANIC] 1. A component has been unmounted but a fetch is still resolving");
            log!("[PANIC] 2. An effect or signal update is running after the component is gone");
            log!("[PANIC] 3. A timer callback is firing after cleanup");
        }
    }));
}

/// Call in main.rs or app initialization
pub fn init() {
    set_custom_panic_hook();
}
