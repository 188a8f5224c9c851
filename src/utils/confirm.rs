/// Ask the user to confirm a destructive action. Outside a browser
/// (SSR, tests) there is nobody to ask, so the action is refused.
pub fn confirm(message: &str) -> bool {
    match web_sys::window() {
        Some(window) => window.confirm_with_message(message).unwrap_or(false),
        None => false,
    }
}
