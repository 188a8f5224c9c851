pub mod confirm;
pub mod panic_hook;
