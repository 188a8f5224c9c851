pub mod browse;
pub mod filter;
