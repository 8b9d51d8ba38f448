pub mod admin;
pub mod layout;
pub mod walk;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
