//! User Interface module
//!
//! Plain text screens and the line-based console driver.

pub mod console;
pub mod render;

pub use console::Console;
