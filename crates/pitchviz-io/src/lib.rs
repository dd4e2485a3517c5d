pub mod clipboard;
pub mod console;
pub mod file;
