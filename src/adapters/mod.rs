pub mod script_catalog;
pub mod script_runner;
pub mod session_log;
pub mod tui;
