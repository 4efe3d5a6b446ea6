/// Shared utilities - platform detection and bounded command execution
pub mod command;
pub mod platform;
