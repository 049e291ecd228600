// Frameworks: configuration, logging and the terminal host.

pub mod config;
pub mod host;
