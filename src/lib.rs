// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod plan;
pub mod prompt;
pub mod runner;
pub mod session;
pub mod shaper;
pub mod specs;
pub mod status;
pub mod table;
