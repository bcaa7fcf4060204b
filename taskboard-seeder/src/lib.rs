//! # TaskBoard Seeder Library
//!
//! Startup runner that prepares the TaskBoard store before the web
//! application accepts traffic.
//!
//! ## Modules
//!
//! - `config`: configuration from environment variables
//! - `run`: the initialization sequence used by the binary

pub mod config;
pub mod run;
