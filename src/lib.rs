//! linkbio - link-in-bio backend
//!
//! Owners publish a profile with an ordered list of outbound links; the
//! public page reports views and clicks, which are summarized per owner.
//!
//! # Architecture
//! - `storage`: SeaORM entities access, migrations, retries
//! - `services`: link collection manager, profile service, event counter
//! - `api`: actix-web routes, JWT owner authentication
//! - `config`: static TOML + environment configuration
//! - `runtime`: startup/shutdown and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
