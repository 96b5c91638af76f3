//! Rotator - banner rotation with a UCB1 multi-armed bandit
//!
//! Chooses which banner to show in a slot for an audience group and learns
//! from show/click feedback.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//!
//! # Architecture
//! - `selection`: UCB1 scoring and choice (pure)
//! - `storage`: Counter store trait and the SeaORM backend
//! - `services`: Rotation operations with timeouts and error context
//! - `api`: HTTP services and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod selection;
pub mod services;
pub mod storage;
pub mod system;
