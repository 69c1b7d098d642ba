//! snapdoc library - session-backed tab capture with DOCX export.
//!
//! This library exposes the core functionality of the `snapdoc` CLI for use
//! in tests and potentially other applications.
//!
//! # Modules
//!
//! - `capture`: Capture relay and host capture capability (real/mock)
//! - `error`: Error types with user-recoverable hints
//! - `session`: Snapshot session state machine and session stores
//! - `snapshot`: Snapshot data model and data-URL wire encoding
//! - `export`: Export request assembly and the DOCX exporter
//! - `output`: Output mode abstraction (robot/human)
//! - `config`: Configuration file handling
#![forbid(unsafe_code)]

pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod session;
pub mod snapshot;
