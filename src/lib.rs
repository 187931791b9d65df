//! Library crate for portscan-rs exposing reusable modules.
pub mod dispatch;
pub mod error;
pub mod output;
pub mod ports;
pub mod probe;
pub mod report;
pub mod types;
