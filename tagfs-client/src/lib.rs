//! Launcher for the command-line TagFS client.
//!
//! The binary turns operator options into a validated [`config::ClientConfiguration`]
//! and hands it to a client that runs until the session ends. Each module
//! focuses on one step of that path:
//!
//! - [`cli`] declares the command-line surface with its defaults.
//! - [`capacity`] converts capacity expressions such as `512M` into bytes.
//! - [`config`] runs the validation chain and owns the immutable configuration.
//! - [`client`] defines the client capability and the default terminal session.
//! - [`bootstrap`] constructs the client once and runs it.

pub mod bootstrap;
pub mod capacity;
pub mod cli;
pub mod client;
pub mod config;
