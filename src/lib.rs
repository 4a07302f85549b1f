//! cygwin-builder library.
//!
//! Builds a customized Cygwin installer: fetch the bootstrap installer,
//! provision packages into a scratch workspace, zip the result and compile an
//! NSIS installer around it. The binary in `main.rs` is a thin CLI over
//! [`commands`].

pub mod artifact;
pub mod commands;
pub mod common;
pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod mirrors;
pub mod preflight;
pub mod process;
pub mod provision;
pub mod timing;
