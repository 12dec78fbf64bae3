//! # YADA - Yet Another Diet Assistant
//!
//! Library half of the `yada` binary: CLI definitions and commands,
//! layered configuration, and record rendering. The catalog engine lives in
//! `yada-core`.

pub mod cli;
pub mod config;
pub mod display;
