//! One-shot command handlers

pub mod config;
pub mod link;
pub mod settings;
