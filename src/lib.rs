//! To-do list library: a SQLite task store and the organizer that turns
//! its contents into short-term and long-term views.
//!
//! This module exports the core components for testing and integration.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod organizer;
pub mod types;
