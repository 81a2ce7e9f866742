//! Core types and definitions for the dispatch simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! records, commands, read-model snapshots, events, constants and
//! configuration. It has no dependency on any runtime or UI framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
