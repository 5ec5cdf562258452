//! Command handlers for keymorph.
//!
//! Each submodule exposes plain functions over request/result DTOs with
//! `#[serde(rename_all = "camelCase")]`, so any front end (this CLI, a GUI,
//! an IPC bridge) can drive the engine without touching its types.

pub mod evaluate;
pub mod generator;
pub mod preferences;
