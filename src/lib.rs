//! OpenClaw Manager
//!
//! A desktop manager for a local OpenClaw installation. It edits the
//! `openclaw.json` document that the OpenClaw gateway reads:
//!
//! 1. **Settings**: browser, web search, compaction, workspace, gateway and
//!    sub-agent defaults, plus export/import, self-update and uninstall.
//!
//! 2. **Agents & Routing**: agent definitions and the bindings that route
//!    incoming messages (by channel, account and peer) to an agent.
//!
//! The [`backend::Backend`] trait is the boundary between the panels and the
//! document; [`backend::LocalBackend`] implements it against the file on disk.

pub mod backend;
pub mod config;
pub mod domain;
pub mod gui;

pub use domain::*;
