//! # Workflows Module
//!
//! High-level entry points that orchestrate the engine for a host application.
//!
//! - **Interactive Session** ([`session`]) - The per-viewer measurement session fed by
//!   pick events, toolbar mode changes and panel actions.
//! - **Pick Script Replay** ([`replay`]) - Drives a session through a recorded sequence
//!   of interactions, reporting progress as it goes.

pub mod replay;
pub mod session;
