//! Viewer settings: the typed model, its defaults, `KEY=VALUE` overrides and
//! persistence behind a key-value store.

pub mod defaults;
pub mod models;
pub mod overrides;
pub mod store;
