//! # creativity-sync
//!
//! Client-side synchronization core for the creativity backend:
//! - Typed REST resource client for the `users` and `creativity-paths`
//!   collections (list / create / delete)
//! - Session provenance tracking with transient creation highlight and
//!   bulk undo of session-created records
//! - Explicit session state (cached replicas, pending form drafts,
//!   admin gate) owned by a single logical actor
//! - Backend URL resolution (CLI → env → TOML → default)
//!
//! Consistency model: every mutation resynchronizes its collection from
//! the backend with a full list fetch rather than patching the local
//! replica from the mutation response.

pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod provenance;
pub mod session;

pub use client::ResourceClient;
pub use error::{Error, Result};
pub use session::SyncSession;
