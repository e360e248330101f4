//! REST API layer for the catalog backend.
//!
//! Routes HTTP verbs and paths to catalog operations, serializes results,
//! and gates every data route behind an API-key session check.

pub mod auth;
pub mod handlers;
pub mod router;
pub mod server;
