//! # Registries
//!
//! The three immutable lookup tables the dispatcher resolves against:
//! named read queries, per-resource insert schemas, and identity columns
//! for generic delete. All built once at startup and shared by reference.

pub mod keys;
pub mod resources;
pub mod statements;

pub use keys::PrimaryKeyRegistry;
pub use resources::{PreInsert, ResourceRegistry, ResourceSchema};
pub use statements::StatementCatalog;
