//! Domain logic for the service marketplace.
//!
//! This crate has no internal dependencies so the database layer, the HTTP
//! layer, and tests can all share the same rules: rating derivation,
//! proximity ranking, conversation participant resolution, and the
//! status/enum vocabularies stored in the database.

pub mod conversation;
pub mod discovery;
pub mod dispute;
pub mod error;
pub mod geo;
pub mod notification;
pub mod pagination;
pub mod quote;
pub mod rating;
pub mod report;
pub mod roles;
pub mod service;
pub mod types;
