//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` entity structs matching database rows (serializable unless they
//!   carry secrets)
//! - `Deserialize` create DTOs for inserts
//! - `Deserialize` update DTOs (all `Option` fields) for patches

pub mod category;
pub mod conversation;
pub mod dispute;
pub mod favorite;
pub mod message;
pub mod notification;
pub mod provider;
pub mod quote;
pub mod report;
pub mod review;
pub mod service;
pub mod user;
