//! Request handlers.
//!
//! Each submodule holds the async handler functions for one resource.
//! Handlers validate input through `marketplace_core`, delegate persistence
//! to the `marketplace_db` repositories, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod auth;
pub mod category;
pub mod conversation;
pub mod dispute;
pub mod favorite;
pub mod notification;
pub mod provider;
pub mod quote;
pub mod report;
pub mod review;
pub mod service;
pub mod user;
