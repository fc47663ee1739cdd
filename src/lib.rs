//! A dashboard for tracking a personal budget and job applications.
//!
//! This library provides the state behind the dashboard: account sign-up and
//! log-in, per-user collections of transactions and job applications kept in
//! a key-value [Storage], and the totals and counts shown on the dashboard.
//!
//! A presentation layer creates one [AppState], forwards each user intent to
//! it and renders the collections and summaries it exposes.

#![warn(missing_docs)]

mod app_state;
mod codec;
mod error;
mod id;
mod logging;
mod record_store;
mod user;

pub mod aggregation;
pub mod auth;
pub mod date;
pub mod job;
pub mod storage;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::Error;
pub use id::{RecordId, UserId};
pub use logging::setup_logging;
pub use record_store::{Record, RecordStore};
pub use storage::{MemoryStorage, SqliteStorage, Storage, StorageError};
pub use user::{Session, User};
