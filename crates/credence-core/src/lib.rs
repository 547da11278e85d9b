//! Core types and trait definitions for the Credence statement store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The scoring engine, the storage backends and the API all depend on it.

// Store backends implement `WorkflowStore` with plain `async fn`s.
#![allow(async_fn_in_trait)]

pub mod case;
pub mod error;
pub mod interview;
pub mod model;
pub mod role;
pub mod score;
pub mod statement;
pub mod store;
pub mod user;

pub use error::{Error, Result};
