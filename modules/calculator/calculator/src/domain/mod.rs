//! Domain layer for calculator module
//!
//! Contains the operation dispatcher.

pub mod service;

pub use service::{Service, ServiceError};
