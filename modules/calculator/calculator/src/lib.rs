#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Calculator Module
//!
//! A stateless gRPC service that applies one arithmetic operator to two
//! 32-bit operands.
//!
//! ## Architecture
//!
//! - `domain/service.rs` - Operation dispatcher
//! - `api/grpc/server.rs` - gRPC server implementation
//! - `config.rs` - Layered configuration
//! - `logging.rs` - Tracing subscriber setup
//! - `server.rs` - Listener binding and serve loop
//!
//! External consumers should use the `calculator-sdk` crate, which provides
//! the gRPC client and request issuer.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod domain;
pub mod logging;

mod server;
pub use server::{bind, serve};
