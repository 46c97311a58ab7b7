//! Calculator SDK
//!
//! This crate provides everything needed to talk to the calculator service:
//! - Operator registry (`Operator`)
//! - API trait (`CalculatorClient`) and error types (`CalculatorError`, `ErrorKind`)
//! - gRPC client (`CalculatorGrpcClient`) and its transport config (`GrpcClientConfig`)
//! - Request issuer (`CalculationArgs`, `issue`)
//! - Proto stubs and the encoded descriptor set for the server implementation
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{CalculationArgs, CalculatorGrpcClient, GrpcClientConfig, issue};
//!
//! let client = CalculatorGrpcClient::connect_lazy(
//!     "http://localhost:50051",
//!     &GrpcClientConfig::new("calculator"),
//! )?;
//! let args = CalculationArgs::new(Some("Add".to_owned()), Some(1), Some(2));
//! let result = issue(&client, args).await?;
//! assert_eq!(result, 3);
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
pub use api::{CalculatorClient, CalculatorError, ErrorKind, Operator};

// === CLIENT ===
mod client;
mod transport;
pub use client::CalculatorGrpcClient;
pub use transport::GrpcClientConfig;

// === ISSUER ===
mod issuer;
pub use issuer::{CalculationArgs, issue};

// === GRPC PROTO STUBS (for server implementation) ===
/// Generated protobuf types for `CalculatorService`
#[allow(clippy::all, clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("calculator.v1");
}

// Re-export proto types needed by server
pub use proto::calculator_service_server::{CalculatorService, CalculatorServiceServer};
pub use proto::{CalculationReply, CalculationRequest};

/// Fully qualified gRPC service name of `CalculatorService`
pub const SERVICE_NAME: &str = "calculator.v1.CalculatorService";

/// Encoded `FileDescriptorSet` of the calculator proto, for server reflection
pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("calculator_descriptor");
