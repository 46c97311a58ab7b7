//! Transport adapters for the calculator domain.

pub mod grpc;
