//! gRPC API for calculator

pub mod server;

pub use server::CalculatorServiceImpl;
