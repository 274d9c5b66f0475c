//! Application services - orchestrate use cases.
//!
//! Services sequence the domain rules and ports to accomplish
//! high-level use cases like "generate a service".

pub mod generate_service;

pub use generate_service::{GenerateRequest, ServiceGenerator, TargetPolicy};
