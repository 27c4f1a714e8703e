//! Application layer - Use case services.
//!
//! Services are thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for OS access
//! - Return domain types as outputs

mod port_service;

pub use port_service::PortService;

#[cfg(test)]
pub(crate) use port_service::tests as mocks;
