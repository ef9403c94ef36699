//! API server — assembles the console's HTTP surface: the outreach data
//! routes, the external-service gateway, and operational endpoints.

pub mod gateway;
pub mod rest;
pub mod server;

pub use server::ApiServer;
