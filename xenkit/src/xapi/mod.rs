//! Hypervisor management-API collaborators.
//!
//! The import step consumes these contracts; it never implements wire
//! framing or session establishment itself.

mod client;
mod connection;

pub use client::VmApi;
pub use connection::Connection;
