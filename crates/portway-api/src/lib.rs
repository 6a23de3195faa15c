//! Async HTTP client for the portway admin backend.
//!
//! The backend is a small REST surface over the captive portal's state:
//! managed clients, web-content filtering, activity logs, summary
//! statistics, report generation, and bulk client import. All admin
//! endpoints are bearer-token authenticated; the token is obtained via
//! [`PortalClient::login`] and carried on every subsequent request.
//!
//! This crate deliberately stays at the wire level: responses are exposed
//! as loosely-typed models ([`models`]) because the backend has shipped
//! several payload shapes over time (`roll_no` vs `name`, `data` vs
//! `data_usage`, ...). Canonicalization lives in `portway-core`.

pub mod error;
pub mod models;
pub mod transport;

mod client;
mod endpoints;

pub use client::PortalClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
