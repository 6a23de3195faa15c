// Endpoint groups, implemented as inherent methods on `PortalClient`.

mod auth;
mod bulk;
mod clients;
mod filtering;
mod logs;
mod reports;
mod stats;
