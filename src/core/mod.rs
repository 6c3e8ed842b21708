// src/core/mod.rs

// Everything that is not drawing: backend records, the REST client, fetch
// state, routing and the modal command channel.

/// Records returned by the backend (`Scan`, `ScanConfig`, list envelopes).
pub mod models;

/// Async REST client and OData query building.
pub mod api;

/// `FetchState`, refresh tokens and stale-response filtering.
pub mod fetch;

/// Requests views ask for, and the task that runs them.
pub mod requests;

pub mod routes;
pub mod modal;

/// Text formatting shared by the table columns and the detail panes.
pub mod display;
