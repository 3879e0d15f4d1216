//! InternLink marketplace core.
//!
//! The library owns the relational state of the marketplace (users,
//! internship postings, and applications) together with its durable
//! persistence and the derived dashboard views. HTTP routing for each
//! resource lives alongside its store so the `services/api` binary only has
//! to compose routers.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
