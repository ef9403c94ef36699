//! Outreach database surface — campaigns, contacts, campaign log, and
//! per-campaign account enrollment.
//!
//! Provides REST API endpoints for the console UI.
//! Data stored in DashMap (development); swap to PostgreSQL for production.

pub mod handlers;
pub mod models;
pub mod router;
pub mod store;

pub use handlers::OutreachState;
pub use router::outreach_router;
pub use store::OutreachStore;
