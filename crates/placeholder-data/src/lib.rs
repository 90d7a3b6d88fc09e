//! Placeholder data for the dashboard.
//!
//! Provides the fixed demo records (users, customers, invoices and monthly
//! revenue) that the dashboard seeder writes into a fresh database, plus
//! loading of alternative fixture sets from JSON and data-quality checks.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use placeholder_data::Fixtures;
//!
//! let fixtures = Fixtures::placeholder();
//! for issue in fixtures.check() {
//!     eprintln!("fixture warning: {issue}");
//! }
//! ```

pub mod check;
pub mod fixtures;
pub mod models;

pub use check::FixtureIssue;
pub use fixtures::{FixtureError, Fixtures};
pub use models::{Customer, Invoice, InvoiceStatus, Revenue, User};
