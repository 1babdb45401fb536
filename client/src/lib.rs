//! # Finance Tracker Client
//!
//! Client side of a personal finance tracker: authentication, transaction
//! logging, category-scoped monthly budgets and the analytics derived from
//! them. The remote finance service stores everything; this crate keeps a
//! session, mirrors the user's data in a cache and aggregates it for display.
//!
//! ## Architecture
//! ```text
//! views (tab view models)
//!     ↓
//! client (FinanceClient: session + cache + mutations)
//!     ↓                      ↓
//! domain (pure aggregation)  services (FinanceService trait, HTTP ApiClient)
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod services;
pub mod session;
pub mod views;


pub use cache::{CacheSnapshot, Collection, LocalDataCache, RefreshReport};
pub use client::FinanceClient;
pub use config::ClientConfig;
pub use errors::{ClientError, ClientResult};
pub use services::{ApiClient, FinanceService, LoginGrant};
pub use session::Session;
