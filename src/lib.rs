//! Apollo LinkedIn Enrichment Library
//!
//! Resolves LinkedIn profile URLs to contact and company data through the
//! Apollo people API (match, then enrich as a fallback) and writes the
//! results to CSV or JSON.
//!
//! # Modules
//!
//! - `apollo_client`: HTTP client for the Apollo `people/*` endpoints.
//! - `batch`: CSV input processing and output writing.
//! - `config`: Configuration management.
//! - `credits`: Logical credit usage counters.
//! - `errors`: Error handling types.
//! - `extraction`: Field extraction from vendor person records.
//! - `lookup`: The match-then-enrich workflow.
//! - `models`: Vendor and output data models.

pub mod apollo_client;
pub mod batch;
pub mod config;
pub mod credits;
pub mod errors;
pub mod extraction;
pub mod lookup;
pub mod models;
