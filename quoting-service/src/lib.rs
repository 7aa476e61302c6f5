//! Quote pricing and composition engine for a small web agency.
//!
//! Quotes are assembled from a fixed service catalog (or free entry),
//! priced through a five-stage totals derivation, persisted as immutable
//! snapshots and rendered to PDF from the stored figures.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod pdf;
pub mod pricing;
pub mod search;
pub mod services;
pub mod startup;
