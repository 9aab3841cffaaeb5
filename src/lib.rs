//! Docuflow - Document management backend.
//!
//! This crate implements the review cycle engine: recurring document
//! review tracking, per-reviewer assignment reconciliation, completion
//! evaluation, and next-cycle scheduling.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
