//! # HomeServe Core
//!
//! Domain models and pure logic for the HomeServe marketplace: the service
//! catalog, provider availability, the booking flow, and booking listings.
//! This crate performs no I/O; persistence and transport live in the
//! `homeserve-db` and `homeserve-api` crates.

pub mod catalog;
pub mod errors;
pub mod listing;
pub mod models;
pub mod slots;
pub mod wizard;
