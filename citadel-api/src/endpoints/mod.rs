//! # Character API Endpoints
//!
//! Endpoint implementations for the resource types the picker queries.

pub mod characters;
