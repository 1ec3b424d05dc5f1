//! capadvisor — micro-cap portfolio analysis and AI-assisted trading advisor.
//!
//! Hexagonal architecture: analysis logic in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
