//! Shared test utilities: configuration builders, fixtures and mocks.

#![cfg(test)]

pub mod config;
pub mod fixtures;
