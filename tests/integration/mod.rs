//! Integration tests for the treefs virtual filesystem

mod cli_contracts;
mod namespace_properties;
mod path_properties;
mod persistence;
mod scenario;
mod support;
