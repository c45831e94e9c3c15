#![doc = "pbi-push-core: core logic library for pbi-push."]

//! This crate contains the data model, table loading, schema mapping and the
//! publish pipeline for pbi-push. Transport (the real HTTP client) and CLI
//! glue live in the binary crate.
//!
//! # Usage
//! Add this as a dependency for all shared pipeline, table, schema and
//! contract code.

pub mod config;
pub mod contract;
pub mod load;
pub mod pipeline;
pub mod schema;
pub mod table;
