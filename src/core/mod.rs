//! Core library components.
//!
//! Everything the pipeline needs apart from the command-line surface: the
//! configuration, the three value sources, the store client and the writer.

pub mod certs;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod deployment;
pub mod domain;
pub mod envfile;
pub mod params;
pub mod relay;
pub mod repo;
pub mod store;
pub mod types;
pub mod validation;
pub mod writer;
