//! Rainfall-runoff timeseries models in rust.
//!
//! Two extension points of a hydrological deep-learning stack: models are
//! built from a [`config::RunConfig`] through [`models::get_model`], and
//! per-basin data providers through [`data::get_dataset`]. Sample
//! windowing, normalization, batching and the training loop belong to the
//! surrounding framework; this crate supplies the adapters it dispatches
//! to.

pub mod config;
pub mod data;
pub mod errors;
pub mod models;
