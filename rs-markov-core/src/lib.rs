//! Character-level back-off Markov text prediction library.
//!
//! This crate provides a multi-order character prediction system including:
//! - Fixed-order frequency models (`ContextModel`)
//! - A multi-order engine with longest-context-first back-off (`PredictionEngine`)
//! - Concurrent, fork-join model construction
//! - Binary model persistence for fast reloading
//!
//! Only the high-level API is exposed publicly. Corpus ingestion, argument
//! parsing and output rendering are the responsibility of the caller.

/// Core prediction models and back-off logic.
///
/// This module exposes the per-order model and the multi-order engine
/// while keeping internal representations private.
pub mod model;

/// Error types for construction and persistence.
pub mod error;
