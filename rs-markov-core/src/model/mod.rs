//! Top-level module for the back-off prediction system.
//!
//! This module provides a multi-order character predictor, including:
//! - Fixed-order frequency models (`ContextModel`)
//! - A multi-order engine with back-off querying (`PredictionEngine`)

/// Fixed-order frequency model (`order >= 0`).
///
/// Handles the single build pass over the corpus, trailing-context lookup,
/// uniform sampling among recorded continuations and hit accounting.
pub mod context_model;

/// Multi-order engine composed of one `ContextModel` per order.
///
/// Supports concurrent fork-join construction, longest-context-first
/// back-off prediction and binary persistence.
pub mod engine;
