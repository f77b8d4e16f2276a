use thiserror::Error;

/// Errors raised while constructing a prediction engine.
///
/// The taxonomy is deliberately small: absence of a match during prediction
/// is routine back-off control flow, not an error, so the only construction
/// failure is a corpus the engine can never answer from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// The training corpus contains no characters. The order-0 model would
	/// have no continuations and prediction would have no valid answer.
	#[error("corpus is empty; at least one character is required")]
	EmptyCorpus,
}

/// Errors raised while encoding or decoding a persisted engine.
#[derive(Debug, Error)]
pub enum CodecError {
	#[error("model serialization failed: {0}")]
	Codec(#[from] postcard::Error),

	/// The bytes decoded, but the result violates an engine invariant.
	#[error("invalid engine data: {0}")]
	Invalid(&'static str),
}
