use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, CodecError};
use super::context_model::ContextModel;

/// Default maximum context length when none is given by the caller.
pub const DEFAULT_MAX_ORDER: usize = 15;

fn fresh_rng() -> Mutex<StdRng> {
	Mutex::new(StdRng::from_os_rng())
}

/// Multi-order prediction engine with longest-context-first back-off.
///
/// Owns one `ContextModel` per order from 0 to `max_order`. Construction
/// forks one build task per order over the shared read-only corpus and joins
/// all of them before returning, so the engine is never observable in a
/// partially built state. After construction the tables are immutable; only
/// hit counters and the sampling state change.
///
/// # Randomness
/// All models sample from one engine-owned `StdRng` behind a mutex (a single
/// synchronized source rather than one source per model). With a fixed seed
/// a sequential stream of queries is therefore reproducible.
///
/// # Invariants
/// - `models[k].order() == k` for every `k` in `0..=max_order`
/// - The order-0 model has the single key `""` with one continuation per
///   corpus character, so back-off always terminates with a real character
#[derive(Serialize, Deserialize, Debug)]
pub struct PredictionEngine {
	/// Highest context length modelled.
	max_order: usize,

	/// One model per order, indexed by order.
	models: Vec<ContextModel>,

	/// Shared sampling state. Not persisted; a decoded engine draws a fresh
	/// OS-seeded generator.
	#[serde(skip, default = "fresh_rng")]
	rng: Mutex<StdRng>,
}

impl PredictionEngine {
	/// Builds an engine from the corpus with OS-seeded sampling.
	///
	/// # Errors
	/// Returns `BuildError::EmptyCorpus` for an empty corpus: the order-0
	/// model would have no continuations and prediction would have no valid
	/// answer, so construction fails fast instead of deferring the problem
	/// to query time.
	pub fn build(corpus: &str, max_order: usize) -> Result<Self, BuildError> {
		Self::with_rng(corpus, max_order, StdRng::from_os_rng())
	}

	/// Builds an engine whose sampling is reproducible under a fixed seed.
	pub fn with_seed(corpus: &str, max_order: usize, seed: u64) -> Result<Self, BuildError> {
		Self::with_rng(corpus, max_order, StdRng::seed_from_u64(seed))
	}

	/// Forks one build task per order and joins them all before returning.
	///
	/// Each task reads the shared char-indexed corpus and exclusively owns
	/// its output model; finished models come back over a channel and are
	/// ordered afterwards, so no shared collection is mutated concurrently.
	fn with_rng(corpus: &str, max_order: usize, rng: StdRng) -> Result<Self, BuildError> {
		if corpus.is_empty() {
			return Err(BuildError::EmptyCorpus);
		}

		let chars: Vec<char> = corpus.chars().collect();
		let (tx, rx) = mpsc::channel();

		// The scope is the join barrier: it only exits once every builder
		// has finished and sent its model.
		thread::scope(|s| {
			for order in 0..=max_order {
				let tx = tx.clone();
				let chars = chars.as_slice();
				s.spawn(move || {
					let model = ContextModel::from_chars(chars, order);
					tx.send(model).expect("builder channel closed");
				});
			}
		});
		drop(tx);

		let mut models: Vec<ContextModel> = rx.iter().collect();
		models.sort_by_key(ContextModel::order);

		Ok(Self { max_order, models, rng: Mutex::new(rng) })
	}

	/// Predicts the next character for the given context.
	///
	/// Tries orders from `max_order` down to 0 and returns the first model
	/// that has observed the trailing context. Longer contexts give more
	/// specific continuations; shorter ones are the fallback for novel
	/// contexts. The order-0 model matches any context, so for an engine
	/// built from a non-empty corpus this always returns a character.
	///
	/// # Panics
	/// Panics if no model answers. That state is unreachable for any engine
	/// produced by [`PredictionEngine::build`]; it indicates a decoded
	/// engine that bypassed validation.
	pub fn predict_next_char(&self, context: &str) -> char {
		let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
		for model in self.models.iter().rev() {
			if let Some(next) = model.predict(context, &mut *rng) {
				return next;
			}
		}
		unreachable!("order-0 model always has a continuation for a non-empty corpus");
	}

	/// Replaces the sampling state with a freshly seeded generator.
	///
	/// Lets a decoded engine (which starts with OS-seeded sampling) be made
	/// reproducible again.
	pub fn reseed(&self, seed: u64) {
		let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
		*rng = StdRng::seed_from_u64(seed);
	}

	/// Returns the highest context length modelled.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Returns the per-order models, indexed by order.
	///
	/// Read-only: tables never change after construction.
	pub fn models(&self) -> &[ContextModel] {
		&self.models
	}

	/// Returns one hit count per order, indexed by order.
	///
	/// Rendering statistics is the caller's job; this is a pure observer.
	pub fn hit_counts(&self) -> Vec<u64> {
		self.models.iter().map(ContextModel::hits).collect()
	}

	/// Encodes the engine to a compact binary form.
	///
	/// The sampling state is not part of the encoding; tables and hit
	/// counters round-trip.
	pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Decodes an engine previously produced by [`PredictionEngine::to_bytes`].
	///
	/// # Errors
	/// Fails on malformed bytes or when the decoded engine violates the
	/// structural invariants (missing models, out-of-sequence orders, or an
	/// empty order-0 table).
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
		let engine: Self = postcard::from_bytes(bytes)?;

		if engine.models.len() != engine.max_order + 1 {
			return Err(CodecError::Invalid("model count does not match max order"));
		}
		if engine.models.iter().enumerate().any(|(k, m)| m.order() != k) {
			return Err(CodecError::Invalid("model orders out of sequence"));
		}
		match engine.models.first() {
			Some(base) if !base.is_empty() => Ok(engine),
			_ => Err(CodecError::Invalid("order-0 model is missing or empty")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_corpus_is_rejected() {
		assert_eq!(PredictionEngine::build("", 3).unwrap_err(), BuildError::EmptyCorpus);
	}

	#[test]
	fn models_are_ordered_by_order() {
		let engine = PredictionEngine::build("the quick brown fox", 5).unwrap();
		assert_eq!(engine.max_order(), 5);
		assert_eq!(engine.models().len(), 6);
		for (k, model) in engine.models().iter().enumerate() {
			assert_eq!(model.order(), k);
		}
	}

	#[test]
	fn hit_counts_start_at_zero_and_accumulate() {
		let engine = PredictionEngine::with_seed("abcabcabc", 2, 1).unwrap();
		assert_eq!(engine.hit_counts(), vec![0, 0, 0]);
		engine.predict_next_char("xxab");
		// "ab" is known at order 2, so the hit lands there.
		assert_eq!(engine.hit_counts(), vec![0, 0, 1]);
	}
}
