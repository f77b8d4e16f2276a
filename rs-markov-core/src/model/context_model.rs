use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// A frequency model for one fixed context length.
///
/// The `ContextModel` maps every context of exactly `order` characters seen
/// in the corpus to the ordered sequence of characters observed to follow it.
/// Duplicates are retained, so a continuation observed `n` times out of `m`
/// recorded ones is sampled with probability `n/m`.
///
/// # Responsibilities
/// - Build the table in a single sliding-window pass over the corpus
/// - Answer trailing-context lookups with uniform sampling over the
///   recorded continuations
/// - Count successful predictions (hits)
///
/// # Invariants
/// - Every key in `table` has exactly `order` characters
/// - Every continuation sequence is non-empty (a key is only inserted
///   when at least one continuation was observed)
/// - `table` is never mutated after the build pass; only `hits` changes
#[derive(Serialize, Deserialize, Debug)]
pub struct ContextModel {
	/// The context length of this model (number of characters in the key).
	order: usize,

	/// Mapping from a context of `order` characters to every character
	/// observed to follow it, duplicates included.
	table: HashMap<String, Vec<char>>,

	/// Number of successful predictions served by this model.
	hits: AtomicU64,
}

impl ContextModel {
	/// Builds a model of the given order from the corpus.
	///
	/// Building is inseparable from creation: there is no way to obtain an
	/// unbuilt model or to populate one twice.
	///
	/// A corpus shorter than `order + 1` characters simply yields an empty
	/// table; back-off at the engine level handles such models.
	pub fn build(corpus: &str, order: usize) -> Self {
		let chars: Vec<char> = corpus.chars().collect();
		Self::from_chars(&chars, order)
	}

	/// Builds a model from an already char-indexed corpus.
	///
	/// For every start index `i` with `i + order < len`, the window
	/// `chars[i..i + order]` is the key and `chars[i + order]` the recorded
	/// continuation. UTF-8 safe by construction: indices are into characters,
	/// never bytes.
	pub(crate) fn from_chars(chars: &[char], order: usize) -> Self {
		tracing::debug!(order, "building context model");

		let mut table: HashMap<String, Vec<char>> = HashMap::new();
		if chars.len() > order {
			for i in 0..chars.len() - order {
				let key: String = chars[i..i + order].iter().collect();
				let next = chars[i + order];
				table.entry(key).or_default().push(next);
			}
		}

		tracing::debug!(order, contexts = table.len(), "context model built");
		Self { order, table, hits: AtomicU64::new(0) }
	}

	/// Predicts the next character for the given context.
	///
	/// Returns `None` if the context is shorter than this model's order, or
	/// if the trailing `order` characters were never observed in the corpus.
	/// Otherwise picks uniformly among the recorded continuations (frequency
	/// weighting is implicit in the duplicates), bumps the hit counter and
	/// returns the character.
	///
	/// # Notes
	/// - The table is read-only here; the hit counter is atomic, so
	///   concurrent callers sharing one model never lose updates.
	pub fn predict<R: Rng + ?Sized>(&self, context: &str, rng: &mut R) -> Option<char> {
		let key = self.trailing_key(context)?;
		let next = *self.table.get(&key)?.choose(rng)?;
		self.hits.fetch_add(1, Ordering::Relaxed);
		Some(next)
	}

	/// Extracts the last `order` characters of the context as the lookup key.
	///
	/// Returns `None` when the context is too short to contain this model's
	/// window. Handles UTF-8 correctly (multibyte characters).
	fn trailing_key(&self, context: &str) -> Option<String> {
		let chars: Vec<char> = context.chars().collect();
		if chars.len() < self.order {
			return None;
		}
		Some(chars[chars.len() - self.order..].iter().collect())
	}

	/// Returns the context length of this model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the number of predictions this model has served.
	///
	/// Monotonically non-decreasing.
	pub fn hits(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}

	/// Returns the number of distinct contexts in the table.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns `true` if no context was observed (corpus shorter than
	/// `order + 1` characters).
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns the recorded continuations for an exact context key.
	///
	/// Intended for diagnostics and tests; prediction goes through
	/// [`ContextModel::predict`].
	pub fn continuations(&self, key: &str) -> Option<&[char]> {
		self.table.get(key).map(Vec::as_slice)
	}

	/// Iterates over the distinct context keys of this model.
	pub fn contexts(&self) -> impl Iterator<Item = &str> {
		self.table.keys().map(String::as_str)
	}
}
