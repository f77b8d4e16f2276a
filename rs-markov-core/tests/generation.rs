use std::collections::HashSet;

use rs_markov_core::model::engine::PredictionEngine;

#[test]
fn generated_characters_always_come_from_the_corpus() {
	let corpus = "hello world, hello markov";
	let alphabet: HashSet<char> = corpus.chars().collect();
	let engine = PredictionEngine::build(corpus, 4).unwrap();

	let mut output = String::new();
	for _ in 0..200 {
		let next = engine.predict_next_char(&output);
		assert!(alphabet.contains(&next), "{next:?} does not occur in the corpus");
		output.push(next);
	}
	assert_eq!(output.chars().count(), 200);
}

#[test]
fn same_seed_gives_the_same_stream() {
	let corpus = "to be or not to be, that is the question";

	let mut streams = Vec::new();
	for _ in 0..2 {
		let engine = PredictionEngine::with_seed(corpus, 5, 1234).unwrap();
		let mut output = String::from("to ");
		for _ in 0..100 {
			let next = engine.predict_next_char(&output);
			output.push(next);
		}
		streams.push(output);
	}

	assert_eq!(streams[0], streams[1]);
}

#[test]
fn reseeding_restores_reproducibility() {
	let corpus = "to be or not to be, that is the question";
	let generate = |engine: &PredictionEngine| {
		let mut output = String::from("be");
		for _ in 0..50 {
			let next = engine.predict_next_char(&output);
			output.push(next);
		}
		output
	};

	let a = PredictionEngine::build(corpus, 4).unwrap();
	let b = PredictionEngine::build(corpus, 4).unwrap();
	a.reseed(99);
	b.reseed(99);

	assert_eq!(generate(&a), generate(&b));
}
