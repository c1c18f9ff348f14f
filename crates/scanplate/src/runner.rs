//! Matching a batch of inputs against one template.

use crate::{Captures, MatchError, Scanner};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct InputResult {
    /// 1-based position of the input in the batch.
    pub line: usize,
    pub input: String,
    pub outcome: Result<Captures, MatchError>,
}

impl InputResult {
    pub fn matched(&self) -> bool {
        self.outcome.is_ok()
    }
}

fn run_input(scanner: &Scanner, line: usize, input: &str) -> InputResult {
    let outcome = scanner.scan(input);
    if let Err(err) = &outcome {
        tracing::debug!(line, error = %err, "input did not match");
    }
    InputResult {
        line,
        input: input.to_string(),
        outcome,
    }
}

/// Matches every input, returning results in input order.
pub fn run_inputs(scanner: &Scanner, inputs: &[String], sequential: bool) -> Vec<InputResult> {
    if sequential || inputs.len() <= 1 {
        inputs
            .iter()
            .enumerate()
            .map(|(i, input)| run_input(scanner, i + 1, input))
            .collect()
    } else {
        inputs
            .par_iter()
            .enumerate()
            .map(|(i, input)| run_input(scanner, i + 1, input))
            .collect()
    }
}

/// Splits raw text into inputs, one per line, dropping `\r` before `\n`.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
