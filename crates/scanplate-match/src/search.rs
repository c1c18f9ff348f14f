//! Backtracking search for a decomposition of the input.
//!
//! Specs are matched left to right. Each spec's length interval is clamped
//! to the bytes still unconsumed and its candidate lengths are tried longest
//! first; a candidate that passes the matcher opens a frame for the next
//! spec at the end of the candidate. A frame whose candidates run out is
//! popped and its `(spec, offset)` state remembered as dead, so no state is
//! ever explored twice.

use crate::{MatchOptions, SearchError};
use scanplate_interval::{BoundedInterval, Walk};
use scanplate_template::Spec;
use std::collections::HashSet;
use tracing::{debug, trace};

struct Frame {
    spec: usize,
    start: usize,
    /// Remaining candidate lengths, consumed from the back.
    candidates: Walk<usize>,
    /// End of the candidate currently being explored.
    end: usize,
}

struct Search<'s, 'i> {
    specs: &'s [Spec],
    input: &'i str,
    max_steps: Option<u64>,
    steps: u64,
    dead: HashSet<(usize, usize)>,
}

impl<'s, 'i> Search<'s, 'i> {
    fn new(specs: &'s [Spec], input: &'i str, options: &MatchOptions) -> Self {
        Self {
            specs,
            input,
            max_steps: options.max_steps,
            steps: 0,
            dead: HashSet::new(),
        }
    }

    /// Opens a frame for `spec` at `start`, or `None` when its length
    /// constraint cannot fit in what is left of the input.
    fn frame(&self, spec: usize, start: usize) -> Option<Frame> {
        let rest = &self.input.as_bytes()[start..];
        let current = &self.specs[spec];

        let lengths = current.length.bounded_within(0, rest.len()).ok()?;
        let mut lengths = lengths.truncate_to(current.matcher.longest_prefix(rest));

        // The last spec has to consume everything that is left.
        if spec + 1 == self.specs.len() {
            lengths = if lengths.contains(rest.len()) {
                BoundedInterval::closed(rest.len(), rest.len())
            } else {
                BoundedInterval::closed(1, 0)
            };
        }

        Some(Frame {
            spec,
            start,
            candidates: lengths.iter(),
            end: start,
        })
    }

    fn tick(&mut self) -> Result<(), SearchError> {
        self.steps += 1;
        match self.max_steps {
            Some(limit) if self.steps > limit => Err(SearchError::SearchExhausted { limit }),
            _ => Ok(()),
        }
    }

    fn run(&mut self) -> Result<Vec<&'i str>, SearchError> {
        let specs = self.specs;
        let input = self.input;
        let bytes = input.as_bytes();

        if specs.is_empty() {
            return if input.is_empty() {
                Ok(Vec::new())
            } else {
                Err(SearchError::DoesNotMatch)
            };
        }

        let mut stack: Vec<Frame> = Vec::with_capacity(specs.len());
        stack.extend(self.frame(0, 0));

        while let Some(top) = stack.last_mut() {
            let Some(len) = top.candidates.next_back() else {
                self.dead.insert((top.spec, top.start));
                stack.pop();
                continue;
            };
            self.tick()?;

            let end = top.start + len;
            let matcher = &specs[top.spec].matcher;
            // Class candidates never exceed `longest_prefix`, so they are
            // already known to be accepted.
            let accepted = matcher.is_prefix_closed() || matcher.accepts(&bytes[top.start..end]);
            if !input.is_char_boundary(end) || !accepted {
                trace!(spec = top.spec, start = top.start, len, "candidate rejected");
                continue;
            }
            top.end = end;

            let next = top.spec + 1;
            if next == specs.len() {
                if end == bytes.len() {
                    return Ok(stack.iter().map(|f| &input[f.start..f.end]).collect());
                }
                continue;
            }
            if self.dead.contains(&(next, end)) {
                continue;
            }

            match self.frame(next, end) {
                Some(frame) => stack.push(frame),
                None => {
                    self.dead.insert((next, end));
                }
            }
        }

        Err(SearchError::DoesNotMatch)
    }
}

/// Splits `input` into one segment per spec, or fails with
/// [`SearchError::DoesNotMatch`] when no split satisfies every spec.
///
/// Among all valid splits, the one returned is the first found when each
/// spec prefers its longest candidate.
pub fn decompose<'i>(
    specs: &[Spec],
    input: &'i str,
    options: &MatchOptions,
) -> Result<Vec<&'i str>, SearchError> {
    debug!(specs = specs.len(), input_len = input.len(), "starting search");
    let mut search = Search::new(specs, input, options);
    let result = search.run();
    debug!(
        steps = search.steps,
        dead_states = search.dead.len(),
        matched = result.is_ok(),
        "search finished"
    );
    result
}
