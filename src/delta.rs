// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use itertools::Itertools;
use log::warn;

/// Symbol reserved for spontaneous transitions. It never belongs to the alphabet.
pub const EPSILON: &str = "ε";

/// Why a transition line was left out of the relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line contains no `=`.
    MissingEquals,
    /// The left side has no `,` separating the state from the symbol.
    MissingSymbol,
    /// The right side names no destination state.
    MissingDestination,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SkipReason::MissingEquals => write!(f, "missing '='"),
            SkipReason::MissingSymbol => write!(f, "missing the symbol of the source pair"),
            SkipReason::MissingDestination => write!(f, "missing the destination states"),
        }
    }
}

/// A transition line that could not be read. Such lines are dropped, not reported
/// as errors, but they are kept here so a caller can inspect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTransition {
    /// Line number in the source, or the ordinal of the transition when it was
    /// added programmatically.
    pub line: usize,
    /// The trimmed text of the line.
    pub text: String,
    /// What was wrong with it.
    pub reason: SkipReason,
}

/// Splits a transition line on its first `=`.
pub fn split_transition(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
}

/// Reads the left side of a transition, `(state,symbol)`.
///
/// One leading `(` and one trailing `)` are removed when present. Returns `None`
/// when no `,` remains to separate the state from the symbol.
pub fn parse_source(left: &str) -> Option<(&str, &str)> {
    let left = left.trim();
    let left = left.strip_prefix('(').unwrap_or(left);
    let left = left.strip_suffix(')').unwrap_or(left);
    let mut fields = left.split(',');
    let state = fields.next()?;
    let symbol = fields.next()?;
    Some((state.trim(), symbol.trim()))
}

/// Reads the right side of a transition, a comma separated list of states.
/// Empty fragments are dropped.
pub fn parse_destinations(right: &str) -> Vec<&str> {
    right
        .split(',')
        .map(str::trim)
        .filter(|dest| !dest.is_empty())
        .collect()
}

/// Returns true if the line is an epsilon transition or its right side has more
/// than one comma separated fragment, which makes the automaton non-deterministic.
/// Fragments are counted as written, so `(A,a)=B,` counts two of them.
///
/// ```
/// use automaton::delta::is_nondeterministic;
///
/// assert!(is_nondeterministic("(A,ε)=B"));
/// assert!(is_nondeterministic("(A,a)=B,C"));
/// assert!(is_nondeterministic("(A,a)=B,"));
/// assert!(!is_nondeterministic("(A,a)=B"));
/// ```
pub fn is_nondeterministic(line: &str) -> bool {
    match split_transition(line) {
        Some((left, right)) => {
            parse_source(left).map_or(false, |(_, symbol)| symbol == EPSILON)
                || right.split(',').count() > 1
        }
        None => false,
    }
}

/// The type `TransitionRelation` maps a pair (state, symbol) to the set of
/// destination states. Adding a transition for an existing pair extends its
/// set, it never replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionRelation {
    transitions: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
    skipped: Vec<SkippedTransition>,
}

impl TransitionRelation {
    /// Creates an empty relation.
    pub fn new() -> TransitionRelation {
        TransitionRelation::default()
    }

    /// Builds a relation from numbered transition lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton::delta::TransitionRelation;
    ///
    /// let delta = TransitionRelation::from_lines(vec![
    ///     (1, "(q0,a)=q1"),
    ///     (2, "(q0,a)=q2, q3"),
    ///     (3, "q0 a q1"),
    /// ]);
    /// assert_eq!(delta.get("q0", "a").map(|dests| dests.len()), Some(3));
    /// assert_eq!(delta.skipped().len(), 1);
    /// ```
    pub fn from_lines<'a, I>(lines: I) -> TransitionRelation
        where I: IntoIterator<Item = (usize, &'a str)>
    {
        lines
            .into_iter()
            .fold(TransitionRelation::new(), |mut delta, (nline, line)| {
                delta.add_line(nline, line);
                delta
            })
    }

    /// Adds the transition `(state,symbol) -> dest`.
    pub fn insert(&mut self, state: &str, symbol: &str, dest: &str) {
        self.transitions
            .entry(state.to_owned())
            .or_default()
            .entry(symbol.to_owned())
            .or_default()
            .insert(dest.to_owned());
    }

    /// Reads one transition line `(state,symbol)=dest1,...,destN` and merges it
    /// into the relation. A malformed line, or one whose right side names no
    /// state, is recorded in `skipped` instead.
    pub fn add_line(&mut self, nline: usize, line: &str) {
        let line = line.trim();
        let parsed = split_transition(line)
            .ok_or(SkipReason::MissingEquals)
            .and_then(|(left, right)| {
                parse_source(left)
                    .map(|source| (source, right))
                    .ok_or(SkipReason::MissingSymbol)
            })
            .and_then(|(source, right)| {
                let dests = parse_destinations(right);
                if dests.is_empty() {
                    Err(SkipReason::MissingDestination)
                } else {
                    Ok((source, dests))
                }
            });
        match parsed {
            Ok(((state, symbol), dests)) => {
                for dest in dests {
                    self.insert(state, symbol, dest);
                }
            }
            Err(reason) => {
                warn!("line {}: transition `{}` skipped, {}", nline, line, reason);
                self.skipped.push(SkippedTransition {
                    line: nline,
                    text: line.to_owned(),
                    reason,
                });
            }
        }
    }

    /// Destinations of `(state,symbol)`, if any.
    pub fn get(&self, state: &str, symbol: &str) -> Option<&BTreeSet<String>> {
        self.transitions.get(state).and_then(|symbols| symbols.get(symbol))
    }

    /// Destinations of `state` when reading the input character `symb`.
    pub fn step(&self, state: &str, symb: char) -> Option<&BTreeSet<String>> {
        let mut buffer = [0; 4];
        self.get(state, symb.encode_utf8(&mut buffer))
    }

    /// Destinations of the epsilon transitions leaving `state`.
    pub fn epsilon(&self, state: &str) -> Option<&BTreeSet<String>> {
        self.get(state, EPSILON)
    }

    /// Iterates over the pairs (state, symbol) and their destinations, in order.
    pub fn iter(&self) -> impl Iterator<Item = ((&str, &str), &BTreeSet<String>)> {
        self.transitions.iter().flat_map(|(state, symbols)| {
            symbols
                .iter()
                .map(move |(symbol, dests)| ((state.as_str(), symbol.as_str()), dests))
        })
    }

    /// Number of (state, symbol) pairs.
    pub fn len(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no transition is defined.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The malformed lines dropped while building the relation.
    pub fn skipped(&self) -> &[SkippedTransition] {
        &self.skipped
    }
}

impl fmt::Display for TransitionRelation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for ((state, symbol), dests) in self.iter() {
            writeln!(f, "({},{}) => {{{}}}", state, symbol, dests.iter().join(", "))?;
        }
        Ok(())
    }
}
