// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use itertools::Itertools;
use log::warn;

use crate::automaton::{Definition, Kind, Result, SimulationError};
use crate::delta::TransitionRelation;

/// The type `DFA` represents a Deterministic Finite Automaton.
///
/// The relation is not checked for determinism. When a pair (state, symbol) has
/// several destinations, the description is not a valid DFA and the walk follows
/// the smallest destination.
#[derive(Debug, Clone)]
pub struct DFA {
    definition : Definition,
    delta      : TransitionRelation,
}

impl DFA {
    /// Creates a DFA from its sections and its transitions.
    pub fn new(definition: Definition, delta: TransitionRelation) -> DFA {
        for ((state, symbol), dests) in delta.iter().filter(|&(_, dests)| dests.len() > 1) {
            warn!("DFA transition ({},{}) has several destinations: {}",
                  state, symbol, dests.iter().join(", "));
        }
        DFA { definition, delta }
    }

    /// The sections of the description.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// The transition relation.
    pub fn delta(&self) -> &TransitionRelation {
        &self.delta
    }

    /// Reads `input` from the starting state and returns the state reached.
    /// `None` means a transition was missing; the rest of the input is not read.
    ///
    /// # Errors
    ///
    /// Return a SimulationError::MissingStartState if no starting state is specified.
    pub fn walk(&self, input: &str) -> Result<Option<&str>> {
        let start = self.definition
            .start()
            .ok_or(SimulationError::MissingStartState(Kind::Dfa))?;
        Ok(input
            .chars()
            .try_fold(start, |state, c| {
                self.delta
                    .step(state, c)
                    .and_then(|dests| dests.iter().next())
                    .map(String::as_str)
            }))
    }

    /// Test if an input string is a word of the language defined by the DFA.
    ///
    /// # Errors
    ///
    /// Return a SimulationError::MissingStartState if no starting state is specified.
    ///
    /// Return a SimulationError::MissingAcceptedStates if the final states are not specified.
    pub fn run(&self, input: &str) -> Result<bool> {
        let last = self.walk(input)?;
        self.definition.is_accepting(last, Kind::Dfa)
    }

    /// Same as `run`, an incomplete DFA accepts nothing.
    pub fn test(&self, input: &str) -> bool {
        self.run(input).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::builder::AutomatonBuilder;
    use crate::automaton::Automaton;

    fn dfa(builder: AutomatonBuilder) -> DFA {
        match builder.finalize(Kind::Dfa) {
            Automaton::Dfa(dfa) => dfa,
            Automaton::Nfa(_) => unreachable!(),
        }
    }

    fn ends_with_one() -> AutomatonBuilder {
        AutomatonBuilder::new()
            .add_symbol("0")
            .add_symbol("1")
            .add_state("q0")
            .add_state("q1")
            .add_start("q0")
            .add_final("q1")
            .add_transition("(q0,0)=q0")
            .add_transition("(q0,1)=q1")
            .add_transition("(q1,0)=q0")
            .add_transition("(q1,1)=q1")
    }

    #[test]
    fn test_dfa() {
        let dfa = dfa(ends_with_one());
        let samples =
            vec![("101", true),
                 ("100", false),
                 ("", false),
                 ("1", true),
                 ("0", false),
                 ("0000000000000000000000000000000000000001", true),];

        for (input,expected_result) in samples {
            assert!(dfa.run(input) == Ok(expected_result), "input false for: \"{}\"", input);
        }
    }

    #[test]
    fn test_walk() {
        let dfa = dfa(ends_with_one());
        assert_eq!(dfa.walk("10"), Ok(Some("q0")));
        assert_eq!(dfa.walk(""), Ok(Some("q0")));
        assert_eq!(dfa.walk("12"), Ok(None));
    }

    #[test]
    fn test_dead_transition_rejects() {
        // every state is final, only the missing transition can reject
        let dfa = dfa(ends_with_one().add_final("q0"));
        assert_eq!(dfa.run("0110"), Ok(true));
        assert_eq!(dfa.run("01a10"), Ok(false));
        assert_eq!(dfa.run("a"), Ok(false));
    }

    #[test]
    fn test_dfa_missing_start() {
        let dfa = dfa(AutomatonBuilder::new()
            .add_final("q1")
            .add_transition("(q0,1)=q1"));
        assert_eq!(dfa.walk("1"), Err(SimulationError::MissingStartState(Kind::Dfa)));
        assert_eq!(dfa.run("1"), Err(SimulationError::MissingStartState(Kind::Dfa)));
        assert!(!dfa.test("1"));
    }

    #[test]
    fn test_dfa_missing_finals() {
        let dfa = dfa(AutomatonBuilder::new()
            .add_start("q0")
            .add_transition("(q0,1)=q1"));
        assert_eq!(dfa.run("1"), Err(SimulationError::MissingAcceptedStates(Kind::Dfa)));
        assert_eq!(dfa.run("0"), Err(SimulationError::MissingAcceptedStates(Kind::Dfa)));
        assert!(!dfa.test("1"));
    }

    #[test]
    fn test_empty_finals_reject() {
        let dfa = dfa(AutomatonBuilder::new()
            .add_start("q0")
            .open(crate::automaton::Section::AcceptedStates)
            .add_transition("(q0,1)=q0"));
        assert_eq!(dfa.run("11"), Ok(false));
    }

    #[test]
    fn test_several_destinations_pick_the_smallest() {
        let dfa = dfa(AutomatonBuilder::new()
            .add_start("q0")
            .add_final("q1")
            .add_transition("(q0,a)=q2,q1"));
        assert_eq!(dfa.walk("a"), Ok(Some("q1")));
        assert_eq!(dfa.run("a"), Ok(true));
    }
}
