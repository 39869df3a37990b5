// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeSet;
use std::iter;

use crate::automaton::{Definition, Kind, Result, SimulationError};
use crate::delta::TransitionRelation;

/// The type `NFA` represents a NonDeterministic Finite Automaton with epsilon
/// transitions. The transitions labelled `ε` are followed without reading input.
#[derive(Debug, Clone)]
pub struct NFA {
    definition : Definition,
    delta      : TransitionRelation,
}

impl NFA {
    /// Creates an NFA from its sections and its transitions.
    pub fn new(definition: Definition, delta: TransitionRelation) -> NFA {
        NFA { definition, delta }
    }

    /// The sections of the description.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// The transition relation.
    pub fn delta(&self) -> &TransitionRelation {
        &self.delta
    }

    /// All the states reachable from `states` through zero or more epsilon
    /// transitions. The result always contains `states`.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton::automaton::{Automaton, Kind};
    /// use automaton::automaton::builder::AutomatonBuilder;
    ///
    /// let automaton = AutomatonBuilder::new()
    ///     .add_transition("(A,ε)=B")
    ///     .add_transition("(B,ε)=C,A")
    ///     .add_transition("(C,a)=D")
    ///     .finalize(Kind::Nfa);
    /// if let Automaton::Nfa(nfa) = automaton {
    ///     let closure: Vec<_> = nfa.epsilon_closure(vec!["A"]).into_iter().collect();
    ///     assert_eq!(closure, vec!["A", "B", "C"]);
    /// }
    /// ```
    pub fn epsilon_closure<'a, I>(&'a self, states: I) -> BTreeSet<&'a str>
        where I: IntoIterator<Item = &'a str>
    {
        let mut closure: BTreeSet<&str> = BTreeSet::new();
        let mut pending = Vec::new();
        for state in states {
            if closure.insert(state) {
                pending.push(state);
            }
        }
        while let Some(state) = pending.pop() {
            for next in self.delta.epsilon(state).into_iter().flatten().map(String::as_str) {
                if closure.insert(next) {
                    pending.push(next);
                }
            }
        }
        closure
    }

    /// Reads `input` from the epsilon closure of the starting state and returns
    /// the set of states reached. Epsilon transitions are followed after each
    /// symbol. Once the set is empty it stays empty.
    ///
    /// # Errors
    ///
    /// Return a SimulationError::MissingStartState if no starting state is specified.
    pub fn walk(&self, input: &str) -> Result<BTreeSet<&str>> {
        let start = self.definition
            .start()
            .ok_or(SimulationError::MissingStartState(Kind::Nfa))?;
        Ok(input
            .chars()
            .fold(self.epsilon_closure(iter::once(start)), |states, c| {
                let nexts = states
                    .iter()
                    .filter_map(|state| self.delta.step(state, c))
                    .flatten()
                    .map(String::as_str);
                self.epsilon_closure(nexts)
            }))
    }

    /// Test if an input string is a word of the language defined by the NFA.
    ///
    /// # Errors
    ///
    /// Return a SimulationError::MissingStartState if no starting state is specified.
    ///
    /// Return a SimulationError::MissingAcceptedStates if the final states are not specified.
    pub fn run(&self, input: &str) -> Result<bool> {
        let states = self.walk(input)?;
        self.definition.is_accepting(states.iter().copied(), Kind::Nfa)
    }

    /// Same as `run`, an incomplete NFA accepts nothing.
    pub fn test(&self, input: &str) -> bool {
        self.run(input).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::builder::AutomatonBuilder;
    use crate::automaton::Automaton;

    fn nfa(builder: AutomatonBuilder) -> NFA {
        match builder.finalize(Kind::Nfa) {
            Automaton::Nfa(nfa) => nfa,
            Automaton::Dfa(_) => unreachable!(),
        }
    }

    fn set<'a>(states: &[&'a str]) -> BTreeSet<&'a str> {
        states.iter().copied().collect()
    }

    // A -ε-> B -a-> C
    fn epsilon_then_a() -> AutomatonBuilder {
        AutomatonBuilder::new()
            .add_symbol("a")
            .add_state("A")
            .add_state("B")
            .add_state("C")
            .add_start("A")
            .add_final("C")
            .add_transition("(A,ε)=B")
            .add_transition("(B,a)=C")
    }

    // (abc)*, with the loop closed by an epsilon transition
    fn abc_star() -> AutomatonBuilder {
        AutomatonBuilder::new()
            .add_start("0")
            .add_final("0")
            .add_transition("(0,a)=1")
            .add_transition("(1,b)=2")
            .add_transition("(2,c)=3")
            .add_transition("(3,ε)=0")
    }

    #[test]
    fn test_nfa() {
        let nfa = nfa(epsilon_then_a());
        assert_eq!(nfa.run("a"), Ok(true));
        assert_eq!(nfa.run(""), Ok(false));
        assert_eq!(nfa.run("aa"), Ok(false));
        assert_eq!(nfa.run("b"), Ok(false));
    }

    #[test]
    fn test_nfa_loop() {
        let nfa = nfa(abc_star());
        let samples =
            vec![("abc", true),
                 ("", true),
                 ("a", false),
                 ("ab", false),
                 ("abca", false),
                 ("abcab", false),
                 ("abcabcabc", true),];

        for (input,expected_result) in samples {
            assert!(nfa.run(input) == Ok(expected_result), "input false for: \"{}\"", input);
        }
    }

    #[test]
    fn test_nfa_several_destinations() {
        // words over {a,b} whose second to last symbol is a
        let nfa = nfa(AutomatonBuilder::new()
            .add_start("p")
            .add_final("r")
            .add_transition("(p,a)=p,q")
            .add_transition("(p,b)=p")
            .add_transition("(q,a)=r")
            .add_transition("(q,b)=r"));
        assert!(nfa.test("ab"));
        assert!(nfa.test("bbaa"));
        assert!(!nfa.test("ba"));
        assert!(!nfa.test("a"));
    }

    #[test]
    fn test_epsilon_closure() {
        let nfa = nfa(AutomatonBuilder::new()
            .add_transition("(A,ε)=B")
            .add_transition("(B,ε)=C")
            .add_transition("(C,ε)=A")
            .add_transition("(D,ε)=A")
            .add_transition("(A,a)=D"));
        assert_eq!(nfa.epsilon_closure(vec!["A"]), set(&["A", "B", "C"]));
        assert_eq!(nfa.epsilon_closure(vec!["D"]), set(&["A", "B", "C", "D"]));
        assert_eq!(nfa.epsilon_closure(vec!["E"]), set(&["E"]));
        assert!(nfa.epsilon_closure(Vec::new()).is_empty());
    }

    #[test]
    fn test_epsilon_closure_is_a_fixed_point() {
        let nfa = nfa(abc_star().add_transition("(1,ε)=2,3"));
        let seeds: Vec<Vec<&str>> = vec![vec!["1"], vec!["2", "3"], vec!["0", "1"], vec![]];
        for seed in seeds.iter() {
            let once = nfa.epsilon_closure(seed.iter().copied());
            let twice = nfa.epsilon_closure(once.iter().copied());
            assert_eq!(once, twice);
            assert!(seed.iter().all(|state| once.contains(state)));
        }
    }

    #[test]
    fn test_walk() {
        let nfa = nfa(epsilon_then_a());
        assert_eq!(nfa.walk(""), Ok(set(&["A", "B"])));
        assert_eq!(nfa.walk("a"), Ok(set(&["C"])));
        assert_eq!(nfa.walk("aaa"), Ok(set(&[])));
    }

    #[test]
    fn test_empty_input_uses_the_closure_of_the_start() {
        let nfa = nfa(epsilon_then_a().add_final("B"));
        assert_eq!(nfa.run(""), Ok(true));
    }

    #[test]
    fn test_epsilon_is_not_followed_before_a_symbol_from_outside_the_set() {
        // B is only reachable by epsilon from C, which is never entered
        let nfa = nfa(AutomatonBuilder::new()
            .add_start("A")
            .add_final("B")
            .add_transition("(C,ε)=B")
            .add_transition("(A,a)=A"));
        assert_eq!(nfa.run("aa"), Ok(false));
    }

    #[test]
    fn test_nfa_missing_start() {
        let nfa = nfa(AutomatonBuilder::new()
            .add_final("C")
            .add_transition("(A,ε)=B"));
        assert_eq!(nfa.walk(""), Err(SimulationError::MissingStartState(Kind::Nfa)));
        assert_eq!(nfa.run("a"), Err(SimulationError::MissingStartState(Kind::Nfa)));
    }

    #[test]
    fn test_nfa_missing_finals() {
        let nfa = nfa(AutomatonBuilder::new()
            .add_start("A")
            .add_transition("(A,ε)=B")
            .add_transition("(B,a)=C"));
        assert_eq!(nfa.walk("a"), Ok(set(&["C"])));
        assert_eq!(nfa.run("a"), Err(SimulationError::MissingAcceptedStates(Kind::Nfa)));
        assert!(!nfa.test("a"));
    }
}
