// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use log::warn;

use crate::automaton::{Automaton, Definition, Kind, Section};
use crate::delta::{TransitionRelation, EPSILON};
use crate::dfa::DFA;
use crate::nfa::NFA;

/// The `AutomatonBuilder` follows the builder pattern and collects the sections of
/// an automaton description. The builder is moved at each call so it is necessary
/// to bind to a new variable the return value for each function of the builder.
///
/// Transition lines are kept raw until `finalize`, where they are turned into the
/// transition relation of the chosen variant.
///
/// # Examples
///
/// ```
/// use automaton::automaton::Kind;
/// use automaton::automaton::builder::AutomatonBuilder;
///
/// // binary words ending with 1
/// let dfa = AutomatonBuilder::new()
///     .add_symbol("0")
///     .add_symbol("1")
///     .add_state("q0")
///     .add_state("q1")
///     .add_start("q0")
///     .add_final("q1")
///     .add_transition("(q0,0)=q0")
///     .add_transition("(q0,1)=q1")
///     .add_transition("(q1,0)=q0")
///     .add_transition("(q1,1)=q1")
///     .finalize(Kind::Dfa);
/// assert!(dfa.test("101"));
/// assert!(!dfa.test("100"));
/// ```
///
/// ```
/// use automaton::automaton::{Kind, SimulationError};
/// use automaton::automaton::builder::AutomatonBuilder;
///
/// let nfa = AutomatonBuilder::new()
///     .add_final("B")
///     .add_transition("(A,ε)=B")
///     .finalize(Kind::Nfa);
/// assert_eq!(nfa.run(""), Err(SimulationError::MissingStartState(Kind::Nfa)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    definition: Definition,
    transitions: Vec<(usize, String)>,
}

impl AutomatonBuilder {
    /// Creates a new AutomatonBuilder.
    pub fn new() -> AutomatonBuilder {
        AutomatonBuilder::default()
    }

    /// Marks `section` as present, even if no line follows.
    pub fn open(mut self, section: Section) -> AutomatonBuilder {
        if let Some(lines) = self.lines_mut(section) {
            lines.get_or_insert_with(Vec::new);
        }
        self
    }

    /// Appends a line to `section`. `nline` locates the line in its source and is
    /// only used to report skipped transitions.
    pub fn add_line(mut self, section: Section, nline: usize, line: &str) -> AutomatonBuilder {
        match self.lines_mut(section) {
            Some(lines) => lines.get_or_insert_with(Vec::new).push(line.to_owned()),
            None => self.transitions.push((nline, line.to_owned())),
        }
        self
    }

    /// Add a symbol to the alphabet.
    pub fn add_symbol(self, symbol: &str) -> AutomatonBuilder {
        self.add_line(Section::Alphabet, 0, symbol)
    }

    /// Add a state.
    pub fn add_state(self, state: &str) -> AutomatonBuilder {
        self.add_line(Section::States, 0, state)
    }

    /// Add a starting state. Only the first one is used.
    pub fn add_start(self, state: &str) -> AutomatonBuilder {
        self.add_line(Section::FirstState, 0, state)
    }

    /// Add a final state.
    pub fn add_final(self, state: &str) -> AutomatonBuilder {
        self.add_line(Section::AcceptedStates, 0, state)
    }

    /// Add a transition line `(state,symbol)=dest1,...,destN`. Skipped transitions
    /// added this way are numbered by their position among the transitions.
    pub fn add_transition(self, line: &str) -> AutomatonBuilder {
        let nline = self.transitions.len() + 1;
        self.add_line(Section::Delta, nline, line)
    }

    /// Finalize the building of the automaton as a `kind` automaton.
    ///
    /// Nothing is checked here: a missing starting state or missing final states
    /// are reported when the automaton is run.
    pub fn finalize(self, kind: Kind) -> Automaton {
        let AutomatonBuilder { definition, transitions } = self;
        if definition.alphabet.iter().flatten().any(|symbol| symbol == EPSILON) {
            warn!("the alphabet declares the reserved symbol {}", EPSILON);
        }
        let delta = TransitionRelation::from_lines(transitions
            .iter()
            .map(|(nline, line)| (*nline, line.as_str())));
        match kind {
            Kind::Dfa => Automaton::Dfa(DFA::new(definition, delta)),
            Kind::Nfa => Automaton::Nfa(NFA::new(definition, delta)),
        }
    }

    fn lines_mut(&mut self, section: Section) -> Option<&mut Option<Vec<String>>> {
        match section {
            Section::Alphabet => Some(&mut self.definition.alphabet),
            Section::States => Some(&mut self.definition.states),
            Section::FirstState => Some(&mut self.definition.first_state),
            Section::AcceptedStates => Some(&mut self.definition.accepted_states),
            Section::Delta => None,
        }
    }
}
