// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

/// automaton builder
pub mod builder;

use std::fmt;
use std::result;
use std::str::FromStr;

use itertools::Itertools;
use thiserror::Error;

use crate::delta::TransitionRelation;
use crate::dfa::DFA;
use crate::nfa::NFA;

/// The variant of an automaton, decided once while reading its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Deterministic finite automaton.
    Dfa,
    /// Non-deterministic finite automaton, with epsilon transitions.
    Nfa,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Kind::Dfa => write!(f, "DFA"),
            Kind::Nfa => write!(f, "NFA"),
        }
    }
}

/// The `SimulationError` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// No starting state is specified, the input is not read.
    #[error("{0} 'firstState' not defined.")]
    MissingStartState(Kind),
    /// The description has no `acceptedStates` section. The word is not accepted.
    #[error("{0} 'acceptedStates' not defined.")]
    MissingAcceptedStates(Kind),
}

/// Alias for result::Result<T,SimulationError>.
pub type Result<T> = result::Result<T, SimulationError>;

/// A section of an automaton description, named by its `keyword:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `keyword:alphabet`, one symbol per line.
    Alphabet,
    /// `keyword:states`, one state per line.
    States,
    /// `keyword:delta`, one transition per line.
    Delta,
    /// `keyword:firstState`, the starting state.
    FirstState,
    /// `keyword:acceptedStates`, one final state per line.
    AcceptedStates,
}

impl Section {
    /// The keyword naming the section.
    pub fn name(&self) -> &'static str {
        match *self {
            Section::Alphabet => "alphabet",
            Section::States => "states",
            Section::Delta => "delta",
            Section::FirstState => "firstState",
            Section::AcceptedStates => "acceptedStates",
        }
    }
}

/// A keyword that does not name any section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown keyword `{0}`")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(name: &str) -> result::Result<Section, UnknownSection> {
        match name {
            "alphabet" => Ok(Section::Alphabet),
            "states" => Ok(Section::States),
            "delta" => Ok(Section::Delta),
            "firstState" => Ok(Section::FirstState),
            "acceptedStates" => Ok(Section::AcceptedStates),
            _ => Err(UnknownSection(name.to_owned())),
        }
    }
}

/// The sections of an automaton description, except the transitions. A section
/// that never appeared is `None`; repeated sections accumulate their lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    /// Declared symbols.
    pub alphabet: Option<Vec<String>>,
    /// Declared states.
    pub states: Option<Vec<String>>,
    /// Lines of the `firstState` sections. Only the first one is used.
    pub first_state: Option<Vec<String>>,
    /// Final states.
    pub accepted_states: Option<Vec<String>>,
}

impl Definition {
    /// Lines collected for `section`, if it appeared. The transitions are not
    /// part of the definition.
    pub fn section(&self, section: Section) -> Option<&[String]> {
        let lines = match section {
            Section::Alphabet => &self.alphabet,
            Section::States => &self.states,
            Section::FirstState => &self.first_state,
            Section::AcceptedStates => &self.accepted_states,
            Section::Delta => return None,
        };
        lines.as_deref()
    }

    /// The starting state: the first line of the `firstState` sections, unless
    /// it is missing or empty. A blank first line counts as no starting state
    /// rather than a state named by the empty string.
    pub fn start(&self) -> Option<&str> {
        self.first_state
            .as_ref()
            .and_then(|lines| lines.first())
            .map(String::as_str)
            .filter(|state| !state.is_empty())
    }

    /// The final states, `None` when no `acceptedStates` section appeared.
    pub fn accepted_states(&self) -> Option<&[String]> {
        self.accepted_states.as_deref()
    }

    /// Returns true if one of `states` is a final state. Fails when no final
    /// state is specified, even if `states` is empty.
    pub fn is_accepting<'a, I>(&self, states: I, kind: Kind) -> Result<bool>
        where I: IntoIterator<Item = &'a str>
    {
        let finals = self.accepted_states()
            .ok_or(SimulationError::MissingAcceptedStates(kind))?;
        Ok(states.into_iter().any(|state| finals.iter().any(|fi| fi == state)))
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sections = [Section::Alphabet, Section::States, Section::FirstState, Section::AcceptedStates];
        for section in sections.iter() {
            if let Some(lines) = self.section(*section) {
                writeln!(f, "{}: [{}]", section.name(), lines.iter().join(", "))?;
            }
        }
        Ok(())
    }
}

/// The type `Automaton` is either a `DFA` or an `NFA`, as classified when its
/// description was read.
#[derive(Debug, Clone)]
pub enum Automaton {
    /// Deterministic variant.
    Dfa(DFA),
    /// Non-deterministic variant.
    Nfa(NFA),
}

impl Automaton {
    /// The variant tag.
    pub fn kind(&self) -> Kind {
        match *self {
            Automaton::Dfa(_) => Kind::Dfa,
            Automaton::Nfa(_) => Kind::Nfa,
        }
    }

    /// The sections of the description.
    pub fn definition(&self) -> &Definition {
        match *self {
            Automaton::Dfa(ref dfa) => dfa.definition(),
            Automaton::Nfa(ref nfa) => nfa.definition(),
        }
    }

    /// The transition relation.
    pub fn delta(&self) -> &TransitionRelation {
        match *self {
            Automaton::Dfa(ref dfa) => dfa.delta(),
            Automaton::Nfa(ref nfa) => nfa.delta(),
        }
    }

    /// Simulates the automaton on `input`.
    ///
    /// # Errors
    ///
    /// Return a SimulationError::MissingStartState if no starting state is specified.
    ///
    /// Return a SimulationError::MissingAcceptedStates if the final states are not specified.
    pub fn run(&self, input: &str) -> Result<bool> {
        match *self {
            Automaton::Dfa(ref dfa) => dfa.run(input),
            Automaton::Nfa(ref nfa) => nfa.run(input),
        }
    }

    /// Test if an input string is a word of the language defined by the automaton.
    /// An incomplete automaton accepts nothing.
    pub fn test(&self, input: &str) -> bool {
        self.run(input).unwrap_or(false)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "kind: {}", self.kind())?;
        write!(f, "{}", self.definition())
    }
}
