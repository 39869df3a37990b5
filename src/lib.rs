// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

#![deny(missing_docs)]

//! Reads a finite automaton from a sectioned text description and tests words
//! against it. The automaton is a DFA or an NFA with epsilon transitions,
//! depending on its transitions.

/// automaton api
pub mod automaton;
/// transition relation
pub mod delta;
/// dfa api
pub mod dfa;
/// nfa api
pub mod nfa;
/// description reader
pub mod reader;
