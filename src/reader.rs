// Copyright 2016 Vincent Vigneron. See the COPYRIGHT
// file at the top-level directory of this distribution.
//
// Licensed under the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at.your option.
// This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::result;

use log::{debug, warn};
use thiserror::Error;

use crate::automaton::builder::AutomatonBuilder;
use crate::automaton::{Automaton, Kind, Section};
use crate::delta;

/// Line that closes a section.
pub const SECTION_END: &str = "[end]";
/// Line after which nothing is read.
pub const END_OF_FILE: &str = "[eof]";
/// Prefix of the line naming a section, as in `keyword:alphabet`.
pub const KEYWORD: &str = "keyword";
/// Extension given to description files.
pub const EXTENSION: &str = ".txt";

/// Type `ReaderError` describes the list of errors that can occur during
/// the reading of an automaton description. Malformed lines are not errors.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Error `Io` is relative to the input errors (the file does not exist, the file
    /// can not be read,...).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Alias for result::Result<T,ReaderError>.
pub type Result<T> = result::Result<T, ReaderError>;

/// Appends `.txt` to a description file name that does not end with it. A name
/// that only contains `.txt` elsewhere, like `a.txt.bak`, still gets the suffix.
///
/// ```
/// use automaton::reader::description_path;
///
/// assert_eq!(description_path("dfa1"), "dfa1.txt");
/// assert_eq!(description_path("dfa1.txt"), "dfa1.txt");
/// assert_eq!(description_path("dfa1.dat"), "dfa1.dat.txt");
/// ```
pub fn description_path(name: &str) -> String {
    if name.ends_with(EXTENSION) {
        name.to_owned()
    } else {
        format!("{}{}", name, EXTENSION)
    }
}

/// The name following `keyword:`, if `line` is a keyword line.
fn keyword_name(line: &str) -> Option<&str> {
    if !line.starts_with(KEYWORD) {
        return None;
    }
    line.split(':').nth(1).map(str::trim)
}

/// Where the reader stands in the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Outside,
    Inside(Section),
    Ignored,
}

/// Decides the variant from the first delta section only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classifier {
    Waiting,
    Scanning,
    Decided(Kind),
}

impl Classifier {
    fn enter(self, section: Section) -> Classifier {
        match (self, section) {
            (Classifier::Waiting, Section::Delta) => Classifier::Scanning,
            (classifier, _) => classifier,
        }
    }

    fn observe(self, nline: usize, line: &str) -> Classifier {
        if self == Classifier::Scanning && delta::is_nondeterministic(line) {
            debug!("line {}: `{}` makes the automaton non-deterministic", nline, line);
            Classifier::Decided(Kind::Nfa)
        } else {
            self
        }
    }

    fn leave(self) -> Classifier {
        match self {
            Classifier::Scanning => Classifier::Decided(Kind::Dfa),
            classifier => classifier,
        }
    }

    fn kind(self) -> Kind {
        match self {
            Classifier::Decided(kind) => kind,
            _ => Kind::Dfa,
        }
    }
}

/// Struct `AutomatonReader` is an empty structure that builds an `Automaton` from
/// a file or from a `&str`.
///
/// The description is a list of sections:
///
/// ```text
/// [start]
/// keyword:delta
/// (q0,0)=q0
/// (q0,1)=q1
/// [end]
/// ```
///
/// The keyword is one of `alphabet`, `states`, `delta`, `firstState` and
/// `acceptedStates`. Lines outside the sections are ignored; inside a section every
/// line but `[end]` and `[eof]` is data, comments included. Reading stops at `[eof]`.
///
/// The automaton is an NFA if a line of the first delta section is an epsilon
/// transition or has several destinations, a DFA otherwise.
pub struct AutomatonReader;

impl AutomatonReader {
    /// Reads an automaton from a file. The file is closed before returning.
    ///
    /// # Description
    ///
    /// * `file_path` - The path to the file that contains the automaton.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton::reader::*;
    ///
    /// let automaton = AutomatonReader::new_from_file("automaton.txt");
    /// match automaton {
    ///     Ok(automaton) => {
    ///        // Do stuff with the automaton
    ///     },
    ///     Err(e) => println!("{}", e),
    /// }
    /// ```
    pub fn new_from_file<P: AsRef<Path>>(file_path: P) -> Result<Automaton> {
        let file = File::open(file_path)?;
        let file = BufReader::new(file);
        AutomatonReader::new_from_lines(file.lines())
    }

    /// Reads an automaton from a `&str`.
    ///
    /// # Examples
    ///
    /// ```
    /// use automaton::automaton::Kind;
    /// use automaton::reader::*;
    ///
    /// let automaton =
    ///     "[start]\n\
    ///      keyword:firstState\n\
    ///      A\n\
    ///      [end]\n\
    ///      [start]\n\
    ///      keyword:acceptedStates\n\
    ///      C\n\
    ///      [end]\n\
    ///      [start]\n\
    ///      keyword:delta\n\
    ///      (A,ε)=B\n\
    ///      (B,a)=C\n\
    ///      [end]";
    /// let automaton = AutomatonReader::new_from_string(automaton).unwrap();
    /// assert_eq!(automaton.kind(), Kind::Nfa);
    /// assert!(automaton.test("a"));
    /// ```
    pub fn new_from_string(automaton: &str) -> Result<Automaton> {
        AutomatonReader::new_from_lines(automaton.lines().map(|line| Ok(line.to_owned())))
    }

    /// Reads an automaton from a sequence of lines.
    pub fn new_from_lines<I>(lines: I) -> Result<Automaton>
        where I: IntoIterator<Item = io::Result<String>>
    {
        let mut builder = AutomatonBuilder::new();
        let mut classifier = Classifier::Waiting;
        let mut scope = Scope::Outside;
        for (nline, line) in lines.into_iter().enumerate().map(|(nline, line)| (nline + 1, line)) {
            let line = line?;
            let line = line.trim();
            if line == END_OF_FILE {
                debug!("line {}: end of file", nline);
                break;
            }
            scope = match scope {
                Scope::Outside => match keyword_name(line) {
                    Some(name) => match name.parse::<Section>() {
                        Ok(section) => {
                            debug!("line {}: section {}", nline, section.name());
                            builder = builder.open(section);
                            classifier = classifier.enter(section);
                            Scope::Inside(section)
                        }
                        Err(e) => {
                            warn!("line {}: {}, section ignored", nline, e);
                            Scope::Ignored
                        }
                    },
                    None => Scope::Outside,
                },
                _ if line == SECTION_END => {
                    classifier = classifier.leave();
                    Scope::Outside
                }
                Scope::Inside(section) => {
                    if section == Section::Delta {
                        classifier = classifier.observe(nline, line);
                    }
                    builder = builder.add_line(section, nline, line);
                    scope
                }
                Scope::Ignored => scope,
            };
        }
        let kind = classifier.kind();
        debug!("automaton classified as {}", kind);
        Ok(builder.finalize(kind))
    }
}
