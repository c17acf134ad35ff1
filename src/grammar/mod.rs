/*
    This module is for storing grammars
*/

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

// Written in grammar sources to mark an alternative that derives the
// empty string
pub const EPSILON_MARKER: &str = "ε";

// The base unit in a grammar rule. Epsilon and EndOfInput never occur
// inside a stored production body; they exist as set elements
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
    Epsilon,
    EndOfInput,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => write!(f, "{}", name),
            Symbol::Epsilon => write!(f, "{}", EPSILON_MARKER),
            Symbol::EndOfInput => write!(f, "$"),
        }
    }
}

// The symbols in a single alternative; an empty body derives the
// empty string
pub type Production = Vec<Symbol>;

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    // Every left-hand side in declaration order; the first one is the
    // start symbol
    pub nonterminals: Vec<String>,
    pub terminals: BTreeSet<String>,
    pub rules: HashMap<String, Vec<Production>>,
}

impl Grammar {
    // Every declared nonterminal has an entry in rules, but a safe
    // lookup keeps the engines total on any Grammar value
    pub fn alternatives(&self, nonterminal: &str) -> &[Production] {
        self.rules.get(nonterminal).map(Vec::as_slice).unwrap_or(&[])
    }
}
