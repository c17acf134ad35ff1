/*
    This module computes the FIRST, FOLLOW, and LL(1) prediction sets
    of a grammar by fixed-point iteration
*/

mod first;
mod follow;
mod predict;

use std::collections::{BTreeSet, HashMap};

use crate::grammar::{Production, Symbol};

pub use first::compute_first;
pub use follow::compute_follow;
pub use predict::compute_predict;

pub type SymbolSet = BTreeSet<Symbol>;
pub type FirstTable = HashMap<String, SymbolSet>;
pub type FollowTable = HashMap<String, SymbolSet>;

// One entry per alternative, in declaration order
pub type PredictTable = HashMap<String, Vec<(Production, SymbolSet)>>;

// FIRST of a symbol string, read left to right: each symbol contributes
// its FIRST minus ε, and the scan stops at the first symbol that cannot
// derive ε. ε joins the result only when every symbol was crossed
// without stopping, which includes the empty string
fn sequence_first(body: &[Symbol], first: &FirstTable) -> SymbolSet {
    let mut derived = SymbolSet::new();

    for symbol in body {
        let nullable = match symbol {
            Symbol::Nonterminal(name) => match first.get(name) {
                Some(set) => {
                    derived.extend(set.iter().filter(|s| **s != Symbol::Epsilon).cloned());
                    set.contains(&Symbol::Epsilon)
                }
                // An entry that has not been built yet contributes nothing
                None => false,
            },
            Symbol::Epsilon => true,
            symbol => {
                derived.insert(symbol.clone());
                false
            }
        };

        if !nullable {
            return derived;
        }
    }

    derived.insert(Symbol::Epsilon);
    return derived;
}
