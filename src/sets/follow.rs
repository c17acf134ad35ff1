use crate::grammar::{Grammar, Symbol};

use super::{sequence_first, FirstTable, FollowTable, SymbolSet};

// Computes FOLLOW for every nonterminal from the converged FIRST table,
// iterating full passes until a pass leaves the table unchanged. The
// sets are bounded by the terminals plus $, so the loop terminates
pub fn compute_follow(grammar: &Grammar, first: &FirstTable) -> FollowTable {
    let mut follow: FollowTable = grammar
        .nonterminals
        .iter()
        .map(|nt| (nt.clone(), SymbolSet::new()))
        .collect();

    // End of input can always follow the start symbol
    if let Some(start) = follow.get_mut(&grammar.start_symbol) {
        start.insert(Symbol::EndOfInput);
    }

    loop {
        let snapshot = follow.clone();
        follow_pass(grammar, first, &mut follow);
        if follow == snapshot {
            return follow;
        }
    }
}

// One full pass over every nonterminal occurrence; only ever adds to
// the table
fn follow_pass(grammar: &Grammar, first: &FirstTable, follow: &mut FollowTable) {
    for lhs in &grammar.nonterminals {
        for production in grammar.alternatives(lhs) {
            for (position, symbol) in production.iter().enumerate() {
                let name = match symbol {
                    Symbol::Nonterminal(name) => name,
                    _ => continue,
                };

                // FIRST of everything after this occurrence; ε means
                // the whole suffix can vanish, including the case of
                // an empty suffix
                let trailing = sequence_first(&production[position + 1..], first);

                // When the suffix can vanish, whatever follows the
                // left-hand side can also follow this occurrence
                let inherited = if trailing.contains(&Symbol::Epsilon) {
                    follow.get(lhs).cloned()
                } else {
                    None
                };

                if let Some(entry) = follow.get_mut(name) {
                    entry.extend(trailing.into_iter().filter(|s| *s != Symbol::Epsilon));
                    if let Some(inherited) = inherited {
                        entry.extend(inherited);
                    }
                }
            }
        }
    }
}
