use crate::grammar::Grammar;

use super::{sequence_first, FirstTable, SymbolSet};

// Computes FIRST for every nonterminal by running full passes over the
// rules until a pass leaves the table equal to its pre-pass snapshot.
// The sets only ever grow and are bounded by the terminals plus ε, so
// the loop terminates even for left-recursive grammars
pub fn compute_first(grammar: &Grammar) -> FirstTable {
    let mut first: FirstTable = grammar
        .nonterminals
        .iter()
        .map(|nt| (nt.clone(), SymbolSet::new()))
        .collect();

    loop {
        let snapshot = first.clone();
        first_pass(grammar, &mut first);
        if first == snapshot {
            return first;
        }
    }
}

// One full pass over every production; only ever adds to the table
fn first_pass(grammar: &Grammar, first: &mut FirstTable) {
    for nonterminal in &grammar.nonterminals {
        for production in grammar.alternatives(nonterminal) {
            let derived = sequence_first(production, first);
            if let Some(entry) = first.get_mut(nonterminal) {
                entry.extend(derived);
            }
        }
    }
}
