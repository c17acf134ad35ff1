use crate::grammar::{Grammar, Symbol};

use super::{sequence_first, FirstTable, FollowTable, PredictTable};

// Computes the prediction (SELECT) set of every alternative in a single
// pass over the converged FIRST and FOLLOW tables. Overlapping sets
// between alternatives of one nonterminal are returned as-is; checking
// for LL(1) conflicts is the caller's concern
pub fn compute_predict(grammar: &Grammar, first: &FirstTable, follow: &FollowTable) -> PredictTable {
    grammar
        .nonterminals
        .iter()
        .map(|nonterminal| {
            let selections = grammar
                .alternatives(nonterminal)
                .iter()
                .map(|production| {
                    let mut selection = sequence_first(production, first);

                    // A production whose whole body can vanish is chosen
                    // on anything that may follow its left-hand side
                    if selection.remove(&Symbol::Epsilon) {
                        if let Some(follows) = follow.get(nonterminal) {
                            selection.extend(follows.iter().cloned());
                        }
                    }

                    (production.clone(), selection)
                })
                .collect();

            (nonterminal.clone(), selections)
        })
        .collect()
}
