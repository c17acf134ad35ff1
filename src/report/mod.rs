/*
    This module renders computed tables as text
*/

use itertools::Itertools;

use crate::grammar::{Grammar, Production, EPSILON_MARKER};
use crate::sets::{FirstTable, FollowTable, PredictTable, SymbolSet};

const SECTION_RULE: &str = "---------------------";

fn render_set(set: &SymbolSet) -> String {
    set.iter().join(", ")
}

fn render_body(body: &Production) -> String {
    if body.is_empty() {
        EPSILON_MARKER.to_string()
    } else {
        body.iter().join(" ")
    }
}

// One `PRIM(X)={a, b}` line per nonterminal, in declaration order
pub fn render_first(grammar: &Grammar, first: &FirstTable) -> String {
    grammar
        .nonterminals
        .iter()
        .filter_map(|nt| first.get(nt).map(|set| format!("PRIM({})={{{}}}", nt, render_set(set))))
        .join("\n")
}

// One `SIG(X)={a, b}` line per nonterminal, in declaration order
pub fn render_follow(grammar: &Grammar, follow: &FollowTable) -> String {
    grammar
        .nonterminals
        .iter()
        .filter_map(|nt| follow.get(nt).map(|set| format!("SIG({})={{{}}}", nt, render_set(set))))
        .join("\n")
}

// One `PRED(X)=s1 s2 -> a, b` line per alternative, in declaration order
pub fn render_predict(grammar: &Grammar, predict: &PredictTable) -> String {
    grammar
        .nonterminals
        .iter()
        .flat_map(|nt| {
            predict.get(nt).into_iter().flatten().map(move |(production, selection)| {
                format!("PRED({})={} -> {}", nt, render_body(production), render_set(selection))
            })
        })
        .join("\n")
}

pub fn print_tables(grammar: &Grammar, first: &FirstTable, follow: &FollowTable, predict: &PredictTable) {
    println!("{}", SECTION_RULE);
    println!("{}", render_first(grammar, first));
    println!("{}", SECTION_RULE);
    println!("{}", render_follow(grammar, follow));
    println!("{}", SECTION_RULE);
    println!("{}", render_predict(grammar, predict));
    println!("{}", SECTION_RULE);
}
