/*
    This module loads grammar files of the form `LHS -> ALT1 | ALT2`
*/

use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;
use std::fs;
use std::path::PathBuf;

use itertools::Itertools;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug)]
pub enum LoadErrorType {
    // A rule line does not contain exactly one production arrow
    MalformedLine(String),
    // There was an issue with reading the grammar source
    FileError(std::io::Error),
    // No usable rule line survived loading
    EmptyGrammar,
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadErrorType::FileError(a), LoadErrorType::FileError(b)) => a.kind() == b.kind(),
            (LoadErrorType::MalformedLine(a), LoadErrorType::MalformedLine(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::MalformedLine(line) => write!(f, "Rule `{}` must contain exactly one `->`", line),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
            LoadErrorType::EmptyGrammar => write!(f, "No valid grammar rules found"),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type LoadResult<T> = std::result::Result<T, LoadFailure>;

// A fatal load failure, carrying the reports for any malformed lines
// that were skipped before the failure was detected, so they still
// reach the user
#[derive(Debug, PartialEq)]
pub struct LoadFailure {
    pub error: LoadError,
    pub skipped: LoadErrors,
}

// A successfully loaded grammar, together with the reports for any
// malformed lines that were skipped along the way
#[derive(Debug, PartialEq)]
pub struct Load {
    pub grammar: Grammar,
    pub skipped: LoadErrors,
}

// A rule line split at its arrow but not yet classified
#[derive(PartialEq, Debug)]
struct RawRule<'a> {
    lhs: &'a str,
    rhs: &'a str,
}

fn is_rule_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#')
}

// Returns the trimmed rule lines of a source along with their
// one-based line numbers
fn rule_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(num, line)| (num + 1, line))
}

fn split_rule(line: &str, location: Location) -> LineResult<RawRule<'_>> {
    let mut sides = line.split("->");
    match (sides.next(), sides.next(), sides.next()) {
        (Some(lhs), Some(rhs), None) => Ok(RawRule {
            lhs: lhs.trim(),
            rhs: rhs.trim(),
        }),
        _ => Err(LoadError::at(location, LoadErrorType::MalformedLine(line.to_string()))),
    }
}

fn parse_production(alternative: &str, nonterminals: &[String], terminals: &mut BTreeSet<String>) -> Production {
    let mut body = Production::new();
    for token in alternative.split_whitespace() {
        if token == EPSILON_MARKER {
            // An epsilon alternative is stored as an empty body
            continue;
        }
        if nonterminals.iter().any(|nt| nt == token) {
            body.push(Symbol::Nonterminal(token.to_string()));
        } else {
            terminals.insert(token.to_string());
            body.push(Symbol::Terminal(token.to_string()));
        }
    }
    return body;
}

// Generates a grammar from split rule lines. Symbols are classified
// exactly once: a name is a nonterminal iff it appears as some rule's
// left-hand side, everything else is a terminal
fn grammar_from_rules(raw_rules: Vec<RawRule>) -> Grammar {
    let mut nonterminals: Vec<String> = Vec::new();
    for rule in &raw_rules {
        if !nonterminals.iter().any(|nt| nt == rule.lhs) {
            nonterminals.push(rule.lhs.to_string());
        }
    }

    let mut terminals = BTreeSet::new();
    let mut rules: HashMap<String, Vec<Production>> = HashMap::with_capacity(nonterminals.len());
    for rule in &raw_rules {
        let alternatives = rules.entry(rule.lhs.to_string()).or_default();
        for alternative in rule.rhs.split('|') {
            alternatives.push(parse_production(alternative, &nonterminals, &mut terminals));
        }
    }

    // The caller rejects empty rule sets before reaching this point
    let start_symbol = nonterminals[0].clone();

    return Grammar {
        start_symbol,
        nonterminals,
        terminals,
        rules,
    };
}

pub fn load_str(source: &str, path: &PathBuf) -> LoadResult<Load> {
    let split_lines = rule_lines(source).map(|(num, line)| {
        split_rule(line, Location::at_line(path.clone(), num))
    });

    let (rules, skipped): (Vec<_>, Vec<_>) = split_lines.partition(LineResult::is_ok);
    let rules = rules.into_iter().map(LineResult::unwrap).collect_vec();
    let skipped = skipped.into_iter().map(LineResult::unwrap_err).collect_vec();

    if rules.is_empty() {
        return Err(LoadFailure {
            error: LoadError::at(Location::whole_file(path.clone()), LoadErrorType::EmptyGrammar),
            skipped,
        });
    }

    return Ok(Load {
        grammar: grammar_from_rules(rules),
        skipped,
    });
}

pub fn load_file(path: &PathBuf) -> LoadResult<Load> {
    let source = fs::read_to_string(path).map_err(|e| LoadFailure {
        error: LoadError::at(Location::whole_file(path.clone()), LoadErrorType::FileError(e)),
        skipped: Vec::new(),
    })?;

    return load_str(&source, path);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::Nonterminal(text.to_string())
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::Terminal(text.to_string())
    }

    fn load(source: &str) -> Load {
        load_str(source, &PathBuf::new()).unwrap()
    }

    #[test]
    fn load_normal_grammar() {
        let loaded = load("E -> T E'\nE' -> + T E' | ε\nT -> id\n");
        let grammar = loaded.grammar;

        assert!(loaded.skipped.is_empty());
        assert_eq!(grammar.start_symbol, "E");
        assert_eq!(grammar.nonterminals, vec!["E", "E'", "T"]);
        assert_eq!(
            grammar.terminals,
            BTreeSet::from(["+".to_string(), "id".to_string()])
        );
        assert_eq!(grammar.alternatives("E"), &[vec![
            s_nonterminal("T"),
            s_nonterminal("E'")
        ]]);
        assert_eq!(grammar.alternatives("E'"), &[
            vec![s_terminal("+"), s_nonterminal("T"), s_nonterminal("E'")],
            vec![]
        ]);
        assert_eq!(grammar.alternatives("T"), &[vec![s_terminal("id")]]);
    }

    #[test]
    fn repeated_lhs_appends_alternatives() {
        let grammar = load("A -> a\nA -> b\n").grammar;

        assert_eq!(grammar.nonterminals, vec!["A"]);
        assert_eq!(grammar.alternatives("A"), &[
            vec![s_terminal("a")],
            vec![s_terminal("b")]
        ]);
    }

    #[test]
    fn forward_references_are_nonterminals() {
        // B is used on line 1 but only defined on line 2; the one-time
        // classification pass must still tag it as a nonterminal
        let grammar = load("A -> B c\nB -> b\n").grammar;

        assert_eq!(grammar.alternatives("A"), &[vec![
            s_nonterminal("B"),
            s_terminal("c")
        ]]);
        assert_eq!(grammar.terminals, BTreeSet::from(["b".to_string(), "c".to_string()]));
    }

    #[test]
    fn epsilon_token_is_dropped_from_bodies() {
        let grammar = load("A -> ε | a ε b\n").grammar;

        assert_eq!(grammar.alternatives("A"), &[
            vec![],
            vec![s_terminal("a"), s_terminal("b")]
        ]);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let loaded = load("# a comment\n\nS -> a\n   \n# another\n");

        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.grammar.nonterminals, vec!["S"]);
    }

    #[test]
    fn malformed_line_is_reported_and_skipped() {
        let loaded = load_str("S -> a A\nA -> b -> c\nA -> b\n", &PathBuf::new()).unwrap();

        assert_eq!(loaded.skipped, vec![LoadError::at(
            Location::at_line(PathBuf::new(), 2),
            LoadErrorType::MalformedLine("A -> b -> c".to_string())
        )]);
        // The remaining lines still form the grammar
        assert_eq!(loaded.grammar.nonterminals, vec!["S", "A"]);
        assert_eq!(loaded.grammar.alternatives("A"), &[vec![s_terminal("b")]]);
    }

    #[test]
    fn arrowless_line_is_reported_and_skipped() {
        let loaded = load("S -> a\njust some words\n");

        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(
            loaded.skipped[0].error,
            LoadErrorType::MalformedLine("just some words".to_string())
        );
    }

    #[test]
    fn empty_source_fails() {
        let failure = load_str("# nothing here\n\n", &PathBuf::new()).unwrap_err();

        assert_eq!(failure.error.error, LoadErrorType::EmptyGrammar);
        assert!(failure.skipped.is_empty());
    }

    #[test]
    fn only_malformed_lines_fails_with_their_reports() {
        let failure = load_str("a -> b -> c\n", &PathBuf::new()).unwrap_err();

        // The failure is fatal, but the malformed lines must still be
        // reported individually
        assert_eq!(failure.error.error, LoadErrorType::EmptyGrammar);
        assert_eq!(failure.skipped, vec![LoadError::at(
            Location::at_line(PathBuf::new(), 1),
            LoadErrorType::MalformedLine("a -> b -> c".to_string())
        )]);
    }

    #[test]
    fn missing_file_fails() {
        let failure = load_file(&PathBuf::from("example_data/does_not_exist.txt")).unwrap_err();

        assert!(matches!(failure.error.error, LoadErrorType::FileError(_)));
        assert!(failure.skipped.is_empty());
    }

    #[test]
    fn load_normal_file() {
        let path = PathBuf::from("example_data/expression.txt");
        let loaded = load_file(&path).unwrap();

        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.grammar.start_symbol, "E");
        assert_eq!(loaded.grammar.nonterminals, vec!["E", "E'", "T"]);
    }

    #[test]
    fn load_malformed_file() {
        let path = PathBuf::from("example_data/malformed.txt");
        let loaded = load_file(&path).unwrap();

        assert_eq!(loaded.skipped, vec![LoadError::at(
            Location::at_line(path, 2),
            LoadErrorType::MalformedLine("A -> b -> c".to_string())
        )]);
        assert_eq!(loaded.grammar.nonterminals, vec!["S", "A"]);
    }

    #[test]
    fn load_comments_only_file() {
        let path = PathBuf::from("example_data/comments_only.txt");
        let failure = load_file(&path).unwrap_err();

        assert_eq!(failure, LoadFailure {
            error: LoadError::at(Location::whole_file(path), LoadErrorType::EmptyGrammar),
            skipped: Vec::new(),
        });
    }
}
