//! Symbol extraction from equation text.
//!
//! Equation groups carry LaTeX. The identifiers found in it (single Latin
//! letters and Greek-letter commands, optionally with a subscript) are stored
//! with the group so equations can be looked up by the variables they use.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{LinkError, Result};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[A-Za-z]+|\\.|[A-Za-z]|[0-9]+(?:\.[0-9]+)?|[{}_^]|\S").expect("valid token regex")
});

const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "pi", "varpi", "rho", "varrho",
    "sigma", "varsigma", "tau", "upsilon", "phi", "varphi", "chi", "psi", "omega", "Gamma",
    "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi", "Omega", "ell",
];

/// Commands whose braced argument is prose or markup, not math.
const OPAQUE: &[&str] = &[
    "text", "textrm", "textit", "textbf", "mathrm", "operatorname", "mbox", "hbox", "label",
    "tag", "begin", "end", "ref", "eqref", "cite",
];

fn check_balanced(tokens: &[&str]) -> Result<()> {
    let mut depth: usize = 0;
    for tok in tokens {
        match *tok {
            "{" => depth += 1,
            "}" => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    LinkError::SymbolExtraction("unexpected closing brace".to_string())
                })?
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(LinkError::SymbolExtraction(format!(
            "{} unclosed braces",
            depth
        )));
    }
    Ok(())
}

/// Index just past the group opened at `start` (which must hold `{`).
fn skip_group(tokens: &[&str], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < tokens.len() {
        match tokens[i] {
            "{" => depth += 1,
            "}" => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// Reads a subscript starting at `i` (just past `_`); returns its source
/// text and the index after it.
fn read_subscript(tokens: &[&str], i: usize) -> Option<(String, usize)> {
    match tokens.get(i) {
        Some(&"{") => {
            let end = skip_group(tokens, i);
            Some((tokens[i..end].concat(), end))
        }
        Some(tok) if *tok != "}" && *tok != "_" && *tok != "^" => Some((tok.to_string(), i + 1)),
        _ => None,
    }
}

/// Extracts the identifiers used in `latex`, in order of first appearance.
///
/// Fails on unbalanced braces.
pub fn extract_symbols(latex: &str) -> Result<IndexSet<String>> {
    let tokens: Vec<&str> = TOKEN_RE.find_iter(latex).map(|m| m.as_str()).collect();
    check_balanced(&tokens)?;

    let mut symbols = IndexSet::new();
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        i += 1;

        let base = if let Some(name) = tok.strip_prefix('\\') {
            if OPAQUE.contains(&name) {
                if tokens.get(i) == Some(&"{") {
                    i = skip_group(&tokens, i);
                }
                continue;
            }
            if !GREEK.contains(&name) {
                continue;
            }
            tok
        } else if tok.len() == 1 && tok.as_bytes()[0].is_ascii_alphabetic() {
            tok
        } else {
            continue;
        };

        let mut symbol = base.to_string();
        if tokens.get(i) == Some(&"_") {
            if let Some((sub, next)) = read_subscript(&tokens, i + 1) {
                symbol.push('_');
                symbol.push_str(&sub);
                i = next;
            }
        }
        symbols.insert(symbol);
    }
    Ok(symbols)
}

/// Symbols of `latex`, or `None` when there are none or extraction failed.
pub fn symbols_or_none(latex: &str) -> Option<Vec<String>> {
    match extract_symbols(latex) {
        Ok(set) if !set.is_empty() => Some(set.into_iter().collect()),
        Ok(_) => None,
        Err(e) => {
            debug!(error = %e, "no symbols extracted");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(s: &str) -> Vec<String> {
        extract_symbols(s).unwrap().into_iter().collect()
    }

    #[test]
    fn test_letters_and_greek() {
        assert_eq!(syms(r"E = m c^2 + \alpha"), vec!["E", "m", "c", r"\alpha"]);
    }

    #[test]
    fn test_subscripts_attach() {
        assert_eq!(syms(r"x_i + x_{ij} + \beta_{1}"), vec!["x_i", "x_{ij}", r"\beta_{1}"]);
    }

    #[test]
    fn test_commands_are_not_symbols() {
        assert_eq!(syms(r"\frac{a}{b} + \sin y"), vec!["a", "b", "y"]);
    }

    #[test]
    fn test_opaque_arguments_skipped() {
        assert_eq!(syms(r"v \text{if and only if} \mathrm{d}t"), vec!["v", "t"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(syms("x + x = 2x"), vec!["x"]);
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        assert!(matches!(
            extract_symbols(r"\frac{a}{b"),
            Err(LinkError::SymbolExtraction(_))
        ));
        assert!(extract_symbols("a}").is_err());
    }

    #[test]
    fn test_none_for_empty_or_failed() {
        assert_eq!(symbols_or_none("1 + 2 = 3"), None);
        assert_eq!(symbols_or_none(""), None);
        assert_eq!(symbols_or_none("{x"), None);
        assert_eq!(symbols_or_none("x=1+y"), Some(vec!["x".to_string(), "y".to_string()]));
    }
}
