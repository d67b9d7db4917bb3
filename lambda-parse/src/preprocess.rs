//! Rewriting of ASCII shorthands to canonical Unicode operators.
//!
//! The lexer only knows the Unicode forms of operators (`λ`, `Λ`, `∀`, `→`)
//! and the lowercase forms of keywords.
//! Everything a user can type on a plain keyboard is mapped to these forms
//! before lexing.

use alloc::string::String;

/// Words that are replaced as a whole.
///
/// A word is a maximal sequence of ASCII alphanumeric characters and underscores,
/// so `lambdas` or `Letter` are left alone.
const WORDS: &[(&str, &str)] = &[
    ("lambda", "λ"),
    ("Lambda", "Λ"),
    ("forall", "∀"),
    ("forAll", "∀"),
    ("Forall", "∀"),
    ("ForAll", "∀"),
    ("Let", "let"),
    ("In", "in"),
    ("If", "if"),
    ("Then", "then"),
    ("Else", "else"),
];

/// Symbols that are replaced wherever they occur.
const SYMBOLS: &[(&str, &str)] = &[("->", "→"), ("\\", "λ"), ("|", "Λ"), ("^", "Λ")];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn word(w: &str) -> &str {
    WORDS
        .iter()
        .find(|(from, _)| *from == w)
        .map_or(w, |(_, to)| *to)
}

/// Replace ASCII shorthands in `s` by their Unicode counterparts.
///
/// ~~~
/// use lambda_parse::preprocess;
/// assert_eq!(preprocess(r"\x: Bool. x"), "λx: Bool. x");
/// assert_eq!(preprocess("forall X. X -> X"), "∀ X. X → X");
/// assert_eq!(preprocess("Lambda X. lambda x: X. x"), "Λ X. λ x: X. x");
/// ~~~
pub fn preprocess(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if is_word_char(c) {
            let len = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
            out.push_str(word(&rest[..len]));
            rest = &rest[len..];
        } else if let Some((from, to)) = SYMBOLS.iter().find(|(from, _)| rest.starts_with(from)) {
            out.push_str(to);
            rest = &rest[from.len()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

#[test]
fn keywords() {
    assert_eq!(preprocess("Let x = y In x"), "let x = y in x");
    assert_eq!(preprocess("If b Then x Else y"), "if b then x else y");
    assert_eq!(preprocess("ForAll X, Y. X"), "∀ X, Y. X");
    assert_eq!(preprocess("Forall X. forAll Y. X"), "∀ X. ∀ Y. X");
}

#[test]
fn symbols() {
    assert_eq!(preprocess("|X. ^Y. x"), "ΛX. ΛY. x");
    assert_eq!(preprocess("A->B->C"), "A→B→C");
    assert_eq!(preprocess(r"\f. \x. f x"), "λf. λx. f x");
}

#[test]
fn whole_words() {
    assert_eq!(preprocess("lambdas Letter Inx forallX"), "lambdas Letter Inx forallX");
    assert_eq!(preprocess("λx. x"), "λx. x");
    assert_eq!(preprocess("x_lambda"), "x_lambda");
}
