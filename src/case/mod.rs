//! Case conversion between CamelCase, snake_case and sentence case
//!
//! Every conversion is a word-splitting pass followed by a re-joining pass.
//! Only ASCII capitals mark word boundaries; no locale rules apply, so
//! acronyms split letter by letter (`RNAProduct` -> `r n a product`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static WORD_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^| )([a-zA-Z])").unwrap());

/// Split on separators and before capitals, then lowercase
fn sentencecase(s: &str) -> String {
    let separated: String = s
        .chars()
        .map(|c| if matches!(c, '-' | '_' | '.') || c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut spaced = String::with_capacity(separated.len() * 2);
    for c in separated.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    spaced.trim().to_lowercase()
}

fn snakecase(s: &str) -> String {
    let separated: String = s
        .chars()
        .map(|c| if matches!(c, '-' | '.') || c.is_whitespace() { '_' } else { c })
        .collect();

    let mut chars = separated.chars();
    let mut out = String::with_capacity(separated.len() * 2);
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Convert CamelCase to sentence case (`NamedThing` -> `named thing`)
pub fn camelcase_to_sentencecase(s: &str) -> String {
    sentencecase(s)
}

/// Convert snake_case to sentence case (`named_thing` -> `named thing`)
pub fn snakecase_to_sentencecase(s: &str) -> String {
    sentencecase(s)
}

/// Convert sentence case to snake_case (`named thing` -> `named_thing`)
pub fn sentencecase_to_snakecase(s: &str) -> String {
    snakecase(s).to_lowercase()
}

/// Convert sentence case to CamelCase (`named thing` -> `NamedThing`)
pub fn sentencecase_to_camelcase(s: &str) -> String {
    WORD_START_RE
        .replace_all(s, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}
