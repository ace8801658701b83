//! Text folding helpers shared by every matcher.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Remove diacritics by decomposing and dropping combining marks.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase and strip diacritics.
pub fn fold(text: &str) -> String {
    strip_accents(&text.to_lowercase())
}

/// Capitalize the first letter of every alphabetic run, lowercasing the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(c);
            previous_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold("Período Varguista"), "periodo varguista");
        assert_eq!(fold("Educação Física"), "educacao fisica");
    }

    #[test]
    fn test_fold_keeps_ordinal_indicator() {
        assert_eq!(fold("6º Ano"), "6º ano");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("napoleão bonaparte"), "Napoleão Bonaparte");
        assert_eq!(title_case("REVOLUÇÃO de 1930"), "Revolução De 1930");
    }
}
