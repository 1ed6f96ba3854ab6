use std::sync::LazyLock;

use regex::Regex;

static INCLUSIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\binclusive\b").expect("inclusive pattern is valid"));

/// Whether the query asks for the end date to be counted.
pub fn is_inclusive(text: &str) -> bool {
    INCLUSIVE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_inclusive_word() {
        assert!(is_inclusive("01/01/2020 01/02/2020 inclusive"));
        assert!(is_inclusive("Inclusive: Jan 1, 2020 and Jan 9, 2020"));
    }

    #[test]
    fn ignores_other_words() {
        assert!(!is_inclusive("01/01/2020 01/02/2020"));
        assert!(!is_inclusive("01/01/2020 01/02/2020 noninclusive"));
        assert!(!is_inclusive("01/01/2020 01/02/2020 inclusively"));
    }
}
