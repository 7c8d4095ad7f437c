//! Unicode aware splitting of transcript text into tokens and clause segments.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN: Regex =
        Regex::new(r"[\p{L}\p{M}]+|\p{N}+|[^\s\p{L}\p{M}\p{N}]").unwrap();
    static ref SEGMENT_BREAK: Regex = Regex::new(r"[.,?!\-]").unwrap();
}

/// Splits text into word, number and single character punctuation tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Splits a sentence into clause segments on `.`, `,`, `?`, `!` and `-`, dropping blank segments.
pub fn split_segments(sentence: &str) -> Vec<&str> {
    SEGMENT_BREAK
        .split(sentence)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Tells whether a token holds a clause segment separator, as `.`, `...`, `?!` or `--` do.
pub fn is_segment_break(token: &str) -> bool {
    SEGMENT_BREAK.is_match(token)
}

/// Tells whether a token is made of letters only.
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_tokenize_czech_text() {
        assert_eq!(
            tokenize("Měli jsme strach, v roce 1989!"),
            vec!["Měli", "jsme", "strach", ",", "v", "roce", "1989", "!"]
        );
    }

    #[test]
    fn it_should_split_segments() {
        assert_eq!(
            split_segments("Bylo to těžké, ale - nakonec dobré. Že?"),
            vec!["Bylo to těžké", "ale", "nakonec dobré", "Že"]
        );
        assert!(split_segments(" ... ").is_empty());
    }

    #[test]
    fn it_should_recognise_words() {
        assert!(is_word("důvěra"));
        assert!(!is_word("1989"));
        assert!(!is_word("."));
        assert!(!is_word(""));
        assert!(is_segment_break("-"));
        assert!(is_segment_break("..."));
        assert!(is_segment_break("?!"));
        assert!(is_segment_break("--"));
        assert!(!is_segment_break(";"));
        assert!(!is_segment_break("strach"));
    }
}
