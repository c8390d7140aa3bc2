//! Word tokenization for tag text.

/// Splits text into lowercase word tokens.
///
/// A token is a maximal run of alphanumeric characters at least two
/// characters long; everything else is a separator. Single characters carry
/// no signal in tag text and are dropped.
///
/// # Examples
///
/// ```
/// use recomendar::text::tokenize::word_tokens;
///
/// let tokens = word_tokens("Heavy Metal, rock & roll");
/// assert_eq!(tokens, vec!["heavy", "metal", "rock", "roll"]);
/// ```
#[must_use]
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        assert_eq!(word_tokens("Rock POP"), vec!["rock", "pop"]);
    }

    #[test]
    fn test_drops_single_characters() {
        assert_eq!(word_tokens("a b cd"), vec!["cd"]);
    }

    #[test]
    fn test_punctuation_is_separator() {
        assert_eq!(
            word_tokens("indie-rock,synth_pop"),
            vec!["indie", "rock", "synth", "pop"]
        );
    }

    #[test]
    fn test_digits_are_tokens() {
        assert_eq!(word_tokens("80s hits"), vec!["80s", "hits"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(word_tokens("").is_empty());
        assert!(word_tokens("  ,;  ").is_empty());
    }
}
