use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").unwrap());
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Flesch reading ease; higher is easier. `None` when the text has no words.
pub fn flesch_reading_ease(text: &str) -> Option<f64> {
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return None;
    }

    let sentences = SENTENCE_END
        .split(text)
        .filter(|fragment| WORD.is_match(fragment))
        .count()
        .max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;

    Some(206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word)
}

/// Vowel-group syllable estimate, with a silent trailing "e" dropped.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0;
    let mut previous_vowel = false;

    for c in word.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if count > 1 && word.ends_with('e') && !word.ends_with("le") && !word.ends_with("ee") {
        count -= 1;
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("government"), 3);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("agree"), 2);
    }

    #[test]
    fn test_simple_text_is_easy() {
        let ease = flesch_reading_ease("The cat sat on the mat. The dog ran.").unwrap();
        assert!(ease > 100.0);
    }

    #[test]
    fn test_dense_text_is_hard() {
        let ease = flesch_reading_ease(
            "Institutional accountability mechanisms necessitate comprehensive \
             intergovernmental coordination regarding regulatory harmonization.",
        )
        .unwrap();
        assert!(ease < 0.0);
    }

    #[test]
    fn test_no_words() {
        assert_eq!(flesch_reading_ease("123 456 ..."), None);
    }
}
