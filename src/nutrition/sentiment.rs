//! Lexicon-based polarity and subjectivity.
//!
//! Each lexicon word carries a polarity in [-1, 1] and a subjectivity in
//! [0, 1]. A text scores the mean over the words it matches; a negation
//! directly before a word flips its polarity and halves it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Polarity multiplier after a negation
const NEGATION_FACTOR: f64 = -0.5;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

static NEGATIONS: &[&str] = &["not", "never", "no", "isn't", "wasn't", "don't", "didn't", "won't", "can't"];

static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        // (polarity, subjectivity)
        ("good", (0.7, 0.6)),
        ("great", (0.8, 0.75)),
        ("excellent", (1.0, 1.0)),
        ("amazing", (0.6, 0.9)),
        ("wonderful", (1.0, 1.0)),
        ("best", (1.0, 0.3)),
        ("positive", (0.23, 0.55)),
        ("success", (0.3, 0.4)),
        ("successful", (0.75, 0.95)),
        ("strong", (0.43, 0.73)),
        ("happy", (0.8, 1.0)),
        ("hope", (0.2, 0.5)),
        ("hopeful", (0.5, 0.7)),
        ("improve", (0.4, 0.4)),
        ("improved", (0.4, 0.4)),
        ("win", (0.8, 0.4)),
        ("safe", (0.5, 0.5)),
        ("historic", (0.2, 0.5)),
        ("brilliant", (0.9, 1.0)),
        ("remarkable", (0.75, 0.75)),
        ("bad", (-0.7, 0.67)),
        ("terrible", (-1.0, 1.0)),
        ("awful", (-1.0, 1.0)),
        ("horrible", (-1.0, 1.0)),
        ("worst", (-1.0, 1.0)),
        ("poor", (-0.4, 0.6)),
        ("negative", (-0.3, 0.4)),
        ("failure", (-0.32, 0.3)),
        ("failed", (-0.5, 0.3)),
        ("weak", (-0.38, 0.56)),
        ("sad", (-0.5, 1.0)),
        ("angry", (-0.5, 1.0)),
        ("outrageous", (-0.6, 0.9)),
        ("shocking", (-1.0, 1.0)),
        ("disaster", (-0.6, 0.7)),
        ("disastrous", (-0.8, 0.9)),
        ("dangerous", (-0.6, 0.9)),
        ("crisis", (-0.4, 0.5)),
        ("corrupt", (-0.5, 0.5)),
        ("deadly", (-0.2, 0.4)),
        ("fear", (-0.4, 0.6)),
        ("chaos", (-0.5, 0.6)),
        ("scandal", (-0.5, 0.6)),
        ("incredible", (0.9, 0.9)),
        ("unbelievable", (-0.5, 0.9)),
        ("beautiful", (0.85, 1.0)),
        ("ugly", (-0.7, 1.0)),
        ("clearly", (0.1, 0.38)),
        ("obviously", (0.0, 0.5)),
        ("really", (0.2, 0.2)),
        ("important", (0.4, 1.0)),
        ("serious", (-0.33, 0.67)),
        ("huge", (0.4, 0.9)),
        ("massive", (0.0, 1.0)),
        ("stunning", (0.5, 1.0)),
        ("devastating", (-0.6, 0.8)),
    ]
    .into_iter()
    .collect()
});

/// Sentiment of a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// -1 (negative) to 1 (positive)
    pub polarity: f64,
    /// 0 (objective) to 1 (subjective)
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        polarity: 0.0,
        subjectivity: 0.0,
    };
}

pub fn analyze(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();

    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut matched = 0usize;

    for (idx, word) in words.iter().enumerate() {
        if let Some(&(polarity, subjectivity)) = LEXICON.get(word) {
            let negated = idx > 0 && NEGATIONS.contains(&words[idx - 1]);
            polarity_sum += if negated {
                polarity * NEGATION_FACTOR
            } else {
                polarity
            };
            subjectivity_sum += subjectivity;
            matched += 1;
        }
    }

    if matched == 0 {
        return Sentiment::NEUTRAL;
    }

    Sentiment {
        polarity: (polarity_sum / matched as f64).clamp(-1.0, 1.0),
        subjectivity: (subjectivity_sum / matched as f64).clamp(0.0, 1.0),
    }
}
