//! Polarity/subjectivity scoring for English headlines.

use serde::Serialize;

use crate::error::SentimentError;

/// Sentiment of one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    /// In `[-1.0, 1.0]`; negative is negative sentiment.
    pub polarity: f64,
    /// In `[0.0, 1.0]`; 0 is factual, 1 is opinion.
    pub subjectivity: f64,
}

impl Sentiment {
    pub const NEUTRAL: Self = Self {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    /// `true` if both components are finite and inside their ranges.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-1.0..=1.0).contains(&self.polarity) && (0.0..=1.0).contains(&self.subjectivity)
    }
}

/// Scores text. Must be a pure function of the input within one run.
pub trait SentimentScorer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SentimentError::ScoringFailed`] if the text cannot be scored.
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError>;
}

/// Word → (polarity, subjectivity).
///
/// Keys are lowercase single words.
pub(crate) const LEXICON: &[(&str, f64, f64)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("happy", 0.8, 1.0),
    ("positive", 0.23, 0.54),
    ("successful", 0.75, 0.95),
    ("success", 0.3, 0.1),
    ("win", 0.8, 0.4),
    ("wins", 0.8, 0.4),
    ("strong", 0.43, 0.73),
    ("safe", 0.5, 0.5),
    ("peace", 0.4, 0.5),
    ("celebrate", 0.6, 0.6),
    ("celebrates", 0.6, 0.6),
    ("improved", 0.5, 0.5),
    ("beautiful", 0.85, 1.0),
    ("love", 0.5, 0.6),
    ("popular", 0.6, 0.8),
    ("free", 0.4, 0.8),
    ("rescued", 0.4, 0.4),
    ("growth", 0.2, 0.3),
    ("new", 0.136, 0.455),
    // Negative
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("dangerous", -0.6, 0.9),
    ("crisis", -0.5, 0.6),
    ("attack", -0.6, 0.5),
    ("dead", -0.2, 0.4),
    ("killed", -0.5, 0.4),
    ("death", -0.5, 0.5),
    ("war", -0.6, 0.5),
    ("fear", -0.5, 0.7),
    ("fire", -0.3, 0.3),
    ("storm", -0.3, 0.4),
    ("crash", -0.5, 0.4),
    ("accident", -0.4, 0.3),
    ("scandal", -0.6, 0.7),
    ("fraud", -0.7, 0.6),
    ("strike", -0.2, 0.3),
    ("loss", -0.4, 0.4),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("problem", -0.3, 0.4),
    ("failed", -0.5, 0.3),
    ("arrested", -0.3, 0.2),
    ("shooting", -0.6, 0.4),
    ("unemployment", -0.3, 0.3),
];

/// Multipliers applied to the next sentiment word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("highly", 1.3),
    ("extremely", 1.5),
    ("somewhat", 0.7),
    ("slightly", 0.5),
];

const NEGATORS: &[&str] = &["not", "no", "never", "without"];

/// Polarity multiplier for a negated sentiment word.
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon-backed [`SentimentScorer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<Sentiment, SentimentError> {
        Ok(lexicon_sentiment(text))
    }
}

/// Score text with the built-in lexicon.
///
/// Each matched word contributes its (polarity, subjectivity), scaled by any
/// preceding intensifiers and with polarity flipped and halved after a
/// negator. The result is the mean over matched words, clamped to range.
/// Text with no known words is [`Sentiment::NEUTRAL`].
#[must_use]
pub fn lexicon_sentiment(text: &str) -> Sentiment {
    let mut polarity_sum = 0.0_f64;
    let mut subjectivity_sum = 0.0_f64;
    let mut matched = 0_u32;

    let mut negated = false;
    let mut intensity = 1.0_f64;

    for raw in text.split_whitespace() {
        let lower = raw.to_lowercase();
        let word = lower.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');

        if NEGATORS.contains(&word) || word.ends_with("n't") {
            negated = true;
            continue;
        }
        if let Some(&(_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == word) {
            intensity *= factor;
            continue;
        }

        if let Some(&(_, polarity, subjectivity)) = LEXICON.iter().find(|(w, _, _)| *w == word) {
            let mut polarity = polarity * intensity;
            if negated {
                polarity *= NEGATION_FACTOR;
            }
            polarity_sum += polarity;
            subjectivity_sum += (subjectivity * intensity).min(1.0);
            matched += 1;
        }

        negated = false;
        intensity = 1.0;
    }

    if matched == 0 {
        return Sentiment::NEUTRAL;
    }

    let n = f64::from(matched);
    Sentiment {
        polarity: (polarity_sum / n).clamp(-1.0, 1.0),
        subjectivity: (subjectivity_sum / n).clamp(0.0, 1.0),
    }
}
