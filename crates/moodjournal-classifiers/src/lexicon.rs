//! Lexicon-based affect encoder (offline fallback)
//!
//! Used when no sentence-embedding model is configured. Each vector
//! dimension is a named affect axis scored from cue-word hits, plus a
//! constant bias axis so that cue-free text lands next to neutral
//! prototypes instead of at the origin.

use crate::encoder::{l2_normalize, Encoder};
use moodjournal_core::Result;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Named dimensions of the lexicon vector, in vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Bias,
    Positive,
    Negative,
    Contrast,
    Confusion,
    Arousal,
    Fatigue,
    Stress,
    Calm,
}

impl Axis {
    pub const ALL: [Axis; 9] = [
        Axis::Bias,
        Axis::Positive,
        Axis::Negative,
        Axis::Contrast,
        Axis::Confusion,
        Axis::Arousal,
        Axis::Fatigue,
        Axis::Stress,
        Axis::Calm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

pub const AXIS_COUNT: usize = Axis::ALL.len();

/// Per-axis ceiling on accumulated cue weight
const CUE_CAP: f32 = 3.0;
/// Weight of a single `!` or `?`, and the ceiling on their total
const PUNCT_WEIGHT: f32 = 0.5;
const PUNCT_CAP: f32 = 1.0;
/// How many preceding tokens a negator reaches
const NEGATION_WINDOW: usize = 2;

pub const POSITIVE_CUES: &[&str] = &[
    "good", "great", "amazing", "awesome", "fantastic", "excellent", "happy", "happier",
    "glad", "joy", "joyful", "love", "loved", "loving", "wonderful", "proud", "grateful",
    "thankful", "excited", "exciting", "fun", "enjoyed", "enjoy", "enjoying", "nice",
    "better", "best", "beautiful", "delighted", "thrilled", "pleased", "cheerful", "blessed",
    "yay", "won", "celebrate", "celebrated", "laughed", "smiling", "hopeful", "relieved",
    "lovely", "accomplished", "productive", "optimistic", "stoked", "satisfied",
];

pub const NEGATIVE_CUES: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "sad", "unhappy", "upset", "angry", "mad",
    "furious", "hate", "hated", "miserable", "depressed", "lonely", "hurt", "hurts", "cry",
    "cried", "crying", "disappointed", "frustrated", "frustrating", "annoyed", "worst",
    "worse", "hopeless", "stressed", "anxious", "overwhelmed", "worried", "scared", "afraid",
    "nervous", "panic", "panicking", "dread", "sick", "disaster", "failed", "failure",
    "ruined", "broken", "heartbroken", "grief", "guilty", "ashamed", "embarrassed", "regret",
    "sucks", "ugh", "wrong", "miss", "missed", "missing", "tears",
];

pub const CONTRAST_CUES: &[&str] = &[
    "but", "though", "although", "however", "yet", "despite", "bittersweet", "mixed",
    "conflicted", "torn",
];

pub const CONFUSION_CUES: &[&str] = &[
    "confused", "confusing", "unsure", "uncertain", "unclear", "idk", "puzzled", "lost",
    "clueless", "wondering", "dunno", "baffled", "huh",
];

pub const AROUSAL_CUES: &[&str] = &[
    "energized", "energetic", "energy", "excited", "exciting", "pumped", "hyped", "motivated",
    "thrilled", "buzzing", "wired", "unstoppable", "productive", "workout", "ran", "run",
    "running", "gym", "dancing", "danced", "adrenaline", "ecstatic", "stoked", "alive",
    "hustle",
];

pub const FATIGUE_CUES: &[&str] = &[
    "tired", "exhausted", "sleepy", "drained", "lazy", "sluggish", "bored", "boring", "meh",
    "fatigued", "worn", "weary", "drowsy", "unmotivated", "lethargic", "nap", "napped",
    "blah", "numb", "empty",
];

pub const STRESS_CUES: &[&str] = &[
    "stressed", "stress", "stressful", "anxious", "anxiety", "overwhelmed", "overwhelming",
    "panic", "panicking", "pressure", "deadline", "deadlines", "worried", "worry", "nervous",
    "tense", "swamped", "burnout", "frantic", "rushed", "hectic", "chaos", "chaotic", "exam",
    "dread",
];

pub const CALM_CUES: &[&str] = &[
    "calm", "relaxed", "relaxing", "peaceful", "chill", "chilled", "rested", "serene",
    "quiet", "content", "meditated", "meditation", "cozy", "mellow", "steady", "balanced",
    "unwind", "unwinding", "gentle", "ease", "tea",
];

pub const NEGATORS: &[&str] = &[
    "not", "never", "no", "don't", "dont", "didn't", "didnt", "isn't", "isnt", "wasn't",
    "wasnt", "can't", "cant", "cannot", "won't", "wont", "hardly", "barely",
];

/// Lowercased word tokens; curly apostrophes are folded to `'`
pub fn tokenize(text: &str) -> Vec<String> {
    word_regex()
        .find_iter(&text.to_lowercase().replace('\u{2019}', "'"))
        .map(|m| m.as_str().trim_matches('\'').to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn word_regex() -> &'static Regex {
    static WORD: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[\p{L}\p{N}']+").expect("word pattern is valid"))
}

/// Raw (un-normalized) per-axis scores for one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectFeatures([f32; AXIS_COUNT]);

impl AffectFeatures {
    pub fn get(&self, axis: Axis) -> f32 {
        self.0[axis.index()]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Cue dictionary shared by the lexicon encoder and the lexicon classifier
pub struct Lexicon {
    cues: HashMap<&'static str, Vec<Axis>>,
    negators: HashSet<&'static str>,
}

impl Lexicon {
    pub fn new() -> Self {
        let mut cues: HashMap<&'static str, Vec<Axis>> = HashMap::new();
        let tables: [(Axis, &[&'static str]); 8] = [
            (Axis::Positive, POSITIVE_CUES),
            (Axis::Negative, NEGATIVE_CUES),
            (Axis::Contrast, CONTRAST_CUES),
            (Axis::Confusion, CONFUSION_CUES),
            (Axis::Arousal, AROUSAL_CUES),
            (Axis::Fatigue, FATIGUE_CUES),
            (Axis::Stress, STRESS_CUES),
            (Axis::Calm, CALM_CUES),
        ];
        for (axis, words) in tables {
            for word in words {
                cues.entry(word).or_default().push(axis);
            }
        }

        Self {
            cues,
            negators: NEGATORS.iter().copied().collect(),
        }
    }

    /// Score every axis for the given text
    pub fn features(&self, text: &str) -> AffectFeatures {
        let tokens = tokenize(text);
        let mut axes = [0.0f32; AXIS_COUNT];
        axes[Axis::Bias.index()] = 1.0;

        for (i, token) in tokens.iter().enumerate() {
            let Some(hits) = self.cues.get(token.as_str()) else {
                continue;
            };
            let negated = tokens[i.saturating_sub(NEGATION_WINDOW)..i]
                .iter()
                .any(|prev| self.negators.contains(prev.as_str()));

            for axis in hits {
                match (axis, negated) {
                    (Axis::Positive, true) => axes[Axis::Negative.index()] += 1.0,
                    (Axis::Negative, true) => {}
                    (axis, _) => axes[axis.index()] += 1.0,
                }
            }
        }

        let exclamations = text.matches('!').count() as f32;
        let questions = text.matches('?').count() as f32;
        axes[Axis::Arousal.index()] += (exclamations * PUNCT_WEIGHT).min(PUNCT_CAP);
        axes[Axis::Confusion.index()] += (questions * PUNCT_WEIGHT).min(PUNCT_CAP);

        for axis in &mut axes[1..] {
            *axis = axis.min(CUE_CAP);
        }

        AffectFeatures(axes)
    }

    /// Whether the token is a cue on the given axis
    pub fn is_cue(&self, token: &str, axis: Axis) -> bool {
        self.cues
            .get(token)
            .is_some_and(|axes| axes.contains(&axis))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic encoder over the affect axes
pub struct LexiconEncoder {
    name: String,
    lexicon: Lexicon,
}

impl LexiconEncoder {
    pub fn new() -> Self {
        Self {
            name: "affect-lexicon".to_string(),
            lexicon: Lexicon::new(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Default for LexiconEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for LexiconEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let features = self.lexicon.features(text);
        Ok(l2_normalize(features.as_slice().to_vec()))
    }

    fn dimension(&self) -> usize {
        AXIS_COUNT
    }

    fn name(&self) -> &str {
        &self.name
    }
}
