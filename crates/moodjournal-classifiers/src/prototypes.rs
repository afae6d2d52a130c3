//! Prototype sentences per label
//!
//! Each label owns an ordered list of example sentences. The sets are seeded
//! from hard-coded examples and may be extended with labeled samples; they
//! are only ever appended to.

use moodjournal_core::{EnergyLabel, MoodLabel};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A label space the prototype classifier can rank over
pub trait Label: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Classifier output labels, in tie-break order (never includes `Unknown`)
    fn classes() -> &'static [Self];
}

impl Label for MoodLabel {
    fn classes() -> &'static [Self] {
        &MoodLabel::CLASSES
    }
}

impl Label for EnergyLabel {
    fn classes() -> &'static [Self] {
        &EnergyLabel::CLASSES
    }
}

/// Ordered example sentences for every label of one label space
#[derive(Debug, Clone)]
pub struct PrototypeSet<L: Label> {
    examples: HashMap<L, Vec<String>>,
}

impl<L: Label> PrototypeSet<L> {
    pub fn new() -> Self {
        Self {
            examples: HashMap::new(),
        }
    }

    /// Build a set from static seed examples
    pub fn from_seed(seed: &[(L, &[&str])]) -> Self {
        let mut set = Self::new();
        for (label, sentences) in seed {
            for sentence in *sentences {
                set.add(*label, sentence);
            }
        }
        set
    }

    /// Append an example.
    ///
    /// Returns `false` when the label is not a classifier output label or
    /// the exact sentence is already present for it.
    pub fn add(&mut self, label: L, text: impl AsRef<str>) -> bool {
        if !L::classes().contains(&label) {
            return false;
        }

        let text = text.as_ref().trim();
        if text.is_empty() {
            return false;
        }

        let examples = self.examples.entry(label).or_default();
        if examples.iter().any(|existing| existing == text) {
            return false;
        }
        examples.push(text.to_string());
        true
    }

    pub fn examples(&self, label: L) -> &[String] {
        self.examples.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels with at least one example, in class order
    pub fn iter(&self) -> impl Iterator<Item = (L, &[String])> + '_ {
        L::classes()
            .iter()
            .map(move |label| (*label, self.examples(*label)))
            .filter(|(_, examples)| !examples.is_empty())
    }

    /// Total number of examples across all labels
    pub fn len(&self) -> usize {
        self.examples.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every classifier output label has at least one example
    pub fn covers_all_classes(&self) -> bool {
        L::classes()
            .iter()
            .all(|label| !self.examples(*label).is_empty())
    }
}

impl<L: Label> Default for PrototypeSet<L> {
    fn default() -> Self {
        Self::new()
    }
}

const MOOD_SEED: &[(MoodLabel, &[&str])] = &[
    (
        MoodLabel::Positive,
        &[
            "Today was a really good day.",
            "I feel happy and grateful for my friends.",
            "Had an amazing time with my family.",
            "I'm proud of what I accomplished this week.",
            "Everything went great and I loved it.",
        ],
    ),
    (
        MoodLabel::Negative,
        &[
            "Today was a terrible day.",
            "I feel sad and lonely.",
            "I'm so frustrated and angry right now.",
            "Everything went wrong and I hate it.",
            "I feel hopeless and disappointed.",
        ],
    ),
    (
        MoodLabel::Neutral,
        &[
            "I went to the store and bought groceries.",
            "Had a regular day at work.",
            "Nothing much happened today.",
            "I had lunch and answered some emails.",
            "Just another ordinary day.",
        ],
    ),
    (
        MoodLabel::Mixed,
        &[
            "Good news at work but I feel sad about leaving.",
            "I'm happy for her but also a little disappointed.",
            "It was a great trip, though I felt lonely at times.",
            "Proud of the progress yet frustrated by the setbacks.",
            "I love my new job but I miss my old friends.",
        ],
    ),
    (
        MoodLabel::Confused,
        &[
            "I'm confused about what I want.",
            "I don't know how I feel, everything is unclear.",
            "Unsure what to make of today.",
            "I feel lost and uncertain about my plans.",
            "Why do I feel this way? I'm puzzled.",
        ],
    ),
];

const ENERGY_SEED: &[(EnergyLabel, &[&str])] = &[
    (
        EnergyLabel::HighEnergy,
        &[
            "I feel energized and ready to go!",
            "Had an amazing workout this morning.",
            "So excited and motivated today!",
            "I was super productive and full of energy.",
            "Pumped for the game tonight!",
        ],
    ),
    (
        EnergyLabel::LowEnergy,
        &[
            "I'm so tired today.",
            "Feeling drained and sleepy.",
            "Too exhausted to do anything.",
            "Just feeling meh and sluggish.",
            "I want to nap all day.",
        ],
    ),
    (
        EnergyLabel::HighStress,
        &[
            "I'm stressed about all these deadlines.",
            "Feeling anxious and overwhelmed.",
            "So much pressure at work, I can't breathe.",
            "I'm worried about everything right now.",
            "Panicking because the exam is tomorrow.",
        ],
    ),
    (
        EnergyLabel::Calm,
        &[
            "I feel calm and relaxed.",
            "A peaceful evening with a cup of tea.",
            "Spent a quiet morning reading.",
            "Feeling content and rested.",
            "Took a gentle walk and felt at ease.",
        ],
    ),
];

/// Hard-coded mood prototypes
pub fn seed_mood() -> PrototypeSet<MoodLabel> {
    PrototypeSet::from_seed(MOOD_SEED)
}

/// Hard-coded energy prototypes
pub fn seed_energy() -> PrototypeSet<EnergyLabel> {
    PrototypeSet::from_seed(ENERGY_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_covers_every_class() {
        let mood = seed_mood();
        let energy = seed_energy();
        assert!(mood.covers_all_classes());
        assert!(energy.covers_all_classes());
        assert!(mood.examples(MoodLabel::Unknown).is_empty());
        assert!(energy.examples(EnergyLabel::Unknown).is_empty());
    }

    #[test]
    fn test_add_skips_duplicates_and_unknown() {
        let mut set = seed_mood();
        let before = set.len();

        assert!(!set.add(MoodLabel::Negative, "Today was a terrible day."));
        assert!(!set.add(MoodLabel::Unknown, "no idea"));
        assert!(!set.add(MoodLabel::Neutral, "   "));
        assert_eq!(set.len(), before);

        assert!(set.add(MoodLabel::Negative, "The worst commute of my life."));
        assert_eq!(set.len(), before + 1);
        assert_eq!(
            set.examples(MoodLabel::Negative).last().map(String::as_str),
            Some("The worst commute of my life.")
        );
    }

    #[test]
    fn test_same_text_allowed_under_different_labels() {
        let mut set = PrototypeSet::new();
        assert!(set.add(EnergyLabel::Calm, "sat by the lake"));
        assert!(set.add(EnergyLabel::LowEnergy, "sat by the lake"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_iter_follows_class_order() {
        let mut set = PrototypeSet::new();
        set.add(EnergyLabel::Calm, "quiet");
        set.add(EnergyLabel::HighEnergy, "pumped");

        let labels: Vec<_> = set.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec![EnergyLabel::HighEnergy, EnergyLabel::Calm]);
    }
}
