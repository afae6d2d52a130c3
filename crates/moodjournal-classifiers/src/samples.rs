//! Labeled sample collections
//!
//! Sample files are JSON arrays of
//! `{"id": .., "text": .., "expected_mood": .., "expected_energy": ..}`.
//! They extend the prototype sets at startup and drive the evaluation
//! harness. Label strings are parsed leniently; a record with an
//! unrecognized label keeps its other dimension.

use crate::prototypes::PrototypeSet;
use moodjournal_core::{EnergyLabel, Error, MoodLabel, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Sample identifier; files in the wild use both numbers and strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleId {
    Number(u64),
    Text(String),
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One labeled journal text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSample {
    #[serde(default)]
    pub id: Option<SampleId>,

    pub text: String,

    /// `None` when the file's label is missing or unrecognized
    #[serde(default, deserialize_with = "lenient_label")]
    pub expected_mood: Option<MoodLabel>,

    #[serde(default, deserialize_with = "lenient_label")]
    pub expected_energy: Option<EnergyLabel>,
}

impl LabeledSample {
    pub fn new(text: impl Into<String>, mood: MoodLabel, energy: EnergyLabel) -> Self {
        Self {
            id: None,
            text: text.into(),
            expected_mood: Some(mood),
            expected_energy: Some(energy),
        }
    }
}

fn lenient_label<'de, D, L>(deserializer: D) -> std::result::Result<Option<L>, D::Error>
where
    D: Deserializer<'de>,
    L: FromStr,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Read one sample file
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<LabeledSample>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::sample(format!("failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::sample(format!("failed to parse {}: {}", path.display(), e)))
}

/// Read every sample file, skipping any that are missing or malformed
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Vec<LabeledSample> {
    let mut samples = Vec::new();

    for path in paths {
        match load_samples(path) {
            Ok(mut loaded) => {
                tracing::debug!(
                    "Loaded {} labeled samples from {}",
                    loaded.len(),
                    path.as_ref().display()
                );
                samples.append(&mut loaded);
            }
            Err(e) => {
                tracing::warn!("Skipping sample file: {}", e);
            }
        }
    }

    samples
}

/// Counts of examples appended by [`merge_into`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub mood_added: usize,
    pub energy_added: usize,
}

/// Append sample texts to the prototype sets of their expected labels
pub fn merge_into(
    mood: &mut PrototypeSet<MoodLabel>,
    energy: &mut PrototypeSet<EnergyLabel>,
    samples: &[LabeledSample],
) -> MergeStats {
    let mut stats = MergeStats::default();

    for sample in samples {
        if let Some(label) = sample.expected_mood {
            if mood.add(label, &sample.text) {
                stats.mood_added += 1;
            }
        }
        if let Some(label) = sample.expected_energy {
            if energy.add(label, &sample.text) {
                stats.energy_added += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototypes::{seed_energy, seed_mood};
    use std::io::Write;

    #[test]
    fn test_parse_lenient_labels() {
        let json = r#"[
            {"id": 1, "text": "Long run, feel great", "expected_mood": "positive", "expected_energy": "high_energy"},
            {"id": "b-2", "text": "no clue", "expected_mood": "Bewildered", "expected_energy": "Calm"},
            {"text": "no labels"}
        ]"#;
        let samples: Vec<LabeledSample> = serde_json::from_str(json).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].id, Some(SampleId::Number(1)));
        assert_eq!(samples[0].expected_mood, Some(MoodLabel::Positive));
        assert_eq!(samples[0].expected_energy, Some(EnergyLabel::HighEnergy));
        assert_eq!(samples[1].id.as_ref().unwrap().to_string(), "b-2");
        assert_eq!(samples[1].expected_mood, None);
        assert_eq!(samples[1].expected_energy, Some(EnergyLabel::Calm));
        assert_eq!(samples[2].expected_mood, None);
    }

    #[test]
    fn test_load_all_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.json");
        std::fs::write(
            &good,
            r#"[{"text": "quiet night in", "expected_mood": "Neutral", "expected_energy": "Calm"}]"#,
        )
        .unwrap();

        let bad = dir.path().join("bad.json");
        let mut file = std::fs::File::create(&bad).unwrap();
        file.write_all(b"{ not json").unwrap();

        let missing = dir.path().join("missing.json");

        assert!(load_samples(&bad).unwrap_err().to_string().contains("sample data error"));

        let samples = load_all(&[bad, missing, good]);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].text, "quiet night in");
    }

    #[test]
    fn test_merge_appends_and_skips() {
        let mut mood = seed_mood();
        let mut energy = seed_energy();
        let mood_before = mood.len();
        let energy_before = energy.len();

        let samples = vec![
            LabeledSample::new("Got the promotion!", MoodLabel::Positive, EnergyLabel::HighEnergy),
            // already a seed sentence for both labels
            LabeledSample::new("I'm so tired today.", MoodLabel::Unknown, EnergyLabel::LowEnergy),
            LabeledSample {
                id: None,
                text: "can't tell".to_string(),
                expected_mood: Some(MoodLabel::Confused),
                expected_energy: None,
            },
        ];

        let stats = merge_into(&mut mood, &mut energy, &samples);
        assert_eq!(stats, MergeStats { mood_added: 2, energy_added: 1 });
        assert_eq!(mood.len(), mood_before + 2);
        assert_eq!(energy.len(), energy_before + 1);
        assert_eq!(
            energy.examples(EnergyLabel::HighEnergy).last().map(String::as_str),
            Some("Got the promotion!")
        );
    }
}
