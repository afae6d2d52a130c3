//! Subcommand implementations
//!
//! Each command writes to the given output so it can be tested without a
//! terminal.

use anyhow::{bail, Context, Result};
use moodjournal_classifiers::samples::load_samples;
use moodjournal_classifiers::{evaluate, Analysis, DecisionPath, MoodAnalyzer};
use moodjournal_storage::{JournalEntry, JournalStore};
use std::io::Write;
use std::path::PathBuf;

/// Classify `text`, save it and print the new entry
pub fn add(analyzer: &MoodAnalyzer, store: &JournalStore, text: &str, out: &mut dyn Write) -> Result<()> {
    if text.trim().is_empty() {
        bail!("entry text must not be empty");
    }

    let tags = analyzer.classify(Some(text))?;
    let entry = store.persist(text, tags)?;

    writeln!(
        out,
        "Saved entry #{} → Mood: {}, Energy: {}",
        entry.id, entry.tags.mood, entry.tags.energy
    )?;
    Ok(())
}

/// Print the `count` newest entries
pub fn summary(store: &JournalStore, count: usize, out: &mut dyn Write) -> Result<()> {
    let entries = store.recent(count)?;
    if entries.is_empty() {
        writeln!(out, "No journal entries yet.")?;
        return Ok(());
    }

    for entry in &entries {
        write!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

pub fn format_entry(entry: &JournalEntry) -> String {
    format!(
        "[{}] {}\n  → Mood: {}, Energy: {}\n",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.text,
        entry.tags.mood,
        entry.tags.energy
    )
}

/// Print the tags for `text`, optionally with the full decision trace
pub fn classify(analyzer: &MoodAnalyzer, text: &str, explain: bool, out: &mut dyn Write) -> Result<()> {
    let analysis = analyzer.analyze(Some(text))?;
    writeln!(
        out,
        "Mood: {}, Energy: {}",
        analysis.result.mood, analysis.result.energy
    )?;

    if explain {
        write!(out, "{}", explain_analysis(&analysis))?;
    }
    Ok(())
}

fn explain_analysis(analysis: &Analysis) -> String {
    let mut lines = vec![format!("  path     : {}", analysis.decision.as_str())];

    match &analysis.decision {
        DecisionPath::ShortCircuit(reason) => {
            lines.push(format!("  reason   : {}", reason));
        }
        DecisionPath::Idiom(phrase) => {
            lines.push(format!("  idiom    : \"{}\"", phrase));
        }
        DecisionPath::Model => {}
    }

    if let Some(metadata) = &analysis.metadata {
        if let Some(model) = &metadata.model {
            lines.push(format!("  encoder  : {}", model));
        }
        let scores = |pairs: Vec<String>| pairs.join(", ");
        lines.push(format!(
            "  mood     : {}",
            scores(metadata.mood_scores.iter().map(|(l, s)| format!("{} {:.3}", l, s)).collect())
        ));
        lines.push(format!(
            "  energy   : {}",
            scores(metadata.energy_scores.iter().map(|(l, s)| format!("{} {:.3}", l, s)).collect())
        ));
        if !metadata.tie_breaks.is_empty() {
            lines.push(format!("  tie-break: {:?}", metadata.tie_breaks));
        }
    }

    if !analysis.overrides.is_empty() {
        lines.push(format!("  overrides: {:?}", analysis.overrides));
    }
    lines.push(format!("  latency  : {}µs", analysis.latency_us));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Evaluate the analyzer on sample files; fails above `max_mismatches`
pub fn evaluate_files(
    analyzer: &MoodAnalyzer,
    files: &[PathBuf],
    max_mismatches: Option<usize>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut samples = Vec::new();
    for file in files {
        let mut loaded =
            load_samples(file).with_context(|| format!("loading {}", file.display()))?;
        samples.append(&mut loaded);
    }

    let report = evaluate(analyzer, &samples)?;
    write!(out, "{}", report)?;

    if let Some(max) = max_mismatches {
        if report.mismatches.len() > max {
            bail!(
                "{} mismatches exceed the allowed {}",
                report.mismatches.len(),
                max
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use moodjournal_classifiers::AnalyzerConfig;
    use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel};

    fn analyzer() -> MoodAnalyzer {
        MoodAnalyzer::from_config(&AnalyzerConfig::offline()).unwrap()
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_entry() {
        let mut entry = JournalEntry::new(
            3,
            "Quiet evening",
            ClassificationResult::new(MoodLabel::Neutral, EnergyLabel::Calm),
        );
        entry.timestamp = Utc.with_ymd_and_hms(2024, 6, 2, 21, 5, 9).unwrap();
        assert_eq!(
            format_entry(&entry),
            "[2024-06-02 21:05:09] Quiet evening\n  → Mood: Neutral, Energy: Calm\n"
        );
    }

    #[test]
    fn test_add_then_summary() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::open(dir.path().join("journal.json"));
        let analyzer = analyzer();

        let printed = output(|out| add(&analyzer, &store, "I am crushing it at work!", out));
        assert_eq!(printed, "Saved entry #1 → Mood: Positive, Energy: High Energy\n");

        let printed = output(|out| summary(&store, 3, out));
        assert!(printed.contains("] I am crushing it at work!\n"));
        assert!(printed.contains("→ Mood: Positive, Energy: High Energy"));

        assert!(add(&analyzer, &store, "   ", &mut Vec::new()).is_err());
    }

    #[test]
    fn test_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::open(dir.path().join("journal.json"));
        assert_eq!(output(|out| summary(&store, 3, out)), "No journal entries yet.\n");
    }

    #[test]
    fn test_classify_explain() {
        let analyzer = analyzer();

        let printed = output(|out| classify(&analyzer, "this week is crushing me", true, out));
        assert!(printed.starts_with("Mood: Negative, Energy: High Stress\n"));
        assert!(printed.contains("path     : idiom"));
        assert!(printed.contains("idiom    : \"crushing me\""));

        let printed = output(|out| classify(&analyzer, "Had a great day", true, out));
        assert!(printed.contains("path     : model"));
        assert!(printed.contains("encoder  : affect-lexicon"));

        let printed = output(|out| classify(&analyzer, "12345", false, out));
        assert_eq!(printed, "Mood: Unknown, Energy: Unknown\n");
    }

    #[test]
    fn test_evaluate_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.json");
        std::fs::write(
            &path,
            r#"[
              {"id": 1, "text": "I am crushing it at work!", "expected_mood": "Positive", "expected_energy": "High Energy"},
              {"id": 2, "text": "12345", "expected_mood": "Neutral", "expected_energy": "Calm"}
            ]"#,
        )
        .unwrap();
        let analyzer = analyzer();
        let files = vec![path];

        let printed = output(|out| evaluate_files(&analyzer, &files, Some(1), out));
        assert!(printed.starts_with("Accuracy: 50.0% (1/2 correct)"));

        let err = evaluate_files(&analyzer, &files, Some(0), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("1 mismatches exceed the allowed 0"));

        let missing = vec![PathBuf::from("/no/such/samples.json")];
        assert!(evaluate_files(&analyzer, &missing, None, &mut Vec::new()).is_err());
    }
}
