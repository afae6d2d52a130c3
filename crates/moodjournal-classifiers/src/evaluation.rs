//! Accuracy over labeled samples

use crate::analyzer::MoodAnalyzer;
use crate::samples::{LabeledSample, SampleId};
use moodjournal_core::{ClassificationResult, EnergyLabel, MoodLabel, Result};
use serde::Serialize;
use std::fmt;

/// A sample whose predicted tags differ from the expected ones
#[derive(Debug, Clone, Serialize)]
pub struct Mismatch {
    pub id: Option<SampleId>,
    pub text: String,
    pub expected: (Option<MoodLabel>, Option<EnergyLabel>),
    pub predicted: ClassificationResult,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub correct: usize,
    pub mismatches: Vec<Mismatch>,
}

impl EvaluationReport {
    /// Fraction of exact matches; 0.0 for an empty run
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Accuracy: {:.1}% ({}/{} correct)",
            self.accuracy() * 100.0,
            self.correct,
            self.total
        )?;
        for m in &self.mismatches {
            let label = |l: Option<String>| l.unwrap_or_else(|| "?".to_string());
            writeln!(
                f,
                "  id={}",
                m.id.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".to_string())
            )?;
            writeln!(
                f,
                "    expected : ({}, {})",
                label(m.expected.0.map(|l| l.to_string())),
                label(m.expected.1.map(|l| l.to_string()))
            )?;
            writeln!(f, "    predicted: ({}, {})", m.predicted.mood, m.predicted.energy)?;
            writeln!(f, "    text     : {}", m.text)?;
        }
        Ok(())
    }
}

/// Classify every sample and compare against its expected tags.
///
/// A sample counts as correct only when both mood and energy match; a
/// missing expected label never matches.
pub fn evaluate(analyzer: &MoodAnalyzer, samples: &[LabeledSample]) -> Result<EvaluationReport> {
    let mut report = EvaluationReport {
        total: samples.len(),
        ..Default::default()
    };

    for sample in samples {
        let predicted = analyzer.classify(Some(&sample.text))?;
        let matches = sample.expected_mood == Some(predicted.mood)
            && sample.expected_energy == Some(predicted.energy);

        if matches {
            report.correct += 1;
        } else {
            report.mismatches.push(Mismatch {
                id: sample.id.clone(),
                text: sample.text.clone(),
                expected: (sample.expected_mood, sample.expected_energy),
                predicted,
            });
        }
    }

    tracing::info!(
        total = report.total,
        correct = report.correct,
        "Evaluation finished"
    );

    Ok(report)
}
