//! Noise injection
//!
//! Each sample image is paired with exactly one noise model through an
//! explicit [`NoiseAssignment`] that is validated before any noise is applied.

pub mod models;

use crate::error::DenoiseError;
use crate::source::{Sample, SampleId};
use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;

/// Supported noise models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseModel {
    /// Low-quality JPEG round-trip
    Compression,
    /// Pixels forced to black or white by the imageproc noise generator
    SaltAndPepper,
    /// Random extreme-value writes at 5% of pixel positions
    Impulse,
}

impl NoiseModel {
    /// Human-readable label used in tables and figure titles
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compression => "Compression (JPEG)",
            Self::SaltAndPepper => "Salt and pepper",
            Self::Impulse => "Impulse",
        }
    }

    /// Label reduced to a file-name fragment, e.g. `Compression_JPEG`
    pub fn slug(&self) -> String {
        self.label()
            .replace(['(', ')'], "")
            .replace(' ', "_")
    }

    /// Produce a noisy copy of `image`
    pub fn apply<R: Rng>(&self, image: &RgbImage, rng: &mut R) -> Result<RgbImage, DenoiseError> {
        match self {
            Self::Compression => models::compression::apply(image),
            Self::SaltAndPepper => Ok(models::salt_pepper::apply(image, rng)),
            Self::Impulse => Ok(models::impulse::apply(image, rng)),
        }
    }
}

/// Explicit sample -> noise model mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseAssignment {
    entries: Vec<(SampleId, NoiseModel)>,
}

impl Default for NoiseAssignment {
    fn default() -> Self {
        Self::new(vec![
            (SampleId(1), NoiseModel::Compression),
            (SampleId(2), NoiseModel::SaltAndPepper),
            (SampleId(3), NoiseModel::Impulse),
        ])
    }
}

impl NoiseAssignment {
    pub fn new(entries: Vec<(SampleId, NoiseModel)>) -> Self {
        Self { entries }
    }

    pub fn model_for(&self, id: SampleId) -> Option<NoiseModel> {
        self.entries
            .iter()
            .find(|(sample, _)| *sample == id)
            .map(|(_, model)| *model)
    }

    /// Check that every sample is assigned exactly one model and that no
    /// entry refers to a sample that does not exist.
    pub fn validate(&self, samples: &[Sample]) -> Result<(), DenoiseError> {
        let mut seen = HashSet::new();
        for (id, _) in &self.entries {
            if !seen.insert(*id) {
                return Err(DenoiseError::InvalidAssignment(format!(
                    "{} is assigned more than once",
                    id
                )));
            }
            if !samples.iter().any(|s| s.id == *id) {
                return Err(DenoiseError::InvalidAssignment(format!(
                    "{} is not a loaded sample",
                    id
                )));
            }
        }

        if let Some(missing) = samples.iter().find(|s| !seen.contains(&s.id)) {
            return Err(DenoiseError::InvalidAssignment(format!(
                "{} has no noise model",
                missing.id
            )));
        }

        Ok(())
    }
}

/// A sample after noise injection
#[derive(Debug, Clone)]
pub struct NoisySample {
    pub id: SampleId,
    pub model: NoiseModel,
    pub image: RgbImage,
}

/// Apply the assigned noise model to every sample, preserving sample order
pub fn apply_assigned<R: Rng>(
    samples: &[Sample],
    assignment: &NoiseAssignment,
    rng: &mut R,
) -> Result<Vec<NoisySample>, DenoiseError> {
    assignment.validate(samples)?;

    samples
        .iter()
        .map(|sample| {
            let model = assignment.model_for(sample.id).ok_or_else(|| {
                DenoiseError::InvalidAssignment(format!("{} has no noise model", sample.id))
            })?;
            tracing::debug!("Applying {} noise to {}", model.label(), sample.id);
            Ok(NoisySample {
                id: sample.id,
                model,
                image: model.apply(&sample.image, rng)?,
            })
        })
        .collect()
}

/// Random source for the noise models; OS entropy unless a seed is given
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
