//! Denoising filter bank
//!
//! Filters are described by a [`FilterSpec`], whose constructors are the
//! only place window sizes are validated and normalized. Median and
//! Gaussian windows are forced odd there; mean windows are kept as given.

pub mod gaussian;
pub mod mean;
pub mod median;

use crate::error::DenoiseError;
use image::RgbImage;
use serde::Serialize;

/// Filter family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Mean,
    Median,
    Gaussian,
}

impl FilterKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Median => "Median",
            Self::Gaussian => "Gaussian",
        }
    }

    /// Lower-case name used in figure file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Gaussian => "gaussian",
        }
    }
}

/// A validated filter family + parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterSpec {
    kind: FilterKind,
    window: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sigma: Option<f32>,
}

impl FilterSpec {
    /// Mean filter; even windows are accepted unchanged
    pub fn mean(window: u32) -> Result<Self, DenoiseError> {
        Ok(Self {
            kind: FilterKind::Mean,
            window: check_window(window)?,
            sigma: None,
        })
    }

    /// Median filter; an even window is bumped to the next odd size
    pub fn median(window: u32) -> Result<Self, DenoiseError> {
        Ok(Self {
            kind: FilterKind::Median,
            window: force_odd(check_window(window)?),
            sigma: None,
        })
    }

    /// Gaussian filter; an even window is bumped to the next odd size.
    /// A non-positive `sigma` is derived from the window size.
    pub fn gaussian(window: u32, sigma: f32) -> Result<Self, DenoiseError> {
        if !sigma.is_finite() {
            return Err(DenoiseError::InvalidParameter(format!(
                "sigma must be finite, got {}",
                sigma
            )));
        }
        Ok(Self {
            kind: FilterKind::Gaussian,
            window: force_odd(check_window(window)?),
            sigma: Some(sigma),
        })
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// Filter `image`, returning a new image of the same dimensions
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        match self.kind {
            FilterKind::Mean => mean::apply(image, self.window),
            FilterKind::Median => median::apply(image, self.window),
            FilterKind::Gaussian => {
                gaussian::apply(image, self.window, self.sigma.unwrap_or(0.0))
            }
        }
    }

    /// Parameter column of the comparison table, e.g. `Size=5x5, σ=0.5`
    pub fn params_label(&self) -> String {
        match self.sigma {
            Some(sigma) => format!("Size={0}x{0}, σ={1:.1}", self.window(), sigma),
            None => format!("Size={0}x{0}", self.window()),
        }
    }

    /// Figure caption, e.g. `Median Filter (3x3)`
    pub fn title(&self) -> String {
        match self.sigma {
            Some(sigma) => format!(
                "{} Filter ({2}x{2}, σ={1:.1})",
                self.kind.label(),
                sigma,
                self.window()
            ),
            None => format!("{} Filter ({1}x{1})", self.kind.label(), self.window()),
        }
    }
}

fn check_window(window: u32) -> Result<u32, DenoiseError> {
    if window == 0 {
        return Err(DenoiseError::InvalidParameter(
            "window size must be positive".to_string(),
        ));
    }
    Ok(window)
}

fn force_odd(window: u32) -> u32 {
    if window % 2 == 0 {
        window + 1
    } else {
        window
    }
}
