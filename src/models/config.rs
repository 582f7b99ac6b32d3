use pixel_filters::{
    Brightness, ChannelWeights, Contrast, Convolution, ConvolutionKernel, DiffusionKernel,
    Dithering, Filter, FilterMatrix, Gamma, Grayscale, Invert, RegionCounts, UniformQuantization,
    YCbCrDithering, YCbCrView,
};
use serde::Deserialize;
use std::path::Path;

use crate::error::AppError;

/// Environment variable naming a chain file used when `--config` is absent.
pub const CHAIN_ENV: &str = "PIXFILT_CHAIN";

/// Filter chain configuration loaded from YAML or JSON
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChainConfig {
    /// Run the grayscale base pass before the chain
    #[serde(default)]
    pub grayscale: bool,

    /// Filters in application order
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

/// One filter entry, tagged by `type`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FilterSpec {
    Invert,
    Brightness {
        #[serde(default = "default_brightness")]
        amount: i32,
    },
    Contrast {
        #[serde(default = "default_contrast")]
        amount: f64,
    },
    Gamma {
        #[serde(default = "default_gamma")]
        gamma: f64,
        #[serde(default = "default_gamma_c")]
        c: f64,
    },
    /// Either a built-in `preset`, or a user `matrix` with factor and bias
    Convolution {
        #[serde(default)]
        preset: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default = "default_factor")]
        factor: f64,
        #[serde(default)]
        bias: f64,
        #[serde(default)]
        matrix: Option<Vec<Vec<f64>>>,
    },
    /// Built-in `kernel` by name, or a custom causal `matrix`
    Dithering {
        #[serde(default = "default_dither_kernel")]
        kernel: String,
        #[serde(default)]
        matrix: Option<Vec<Vec<f64>>>,
        #[serde(default)]
        weights: WeightsSpec,
    },
    #[serde(rename = "ycbcr-dithering")]
    YCbCrDithering {
        #[serde(default = "default_ycbcr_kernel")]
        kernel: String,
        #[serde(default)]
        weights: WeightsSpec,
    },
    UniformQuantization {
        #[serde(default)]
        regions: RegionsSpec,
    },
    Grayscale {
        #[serde(default)]
        weights: WeightsSpec,
    },
    #[serde(rename = "ycbcr")]
    YCbCrView,
}

fn default_brightness() -> i32 {
    Brightness::DEFAULT_AMOUNT
}

fn default_contrast() -> f64 {
    Contrast::DEFAULT_AMOUNT
}

fn default_gamma() -> f64 {
    Gamma::DEFAULT_GAMMA
}

fn default_gamma_c() -> f64 {
    Gamma::DEFAULT_C
}

fn default_factor() -> f64 {
    1.0
}

fn default_dither_kernel() -> String {
    DiffusionKernel::FloydSteinberg.name().to_string()
}

fn default_ycbcr_kernel() -> String {
    DiffusionKernel::Atkinson.name().to_string()
}

/// Channel weights; missing fields fall back to the luma weights
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeightsSpec {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for WeightsSpec {
    fn default() -> Self {
        let w = ChannelWeights::LUMA;
        Self {
            r: w.r,
            g: w.g,
            b: w.b,
        }
    }
}

impl From<WeightsSpec> for ChannelWeights {
    fn from(w: WeightsSpec) -> Self {
        ChannelWeights::new(w.r, w.g, w.b)
    }
}

/// Quantization regions per channel; missing fields default to 16
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegionsSpec {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for RegionsSpec {
    fn default() -> Self {
        Self {
            r: RegionCounts::DEFAULT,
            g: RegionCounts::DEFAULT,
            b: RegionCounts::DEFAULT,
        }
    }
}

impl FilterSpec {
    /// Validate the entry and build the filter it describes.
    pub fn build(&self) -> Result<Filter, AppError> {
        let filter: Filter = match self {
            FilterSpec::Invert => Invert.into(),
            FilterSpec::Brightness { amount } => Filter::brightness(*amount),
            FilterSpec::Contrast { amount } => Filter::contrast(*amount),
            FilterSpec::Gamma { gamma, c } => Filter::gamma(*gamma, *c),
            FilterSpec::Convolution {
                preset,
                name,
                factor,
                bias,
                matrix,
            } => {
                let convolution = match (preset, matrix) {
                    (Some(_), Some(_)) => {
                        return Err(AppError::Config(
                            "convolution takes either `preset` or `matrix`, not both".to_string(),
                        ))
                    }
                    (Some(preset), None) => {
                        Convolution::from_kernel(preset.parse::<ConvolutionKernel>()?)
                    }
                    (None, Some(rows)) => {
                        Convolution::new(*factor, *bias, FilterMatrix::from_rows(rows)?)
                    }
                    (None, None) => {
                        return Err(AppError::Config(
                            "convolution needs a `preset` or a `matrix`".to_string(),
                        ))
                    }
                };
                match name {
                    Some(name) => convolution.with_name(name.clone()).into(),
                    None => convolution.into(),
                }
            }
            FilterSpec::Dithering {
                kernel,
                matrix,
                weights,
            } => match matrix {
                Some(rows) => {
                    Dithering::new(FilterMatrix::from_rows(rows)?, (*weights).into())?.into()
                }
                None => {
                    Dithering::from_kernel(kernel.parse::<DiffusionKernel>()?, (*weights).into())
                        .into()
                }
            },
            FilterSpec::YCbCrDithering { kernel, weights } => YCbCrDithering::new(
                kernel.parse::<DiffusionKernel>()?.matrix(),
                (*weights).into(),
            )
            .into(),
            FilterSpec::UniformQuantization { regions } => {
                UniformQuantization::new(RegionCounts::new(regions.r, regions.g, regions.b))?
                    .into()
            }
            FilterSpec::Grayscale { weights } => Grayscale::new((*weights).into()).into(),
            FilterSpec::YCbCrView => YCbCrView.into(),
        };
        Ok(filter)
    }
}

impl ChainConfig {
    /// Parse a chain file; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config: Self = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?
        };

        tracing::info!(
            path = %path.display(),
            filters = config.filters.len(),
            grayscale = config.grayscale,
            "Loaded chain configuration"
        );
        Ok(config)
    }

    /// Load the chain named by `PIXFILT_CHAIN`, falling back to an empty chain.
    pub fn from_env() -> Self {
        match std::env::var(CHAIN_ENV) {
            Ok(path) => match Self::load(Path::new(&path)) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(%e, path = %path, "Failed to load chain, using an empty chain");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Build every filter in order, failing on the first invalid entry.
    pub fn build_filters(&self) -> Result<Vec<Filter>, AppError> {
        self.filters
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.build().map_err(|e| match e {
                    AppError::Config(msg) => AppError::Config(format!("filter #{}: {msg}", i + 1)),
                    other => other,
                })
            })
            .collect()
    }
}

/// Documented chain file written by `pixfilt init`.
pub const DEFAULT_CHAIN_YAML: &str = r#"# pixfilt filter chain
#
# Filters run top to bottom, always starting from the original image.

# Convert to gray before the first filter
grayscale: false

filters:
  - type: contrast
    amount: 30            # percent; scale = (100 + amount) / 100

  - type: dithering
    kernel: floyd-steinberg
    weights: { r: 0.3, g: 0.59, b: 0.11 }

# Other filter types:
#
#  - type: invert
#  - type: brightness
#    amount: 10
#  - type: gamma
#    gamma: 1.5
#    c: 1.0
#  - type: convolution
#    preset: gaussian-blur  # blur, gaussian-blur, sharpen, edge-detection, emboss
#  - type: convolution
#    name: my-edge
#    factor: 1.0
#    bias: 0.0
#    matrix: [[-1, 0, 0], [0, 0, 0], [0, 0, 1]]
#  - type: ycbcr-dithering
#  - type: uniform-quantization
#    regions: { r: 16, g: 16, b: 16 }
#  - type: grayscale
#  - type: ycbcr
"#;
