//! Named built-in filters selectable from the command line.

use std::fmt;
use std::str::FromStr;

use pixel_filters::{
    Brightness, ChannelWeights, Contrast, Convolution, ConvolutionKernel, DiffusionKernel,
    Dithering, Filter, Gamma, Grayscale, Invert, UniformQuantization, YCbCrDithering, YCbCrView,
};

/// A filter with its default parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Invert,
    Brightness,
    Contrast,
    Gamma,
    Blur,
    GaussianBlur,
    Sharpen,
    EdgeDetection,
    Emboss,
    YCbCrDithering,
    ErrorDiffusion,
    UniformQuantization,
    Grayscale,
    YCbCr,
}

impl Preset {
    pub const ALL: [Preset; 14] = [
        Preset::Invert,
        Preset::Brightness,
        Preset::Contrast,
        Preset::Gamma,
        Preset::Blur,
        Preset::GaussianBlur,
        Preset::Sharpen,
        Preset::EdgeDetection,
        Preset::Emboss,
        Preset::YCbCrDithering,
        Preset::ErrorDiffusion,
        Preset::UniformQuantization,
        Preset::Grayscale,
        Preset::YCbCr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Invert => "invert",
            Preset::Brightness => "brightness",
            Preset::Contrast => "contrast",
            Preset::Gamma => "gamma",
            Preset::Blur => "blur",
            Preset::GaussianBlur => "gaussian-blur",
            Preset::Sharpen => "sharpen",
            Preset::EdgeDetection => "edge-detection",
            Preset::Emboss => "emboss",
            Preset::YCbCrDithering => "ycbcr-dithering",
            Preset::ErrorDiffusion => "error-diffusion",
            Preset::UniformQuantization => "uniform-quantization",
            Preset::Grayscale => "grayscale",
            Preset::YCbCr => "ycbcr",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Invert => "255 - v on every color channel",
            Preset::Brightness => "add 10 to every color channel",
            Preset::Contrast => "stretch contrast by 30%",
            Preset::Gamma => "gamma 1.5, c = 1.0",
            Preset::Blur => "3x3 box blur",
            Preset::GaussianBlur => "3x3 Gaussian blur",
            Preset::Sharpen => "3x3 sharpen",
            Preset::EdgeDetection => "diagonal edge detection",
            Preset::Emboss => "emboss around mid-gray",
            Preset::YCbCrDithering => "round Y, Cb and Cr to multiples of 4",
            Preset::ErrorDiffusion => "Floyd-Steinberg dithering to gray",
            Preset::UniformQuantization => "16 regions per channel, region means",
            Preset::Grayscale => "weighted gray, alpha kept",
            Preset::YCbCr => "show Y, Cb, Cr planes as R, G, B",
        }
    }

    pub fn filter(self) -> Filter {
        match self {
            Preset::Invert => Invert.into(),
            Preset::Brightness => Brightness::default().into(),
            Preset::Contrast => Contrast::default().into(),
            Preset::Gamma => Gamma::default().into(),
            Preset::Blur => Convolution::from_kernel(ConvolutionKernel::BoxBlur).into(),
            Preset::GaussianBlur => {
                Convolution::from_kernel(ConvolutionKernel::GaussianBlur).into()
            }
            Preset::Sharpen => Convolution::from_kernel(ConvolutionKernel::Sharpen).into(),
            Preset::EdgeDetection => {
                Convolution::from_kernel(ConvolutionKernel::EdgeDetection).into()
            }
            Preset::Emboss => Convolution::from_kernel(ConvolutionKernel::Emboss).into(),
            Preset::YCbCrDithering => YCbCrDithering::default().into(),
            Preset::ErrorDiffusion => {
                Dithering::from_kernel(DiffusionKernel::FloydSteinberg, ChannelWeights::LUMA)
                    .into()
            }
            Preset::UniformQuantization => UniformQuantization::default().into(),
            Preset::Grayscale => Grayscale::default().into(),
            Preset::YCbCr => YCbCrView.into(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_filters::ImageFilter;

    #[test]
    fn test_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
        assert_eq!("Gaussian-Blur".parse::<Preset>(), Ok(Preset::GaussianBlur));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "sepia".parse::<Preset>(),
            Err(UnknownPreset("sepia".to_string()))
        );
    }

    #[test]
    fn test_preset_defaults() {
        assert_eq!(Preset::Brightness.filter(), Filter::brightness(10));
        assert_eq!(Preset::Contrast.filter(), Filter::contrast(30.0));
        assert_eq!(Preset::Gamma.filter(), Filter::gamma(1.5, 1.0));
        assert_eq!(Preset::ErrorDiffusion.filter(), Filter::from(Dithering::default()));
    }

    #[test]
    fn test_convolution_presets_use_kernel_names() {
        assert_eq!(Preset::EdgeDetection.filter().label(), "edge-detection");
        assert_eq!(Preset::Blur.filter().label(), "blur");
    }
}
