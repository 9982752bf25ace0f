//! Declarative two-layer compositing plan.
//!
//! The plan says which treatment each layer gets, never how pixels are
//! filtered, so any presentation layer can execute it.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tracker::Rect;

/// Default blur radius, in pixels, applied to the background.
pub const DEFAULT_BLUR_INTENSITY: f32 = 12.0;
/// Default growth of the sharp region so its edge is not a razor-thin seam.
pub const DEFAULT_CLIP_MARGIN: f32 = 8.0;
/// Default brightness multiplier for the blurred background.
pub const DEFAULT_BACKGROUND_BRIGHTNESS: f32 = 0.6;

/// A single pixel treatment the presentation layer must provide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Filter {
    /// Gaussian blur with the given radius in pixels
    Blur(f32),
    /// Brightness multiplier, 1.0 is unchanged
    Brightness(f32),
    /// Full desaturation
    Grayscale,
}

/// Full-frame draw with an ordered filter chain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layer {
    pub filters: Vec<Filter>,
}

impl Layer {
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn has_filter(&self, filter: Filter) -> bool {
        self.filters.contains(&filter)
    }
}

/// Frame draw restricted to `clip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClippedLayer {
    pub clip: Rect,
    pub layer: Layer,
}

/// What to draw this frame, in order: `background` first, then `foreground`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawPlan {
    pub background: Layer,
    pub foreground: Option<ClippedLayer>,
}

impl DrawPlan {
    /// Number of draw calls the plan requires.
    pub fn layer_count(&self) -> usize {
        1 + usize::from(self.foreground.is_some())
    }

    pub fn foreground_clip(&self) -> Option<Rect> {
        self.foreground.as_ref().map(|f| f.clip)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Background blur radius; zero disables the two-layer treatment
    pub blur_intensity: f32,
    /// Pixels added on every side of the tracked region before clipping
    pub clip_margin: f32,
    /// Brightness multiplier for the blurred background
    pub background_brightness: f32,
    /// Desaturate the background
    pub color_pop: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            blur_intensity: DEFAULT_BLUR_INTENSITY,
            clip_margin: DEFAULT_CLIP_MARGIN,
            background_brightness: DEFAULT_BACKGROUND_BRIGHTNESS,
            color_pop: false,
        }
    }
}

impl CompositorConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.blur_intensity.is_finite() || self.blur_intensity < 0.0 {
            return Err(Error::InvalidConfig {
                field: "compositor.blur_intensity",
                reason: format!("must be a non-negative number, got {}", self.blur_intensity),
            });
        }
        if !self.clip_margin.is_finite() || self.clip_margin < 0.0 {
            return Err(Error::InvalidConfig {
                field: "compositor.clip_margin",
                reason: format!("must be a non-negative number, got {}", self.clip_margin),
            });
        }
        let b = self.background_brightness;
        if !b.is_finite() || b <= 0.0 || b > 1.0 {
            return Err(Error::InvalidConfig {
                field: "compositor.background_brightness",
                reason: format!("must be in (0, 1], got {b}"),
            });
        }
        Ok(())
    }
}

/// Builds a [`DrawPlan`] per frame from the tracked region.
#[derive(Debug, Clone)]
pub struct Compositor {
    clip_margin: f32,
    background_brightness: f32,
}

impl Compositor {
    pub fn new(config: &CompositorConfig) -> Self {
        Self {
            clip_margin: config.clip_margin,
            background_brightness: config.background_brightness,
        }
    }

    pub fn clip_margin(&self) -> f32 {
        self.clip_margin
    }

    /// Plan one frame.
    ///
    /// Without a region, or with a non-positive intensity, the plan is a single
    /// full-frame draw (grayscale when `color_pop` is set). Otherwise the
    /// background is blurred and darkened, and the unfiltered frame is drawn
    /// again clipped to the region grown by the clip margin.
    pub fn plan(&self, region: Option<&Rect>, blur_intensity: f32, color_pop: bool) -> DrawPlan {
        let region = match region {
            Some(r) if blur_intensity > 0.0 => r,
            _ => {
                let mut background = Layer::unfiltered();
                if color_pop {
                    background.filters.push(Filter::Grayscale);
                }
                return DrawPlan {
                    background,
                    foreground: None,
                };
            }
        };

        let mut filters = vec![
            Filter::Blur(blur_intensity),
            Filter::Brightness(self.background_brightness),
        ];
        if color_pop {
            filters.push(Filter::Grayscale);
        }

        DrawPlan {
            background: Layer { filters },
            foreground: Some(ClippedLayer {
                clip: region.expand(self.clip_margin),
                layer: Layer::unfiltered(),
            }),
        }
    }

    /// Like [`Compositor::plan`], with the clip kept inside a `width` x `height` frame.
    ///
    /// A region entirely outside the frame degrades to the single-layer plan.
    pub fn plan_in_frame(
        &self,
        region: Option<&Rect>,
        blur_intensity: f32,
        color_pop: bool,
        width: u32,
        height: u32,
    ) -> DrawPlan {
        let mut plan = self.plan(region, blur_intensity, color_pop);
        if let Some(fg) = plan.foreground.take() {
            match fg.clip.clamp_to(width as f32, height as f32) {
                Some(clip) => plan.foreground = Some(ClippedLayer { clip, ..fg }),
                None => return self.plan(None, blur_intensity, color_pop),
            }
        }
        plan
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(&CompositorConfig::default())
    }
}
