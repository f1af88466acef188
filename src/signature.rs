//! # Signature Capture Surface
//!
//! A retained raster surface that turns pointer/touch gestures into
//! freehand strokes and exports the result as a PNG image.
//!
//! ## Gesture model
//!
//! ```text
//!          begin_stroke(p)            stroke_to(p)
//!   Idle ─────────────────▶ Drawing ──────────────▶ Drawing
//!                              │
//!                              │ end_stroke()
//!                              ▼
//!                            Idle  (exports the whole surface)
//! ```
//!
//! Gesture coordinates arrive in viewport space and are translated into
//! surface-local space by subtracting the surface's on-screen origin. The
//! pixel buffer is sized to the displayed size at construction, so input
//! coordinates map 1:1 to pixels.
//!
//! Strokes accumulate across gestures until [`SignaturePad::clear`] wipes
//! the surface. The export at gesture end always contains the *entire*
//! surface, not just the latest stroke; a never-drawn surface exports as a
//! blank image, and callers that care use [`SignaturePad::is_blank`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageEncoder;
use serde::{Deserialize, Serialize};

use crate::error::KuitansiError;

/// Stroke width in pixels, with rounded caps.
pub const STROKE_WIDTH: f32 = 2.0;

/// How a stored signature image was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureMethod {
    Drawn,
    Uploaded,
}

/// The captured signature of a document: absent, or one image tagged with
/// its source method.
///
/// Starts as `None`, becomes `Image` on a completed drawing gesture or a
/// completed file read, returns to `None` only on explicit clear, and is
/// overwritten whole (never merged) by any new capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SignatureResult {
    #[default]
    None,
    Image {
        /// Self-contained `data:` URI, directly displayable.
        data_uri: String,
        method: SignatureMethod,
    },
}

impl SignatureResult {
    pub fn is_present(&self) -> bool {
        matches!(self, SignatureResult::Image { .. })
    }

    pub fn method(&self) -> Option<SignatureMethod> {
        match self {
            SignatureResult::None => None,
            SignatureResult::Image { method, .. } => Some(*method),
        }
    }
}

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An exported signature: PNG bytes plus dimensions.
#[derive(Debug, Clone)]
pub struct SignatureImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl SignatureImage {
    /// Encode as a self-contained `data:image/png;base64,...` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.png))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    Drawing,
}

/// The raster drawing surface.
pub struct SignaturePad {
    width: usize,
    height: usize,
    /// On-screen top-left of the surface, for viewport → local mapping.
    origin: Point,
    /// One byte per pixel: 1 = ink.
    buffer: Vec<u8>,
    state: GestureState,
    /// Last recorded surface-local position of the active gesture.
    cursor: Option<(f32, f32)>,
}

impl SignaturePad {
    /// Create a blank pad whose pixel buffer matches the displayed size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            origin: Point::new(0.0, 0.0),
            buffer: vec![0u8; width * height],
            state: GestureState::Idle,
            cursor: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Set the surface's on-screen top-left offset. Subsequent gesture
    /// coordinates are translated by subtracting it.
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Point::new(x, y);
    }

    /// True until some ink has been laid down since the last clear.
    pub fn is_blank(&self) -> bool {
        self.buffer.iter().all(|&pixel| pixel == 0)
    }

    /// Begin a gesture at a viewport position: anchors a new path.
    pub fn begin_stroke(&mut self, p: Point) {
        self.state = GestureState::Drawing;
        self.cursor = Some(self.to_local(p));
    }

    /// Extend the active gesture: draws a segment from the last recorded
    /// position. Ignored while no gesture is active.
    pub fn stroke_to(&mut self, p: Point) {
        if self.state != GestureState::Drawing {
            return;
        }
        let to = self.to_local(p);
        if let Some(from) = self.cursor {
            self.draw_segment(from, to);
        }
        self.cursor = Some(to);
    }

    /// End the active gesture and export the entire surface contents.
    ///
    /// Returns `Ok(None)` when no gesture was in progress (e.g. a stray
    /// pointer-up). The result is produced at most once per gesture, never
    /// mid-stroke.
    pub fn end_stroke(&mut self) -> Result<Option<SignatureImage>, KuitansiError> {
        if self.state != GestureState::Drawing {
            return Ok(None);
        }
        self.state = GestureState::Idle;
        self.cursor = None;
        self.export().map(Some)
    }

    /// Wipe all rendered content back to a blank surface.
    ///
    /// Available in any state; an active gesture is abandoned.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.state = GestureState::Idle;
        self.cursor = None;
    }

    /// Encode the current surface contents as a PNG (white background,
    /// black ink).
    pub fn export(&self) -> Result<SignatureImage, KuitansiError> {
        let pixels: Vec<u8> = self
            .buffer
            .iter()
            .map(|&pixel| if pixel != 0 { 0u8 } else { 255u8 })
            .collect();

        let mut png = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png);
        encoder
            .write_image(
                &pixels,
                self.width as u32,
                self.height as u32,
                image::ExtendedColorType::L8,
            )
            .map_err(|e| KuitansiError::ImageEncode(e.to_string()))?;

        Ok(SignatureImage {
            width: self.width as u32,
            height: self.height as u32,
            png,
        })
    }

    fn to_local(&self, p: Point) -> (f32, f32) {
        (p.x - self.origin.x, p.y - self.origin.y)
    }

    /// Stamp round-capped dots along the segment at sub-pixel steps.
    fn draw_segment(&mut self, (x0, y0): (f32, f32), (x1, y1): (f32, f32)) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = (length * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_dot(x0 + dx * t, y0 + dy * t);
        }
    }

    fn stamp_dot(&mut self, cx: f32, cy: f32) {
        let radius = STROKE_WIDTH / 2.0;
        let min_x = (cx - radius).floor() as i32;
        let max_x = (cx + radius).ceil() as i32;
        let min_y = (cy - radius).floor() as i32;
        let max_y = (cy + radius).ceil() as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                    continue;
                }
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.buffer[y as usize * self.width + x as usize] = 1;
                }
            }
        }
    }
}
