use serde::{Deserialize, Serialize};

/// Axis-aligned region in source-frame pixel coordinates.
///
/// Stored as TLWH (top-left x, top-left y, width, height). Valid detections
/// have a positive width and height; degenerate rectangles are tolerated by
/// every operation and simply never overlap anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the region
    pub width: f32,
    /// Height of the region
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the region.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the region. Negative extents count as empty.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Finite coordinates and a strictly positive area.
    pub fn is_valid(&self) -> bool {
        self.to_tlwh().iter().all(|v| v.is_finite()) && self.width > 0.0 && self.height > 0.0
    }

    /// Whether `(px, py)` lies inside the region grown by `inflate` on every side.
    /// Edges are inclusive.
    pub fn contains(&self, px: f32, py: f32, inflate: f32) -> bool {
        px >= self.x - inflate
            && px <= self.right() + inflate
            && py >= self.y - inflate
            && py <= self.bottom() + inflate
    }

    /// The region grown by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Intersection with `[0, width] x [0, height]`, or `None` if nothing remains.
    pub fn clamp_to(&self, width: f32, height: f32) -> Option<Rect> {
        let x1 = self.x.max(0.0);
        let y1 = self.y.max(0.0);
        let x2 = self.right().min(width);
        let y2 = self.bottom().min(height);
        if x2 > x1 && y2 > y1 {
            Some(Rect::from_tlbr(x1, y1, x2, y2))
        } else {
            None
        }
    }

    /// Calculate Intersection over Union (IoU) with another region.
    ///
    /// Always in `[0, 1]`; zero-area or disjoint inputs yield `0.0`.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 && inter_area > 0.0 {
            (inter_area / union_area).min(1.0)
        } else {
            0.0
        }
    }
}

/// Overlap ratio (IoU) between two optional regions.
///
/// An absent side is not an error: it simply overlaps nothing.
pub fn overlap_ratio(a: Option<&Rect>, b: Option<&Rect>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) => a.iou(b),
        _ => 0.0,
    }
}
