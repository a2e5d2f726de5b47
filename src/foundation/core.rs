/// Axis-aligned face rectangle in frame pixel coordinates, as returned by a detector.
///
/// Detectors are not trusted: a rectangle may extend past the frame or carry non-positive
/// dimensions, and every consumer tolerates both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FaceRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl FaceRect {
    /// Build a rectangle from its origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `true` when either dimension is zero or negative.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Integer centre point (`x + w/2`, `y + h/2`).
    pub fn center(self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Area in pixels; zero for degenerate rectangles.
    pub fn area(self) -> u64 {
        if self.is_degenerate() {
            return 0;
        }
        u64::from(self.width.unsigned_abs()) * u64::from(self.height.unsigned_abs())
    }

    /// Intersection-over-union with `other`, in `[0, 1]`.
    pub fn iou(self, other: FaceRect) -> f64 {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = (i64::from(self.x) + i64::from(self.width))
            .min(i64::from(other.x) + i64::from(other.width));
        let y1 = (i64::from(self.y) + i64::from(self.height))
            .min(i64::from(other.y) + i64::from(other.height));
        if x1 <= x0 || y1 <= y0 {
            return 0.0;
        }
        let inter = ((x1 - x0) * (y1 - y0)) as f64;
        let union = self.area() as f64 + other.area() as f64 - inter;
        if union <= 0.0 { 0.0 } else { inter / union }
    }
}

impl From<(i32, i32, i32, i32)> for FaceRect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}

/// The detection with the largest area, or `None` for an empty list.
///
/// Ties keep the earliest detection.
pub fn largest_face(faces: &[FaceRect]) -> Option<FaceRect> {
    let mut best: Option<FaceRect> = None;
    for &face in faces {
        match best {
            Some(b) if b.area() >= face.area() => {}
            _ => best = Some(face),
        }
    }
    best
}

/// RGB colour used by overlays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure red, used for debug face boxes.
    pub const RED: Self = Self { r: 255, g: 0, b: 0 };

    /// Channel array in `[r, g, b]` order.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
