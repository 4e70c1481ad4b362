// src/detection.rs
//
// Fixed-range HSV thresholding for the four ball colors. The bound literals
// are detection constants, not derived values; OpenCV hue is 0-180 and
// saturation/value are 0-255.

use anyhow::Result;
use opencv::{
    core::{self, Mat, Point, Rect, Scalar, Vector},
    imgproc,
};

/// Ball colors checked on every frame, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallColor {
    Yellow,
    White,
    Green,
    Red,
}

impl BallColor {
    pub const ALL: [BallColor; 4] = [
        BallColor::Yellow,
        BallColor::White,
        BallColor::Green,
        BallColor::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BallColor::Yellow => "yellow",
            BallColor::White => "white",
            BallColor::Green => "green",
            BallColor::Red => "red",
        }
    }

    /// Inclusive HSV threshold bounds for this color.
    fn hsv_bounds(&self) -> (Scalar, Scalar) {
        match self {
            BallColor::Yellow => (
                Scalar::new(20.0, 100.0, 100.0, 0.0),
                Scalar::new(30.0, 255.0, 255.0, 0.0),
            ),
            BallColor::White => (
                Scalar::new(0.0, 0.0, 200.0, 0.0),
                Scalar::new(180.0, 30.0, 255.0, 0.0),
            ),
            BallColor::Green => (
                Scalar::new(36.0, 25.0, 25.0, 0.0),
                Scalar::new(86.0, 255.0, 255.0, 0.0),
            ),
            BallColor::Red => (
                Scalar::new(0.0, 120.0, 70.0, 0.0),
                Scalar::new(10.0, 255.0, 255.0, 0.0),
            ),
        }
    }
}

/// Convert a BGR frame to HSV for thresholding.
pub fn to_hsv(frame: &Mat) -> Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color(frame, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;
    Ok(hsv)
}

/// Threshold the HSV frame against one color's bounds and return the outer
/// contours of the matching regions. Contour semantics (hierarchy, point
/// reduction) are OpenCV's.
pub fn find_ball_contours(hsv: &Mat, color: BallColor) -> Result<Vector<Vector<Point>>> {
    let (lower, upper) = color.hsv_bounds();

    let mut mask = Mat::default();
    core::in_range(hsv, &lower, &upper, &mut mask)?;

    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours(
        &mask,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    Ok(contours)
}

/// Bounding-box center with truncating division.
pub fn centroid(rect: Rect) -> (i32, i32) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}
