// src/video.rs

use crate::types::Frame;
use anyhow::{Context, Result};
use opencv::{
    core::{Mat, Point, Scalar, Size},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter},
};
use tracing::info;

pub struct VideoReader {
    cap: VideoCapture,
    pub fps: i32,
    pub total_frames: i64,
    pub width: i32,
    pub height: i32,
    pub current_frame: i64,
}

impl VideoReader {
    /// Open a video file. Failure to open is the pipeline's single fatal
    /// error; everything downstream degrades to empty results instead.
    pub fn open(path: &str) -> Result<Self> {
        info!("Opening video: {}", path);

        let cap = VideoCapture::from_file(path, videoio::CAP_ANY)
            .with_context(|| format!("Could not open video: {}", path))?;
        if !cap.is_opened()? {
            anyhow::bail!("Could not open video: {}", path);
        }

        let fps = cap.get(videoio::CAP_PROP_FPS)? as i32;
        let total_frames = cap.get(videoio::CAP_PROP_FRAME_COUNT)? as i64;
        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as i32;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as i32;

        Ok(Self {
            cap,
            fps,
            total_frames,
            width,
            height,
            current_frame: 0,
        })
    }

    /// Read the next frame together with its position on the container
    /// clock. A failed or empty read is end-of-stream, not an error.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        let mut mat = Mat::default();
        if !self.cap.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }

        self.current_frame += 1;
        let timestamp_ms = self.cap.get(videoio::CAP_PROP_POS_MSEC)?;

        Ok(Some(Frame { mat, timestamp_ms }))
    }

    pub fn release(&mut self) -> Result<()> {
        self.cap.release()?;
        Ok(())
    }
}

/// Open the annotated-copy writer: XVID, the source's frame rate and
/// dimensions, one output file for the whole run.
pub fn create_writer(path: &str, fps: i32, width: i32, height: i32) -> Result<VideoWriter> {
    info!("Output video: {}", path);

    let fourcc = VideoWriter::fourcc('X', 'V', 'I', 'D')?;
    let writer = VideoWriter::new(path, fourcc, fps as f64, Size::new(width, height), true)?;

    Ok(writer)
}

/// Burn the entry label just above a detection's bounding box. The y offset
/// may go negative near the top edge; OpenCV clips off-frame text.
pub fn draw_entry_label(frame: &mut Mat, x: i32, y: i32, timestamp: f64) -> Result<()> {
    let text = format!("Entry at {:.2}s", timestamp);
    imgproc::put_text(
        frame,
        &text,
        Point::new(x, y - 10),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.5,
        Scalar::new(255.0, 255.0, 255.0, 0.0),
        2,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}
