// src/main.rs

mod config;
mod detection;
mod events;
mod quadrant;
mod types;
mod video;

use anyhow::Result;
use opencv::{core::Mat, imgproc, prelude::*};
use tracing::info;
use tracing_subscriber::EnvFilter;

use detection::BallColor;
use events::EventLog;
use quadrant::{define_quadrants, Quadrant};
use types::Config;
use video::VideoReader;

fn main() -> Result<()> {
    let config = Config::load("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "quadrant_detection={}",
            config.logging.level
        )))
        .init();

    run(&config)
}

fn run(config: &Config) -> Result<()> {
    let mut reader = VideoReader::open(&config.video.input_path)?;

    let duration = reader.total_frames as f64 / reader.fps as f64;
    info!(
        "Video loaded: {} frames at {} fps, duration: {:.2} seconds",
        reader.total_frames, reader.fps, duration
    );

    let mut writer = video::create_writer(
        &config.video.output_path,
        reader.fps,
        reader.width,
        reader.height,
    )?;

    // Quadrants are defined from the first frame's dimensions and reused for
    // the rest of the video.
    let mut quadrants: Option<[Quadrant; 4]> = None;
    let mut events = EventLog::default();

    while let Some(mut frame) = reader.read_frame()? {
        let quads =
            quadrants.get_or_insert_with(|| define_quadrants(frame.mat.rows(), frame.mat.cols()));

        process_frame(&mut frame.mat, frame.timestamp_ms / 1000.0, quads, &mut events)?;

        writer.write(&frame.mat)?;
        info!(
            "Processed frame {}/{}",
            reader.current_frame, reader.total_frames
        );
    }

    reader.release()?;
    writer.release()?;

    events.write_report(&config.video.events_path)?;

    info!(
        "Processing complete. Processed video saved as '{}' and {} event(s) logged in '{}'.",
        config.video.output_path,
        events.len(),
        config.video.events_path
    );

    Ok(())
}

/// Run one frame through detection and event logging, burning the overlay
/// text in place for every quadrant match.
fn process_frame(
    mat: &mut Mat,
    timestamp: f64,
    quadrants: &[Quadrant; 4],
    events: &mut EventLog,
) -> Result<()> {
    let hsv = detection::to_hsv(mat)?;

    for color in BallColor::ALL {
        let contours = detection::find_ball_contours(&hsv, color)?;

        for contour in contours.iter() {
            let rect = imgproc::bounding_rect(&contour)?;
            let (cx, cy) = detection::centroid(rect);

            // A centroid on a shared midline matches more than one quadrant
            // and is logged (and labeled) once per match.
            for quad in quadrants {
                if quad.contains(cx, cy) {
                    events.record(timestamp, quad.id, color);
                    video::draw_entry_label(mat, rect.x, rect.y, timestamp)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Rect, Scalar, CV_8UC3};

    fn blank_frame(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn fill_rect(frame: &mut Mat, rect: Rect, bgr: Scalar) {
        imgproc::rectangle(frame, rect, bgr, -1, imgproc::LINE_8, 0).unwrap();
    }

    #[test]
    fn solid_blob_inside_quadrant_three_logs_exactly_one_event() {
        let mut frame = blank_frame(200, 200);
        // Yellow blob entirely inside the bottom-left quadrant.
        fill_rect(
            &mut frame,
            Rect::new(20, 120, 40, 40),
            Scalar::new(0.0, 200.0, 230.0, 0.0),
        );

        let quadrants = define_quadrants(200, 200);
        let mut events = EventLog::default();
        process_frame(&mut frame, 1.5, &quadrants, &mut events).unwrap();

        assert_eq!(events.len(), 1);
        let event = events.events()[0];
        assert_eq!(event.quadrant, 3);
        assert_eq!(event.color, BallColor::Yellow);
        assert_eq!(event.kind.as_str(), "Entry");
        assert_eq!(event.timestamp, 1.5);
    }

    #[test]
    fn blank_frame_logs_nothing() {
        let mut frame = blank_frame(64, 64);
        let quadrants = define_quadrants(64, 64);
        let mut events = EventLog::default();

        process_frame(&mut frame, 0.0, &quadrants, &mut events).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn centroid_on_both_midlines_logs_one_event_per_quadrant() {
        let mut frame = blank_frame(200, 200);
        // Red blob centered on the frame midpoint: centroid lands on both
        // midlines and matches all four quadrants.
        fill_rect(
            &mut frame,
            Rect::new(80, 80, 40, 40),
            Scalar::new(0.0, 0.0, 255.0, 0.0),
        );

        let quadrants = define_quadrants(200, 200);
        let mut events = EventLog::default();
        process_frame(&mut frame, 2.0, &quadrants, &mut events).unwrap();

        assert_eq!(events.len(), 4);
        let logged: Vec<u32> = events.events().iter().map(|e| e.quadrant).collect();
        assert_eq!(logged, vec![1, 2, 3, 4]);
        assert!(events.events().iter().all(|e| e.color == BallColor::Red));
    }

    #[test]
    fn two_colors_log_in_fixed_color_order() {
        let mut frame = blank_frame(200, 200);
        // Red in quadrant 1, yellow in quadrant 4; yellow is checked first.
        fill_rect(
            &mut frame,
            Rect::new(10, 10, 20, 20),
            Scalar::new(0.0, 0.0, 255.0, 0.0),
        );
        fill_rect(
            &mut frame,
            Rect::new(140, 140, 20, 20),
            Scalar::new(0.0, 200.0, 230.0, 0.0),
        );

        let quadrants = define_quadrants(200, 200);
        let mut events = EventLog::default();
        process_frame(&mut frame, 0.5, &quadrants, &mut events).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events.events()[0].color, BallColor::Yellow);
        assert_eq!(events.events()[0].quadrant, 4);
        assert_eq!(events.events()[1].color, BallColor::Red);
        assert_eq!(events.events()[1].quadrant, 1);
    }
}
