//! Bounding-box visualizations of detections.

use crate::constants::category;
use crate::error::{Error, Result};
use crate::output::progress;
use crate::predictions::{Detection, PredictionsDocument};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::Path;
use tracing::{debug, warn};

/// Renders detections from a predictions document.
pub trait Visualizer {
    /// Render every image that has a detection at or above `threshold` into
    /// `out_dir`. Returns the number of images written.
    fn render(&self, doc: &PredictionsDocument, out_dir: &Path, threshold: f64) -> Result<usize>;
}

/// Draws box outlines over the source image.
#[derive(Debug, Clone)]
pub struct BoxRenderer {
    line_width: u32,
    progress_enabled: bool,
}

impl BoxRenderer {
    /// Create a renderer drawing outlines `line_width` pixels wide.
    pub fn new(line_width: u32, progress_enabled: bool) -> Self {
        Self {
            line_width: line_width.max(1),
            progress_enabled,
        }
    }
}

impl Visualizer for BoxRenderer {
    fn render(&self, doc: &PredictionsDocument, out_dir: &Path, threshold: f64) -> Result<usize> {
        let bar = progress::create_progress(
            doc.predictions.len(),
            "Rendering",
            "records",
            self.progress_enabled,
        );
        let mut rendered = 0;

        for record in &doc.predictions {
            progress::inc_progress(bar.as_ref());

            let Some(source) = record.path() else {
                continue;
            };
            let boxes: Vec<&Detection> = record
                .detections()
                .iter()
                .filter(|d| d.conf >= threshold && d.bbox.is_some())
                .collect();
            if boxes.is_empty() || !source.exists() {
                continue;
            }
            let Some(file_name) = source.file_name() else {
                continue;
            };

            let mut canvas = match image::open(source) {
                Ok(img) => img.to_rgb8(),
                Err(e) => {
                    warn!("Skipping visualization of {}: {e}", source.display());
                    continue;
                }
            };

            for detection in boxes {
                if let Some(bbox) = detection.bbox {
                    draw_box(
                        &mut canvas,
                        bbox,
                        category_color(detection.category.as_deref()),
                        self.line_width,
                    );
                }
            }

            let destination = out_dir.join(file_name);
            canvas
                .save(&destination)
                .map_err(|e| Error::Visualization {
                    path: destination.clone(),
                    source: e,
                })?;
            debug!("Rendered {}", destination.display());
            rendered += 1;
        }

        progress::finish_progress(bar, "Rendered");
        Ok(rendered)
    }
}

/// Outline color for a detector category.
fn category_color(category_id: Option<&str>) -> Rgb<u8> {
    match category_id {
        Some(category::ANIMAL) => Rgb([255, 64, 0]),
        Some(category::PERSON) => Rgb([0, 128, 255]),
        Some(category::VEHICLE) => Rgb([0, 200, 80]),
        _ => Rgb([255, 220, 0]),
    }
}

/// Draw the outline of a normalized `[x, y, width, height]` box.
///
/// The stroke grows inward from the box edge, one nested rectangle per
/// pixel of `line_width`, and stops once it fills the box.
fn draw_box(img: &mut RgbImage, bbox: [f64; 4], color: Rgb<u8>, line_width: u32) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let to_px = |v: f64, extent: u32| -> u32 {
        ((v.clamp(0.0, 1.0) * f64::from(extent)).round() as u32).min(extent - 1)
    };

    let [x, y, w, h] = bbox;
    let (x0, y0) = (to_px(x, width), to_px(y, height));
    let (x1, y1) = (to_px(x + w, width), to_px(y + h, height));

    for inset in 0..line_width {
        let (left, top) = (x0.saturating_add(inset), y0.saturating_add(inset));
        let (Some(right), Some(bottom)) = (x1.checked_sub(inset), y1.checked_sub(inset)) else {
            break;
        };
        if left > right || top > bottom {
            break;
        }

        #[allow(clippy::cast_possible_wrap)]
        let rect = Rect::at(left as i32, top as i32).of_size(right - left + 1, bottom - top + 1);
        draw_hollow_rect_mut(img, rect, color);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::predictions::PredictionRecord;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn write_blank(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::new(20, 10).save(&path).unwrap();
        path
    }

    fn doc_for(path: &Path, conf: f64) -> PredictionsDocument {
        PredictionsDocument {
            predictions: vec![PredictionRecord {
                filepath: Some(path.to_string_lossy().into_owned()),
                detections: Some(vec![Detection {
                    conf,
                    category: Some("1".to_string()),
                    bbox: Some([0.25, 0.2, 0.5, 0.6]),
                    ..Detection::default()
                }]),
                ..PredictionRecord::default()
            }],
            ..PredictionsDocument::default()
        }
    }

    #[test]
    fn test_draw_box_outline_only() {
        let mut img = RgbImage::new(20, 10);
        let red = Rgb([255, 0, 0]);
        draw_box(&mut img, [0.25, 0.2, 0.5, 0.6], red, 1);

        assert_eq!(*img.get_pixel(5, 2), red);
        assert_eq!(*img.get_pixel(15, 8), red);
        assert_eq!(*img.get_pixel(10, 5), BLACK);
        assert_eq!(*img.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn test_draw_box_clamps_to_image() {
        let mut img = RgbImage::new(8, 8);
        draw_box(&mut img, [-0.5, 0.5, 2.0, 2.0], Rgb([1, 2, 3]), 2);
        assert_eq!(*img.get_pixel(7, 7), Rgb([1, 2, 3]));
    }

    #[test]
    fn test_draw_box_wide_stroke_fills_box_only() {
        let mut img = RgbImage::new(20, 10);
        let red = Rgb([255, 0, 0]);
        draw_box(&mut img, [0.25, 0.2, 0.5, 0.6], red, u32::MAX);

        assert_eq!(*img.get_pixel(10, 5), red);
        assert_eq!(*img.get_pixel(15, 8), red);
        assert_eq!(*img.get_pixel(4, 2), BLACK);
        assert_eq!(*img.get_pixel(16, 9), BLACK);
    }

    #[test]
    fn test_draw_box_thick_stroke_leaves_center() {
        let mut img = RgbImage::new(20, 10);
        let red = Rgb([255, 0, 0]);
        draw_box(&mut img, [0.0, 0.0, 1.0, 1.0], red, 2);

        assert_eq!(*img.get_pixel(1, 1), red);
        assert_eq!(*img.get_pixel(18, 8), red);
        assert_eq!(*img.get_pixel(2, 2), BLACK);
        assert_eq!(*img.get_pixel(10, 5), BLACK);
    }

    #[test]
    fn test_render_above_threshold() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_blank(src.path(), "20230615_143005.png");

        let renderer = BoxRenderer::new(1, false);
        let count = renderer
            .render(&doc_for(&path, 0.8), out.path(), 0.15)
            .unwrap();

        assert_eq!(count, 1);
        let rendered = image::open(out.path().join("20230615_143005.png"))
            .unwrap()
            .to_rgb8();
        assert_eq!(*rendered.get_pixel(5, 2), category_color(Some("1")));
        assert_eq!(*rendered.get_pixel(10, 5), BLACK);
    }

    #[test]
    fn test_render_skips_below_threshold() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = write_blank(src.path(), "low.png");

        let count = BoxRenderer::new(2, false)
            .render(&doc_for(&path, 0.1), out.path(), 0.15)
            .unwrap();

        assert_eq!(count, 0);
        assert!(!out.path().join("low.png").exists());
    }

    #[test]
    fn test_render_skips_undecodable() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let path = src.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let count = BoxRenderer::new(2, false)
            .render(&doc_for(&path, 0.9), out.path(), 0.15)
            .unwrap();
        assert_eq!(count, 0);
    }
}
