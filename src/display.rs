use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use anyhow::anyhow;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use tracing::info;

use crate::config::{Accent, DisplayConfig};
use crate::layout::{break_label, wrap_description, wrap_title};
use crate::news::NewsItem;

pub const WIDTH: u32 = 400;
pub const HEIGHT: u32 = 300;

pub const LABEL_SIZE: f32 = 38.0;
pub const TITLE_SIZE: f32 = 24.0;
pub const DESCRIPTION_SIZE: f32 = 14.0;

/// The panel palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    White,
    Black,
    Red,
    Yellow,
}

impl Tone {
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            Tone::White => Rgb([255, 255, 255]),
            Tone::Black => Rgb([0, 0, 0]),
            Tone::Red => Rgb([200, 30, 30]),
            Tone::Yellow => Rgb([240, 200, 0]),
        }
    }
}

impl From<Accent> for Tone {
    fn from(accent: Accent) -> Self {
        match accent {
            Accent::Black => Tone::Black,
            Accent::Yellow => Tone::Yellow,
            Accent::Red => Tone::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Rounded display face for the category label
    Label,
    Body,
}

/// Whatever the item is drawn onto.
pub trait Canvas {
    fn set_border(&mut self, tone: Tone);
    /// Bounding box of `text` (which may hold newlines) as `(width, height)`.
    fn measure(&self, text: &str, face: Face, size: f32) -> (u32, u32);
    fn draw_text(&mut self, at: (i32, i32), text: &str, tone: Tone, face: Face, size: f32);
}

/// Lay out one item: category centered in the top band, title under it,
/// description centered on the lower half.
pub fn compose<C: Canvas>(canvas: &mut C, item: &NewsItem, accent: Accent) {
    canvas.set_border(Tone::White);

    let label = break_label(&item.category);
    let (w, h) = canvas.measure(&label, Face::Label, LABEL_SIZE);
    let x = WIDTH as i32 / 2 - w as i32 / 2;
    let y = 50 / 2 - h as i32 / 2;
    canvas.draw_text((x, y), &label, accent.into(), Face::Label, LABEL_SIZE);

    let title = wrap_title(&item.title);
    let (_, h) = canvas.measure(&title, Face::Body, TITLE_SIZE);
    let y = 100 / 2 - h as i32 / 2 + 25;
    canvas.draw_text((10, y), &title, Tone::Black, Face::Body, TITLE_SIZE);

    let description = wrap_description(&item.description);
    let (_, h) = canvas.measure(&description, Face::Body, DESCRIPTION_SIZE);
    let y = 400 / 2 - h as i32 / 2;
    canvas.draw_text((10, y), &description, Tone::Black, Face::Body, DESCRIPTION_SIZE);
}

/// In-memory 400x300 RGB bitmap.
pub struct BitmapCanvas {
    image: RgbImage,
    label_font: FontArc,
    body_font: FontArc,
}

impl BitmapCanvas {
    pub fn new(label_font: FontArc, body_font: FontArc) -> Self {
        Self {
            image: RgbImage::from_pixel(WIDTH, HEIGHT, Tone::White.rgb()),
            label_font,
            body_font,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> anyhow::Result<Self> {
        let label_font = load_font(&config.label_font)?;
        let body_font = load_font(&config.body_font)?;
        Ok(Self::new(label_font, body_font))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Png)?;
        info!("Wrote display image to {}", path.display());
        Ok(())
    }

    fn font(&self, face: Face) -> &FontArc {
        match face {
            Face::Label => &self.label_font,
            Face::Body => &self.body_font,
        }
    }

    fn line_advance(&self, face: Face, size: f32) -> i32 {
        let scaled = self.font(face).as_scaled(PxScale::from(size));
        (scaled.height() + scaled.line_gap()).ceil() as i32
    }
}

impl Canvas for BitmapCanvas {
    fn set_border(&mut self, tone: Tone) {
        draw_hollow_rect_mut(
            &mut self.image,
            Rect::at(0, 0).of_size(WIDTH, HEIGHT),
            tone.rgb(),
        );
    }

    fn measure(&self, text: &str, face: Face, size: f32) -> (u32, u32) {
        let font = self.font(face);
        let scale = PxScale::from(size);
        let width = text
            .lines()
            .map(|line| text_size(scale, font, line).0)
            .max()
            .unwrap_or(0);
        let height = self.line_advance(face, size) as u32 * text.lines().count() as u32;
        (width, height)
    }

    // imageproc draws a single line per call, so newlines are laid out here
    fn draw_text(&mut self, at: (i32, i32), text: &str, tone: Tone, face: Face, size: f32) {
        let advance = self.line_advance(face, size);
        let scale = PxScale::from(size);
        let font = match face {
            Face::Label => &self.label_font,
            Face::Body => &self.body_font,
        };

        for (i, line) in text.lines().enumerate() {
            let y = at.1 + advance * i as i32;
            draw_text_mut(&mut self.image, tone.rgb(), at.0, y, scale, font, line);
        }
    }
}

fn load_font(path: &Path) -> anyhow::Result<FontArc> {
    let data = std::fs::read(path)
        .map_err(|e| anyhow!("failed to read font {}: {}", path.display(), e))?;
    FontArc::try_from_vec(data).map_err(|_| anyhow!("invalid font file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Drawn {
        at: (i32, i32),
        text: String,
        tone: Tone,
        face: Face,
        size: f32,
    }

    /// Fixed metrics: each char is half the size wide, each line one size tall.
    #[derive(Default)]
    struct RecordingCanvas {
        border: Option<Tone>,
        drawn: Vec<Drawn>,
    }

    impl Canvas for RecordingCanvas {
        fn set_border(&mut self, tone: Tone) {
            self.border = Some(tone);
        }

        fn measure(&self, text: &str, _face: Face, size: f32) -> (u32, u32) {
            let widest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            let width = (widest as f32 * size / 2.0) as u32;
            let height = (text.lines().count() as f32 * size) as u32;
            (width, height)
        }

        fn draw_text(&mut self, at: (i32, i32), text: &str, tone: Tone, face: Face, size: f32) {
            self.drawn.push(Drawn {
                at,
                text: text.to_string(),
                tone,
                face,
                size,
            });
        }
    }

    fn item() -> NewsItem {
        NewsItem::new(
            "Treasury yields climb as investors weigh fresh data on jobs",
            "Short body",
            "Top News",
        )
    }

    #[test]
    fn test_compose_draws_three_blocks() {
        let mut canvas = RecordingCanvas::default();
        compose(&mut canvas, &item(), Accent::Red);

        assert_eq!(canvas.border, Some(Tone::White));
        assert_eq!(canvas.drawn.len(), 3);
        assert_eq!(canvas.drawn[0].face, Face::Label);
        assert_eq!(canvas.drawn[0].size, LABEL_SIZE);
        assert_eq!(canvas.drawn[1].size, TITLE_SIZE);
        assert_eq!(canvas.drawn[2].size, DESCRIPTION_SIZE);
    }

    #[test]
    fn test_label_is_centered_in_top_band() {
        let mut canvas = RecordingCanvas::default();
        compose(&mut canvas, &item(), Accent::Red);

        // "Top News": 8 chars * 19 = 152 wide, 38 tall
        assert_eq!(canvas.drawn[0].text, "Top News");
        assert_eq!(canvas.drawn[0].at, (200 - 76, 25 - 19));
    }

    #[test]
    fn test_title_is_wrapped_and_left_aligned() {
        let mut canvas = RecordingCanvas::default();
        compose(&mut canvas, &item(), Accent::Red);

        let title = &canvas.drawn[1];
        assert_eq!(
            title.text,
            "Treasury yields climb as investors\nweigh fresh data on jobs"
        );
        // Two lines of 24 => 48 tall
        assert_eq!(title.at, (10, 50 - 24 + 25));
        assert_eq!(title.tone, Tone::Black);
    }

    #[test]
    fn test_description_position() {
        let mut canvas = RecordingCanvas::default();
        compose(&mut canvas, &item(), Accent::Red);

        let description = &canvas.drawn[2];
        assert_eq!(description.text, "Short body");
        assert_eq!(description.at, (10, 200 - 7));
        assert_eq!(description.tone, Tone::Black);
    }

    #[test]
    fn test_accent_colors_label_only() {
        for (accent, tone) in [
            (Accent::Black, Tone::Black),
            (Accent::Yellow, Tone::Yellow),
            (Accent::Red, Tone::Red),
        ] {
            let mut canvas = RecordingCanvas::default();
            compose(&mut canvas, &item(), accent);
            assert_eq!(canvas.drawn[0].tone, tone);
            assert_eq!(canvas.drawn[1].tone, Tone::Black);
        }
    }

    #[test]
    fn test_tone_palette() {
        assert_eq!(Tone::White.rgb(), Rgb([255, 255, 255]));
        assert_eq!(Tone::Black.rgb(), Rgb([0, 0, 0]));
        assert_ne!(Tone::Red.rgb(), Tone::Yellow.rgb());
    }

    #[test]
    fn test_load_font_missing_file() {
        assert!(load_font(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), b"not a font").unwrap();
        assert!(load_font(temp.path()).is_err());
    }

    mod bitmap_canvas_tests {
        use super::*;
        use std::path::PathBuf;
        use tempfile::TempDir;

        fn fixture_font() -> PathBuf {
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf")
        }

        fn canvas() -> BitmapCanvas {
            BitmapCanvas::from_config(&DisplayConfig {
                accent: Accent::Red,
                label_font: fixture_font(),
                body_font: fixture_font(),
                output: PathBuf::from("unused.png"),
            })
            .unwrap()
        }

        fn non_white_rows(image: &RgbImage, rows: std::ops::Range<u32>) -> usize {
            rows.flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
                .filter(|&(x, y)| *image.get_pixel(x, y) != Tone::White.rgb())
                .count()
        }

        #[test]
        fn test_starts_blank() {
            let canvas = canvas();
            assert_eq!(canvas.image.dimensions(), (WIDTH, HEIGHT));
            assert_eq!(non_white_rows(&canvas.image, 0..HEIGHT), 0);
        }

        #[test]
        fn test_measure_stacks_lines() {
            let canvas = canvas();
            let advance = canvas.line_advance(Face::Body, TITLE_SIZE) as u32;
            assert!(advance > 0);

            let (_, one) = canvas.measure("a", Face::Body, TITLE_SIZE);
            let (_, two) = canvas.measure("a\nb", Face::Body, TITLE_SIZE);
            assert_eq!(one, advance);
            assert_eq!(two, 2 * advance);
        }

        #[test]
        fn test_measure_width_is_widest_line() {
            let canvas = canvas();
            let (wide, _) = canvas.measure("a much wider line", Face::Body, TITLE_SIZE);
            let (both, _) = canvas.measure("a\na much wider line", Face::Body, TITLE_SIZE);
            let (narrow, _) = canvas.measure("a", Face::Body, TITLE_SIZE);

            assert!(wide > narrow);
            assert_eq!(both, wide);
        }

        #[test]
        fn test_draw_text_puts_each_line_on_its_own_row() {
            let mut canvas = canvas();
            let advance = canvas.line_advance(Face::Body, TITLE_SIZE) as u32;

            canvas.draw_text((10, 0), "Top\nNews", Tone::Black, Face::Body, TITLE_SIZE);

            assert!(non_white_rows(&canvas.image, 0..advance) > 0);
            assert!(non_white_rows(&canvas.image, advance..2 * advance) > 0);
            assert_eq!(non_white_rows(&canvas.image, 2 * advance..HEIGHT), 0);
        }

        #[test]
        fn test_compose_and_save_png() {
            let mut canvas = canvas();
            let item = NewsItem::new(
                "Treasury yields climb as investors weigh fresh data on jobs",
                "Bond markets moved after the report showed hiring slowed in November",
                "Top News",
            );
            compose(&mut canvas, &item, Accent::Red);

            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("news.png");
            canvas.save_png(&path).unwrap();

            let written = image::open(&path).unwrap().to_rgb8();
            assert_eq!(written.dimensions(), (WIDTH, HEIGHT));

            // Label band is drawn in the accent tone
            let red = (0..50)
                .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
                .filter(|&(x, y)| *written.get_pixel(x, y) == Tone::Red.rgb())
                .count();
            assert!(red > 0);
            assert!(non_white_rows(&written, 150..HEIGHT) > 0);
        }

        #[test]
        fn test_save_png_to_missing_dir_fails() {
            let canvas = canvas();
            assert!(canvas.save_png("/nonexistent/dir/news.png").is_err());
        }
    }
}
