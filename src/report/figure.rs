use crate::error::DenoiseError;
use ab_glyph::{FontVec, PxScale};
use image::{imageops, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Space around and between panels
const MARGIN: u32 = 16;
/// Height reserved above each panel for its caption
const CAPTION_HEIGHT: u32 = 48;
const LINE_HEIGHT: u32 = 22;
const FONT_SIZE: f32 = 18.0;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT: Rgb<u8> = Rgb([0, 0, 0]);
const BORDER: Rgb<u8> = Rgb([160, 160, 160]);

/// One captioned image in a figure
#[derive(Debug, Clone)]
pub struct Panel {
    /// Caption, may span several lines
    pub title: String,
    pub image: RgbImage,
}

impl Panel {
    pub fn new(title: impl Into<String>, image: RgbImage) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }
}

/// Grid of captioned panels rendered into a single image
#[derive(Debug, Clone, Default)]
pub struct Figure {
    rows: Vec<Vec<Panel>>,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, panels: Vec<Panel>) -> Self {
        self.rows.push(panels);
        self
    }

    pub fn panel_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Lay out all panels on a white canvas
    ///
    /// Captions are only drawn when a font is available.
    pub fn render(&self, font: Option<&FontVec>) -> Result<RgbImage, DenoiseError> {
        let panels = self.rows.iter().flatten();
        let cell_w = panels.clone().map(|p| p.image.width()).max().unwrap_or(0);
        let cell_h = panels.map(|p| p.image.height()).max().unwrap_or(0);
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let rows = self.rows.len() as u32;

        if cols == 0 || cell_w == 0 || cell_h == 0 {
            return Err(DenoiseError::Render("figure has no panels".to_string()));
        }

        let width = MARGIN + cols * (cell_w + MARGIN);
        let height = MARGIN + rows * (CAPTION_HEIGHT + cell_h + MARGIN);
        let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

        for (r, row) in self.rows.iter().enumerate() {
            for (c, panel) in row.iter().enumerate() {
                let x = MARGIN + c as u32 * (cell_w + MARGIN);
                let y = MARGIN + r as u32 * (CAPTION_HEIGHT + cell_h + MARGIN);

                if let Some(font) = font {
                    for (i, line) in panel.title.lines().enumerate() {
                        draw_text_mut(
                            &mut canvas,
                            TEXT,
                            x as i32,
                            (y + i as u32 * LINE_HEIGHT) as i32,
                            PxScale::from(FONT_SIZE),
                            font,
                            line,
                        );
                    }
                }

                let top = y + CAPTION_HEIGHT;
                imageops::overlay(&mut canvas, &panel.image, x as i64, top as i64);
                draw_hollow_rect_mut(
                    &mut canvas,
                    Rect::at(x as i32 - 1, top as i32 - 1)
                        .of_size(panel.image.width() + 2, panel.image.height() + 2),
                    BORDER,
                );
            }
        }

        Ok(canvas)
    }

    /// Render and write as PNG
    pub fn save(&self, path: &Path, font: Option<&FontVec>) -> Result<(), DenoiseError> {
        let canvas = self.render(font)?;
        canvas
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| DenoiseError::Render(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }
}
