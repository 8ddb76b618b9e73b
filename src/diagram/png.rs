//! PNG image of a diagram.
//!
//! Nodes are drawn as boxes at their layout positions, edges as straight lines
//! from the bottom of the source box to the top of the target box. Labels use
//! the 8x8 bitmap font from `font8x8`, so no system fonts are needed.

use super::{Diagram, Node};
use crate::error::{Error, Result};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::io::Cursor;

const NODE_WIDTH: i32 = 180;
const NODE_HEIGHT: i32 = 44;
const MARGIN: i32 = 20;
const GLYPH: i32 = 8;
const PADDING: i32 = 8;
const MAX_CHARS: usize = ((NODE_WIDTH - 2 * PADDING) / GLYPH) as usize;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const NODE_FILL: Rgb<u8> = Rgb([240, 244, 250]);
const BORDER: Rgb<u8> = Rgb([60, 60, 60]);
const EDGE: Rgb<u8> = Rgb([120, 120, 120]);
const TITLE: Rgb<u8> = Rgb([0, 0, 0]);
const DETAIL: Rgb<u8> = Rgb([30, 90, 160]);

/// Renders a [`Diagram`] to PNG bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRenderer;

/// Maps layout positions to pixel coordinates.
struct Canvas {
    image: RgbImage,
    origin_x: i32,
    origin_y: i32,
}

impl Canvas {
    fn new(nodes: &[&Node]) -> Canvas {
        let xs = nodes.iter().map(|n| n.position.x);
        let ys = nodes.iter().map(|n| n.position.y);
        let (min_x, max_x) = (xs.clone().min().unwrap_or(0), xs.max().unwrap_or(0));
        let (min_y, max_y) = (ys.clone().min().unwrap_or(0), ys.max().unwrap_or(0));
        let width = max_x - min_x + NODE_WIDTH + 2 * MARGIN;
        let height = max_y - min_y + NODE_HEIGHT + 2 * MARGIN;
        Canvas {
            image: RgbImage::from_pixel(width as u32, height as u32, BACKGROUND),
            origin_x: MARGIN - min_x,
            origin_y: MARGIN - min_y,
        }
    }

    /// Top-left pixel of a node's box.
    fn corner(&self, node: &Node) -> (i32, i32) {
        (node.position.x + self.origin_x, node.position.y + self.origin_y)
    }

    fn edge(&mut self, source: &Node, target: &Node) {
        let (sx, sy) = self.corner(source);
        let (tx, ty) = self.corner(target);
        draw_line_segment_mut(
            &mut self.image,
            ((sx + NODE_WIDTH / 2) as f32, (sy + NODE_HEIGHT) as f32),
            ((tx + NODE_WIDTH / 2) as f32, ty as f32),
            EDGE,
        );
    }

    fn node(&mut self, node: &Node) {
        let (x, y) = self.corner(node);
        let rect = Rect::at(x, y).of_size(NODE_WIDTH as u32, NODE_HEIGHT as u32);
        draw_filled_rect_mut(&mut self.image, rect, NODE_FILL);
        draw_hollow_rect_mut(&mut self.image, rect, BORDER);
        self.text(&node.title, x + PADDING, y + PADDING, TITLE);
        self.text(&node.detail, x + PADDING, y + NODE_HEIGHT / 2 + 2, DETAIL);
    }

    /// Draw one line of text, cut to the width of a node.
    fn text(&mut self, text: &str, x: i32, y: i32, color: Rgb<u8>) {
        for (i, c) in text.chars().take(MAX_CHARS).enumerate() {
            let glyph = BASIC_FONTS
                .get(c)
                .or_else(|| BASIC_FONTS.get('?'))
                .unwrap_or([0; 8]);
            let left = x + i as i32 * GLYPH;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH {
                    if bits & (1 << col) != 0 {
                        self.put(left + col, y + row as i32, color);
                    }
                }
            }
        }
    }

    fn put(&mut self, x: i32, y: i32, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
        {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }
}

impl PngRenderer {
    /// Draw the diagram and encode it as PNG.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The PNG file content
    /// * `Err(Error::Output)` - If encoding fails
    pub fn render(&self, diagram: &Diagram) -> Result<Vec<u8>> {
        let nodes: Vec<&Node> = std::iter::once(&diagram.root)
            .chain(&diagram.children)
            .collect();
        let mut canvas = Canvas::new(&nodes);

        for edge in &diagram.edges {
            let source = nodes.iter().find(|n| n.id == edge.source);
            let target = nodes.iter().find(|n| n.id == edge.target);
            match (source, target) {
                (Some(source), Some(target)) => canvas.edge(source, target),
                _ => log::warn!("Edge {} has a missing end, not drawn", edge.id),
            }
        }
        for node in &nodes {
            canvas.node(node);
        }

        let mut cursor = Cursor::new(Vec::new());
        canvas
            .image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| Error::Output(format!("PNG: {e}")))?;
        log::debug!(
            "PngRenderer: {}x{} px, {} nodes",
            canvas.image.width(),
            canvas.image.height(),
            nodes.len()
        );
        Ok(cursor.into_inner())
    }
}
