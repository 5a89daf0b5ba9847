//! EMF rendering of ancestor trees.

use super::{EMF_MIME_TYPE, EdgeGeometry, ImageData, RenderState, RenderedImage};
use crate::emf::{BackgroundMode, DEFAULT_FONT_FACE, Emf, Pen, TextAlign};
use crate::size::Size;
use crate::tree::{AncestorTreeVisitor, TreeNode};

/// Color of known persons' boxes and text, `0x00BBGGRR`.
pub const BLACK: u32 = 0x00_00_00;

/// Color of unknown persons' boxes and text, `0x00BBGGRR`.
pub const GRAY: u32 = 0xA0_A0_A0;

/// Output options for [`EmfTreeVisitor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmfOptions {
    /// Resolution of the picture in pixels per inch.
    pub dpi: f64,
}

impl Default for EmfOptions {
    fn default() -> Self {
        EmfOptions { dpi: 300.0 }
    }
}

/// Visitor drawing boxes and connectors into a metafile.
#[derive(Clone, Debug)]
pub struct EmfTreeVisitor {
    emf: Emf,
    dpi: f64,
    black_pen: Pen,
    gray_pen: Pen,
    state: RenderState,
}

impl EmfTreeVisitor {
    /// Picture of the given size at `dpi` pixels per inch.
    pub fn new(width: Size, height: Size, dpi: f64) -> Self {
        let mut emf = Emf::new(width.to_dpi(dpi), height.to_dpi(dpi));
        emf.set_bkmode(BackgroundMode::Transparent);
        let pen_width = Size::points(1.0).to_dpi(dpi);
        EmfTreeVisitor {
            emf,
            dpi,
            black_pen: Pen::solid(pen_width, BLACK),
            gray_pen: Pen::solid(pen_width, GRAY),
            state: RenderState::Empty,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    fn pen_for(&self, node: &TreeNode) -> Pen {
        if node.is_known() {
            self.black_pen
        } else {
            self.gray_pen
        }
    }

    /// Vertical run at `midx` and the horizontal run into the parent box.
    fn parent_segments(&mut self, edge: &EdgeGeometry, parent: &TreeNode) {
        let pen = self.pen_for(parent);
        self.emf.with_pen(&pen, |emf| {
            emf.polyline(&[(edge.midx, edge.y0), (edge.midx, edge.y1), (edge.x1, edge.y1)]);
        });
    }

    /// Serialize the picture.
    pub fn finish(self) -> Option<RenderedImage> {
        if self.state.is_empty() {
            return None;
        }
        crate::log::debug!(
            nodes = self.state.node_count(),
            records = self.emf.records().len(),
            "finishing emf"
        );

        let (width, height) = (self.emf.width(), self.emf.height());
        Some(RenderedImage {
            data: ImageData::Emf(self.emf.finish()),
            mime_type: EMF_MIME_TYPE,
            width,
            height,
        })
    }
}

impl AncestorTreeVisitor for EmfTreeVisitor {
    fn visit_node(&mut self, node: &TreeNode) {
        let dpi = self.dpi;
        let textbox = node.textbox();

        let pen = self.pen_for(node);
        self.emf.with_pen(&pen, |emf| {
            emf.rectangle(
                textbox.x0().to_dpi(dpi),
                textbox.y0().to_dpi(dpi),
                textbox.x1().to_dpi(dpi),
                textbox.y1().to_dpi(dpi),
            );
        });

        self.emf.text_align(TextAlign::Center);
        self.emf.text_color(if node.is_known() { BLACK } else { GRAY });
        self.emf.with_font(textbox.font_size().to_dpi(dpi), DEFAULT_FONT_FACE, |emf| {
            for line in textbox.positioned_lines() {
                emf.text(line.x.to_dpi(dpi), line.y.to_dpi(dpi), line.text);
            }
        });

        self.state.record_node();
    }

    fn visit_mother_edge(&mut self, node: &TreeNode, parent: &TreeNode) {
        let edge = EdgeGeometry::new(node, parent).to_dpi(self.dpi);
        let pen = self.black_pen;
        self.emf.with_pen(&pen, |emf| {
            emf.polyline(&[(edge.x0, edge.y0), (edge.midx, edge.y0)]);
        });
        self.parent_segments(&edge, parent);
    }

    fn visit_father_edge(&mut self, node: &TreeNode, parent: &TreeNode) {
        let edge = EdgeGeometry::new(node, parent).to_dpi(self.dpi);
        self.parent_segments(&edge, parent);
    }
}
