//! Tree visitors producing finished images.
//!
//! A renderer is fed by [`AncestorTree::visit`](crate::tree::AncestorTree::visit)
//! and turned into a [`RenderedImage`] by its `finish` method. `finish`
//! yields no image when no node was visited, which is what happens for an
//! empty tree.

mod emf;
mod svg;

use bytes::Bytes;
use enum_dispatch::enum_dispatch;

pub use emf::{BLACK, EmfOptions, EmfTreeVisitor, GRAY};
pub use svg::{SvgOptions, SvgTreeVisitor, textbox_elements};

use crate::errors::RenderError;
use crate::size::Size;
use crate::tree::{AncestorTreeVisitor, TreeNode};

pub const SVG_MIME_TYPE: &str = "image/svg+xml";
pub const EMF_MIME_TYPE: &str = "image/x-emf";

/// How much a renderer has accumulated so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderState {
    /// No node visited yet.
    #[default]
    Empty,
    /// Number of nodes visited.
    Accumulating(usize),
}

impl RenderState {
    fn record_node(&mut self) {
        *self = RenderState::Accumulating(self.node_count() + 1);
    }

    pub fn node_count(self) -> usize {
        match self {
            RenderState::Empty => 0,
            RenderState::Accumulating(count) => count,
        }
    }

    pub fn is_empty(self) -> bool {
        self == RenderState::Empty
    }
}

/// Encoded image content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageData {
    Svg(String),
    Emf(Bytes),
}

impl ImageData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ImageData::Svg(xml) => xml.as_bytes(),
            ImageData::Emf(data) => data,
        }
    }
}

/// A finished image with its MIME type and physical size.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedImage {
    pub data: ImageData,
    pub mime_type: &'static str,
    pub width: Size,
    pub height: Size,
}

impl RenderedImage {
    pub fn as_svg(&self) -> Option<&str> {
        match &self.data {
            ImageData::Svg(xml) => Some(xml),
            ImageData::Emf(_) => None,
        }
    }

    pub fn as_emf(&self) -> Option<&Bytes> {
        match &self.data {
            ImageData::Emf(data) => Some(data),
            ImageData::Svg(_) => None,
        }
    }
}

/// Either renderer, dispatched statically.
#[enum_dispatch(AncestorTreeVisitor)]
#[derive(Clone, Debug)]
pub enum TreeRenderer {
    Svg(SvgTreeVisitor),
    Emf(EmfTreeVisitor),
}

impl TreeRenderer {
    pub fn svg(options: SvgOptions) -> Self {
        TreeRenderer::Svg(SvgTreeVisitor::new(options))
    }

    pub fn emf(width: Size, height: Size, options: EmfOptions) -> Self {
        TreeRenderer::Emf(EmfTreeVisitor::new(width, height, options.dpi))
    }

    pub fn state(&self) -> RenderState {
        match self {
            TreeRenderer::Svg(visitor) => visitor.state(),
            TreeRenderer::Emf(visitor) => visitor.state(),
        }
    }

    /// Produce the image. `width` and `height` size the SVG document; the
    /// EMF renderer uses the size it was created with.
    pub fn finish(self, width: Size, height: Size) -> Result<Option<RenderedImage>, RenderError> {
        match self {
            TreeRenderer::Svg(visitor) => visitor.finish(width, height),
            TreeRenderer::Emf(visitor) => Ok(visitor.finish()),
        }
    }
}

/// Edge end points: the child's right side to the parent's left side, both
/// at mid height, with the vertical run halfway between them.
struct EdgeGeometry {
    x0: Size,
    y0: Size,
    x1: Size,
    y1: Size,
    midx: Size,
}

impl EdgeGeometry {
    fn new(node: &TreeNode, parent: &TreeNode) -> Self {
        let x0 = node.textbox().x1();
        let x1 = parent.textbox().x0();
        EdgeGeometry {
            x0,
            y0: node.textbox().midy(),
            x1,
            y1: parent.textbox().midy(),
            midx: (x0 + x1) / 2.0,
        }
    }

    fn to_dpi(&self, dpi: f64) -> Self {
        EdgeGeometry {
            x0: self.x0.to_dpi(dpi),
            y0: self.y0.to_dpi(dpi),
            x1: self.x1.to_dpi(dpi),
            y1: self.y1.to_dpi(dpi),
            midx: self.midx.to_dpi(dpi),
        }
    }
}
