//! SVG rendering of ancestor trees.

use super::{EdgeGeometry, ImageData, RenderState, RenderedImage, SVG_MIME_TYPE};
use crate::errors::RenderError;
use crate::size::{Size, Unit};
use crate::svg::{Anchor, Line, Rect, Svg, SvgNode, Text};
use crate::textbox::TextBox;
use crate::tree::{AncestorTreeVisitor, TreeNode};

const RECT_STYLE: &str = "fill:none;stroke-width:1pt;stroke:black";
const RECT_UNKNOWN_STYLE: &str = "fill:none;stroke-width:1pt;stroke:grey";
const LINE_STYLE: &str = "fill:none;stroke-width:0.5pt;stroke:black";
const LINE_UNKNOWN_STYLE: &str = "fill:none;stroke-width:0.5pt;stroke:grey";

/// CSS class of the text of known persons.
const LINK_CLASS: &str = "svglink";

/// Output options for [`SvgTreeVisitor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvgOptions {
    /// Units for every coordinate in the document.
    pub units: Unit,
    /// Emit the XML declaration and the SVG 1.1 doctype.
    pub full_xml: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            units: Unit::In,
            full_xml: true,
        }
    }
}

/// Visitor collecting SVG elements for every box and connector.
#[derive(Clone, Debug, Default)]
pub struct SvgTreeVisitor {
    options: SvgOptions,
    elements: Vec<SvgNode>,
    state: RenderState,
}

impl SvgTreeVisitor {
    pub fn new(options: SvgOptions) -> Self {
        SvgTreeVisitor {
            options,
            elements: Vec::new(),
            state: RenderState::Empty,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Elements collected so far.
    pub fn elements(&self) -> &[SvgNode] {
        &self.elements
    }

    fn line(&self, x1: Size, y1: Size, x2: Size, y2: Size, style: &str) -> SvgNode {
        let units = self.options.units;
        SvgNode::Line(Line {
            x1: x1.format(units),
            y1: y1.format(units),
            x2: x2.format(units),
            y2: y2.format(units),
            style: Some(style.to_string()),
        })
    }

    /// The two segments shared by both edges: up or down at `midx`, then
    /// across to the parent.
    fn parent_segments(&mut self, edge: &EdgeGeometry, parent: &TreeNode) {
        let style = if parent.is_known() {
            LINE_STYLE
        } else {
            LINE_UNKNOWN_STYLE
        };
        let vertical = self.line(edge.midx, edge.y0, edge.midx, edge.y1, style);
        let horizontal = self.line(edge.midx, edge.y1, edge.x1, edge.y1, style);
        self.elements.extend([vertical, horizontal]);
    }

    /// Wrap the collected elements into a document of the given size.
    ///
    /// `Ok(None)` when no node was visited.
    pub fn finish(self, width: Size, height: Size) -> Result<Option<RenderedImage>, RenderError> {
        if self.state.is_empty() {
            return Ok(None);
        }
        crate::log::debug!(
            nodes = self.state.node_count(),
            elements = self.elements.len(),
            "finishing svg"
        );

        let units = self.options.units;
        let mut svg = Svg::new(width.format(units), height.format(units));
        svg.children = self.elements;

        Ok(Some(RenderedImage {
            data: ImageData::Svg(svg.to_xml(self.options.full_xml)?),
            mime_type: SVG_MIME_TYPE,
            width,
            height,
        }))
    }
}

impl AncestorTreeVisitor for SvgTreeVisitor {
    fn visit_node(&mut self, node: &TreeNode) {
        let (class, style) = if node.is_known() {
            (Some(LINK_CLASS), RECT_STYLE)
        } else {
            (None, RECT_UNKNOWN_STYLE)
        };
        let elements = textbox_elements(node.textbox(), class, self.options.units, Some(style));
        self.elements.extend(elements);
        self.state.record_node();
    }

    fn visit_mother_edge(&mut self, node: &TreeNode, parent: &TreeNode) {
        let edge = EdgeGeometry::new(node, parent);
        // the stub leaving the child is always solid
        let stub = self.line(edge.x0, edge.y0, edge.midx, edge.y0, LINE_STYLE);
        self.elements.push(stub);
        self.parent_segments(&edge, parent);
    }

    fn visit_father_edge(&mut self, node: &TreeNode, parent: &TreeNode) {
        let edge = EdgeGeometry::new(node, parent);
        self.parent_segments(&edge, parent);
    }
}

/// SVG elements for a text box: its outline, then its text, wrapped in a
/// hyperlink when the box has one.
pub fn textbox_elements(
    textbox: &TextBox,
    text_class: Option<&str>,
    units: Unit,
    rect_style: Option<&str>,
) -> Vec<SvgNode> {
    let rect = SvgNode::Rect(Rect {
        x: textbox.x0().format(units),
        y: textbox.y0().format(units),
        width: textbox.width().format(units),
        height: textbox.height().format(units),
        style: rect_style.map(str::to_string),
    });

    let mut text = Text {
        font_size: Some(textbox.font_size().format(Unit::Pt)),
        text_anchor: Some("middle".to_string()),
        class: text_class.map(str::to_string),
        ..Text::default()
    };
    for line in textbox.positioned_lines() {
        text.push_span(line.x.format(units), line.y.format(units), line.text);
    }

    let text = match textbox.href() {
        Some(href) => SvgNode::A(Anchor {
            href: href.to_string(),
            children: vec![SvgNode::Text(text)],
        }),
        None => SvgNode::Text(text),
    };
    vec![rect, text]
}
