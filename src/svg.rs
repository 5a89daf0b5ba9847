//! Facet-derived SVG node types for the tree renderer.
//!
//! Only the handful of elements a pedigree needs are modelled. Attributes
//! carry unit-suffixed strings (`"1.5in"`, `"10pt"`), so no float formatting
//! happens at serialization time.

use facet::Facet;
use facet_xml as xml;

use crate::errors::RenderError;

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace URI, used for hyperlinks
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

const PROLOG: &str = concat!(
    "<?xml version=\"1.0\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
);

/// Root SVG element
#[derive(Facet, Debug, Clone, PartialEq)]
#[facet(rename = "svg")]
pub struct Svg {
    #[facet(xml::attribute)]
    pub width: String,
    #[facet(xml::attribute)]
    pub height: String,
    #[facet(xml::attribute)]
    pub version: String,
    #[facet(xml::attribute)]
    pub xmlns: String,
    #[facet(xml::attribute, rename = "xmlns:xlink")]
    pub xmlns_xlink: String,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// Any element that may appear inside `<svg>` or `<a>`
#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
pub enum SvgNode {
    #[facet(rename = "rect")]
    Rect(Rect),
    #[facet(rename = "line")]
    Line(Line),
    #[facet(rename = "text")]
    Text(Text),
    #[facet(rename = "a")]
    A(Anchor),
}

/// SVG rect element (`<rect>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct Rect {
    #[facet(xml::attribute)]
    pub x: String,
    #[facet(xml::attribute)]
    pub y: String,
    #[facet(xml::attribute)]
    pub width: String,
    #[facet(xml::attribute)]
    pub height: String,
    #[facet(xml::attribute)]
    pub style: Option<String>,
}

/// SVG line element (`<line>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct Line {
    #[facet(xml::attribute)]
    pub x1: String,
    #[facet(xml::attribute)]
    pub y1: String,
    #[facet(xml::attribute)]
    pub x2: String,
    #[facet(xml::attribute)]
    pub y2: String,
    #[facet(xml::attribute)]
    pub style: Option<String>,
}

/// SVG text element (`<text>`), one `<tspan>` per line
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct Text {
    #[facet(xml::attribute, rename = "font-size")]
    pub font_size: Option<String>,
    #[facet(xml::attribute, rename = "text-anchor")]
    pub text_anchor: Option<String>,
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::elements)]
    pub spans: Vec<TextNode>,
}

/// Children of `<text>`
#[derive(Facet, Debug, Clone, PartialEq)]
#[repr(u8)]
pub enum TextNode {
    #[facet(rename = "tspan")]
    TSpan(TSpan),
}

/// SVG tspan element (`<tspan>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct TSpan {
    #[facet(xml::attribute)]
    pub x: String,
    #[facet(xml::attribute)]
    pub y: String,
    #[facet(xml::text)]
    pub content: String,
}

/// SVG hyperlink element (`<a>`)
#[derive(Facet, Debug, Clone, Default, PartialEq)]
pub struct Anchor {
    #[facet(xml::attribute, rename = "xlink:href")]
    pub href: String,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

impl SvgNode {
    /// Element name as written to the document.
    pub fn tag(&self) -> &'static str {
        match self {
            SvgNode::Rect(_) => "rect",
            SvgNode::Line(_) => "line",
            SvgNode::Text(_) => "text",
            SvgNode::A(_) => "a",
        }
    }

    /// The `style` attribute of shapes.
    pub fn style(&self) -> Option<&str> {
        match self {
            SvgNode::Rect(rect) => rect.style.as_deref(),
            SvgNode::Line(line) => line.style.as_deref(),
            SvgNode::Text(_) | SvgNode::A(_) => None,
        }
    }
}

impl Text {
    pub fn push_span(&mut self, x: String, y: String, content: impl Into<String>) {
        self.spans.push(TextNode::TSpan(TSpan {
            x,
            y,
            content: content.into(),
        }));
    }

    /// Lines of text, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(|TextNode::TSpan(span)| span.content.as_str())
    }
}

impl Svg {
    /// Empty document of the given width and height.
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Svg {
            width: width.into(),
            height: height.into(),
            version: "1.1".to_string(),
            xmlns: SVG_NS.to_string(),
            xmlns_xlink: XLINK_NS.to_string(),
            children: Vec::new(),
        }
    }

    /// Serialize, optionally preceded by the XML declaration and SVG 1.1
    /// doctype.
    pub fn to_xml(&self, full_xml: bool) -> Result<String, RenderError> {
        let body = facet_xml::to_string(self).map_err(|e| RenderError::Serialize {
            message: e.to_string(),
        })?;
        if full_xml {
            Ok(format!("{PROLOG}{body}"))
        } else {
            Ok(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(style: Option<&str>) -> Rect {
        Rect {
            x: "0in".into(),
            y: "0in".into(),
            width: "1in".into(),
            height: "1in".into(),
            style: style.map(str::to_string),
        }
    }

    fn parse(xml: &str) -> roxmltree::Document<'_> {
        roxmltree::Document::parse(xml).unwrap()
    }

    #[test]
    fn document_root_and_namespaces() {
        let mut svg = Svg::new("2in", "1in");
        svg.children.push(SvgNode::Rect(rect(Some("fill:none"))));
        let xml = svg.to_xml(false).unwrap();
        assert!(xml.trim_start().starts_with("<svg"));

        let doc = parse(&xml);
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.tag_name().namespace(), Some(SVG_NS));
        assert_eq!(root.attribute("width"), Some("2in"));
        assert_eq!(root.attribute("height"), Some("1in"));
        assert_eq!(root.attribute("version"), Some("1.1"));

        let children: Vec<_> = root.children().filter(|n| n.is_element()).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].tag_name().name(), "rect");
        assert_eq!(children[0].attribute("style"), Some("fill:none"));
    }

    #[test]
    fn missing_style_is_omitted() {
        let mut svg = Svg::new("1in", "1in");
        svg.children.push(SvgNode::Rect(rect(None)));
        let xml = svg.to_xml(false).unwrap();
        let doc = parse(&xml);
        let rect = doc.descendants().find(|n| n.has_tag_name("rect")).unwrap();
        assert_eq!(rect.attribute("width"), Some("1in"));
        assert!(!rect.has_attribute("style"));
    }

    #[test]
    fn prolog_only_when_requested() {
        let svg = Svg::new("1in", "1in");
        let bare = svg.to_xml(false).unwrap();
        let full = svg.to_xml(true).unwrap();
        assert!(!bare.contains("<!DOCTYPE"));
        assert!(full.starts_with("<?xml version=\"1.0\" standalone=\"no\"?>\n<!DOCTYPE svg"));
        assert!(full.ends_with(&bare));
    }

    #[test]
    fn hyperlinked_text() {
        let mut text = Text {
            font_size: Some("10pt".into()),
            text_anchor: Some("middle".into()),
            class: Some("svglink".into()),
            ..Text::default()
        };
        text.push_span("1in".into(), "2in".into(), "John");
        text.push_span("1in".into(), "2.5in".into(), "Smith");
        assert_eq!(text.lines().collect::<Vec<_>>(), ["John", "Smith"]);

        let mut svg = Svg::new("3in", "3in");
        svg.children.push(SvgNode::A(Anchor {
            href: "#person.I1".into(),
            children: vec![SvgNode::Text(text)],
        }));
        let xml = svg.to_xml(false).unwrap();

        let doc = parse(&xml);
        let link = doc.descendants().find(|n| n.has_tag_name("a")).unwrap();
        assert_eq!(link.attribute((XLINK_NS, "href")), Some("#person.I1"));
        let text = link.children().find(|n| n.has_tag_name("text")).unwrap();
        assert_eq!(text.attribute("font-size"), Some("10pt"));
        assert_eq!(text.attribute("text-anchor"), Some("middle"));
        assert_eq!(text.attribute("class"), Some("svglink"));
        let spans: Vec<_> = text
            .children()
            .filter(|n| n.has_tag_name("tspan"))
            .map(|n| (n.attribute("y").unwrap(), n.text().unwrap().trim()))
            .collect();
        assert_eq!(spans, [("2in", "John"), ("2.5in", "Smith")]);
    }

    #[test]
    fn escapes_markup() {
        let mut text = Text::default();
        text.push_span("0".into(), "0".into(), "Tom & <Jerry>");
        let mut svg = Svg::new("1in", "1in");
        svg.children.push(SvgNode::Text(text));
        let xml = svg.to_xml(false).unwrap();
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&lt;Jerry"));

        let doc = parse(&xml);
        let span = doc.descendants().find(|n| n.has_tag_name("tspan")).unwrap();
        assert_eq!(span.text().map(str::trim), Some("Tom & <Jerry>"));
    }

    #[test]
    fn node_accessors() {
        let node = SvgNode::Rect(rect(Some("fill:none")));
        assert_eq!(node.tag(), "rect");
        assert_eq!(node.style(), Some("fill:none"));
        let node = SvgNode::Text(Text::default());
        assert_eq!(node.tag(), "text");
        assert_eq!(node.style(), None);
    }
}
