//! Ancestor pedigree diagrams.
//!
//! A person with linked parents is laid out as a tree of text boxes
//! ([`AncestorTree`]) which is then walked by a renderer producing either an
//! SVG document or an Enhanced Metafile.
//!
//! ```
//! use pedtree::{Name, Person, SvgOptions, TreeOptions};
//!
//! let person = Person::new("@I1@", Name::new("John", "Smith"))
//!     .with_mother(Person::new("@I2@", Name::new("Jane", "Smith")));
//! let image = pedtree::render_svg(&person, &TreeOptions::default(), &SvgOptions::default())?
//!     .expect("two generations make a tree");
//! assert_eq!(image.mime_type, "image/svg+xml");
//! # Ok::<(), pedtree::RenderError>(())
//! ```

pub mod errors;
pub mod log;

pub mod size;
pub mod textbox;

pub mod person;
pub mod tree;

pub mod emf;
pub mod svg;

pub mod render;

pub use errors::{RenderError, SizeError};
pub use person::{Individual, Name, Person, Sex};
pub use render::{
    EmfOptions, EmfTreeVisitor, ImageData, RenderState, RenderedImage, SvgOptions, SvgTreeVisitor,
    TreeRenderer,
};
pub use size::{IntoSize, Size, SizeParser, Unit};
pub use textbox::{TextBox, TextStyle};
pub use tree::{AncestorTree, AncestorTreeVisitor, TreeNode, TreeOptions};

/// Lay out the ancestors of `person` and render them as SVG.
///
/// Returns `Ok(None)` when there are fewer than two known generations.
pub fn render_svg<P: Individual>(
    person: &P,
    tree_options: &TreeOptions,
    svg_options: &SvgOptions,
) -> Result<Option<RenderedImage>, RenderError> {
    let tree = AncestorTree::new(person, tree_options);
    let mut visitor = SvgTreeVisitor::new(*svg_options);
    tree.visit(&mut visitor);
    visitor.finish(tree.width(), tree.height())
}

/// Lay out the ancestors of `person` and render them as an EMF picture.
///
/// Returns `None` when there are fewer than two known generations.
pub fn render_emf<P: Individual>(
    person: &P,
    tree_options: &TreeOptions,
    emf_options: &EmfOptions,
) -> Option<RenderedImage> {
    let tree = AncestorTree::new(person, tree_options);
    let mut visitor = EmfTreeVisitor::new(tree.width(), tree.height(), emf_options.dpi);
    tree.visit(&mut visitor);
    visitor.finish()
}
