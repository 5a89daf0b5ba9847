//! Ancestor tree layout.
//!
//! The subject of the tree is the root (generation 0) on the left, parents
//! are one column to the right, mother above father. Every parent pair is
//! stacked vertically with a fixed gap and the child is centered between
//! them. After that every column is widened to its widest box.

use enum_dispatch::enum_dispatch;

use crate::person::Individual;
use crate::size::Size;
use crate::textbox::{TextBox, TextStyle};

/// Vertical gap between the mother and father sub-trees.
pub const VERTICAL_GAP: Size = Size::points(2.0);

/// Blank space around the whole drawing.
const MARGIN: Size = Size::points(2.0);

/// Layout parameters of an [`AncestorTree`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeOptions {
    /// Maximum number of generations to draw, the subject included.
    pub max_generations: usize,
    /// Nominal width of the drawing.
    pub width: Size,
    /// Horizontal distance between generation columns.
    pub generation_gap: Size,
    pub font_size: Size,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            max_generations: 4,
            width: Size::inches(5.0),
            generation_gap: Size::points(12.0),
            font_size: Size::points(10.0),
        }
    }
}

/// Sizing shared by all nodes of one tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
    /// Nominal box width.
    pub box_width: Size,
    /// Width a box may grow to when that saves lines.
    pub max_box_width: Size,
    pub font_size: Size,
    pub generation_gap: Size,
}

/// What a node remembers about its person.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodePerson {
    pub xref_id: String,
}

impl NodePerson {
    fn from_individual(person: &impl Individual) -> Self {
        NodePerson {
            xref_id: person.xref_id().to_string(),
        }
    }

    /// Fragment link to the person's record.
    pub fn href(&self) -> String {
        format!("#person.{}", self.xref_id)
    }
}

/// Both parent nodes of a [`TreeNode`].
#[derive(Clone, Debug, PartialEq)]
pub struct Parents {
    pub mother: TreeNode,
    pub father: TreeNode,
}

/// A box in the tree, with its parents' sub-trees.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    person: Option<NodePerson>,
    generation: usize,
    parents: Option<Box<Parents>>,
    textbox: TextBox,
    name: String,
}

impl TreeNode {
    /// Build a node for `person` (unknown when `None`).
    ///
    /// Parents come in pairs: a node given only one of them gets none.
    pub fn new<P: Individual>(
        person: Option<&P>,
        generation: usize,
        mother: Option<TreeNode>,
        father: Option<TreeNode>,
        geometry: &NodeGeometry,
    ) -> Self {
        let name = match person {
            None => "?".to_string(),
            Some(person) if generation == 0 => person.name().subject_label(),
            Some(person) => person.name().ancestor_label(),
        };

        let parents = match (mother, father) {
            (Some(mother), Some(father)) => Some(Box::new(Parents { mother, father })),
            (None, None) => None,
            _ => {
                crate::log::debug!(name = %name, generation, "dropping lone parent node");
                None
            }
        };

        let person = person.map(NodePerson::from_individual);
        let style = TextStyle {
            font_size: geometry.font_size,
            ..TextStyle::default()
        };
        let x0 = generation as f64 * (geometry.generation_gap + geometry.box_width);
        let mut textbox = TextBox::new(name.as_str(), geometry.box_width, style)
            .with_max_width(geometry.max_box_width)
            .at(x0, Size::ZERO);
        if let Some(person) = &person {
            textbox = textbox.with_href(person.href());
        }

        let mut node = TreeNode {
            person,
            generation,
            parents,
            textbox,
            name,
        };
        node.set_y0(Size::ZERO);
        node
    }

    /// The person in this box, `None` for an unknown ancestor.
    pub fn person(&self) -> Option<&NodePerson> {
        self.person.as_ref()
    }

    pub fn is_known(&self) -> bool {
        self.person.is_some()
    }

    /// Generation number, 0 for the tree root.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Displayed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn textbox(&self) -> &TextBox {
        &self.textbox
    }

    pub fn parents(&self) -> Option<&Parents> {
        self.parents.as_deref()
    }

    pub fn mother(&self) -> Option<&TreeNode> {
        self.parents().map(|parents| &parents.mother)
    }

    pub fn father(&self) -> Option<&TreeNode> {
        self.parents().map(|parents| &parents.father)
    }

    /// Height of this node together with all its ancestors.
    pub fn subtree_height(&self) -> Size {
        let stacked = match self.parents() {
            Some(Parents { mother, father }) => {
                mother.subtree_height() + father.subtree_height() + VERTICAL_GAP
            }
            None => Size::ZERO,
        };
        stacked.max(self.textbox.height())
    }

    /// Move the sub-tree vertically so that its topmost box starts at `y0`.
    pub fn set_y0(&mut self, y0: Size) {
        match self.parents.as_deref_mut() {
            Some(Parents { mother, father }) => {
                mother.set_y0(y0);
                father.set_y0(y0 + VERTICAL_GAP + mother.subtree_height());
                let (m, f) = (&mother.textbox, &father.textbox);
                // average of the four parent box edges, kept in one expression
                let top = (2.0 * m.y0() + m.height() + 2.0 * f.y0() + f.height()
                    - 2.0 * self.textbox.height())
                    / 4.0;
                self.textbox.set_y0(top);
            }
            None => self.textbox.set_y0(y0),
        }
    }

    /// Pre-order iterator over this node and its ancestors.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }

    fn for_each_mut(&mut self, f: &mut impl FnMut(&mut TreeNode)) {
        f(self);
        if let Some(parents) = self.parents.as_deref_mut() {
            parents.mother.for_each_mut(f);
            parents.father.for_each_mut(f);
        }
    }
}

/// Iterator returned by [`TreeNode::nodes`] and [`AncestorTree::nodes`].
pub struct Nodes<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<&'a TreeNode> {
        let node = self.stack.pop()?;
        if let Some(parents) = node.parents() {
            self.stack.push(&parents.father);
            self.stack.push(&parents.mother);
        }
        Some(node)
    }
}

/// Callbacks fired by [`AncestorTree::visit`].
///
/// Both nodes of an edge are visited before the edge itself.
#[enum_dispatch]
pub trait AncestorTreeVisitor {
    fn visit_node(&mut self, node: &TreeNode);
    fn visit_mother_edge(&mut self, node: &TreeNode, parent: &TreeNode);
    fn visit_father_edge(&mut self, node: &TreeNode, parent: &TreeNode);
}

/// Laid-out tree of a person's ancestors.
#[derive(Clone, Debug, PartialEq)]
pub struct AncestorTree {
    root: Option<TreeNode>,
    generations: usize,
    width: Size,
    height: Size,
}

impl AncestorTree {
    /// Lay out the ancestors of `person`.
    ///
    /// With fewer than two known generations the tree is empty.
    pub fn new<P: Individual>(person: &P, options: &TreeOptions) -> Self {
        let ngen = generation_depth(Some(person), options.max_generations);
        crate::log::debug!(
            ngen,
            max_generations = options.max_generations,
            "ancestor tree depth"
        );
        if ngen < 2 {
            return AncestorTree::empty();
        }

        let max_gen = options.max_generations as f64;
        let gap = options.generation_gap;
        let geometry = NodeGeometry {
            box_width: (options.width - (max_gen - 1.0) * gap - 2.0 * MARGIN) / max_gen,
            max_box_width: (options.width - (ngen as f64 - 1.0) * gap - 2.0 * MARGIN)
                / ngen as f64,
            font_size: options.font_size,
            generation_gap: gap,
        };
        crate::log::debug!(
            box_width_pt = geometry.box_width.pt(),
            max_box_width_pt = geometry.max_box_width.pt(),
            "ancestor tree box widths"
        );

        let Some(mut root) = make_tree(Some(person), 0, ngen, &geometry) else {
            return AncestorTree::empty();
        };

        let height = root.subtree_height() + 2.0 * MARGIN;
        root.set_y0(MARGIN);

        let mut x = MARGIN;
        for generation in 0..ngen {
            let widest = root
                .nodes()
                .filter(|node| node.generation == generation)
                .map(|node| node.textbox.width())
                .reduce(Size::max)
                .unwrap_or(Size::ZERO);
            root.for_each_mut(&mut |node: &mut TreeNode| {
                if node.generation == generation {
                    node.textbox.set_width(widest);
                    node.textbox.set_x0(x);
                }
            });
            crate::log::debug!(generation, x_pt = x.pt(), width_pt = widest.pt(), "generation column");
            x += widest + gap;
        }
        x -= gap;
        x += MARGIN;

        crate::log::debug!(width_pt = x.pt(), height_pt = height.pt(), "ancestor tree size");
        AncestorTree {
            root: Some(root),
            generations: ngen,
            width: x,
            height,
        }
    }

    fn empty() -> Self {
        AncestorTree {
            root: None,
            generations: 0,
            width: Size::ZERO,
            height: Size::ZERO,
        }
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Full width of the drawing.
    pub fn width(&self) -> Size {
        self.width
    }

    /// Full height of the drawing.
    pub fn height(&self) -> Size {
        self.height
    }

    /// Number of generations drawn, zero for an empty tree.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Pre-order iterator over all nodes, mothers before fathers.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.root.iter().collect(),
        }
    }

    /// Walk every node and edge of the tree.
    ///
    /// A node is reported first, then its mother's sub-tree followed by the
    /// mother edge, then the father's sub-tree followed by the father edge.
    pub fn visit<V: AncestorTreeVisitor + ?Sized>(&self, visitor: &mut V) {
        if let Some(root) = &self.root {
            walk(root, visitor);
        }
    }
}

fn walk<V: AncestorTreeVisitor + ?Sized>(node: &TreeNode, visitor: &mut V) {
    visitor.visit_node(node);
    if let Some(Parents { mother, father }) = node.parents() {
        walk(mother, visitor);
        visitor.visit_mother_edge(node, mother);
        walk(father, visitor);
        visitor.visit_father_edge(node, father);
    }
}

/// Number of known generations starting at `person`, at most `limit`.
pub fn generation_depth<P: Individual>(person: Option<&P>, limit: usize) -> usize {
    match person {
        Some(person) if limit > 0 => {
            let mother = generation_depth(person.mother(), limit - 1);
            let father = generation_depth(person.father(), limit - 1);
            mother.max(father) + 1
        }
        _ => 0,
    }
}

fn make_tree<P: Individual>(
    person: Option<&P>,
    generation: usize,
    ngen: usize,
    geometry: &NodeGeometry,
) -> Option<TreeNode> {
    if generation >= ngen {
        return None;
    }
    let (mother, father) = match person {
        Some(person) if person.mother().is_some() || person.father().is_some() => (
            make_tree(person.mother(), generation + 1, ngen, geometry),
            make_tree(person.father(), generation + 1, ngen, geometry),
        ),
        _ => (None, None),
    };
    Some(TreeNode::new(person, generation, mother, father, geometry))
}
