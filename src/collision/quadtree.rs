use log::trace;

use crate::{
    config::IndexConfig,
    core::{Bounds, Quadrant, SpatialObject},
    error::{CollisionError, Result},
};

/// One node of a [`QuadTree`].
///
/// A node is a leaf while `children` is empty and holds exactly four children once it has
/// subdivided. Internal nodes keep the residual elements that fit in none of their children.
#[derive(Debug, Clone)]
pub struct QuadNode<T> {
    bounds: Bounds,
    depth: usize,
    elements: Vec<T>,
    children: Vec<QuadNode<T>>,
}

impl<T> QuadNode<T> {
    fn new(bounds: Bounds, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            elements: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Distance from the root, which is depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Elements stored at this node. For an internal node these are the straddling residuals.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Either empty or the four quadrants in [`Quadrant::ALL`] order.
    pub fn children(&self) -> &[QuadNode<T>] {
        &self.children
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode<T>> {
        self.children.get(quadrant.index())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn clear(&mut self) {
        for child in &mut self.children {
            child.clear();
        }
        self.elements.clear();
        self.children.clear();
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a QuadNode<T>)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

impl<T: SpatialObject> QuadNode<T> {
    fn containing_child(&self, object: &T) -> Option<usize> {
        self.children
            .iter()
            .position(|child| object.lies_within(&child.bounds))
    }

    fn insert(&mut self, object: T, config: &IndexConfig, min_extent: f64) {
        if self.is_leaf() {
            self.elements.push(object);
            self.subdivide_if_at_capacity(config, min_extent);
            return;
        }

        match self.containing_child(&object) {
            Some(index) => self.children[index].insert(object, config, min_extent),
            None => self.elements.push(object),
        }
    }

    /// A node whose quadrants would be no wider than `min_extent` behaves like one at
    /// `max_depth`: it keeps every element, however many.
    fn subdivide_if_at_capacity(&mut self, config: &IndexConfig, min_extent: f64) {
        if !self.is_leaf()
            || self.elements.len() < config.max_capacity
            || self.depth >= config.max_depth
            || !self.bounds.can_split(min_extent)
        {
            return;
        }

        trace!(
            "subdividing node {} at depth {} ({} elements)",
            self.bounds,
            self.depth,
            self.elements.len()
        );

        let depth = self.depth + 1;
        self.children = self
            .bounds
            .quadrants()
            .into_iter()
            .map(|bounds| QuadNode::new(bounds, depth))
            .collect();

        for element in std::mem::take(&mut self.elements) {
            match self.containing_child(&element) {
                Some(index) => self.children[index].insert(element, config, min_extent),
                None => self.elements.push(element),
            }
        }
    }

    fn collect_candidates<'a>(&'a self, footprint: &Bounds, out: &mut Vec<&'a T>) {
        // Every child the footprint touches is visited, not only one that contains it, so
        // bodies that straddle a split line or are flush against it from opposite sides
        // still see each other.
        for child in &self.children {
            if child.bounds.intersects(footprint) {
                child.collect_candidates(footprint, out);
            }
        }
        out.extend(self.elements.iter());
    }
}

/// Adaptive region quadtree over objects exposing a footprint.
///
/// The tree is meant to be torn down with [`QuadTree::destroy`] and refilled whenever the
/// objects move; there is no per-object update or removal.
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    root: QuadNode<T>,
    config: IndexConfig,
    len: usize,
}

impl<T: SpatialObject> QuadTree<T> {
    pub fn new(bounds: Bounds, config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: QuadNode::new(bounds, 0),
            config,
            len: 0,
        })
    }

    /// Stores `object` in the deepest node whose bounds contain its whole footprint.
    ///
    /// Fails with [`CollisionError::OutOfBounds`] if the footprint is not inside the root
    /// bounds; the object is never silently dropped.
    pub fn insert(&mut self, object: T) -> Result<()> {
        if !object.lies_within(&self.root.bounds) {
            return Err(CollisionError::OutOfBounds {
                position: object.position().to_vec(),
                bounds: self.root.bounds.to_string(),
            });
        }
        let min_extent = self.min_split_extent();
        self.root.insert(object, &self.config, min_extent);
        self.len += 1;
        Ok(())
    }

    /// Quadrants narrower than this are below float resolution at the root's scale, so
    /// depth stays bounded even with `usize::MAX` as `max_depth`.
    fn min_split_extent(&self) -> f64 {
        let root = &self.root.bounds;
        root.width().max(root.height()) * f64::EPSILON
    }

    /// Every stored object that could overlap `object`.
    ///
    /// The result is a superset of the true collisions: it may contain objects that do not
    /// collide, and contains `object` itself if it is stored in the tree.
    pub fn query_candidates<Q: SpatialObject>(&self, object: &Q) -> Vec<&T> {
        let mut out = Vec::new();
        self.query_candidates_into(object, &mut out);
        out
    }

    /// Like [`QuadTree::query_candidates`], appending into a reusable buffer.
    pub fn query_candidates_into<'a, Q: SpatialObject>(&'a self, object: &Q, out: &mut Vec<&'a T>) {
        self.root.collect_candidates(&object.footprint(), out);
    }

    /// Drops every element and child, leaving a single empty root leaf.
    pub fn destroy(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// Replaces the subdivision policy. The tree is destroyed.
    pub fn set_config(&mut self, config: IndexConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.destroy();
        Ok(())
    }

    /// Replaces the root bounds. The tree is destroyed.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.root = QuadNode::new(bounds, 0);
        self.len = 0;
    }
}

impl<T> QuadTree<T> {
    pub fn root(&self) -> &QuadNode<T> {
        &self.root
    }

    pub fn bounds(&self) -> &Bounds {
        &self.root.bounds
    }

    pub fn children(&self) -> &[QuadNode<T>] {
        &self.root.children
    }

    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Visits every node in pre-order, parents before their children.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a QuadNode<T>)) {
        self.root.walk(&mut visit);
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(|_| count += 1);
        count
    }

    /// Depth of the deepest node.
    pub fn height(&self) -> usize {
        let mut height = 0;
        self.walk(|node| height = height.max(node.depth));
        height
    }

    /// Every stored object, in pre-order node order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut nodes = Vec::new();
        self.walk(|node| nodes.push(node));
        nodes.into_iter().flat_map(|node| node.elements.iter())
    }
}
