//! Quadtree broad phase
//!
//! Rebuilt from scratch every frame. Each item lives at the deepest node whose
//! single child quadrant cannot hold it entirely, so a query only has to walk
//! from the root down to the querying box's own node.
//!
//! Quadrants are numbered as below:
//!
//! ```text
//!      |
//!   1  |  0
//!  ----+----
//!   2  |  3
//!      |
//! ```
//!
//! Items lying exactly on a midline belong to neither side and stay at the
//! parent. Items in sibling subtrees are never compared with each other; they
//! are strictly separated by a midline so they cannot overlap.

use thiserror::Error;

use super::rect::Rect;

/// Items held by a node before it splits
pub const MAX_OBJECTS: usize = 10;
/// Depth at which nodes stop splitting
pub const MAX_LEVELS: u32 = 5;

/// Errors raised for malformed boxes
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadTreeError {
    #[error(
        "rectangle must be finite with non-negative size (x: {x}, y: {y}, width: {width}, height: {height})"
    )]
    InvalidRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

pub type QuadTreeResult<T> = Result<T, QuadTreeError>;

fn check(rect: &Rect) -> QuadTreeResult<()> {
    if rect.is_valid() {
        Ok(())
    } else {
        Err(QuadTreeError::InvalidRect {
            x: rect.x(),
            y: rect.y(),
            width: rect.width(),
            height: rect.height(),
        })
    }
}

/// Anything with a bounding box
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Child quadrant of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NorthEast = 0,
    NorthWest = 1,
    SouthWest = 2,
    SouthEast = 3,
}

#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    bounds: Rect,
    level: u32,
    objects: Vec<T>,
    nodes: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T: Bounded + Clone> QuadTree<T> {
    /// Root node covering `bounds`
    pub fn new(bounds: Rect) -> QuadTreeResult<Self> {
        check(&bounds)?;
        Ok(Self::node(bounds, 0))
    }

    fn node(bounds: Rect, level: u32) -> Self {
        Self {
            bounds,
            level,
            objects: Vec::new(),
            nodes: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Remove every item and drop all children
    pub fn clear(&mut self) {
        self.objects.clear();
        if let Some(nodes) = self.nodes.as_deref_mut() {
            for node in nodes.iter_mut() {
                node.clear();
            }
        }
        self.nodes = None;
    }

    pub fn insert(&mut self, item: T) -> QuadTreeResult<()> {
        check(&item.bounds())?;
        self.insert_unchecked(item);
        Ok(())
    }

    fn insert_unchecked(&mut self, item: T) {
        if let Some(nodes) = self.nodes.as_deref_mut() {
            if let Some(quadrant) = quadrant_of(&self.bounds, &item.bounds()) {
                nodes[quadrant as usize].insert_unchecked(item);
                return;
            }
        }

        self.objects.push(item);

        if self.objects.len() > MAX_OBJECTS && self.level < MAX_LEVELS {
            if self.nodes.is_none() {
                self.split();
            }
            self.push_down();
        }
    }

    /// Move every held item that fits a single child into that child
    fn push_down(&mut self) {
        let Some(nodes) = self.nodes.as_deref_mut() else {
            return;
        };
        let mut i = 0;
        while i < self.objects.len() {
            match quadrant_of(&self.bounds, &self.objects[i].bounds()) {
                Some(quadrant) => {
                    let item = self.objects.remove(i);
                    nodes[quadrant as usize].insert_unchecked(item);
                }
                None => i += 1,
            }
        }
    }

    fn split(&mut self) {
        let half = self.bounds.size * 0.5;
        let Rect { pos, .. } = self.bounds;
        let level = self.level + 1;
        self.nodes = Some(Box::new([
            Self::node(Rect::new(pos.x + half.x, pos.y, half.x, half.y), level),
            Self::node(Rect::new(pos.x, pos.y, half.x, half.y), level),
            Self::node(Rect::new(pos.x, pos.y + half.y, half.x, half.y), level),
            Self::node(Rect::new(pos.x + half.x, pos.y + half.y, half.x, half.y), level),
        ]));
    }

    /// Append every item that might collide with `rect`: the items stored on
    /// the path from the root down to the node `rect` itself resolves to.
    pub fn query(&self, rect: &Rect, out: &mut Vec<T>) -> QuadTreeResult<()> {
        check(rect)?;
        self.query_unchecked(rect, out);
        Ok(())
    }

    fn query_unchecked(&self, rect: &Rect, out: &mut Vec<T>) {
        if let Some(nodes) = self.nodes.as_deref() {
            if let Some(quadrant) = quadrant_of(&self.bounds, rect) {
                nodes[quadrant as usize].query_unchecked(rect, out);
            }
        }
        out.extend(self.objects.iter().cloned());
    }

    /// Append every item in the tree
    pub fn collect_all(&self, out: &mut Vec<T>) {
        if let Some(nodes) = self.nodes.as_deref() {
            for node in nodes.iter() {
                node.collect_all(out);
            }
        }
        out.extend(self.objects.iter().cloned());
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        let below = self
            .nodes
            .as_deref()
            .map(|nodes| nodes.iter().map(|n| n.len()).sum())
            .unwrap_or(0);
        self.objects.len() + below
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels below this node, counting itself
    pub fn depth(&self) -> u32 {
        1 + self
            .nodes
            .as_deref()
            .map(|nodes| nodes.iter().map(|n| n.depth()).max().unwrap_or(0))
            .unwrap_or(0)
    }
}

/// Which child of a node with `bounds` fully contains `rect`, if any.
///
/// A box fits a side only when both of its edges lie strictly on that side of
/// the midline and inside the node's own bound.
pub fn quadrant_of(bounds: &Rect, rect: &Rect) -> Option<Quadrant> {
    let mid_x = bounds.x() + bounds.width() / 2.0;
    let mid_y = bounds.y() + bounds.height() / 2.0;

    let top = rect.y() >= bounds.y() && rect.bottom() < mid_y;
    let bottom = rect.y() > mid_y && rect.bottom() <= bounds.bottom();
    let left = rect.x() >= bounds.x() && rect.right() < mid_x;
    let right = rect.x() > mid_x && rect.right() <= bounds.right();

    match (left, right, top, bottom) {
        (true, _, true, _) => Some(Quadrant::NorthWest),
        (true, _, _, true) => Some(Quadrant::SouthWest),
        (_, true, true, _) => Some(Quadrant::NorthEast),
        (_, true, _, true) => Some(Quadrant::SouthEast),
        _ => None,
    }
}
