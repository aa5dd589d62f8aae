//! Layout pass arena and deferred anchors.
//!
//! Placed content records its rectangle with [`LayoutPass::anchor`] and gets
//! back an opaque [`Anchor`]. Only once the pass knows the container's final
//! frame can anchors be resolved, through [`AnchorResolver`], into the
//! container's local coordinate space. An anchor belongs to exactly one pass;
//! resolving it against another pass yields `None`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::primitives::{Color, Point, Rect};

static PASS_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PassId(u64);

impl PassId {
    /// Each call returns a different ID.
    fn next() -> Self {
        Self(PASS_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Deferred reference to a rectangle recorded during a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pass: PassId,
    slot: usize,
}

impl Anchor {
    pub fn pass(&self) -> PassId {
        self.pass
    }
}

/// Turns anchors into rectangles in a container's local space.
pub trait AnchorResolver {
    /// Resolve `anchor`, or `None` if it does not belong to this resolver.
    fn resolve(&self, anchor: Anchor) -> Option<Rect>;

    /// The container's own frame in its local space (origin at zero).
    fn local_frame(&self) -> Rect;
}

/// Per-layout arena owning every rectangle anchored during the pass.
///
/// Rectangles are recorded in outer (document) coordinates. The container
/// frame set with [`LayoutPass::set_frame`] defines the local space the
/// resolver maps into.
#[derive(Debug)]
pub struct LayoutPass {
    id: PassId,
    frame: Rect,
    rects: Vec<Rect>,
}

impl LayoutPass {
    /// Start a pass for a container whose top-left corner is `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            id: PassId::next(),
            frame: Rect::from_origin_size(origin, Default::default()),
            rects: Vec::new(),
        }
    }

    pub fn id(&self) -> PassId {
        self.id
    }

    /// Record `rect` and return a handle to it.
    pub fn anchor(&mut self, rect: Rect) -> Anchor {
        self.rects.push(rect);
        Anchor {
            pass: self.id,
            slot: self.rects.len() - 1,
        }
    }

    /// Set the container's final frame in outer coordinates.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl AnchorResolver for LayoutPass {
    fn resolve(&self, anchor: Anchor) -> Option<Rect> {
        if anchor.pass != self.id {
            tracing::warn!(
                anchor_pass = anchor.pass.raw(),
                current_pass = self.id.raw(),
                "ignoring anchor from a stale layout pass"
            );
            return None;
        }
        let offset = Point::ORIGIN - self.frame.origin();
        self.rects.get(anchor.slot).map(|rect| rect.translate(offset))
    }

    fn local_frame(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.frame.size())
    }
}

/// A drawing primitive handed to the draw step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// A filled rectangle.
    SolidRect { rect: Rect, color: Color },

    /// A rectangle outline drawn inside `rect`.
    StrokedRect { rect: Rect, color: Color, width: f32 },
}

impl Decoration {
    pub fn rect(&self) -> Rect {
        match self {
            Decoration::SolidRect { rect, .. } | Decoration::StrokedRect { rect, .. } => *rect,
        }
    }

    /// Move the decoration by `offset`.
    pub fn translate(self, offset: Point) -> Self {
        match self {
            Decoration::SolidRect { rect, color } => Decoration::SolidRect {
                rect: rect.translate(offset),
                color,
            },
            Decoration::StrokedRect { rect, color, width } => Decoration::StrokedRect {
                rect: rect.translate(offset),
                color,
                width,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_maps_into_local_space() {
        let mut pass = LayoutPass::new(Point::new(10.0, 20.0));
        let anchor = pass.anchor(Rect::new(15.0, 25.0, 3.0, 4.0));
        pass.set_frame(Rect::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(pass.resolve(anchor), Some(Rect::new(5.0, 5.0, 3.0, 4.0)));
        assert_eq!(pass.local_frame(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_stale_anchor_resolves_to_none() {
        let mut old = LayoutPass::new(Point::ORIGIN);
        let stale = old.anchor(Rect::new(0.0, 0.0, 1.0, 1.0));
        let current = LayoutPass::new(Point::ORIGIN);
        assert_ne!(old.id(), current.id());
        assert_eq!(current.resolve(stale), None);
    }

    #[test]
    fn test_decoration_translate() {
        let deco = Decoration::StrokedRect {
            rect: Rect::new(0.0, 0.0, 4.0, 4.0),
            color: Color::BLACK,
            width: 1.0,
        };
        assert_eq!(deco.translate(Point::new(2.0, 3.0)).rect(), Rect::new(2.0, 3.0, 4.0, 4.0));
    }
}
