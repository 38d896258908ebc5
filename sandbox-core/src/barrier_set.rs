//! The collection of barriers placed in the world.

use crate::barrier::Barrier;
use glam::Vec2;

/// Index of a barrier inside its `BarrierSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarrierId(pub usize);

/// Neighbours sharing an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BarrierLinks {
    /// The barrier whose `p2` is this barrier's `p1`.
    pub prev: Option<BarrierId>,
    /// The barrier whose `p1` is this barrier's `p2`.
    pub next: Option<BarrierId>,
}

/// Insertion-ordered barriers plus their adjacency links.
#[derive(Debug, Clone, Default)]
pub struct BarrierSet {
    barriers: Vec<Barrier>,
    links: Vec<BarrierLinks>,
    pending_point: Option<Vec2>,
}

impl BarrierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, p1: Vec2, p2: Vec2) -> BarrierId {
        let id = BarrierId(self.barriers.len());
        self.barriers.push(Barrier::new(p1, p2));
        self.links.push(BarrierLinks::default());
        id
    }

    /// Two-click authoring: the first point is held as pending, the second
    /// closes a segment from the pending point.
    pub fn add_point(&mut self, pos: Vec2) -> Option<BarrierId> {
        match self.pending_point.take() {
            None => {
                self.pending_point = Some(pos);
                None
            }
            Some(start) => {
                let id = self.add_segment(start, pos);
                self.rebuild_adjacency();
                Some(id)
            }
        }
    }

    pub fn pending_point(&self) -> Option<Vec2> {
        self.pending_point
    }

    pub fn cancel_pending(&mut self) {
        self.pending_point = None;
    }

    /// Replace every barrier at once. Placed barriers are never edited in place.
    pub fn replace_all<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = (Vec2, Vec2)>,
    {
        self.clear();
        for (p1, p2) in segments {
            self.add_segment(p1, p2);
        }
        self.rebuild_adjacency();
    }

    pub fn clear(&mut self) {
        self.barriers.clear();
        self.links.clear();
        self.pending_point = None;
    }

    /// Recompute prev/next links from exactly shared endpoints.
    pub fn rebuild_adjacency(&mut self) {
        self.links = vec![BarrierLinks::default(); self.barriers.len()];

        for (a, ba) in self.barriers.iter().enumerate() {
            for (b, bb) in self.barriers.iter().enumerate() {
                if a == b {
                    continue;
                }

                if ba.p1 == bb.p2 {
                    self.links[a].prev = Some(BarrierId(b));
                    self.links[b].next = Some(BarrierId(a));
                }

                if ba.p2 == bb.p1 {
                    self.links[a].next = Some(BarrierId(b));
                    self.links[b].prev = Some(BarrierId(a));
                }
            }
        }
    }

    pub fn get(&self, id: BarrierId) -> Option<&Barrier> {
        self.barriers.get(id.0)
    }

    pub fn links(&self, id: BarrierId) -> BarrierLinks {
        self.links.get(id.0).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Barrier> {
        self.barriers.iter()
    }

    pub fn len(&self) -> usize {
        self.barriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barriers.is_empty()
    }

    pub fn any_crosses(&self, p1: Vec2, p2: Vec2) -> bool {
        self.barriers.iter().any(|bar| bar.crosses(p1, p2))
    }

    pub fn any_crosses_normal(&self, p1: Vec2, p2: Vec2) -> bool {
        self.barriers.iter().any(|bar| bar.crosses_normal(p1, p2))
    }

    /// The crossed barrier whose line intersection lies nearest to `pos`.
    ///
    /// A trajectory running along a barrier's line has no single
    /// intersection; it is treated as touching at `pos`.
    pub fn closest_crossing(&self, pos: Vec2, next_pos: Vec2) -> Option<BarrierId> {
        let mut min_dist = f32::MAX;
        let mut closest = None;

        for (i, bar) in self.barriers.iter().enumerate() {
            if !bar.crosses(pos, next_pos) {
                continue;
            }

            let hit = bar.intersection(pos, next_pos).unwrap_or(pos);
            let dist = (hit - pos).length();

            if dist < min_dist {
                min_dist = dist;
                closest = Some(BarrierId(i));
            }
        }

        closest
    }
}

impl<'a> IntoIterator for &'a BarrierSet {
    type Item = &'a Barrier;
    type IntoIter = std::slice::Iter<'a, Barrier>;

    fn into_iter(self) -> Self::IntoIter {
        self.barriers.iter()
    }
}
