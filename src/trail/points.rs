use std::collections::VecDeque;

use crate::foundation::core::Point;

/// One recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
    /// Remaining life in `[0, 1]`; only decays when auto-fade is on.
    pub life: f64,
}

impl TrailPoint {
    /// Fresh point at full life.
    pub fn new(pos: Point) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            life: 1.0,
        }
    }

    pub fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Outcome of [`TrailQueue::push`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Insertion {
    /// The spacing gate rejected the input.
    Skipped,
    Inserted {
        /// Newest point before this insertion.
        prev: Option<Point>,
        /// Smoothed position that was recorded.
        point: Point,
    },
}

/// Bounded FIFO of trail points, oldest first.
#[derive(Clone, Debug, Default)]
pub struct TrailQueue {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl TrailQueue {
    /// Empty queue holding at most `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Maximum number of retained points.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no point is recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newest point.
    pub fn last(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    /// Point at `idx`, counting from the oldest.
    pub fn get(&self, idx: usize) -> Option<&TrailPoint> {
        self.points.get(idx)
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    /// Drop every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Change capacity, evicting the oldest points that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.evict();
    }

    fn evict(&mut self) {
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Record `raw` after the optional spacing gate and first-order smoothing, then evict the
    /// oldest points beyond capacity.
    ///
    /// `smoothing` is the weight kept on the previous point: the recorded position is
    /// `prev + (raw - prev) * (1 - smoothing)`.
    pub fn push(&mut self, raw: Point, smoothing: f64, min_spacing: Option<f64>) -> Insertion {
        let prev = self.points.back().map(|p| p.pos());

        if let (Some(prev), Some(spacing)) = (prev, min_spacing)
            && prev.distance(raw) < spacing
        {
            return Insertion::Skipped;
        }

        let point = match prev {
            Some(prev) => prev.lerp(raw, 1.0 - smoothing.clamp(0.0, 1.0)),
            None => raw,
        };
        self.points.push_back(TrailPoint::new(point));
        self.evict();

        Insertion::Inserted { prev, point }
    }

    /// Subtract `amount` from every point's life and drop points at or below zero.
    ///
    /// Returns the number of removed points.
    pub fn decay(&mut self, amount: f64) -> usize {
        let before = self.points.len();
        self.points.retain_mut(|p| {
            p.life -= amount;
            p.life > 0.0
        });
        before - self.points.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/points.rs"]
mod tests;
