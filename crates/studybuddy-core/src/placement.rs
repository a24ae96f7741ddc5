//! Random initial placement for batches of floating objects.

use crate::geometry::{Viewport, clamp_position, rects_intersect};
use kurbo::{Point, Rect, Size};
use rand::Rng;

/// Default number of draws per object before giving up on a clean spot.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Where one object of a batch landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    /// The retry budget ran out and `position` is the last draw, which may
    /// overlap an exclusion zone.
    pub fell_back: bool,
}

/// Rejection sampler for launcher icon layouts.
///
/// Objects are only tested against the exclusion zones, not against each
/// other, unless [`PlacementSampler::avoid_siblings`] is switched on.
#[derive(Debug, Clone, Copy)]
pub struct PlacementSampler {
    max_attempts: usize,
    avoid_siblings: bool,
}

impl Default for PlacementSampler {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            avoid_siblings: false,
        }
    }
}

impl PlacementSampler {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Also keep each new object clear of the ones already placed in the batch.
    pub fn avoid_siblings(mut self, avoid: bool) -> Self {
        self.avoid_siblings = avoid;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Place one object per footprint inside `area`, avoiding `exclusions`.
    pub fn place<R: Rng + ?Sized>(
        &self,
        footprints: &[Size],
        area: Viewport,
        exclusions: &[Rect],
        rng: &mut R,
    ) -> Vec<Placement> {
        let mut blocked: Vec<Rect> = exclusions.to_vec();
        let mut placements = Vec::with_capacity(footprints.len());

        for (index, &footprint) in footprints.iter().enumerate() {
            let placement = self.place_one(footprint, area, &blocked, rng);
            if placement.fell_back {
                log::warn!(
                    "No free spot for object {} after {} attempts; accepting overlap at ({:.1}, {:.1})",
                    index,
                    self.max_attempts,
                    placement.position.x,
                    placement.position.y
                );
            }
            if self.avoid_siblings {
                blocked.push(Rect::from_origin_size(placement.position, footprint));
            }
            placements.push(placement);
        }

        placements
    }

    fn place_one<R: Rng + ?Sized>(
        &self,
        footprint: Size,
        area: Viewport,
        blocked: &[Rect],
        rng: &mut R,
    ) -> Placement {
        let limit = area.size();
        let mut last = Point::ORIGIN;
        for _ in 0..self.max_attempts {
            let candidate = Point::new(
                draw(rng, limit.width - footprint.width),
                draw(rng, limit.height - footprint.height),
            );
            let rect = Rect::from_origin_size(candidate, footprint);
            if !blocked.iter().any(|zone| rects_intersect(rect, *zone)) {
                return Placement {
                    position: candidate,
                    fell_back: false,
                };
            }
            last = candidate;
        }
        Placement {
            position: last,
            fell_back: true,
        }
    }
}

/// Single viewport-relative draw for a user-spawned note.
///
/// `padding` keeps the note off the top/left edges and `bottom_reserve` keeps
/// it clear of the dock; the result is clamped into `viewport` regardless.
pub fn spawn_note_position<R: Rng + ?Sized>(
    size: Size,
    viewport: Viewport,
    padding: f64,
    bottom_reserve: f64,
    rng: &mut R,
) -> Point {
    let limit = viewport.size();
    let x = padding + draw(rng, limit.width - size.width - padding);
    let y = padding + draw(rng, limit.height - size.height - padding - bottom_reserve);
    clamp_position(Point::new(x, y), size, viewport)
}

/// Uniform draw from `[0, max)`; an empty range yields 0.
fn draw<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        rng.random::<f64>() * max
    } else {
        0.0
    }
}
