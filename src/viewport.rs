//! Map viewport tracking
//!
//! The embedded map reports its bounding box after every move; the watcher
//! keeps the latest bounds and a consumable "moved" flag so the owner can
//! reveal a search-in-this-area affordance. The map handle is injected by
//! whoever owns it — the watcher never goes looking for one.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned viewport bounds, as the map reports them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl BoundingBox {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }
}

/// Tracks the viewport of an injected map handle.
#[derive(Debug, Default)]
pub struct ViewportWatcher {
    bounds: Option<BoundingBox>,
    moved: bool,
}

impl ViewportWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move-end event from the map.
    pub fn record_move_end(&mut self, bounds: BoundingBox) {
        self.bounds = Some(bounds);
        self.moved = true;
    }

    /// Latest known bounds, if the map has reported any.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Consume the moved flag. Returns the current bounds the first time it
    /// is called after a move, `None` until the next move.
    pub fn take_moved(&mut self) -> Option<BoundingBox> {
        if self.moved {
            self.moved = false;
            self.bounds
        } else {
            None
        }
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }
}
