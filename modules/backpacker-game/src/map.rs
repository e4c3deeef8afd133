use serde::Serialize;

use backpacker_common::Location;

pub const CITY_ZOOM: f32 = 5.0;
pub const ARRIVAL_ZOOM: f32 = 6.0;

/// Where the map is centred and how far in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapFocus {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f32,
}

pub const WORLD_VIEW: MapFocus = MapFocus {
    latitude: 20.0,
    longitude: 0.0,
    zoom: 2.5,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPath {
    pub from: Location,
    pub to: Location,
}

/// Markers for every city reached, a path per trip, and the current focus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    markers: Vec<Location>,
    paths: Vec<MapPath>,
    focus: MapFocus,
}

impl Default for MapOverlay {
    fn default() -> Self {
        Self {
            markers: Vec::new(),
            paths: Vec::new(),
            focus: WORLD_VIEW,
        }
    }
}

impl MapOverlay {
    pub fn markers(&self) -> &[Location] {
        &self.markers
    }

    pub fn paths(&self) -> &[MapPath] {
        &self.paths
    }

    pub fn focus(&self) -> MapFocus {
        self.focus
    }

    pub fn add_marker(&mut self, location: Location) {
        self.markers.push(location);
    }

    pub fn draw_path(&mut self, from: Location, to: Location) {
        self.paths.push(MapPath { from, to });
    }

    pub fn fly_to(&mut self, location: &Location, zoom: f32) {
        self.focus = MapFocus {
            latitude: location.latitude,
            longitude: location.longitude,
            zoom,
        };
    }

    /// Clear all markers and paths and zoom back out to the world.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
