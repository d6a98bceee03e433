use geo::{Euclidean, Length};
use geo_types::{coord, LineString};
use std::fmt::Write;

/// # Route
///
/// The append-only trail the rover leaves behind. It starts with a single
/// move-to at the mission start and grows by one line-to for every move,
/// including teleports. It only ever shrinks through [`Route::reset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: LineString<f64>,
    description: String,
}

impl Route {
    pub fn new(start_x: f64, start_y: f64) -> Route {
        let mut route = Route {
            points: LineString::new(vec![]),
            description: String::new(),
        };
        route.reset(start_x, start_y);
        route
    }

    pub fn reset(&mut self, start_x: f64, start_y: f64) {
        self.points = LineString::new(vec![coord! {x: start_x, y: start_y}]);
        self.description.clear();
        let _ = write!(self.description, "M {},{} ", start_x, start_y);
    }

    pub fn append(&mut self, x: f64, y: f64) {
        self.points.0.push(coord! {x: x, y: y});
        let _ = write!(self.description, "L {:.2},{:.2} ", x, y);
    }

    /// SVG path data, e.g. `M 400,250 L 400.00,150.00 `.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of line-to segments after the initial move-to.
    pub fn segments(&self) -> usize {
        self.points.0.len().saturating_sub(1)
    }

    /// Geometric length of the whole trail, teleports included.
    pub fn length(&self) -> f64 {
        Euclidean.length(&self.points)
    }

    /// Direction in degrees of the last segment that actually goes
    /// somewhere, or 0 when there is none. An animated glyph following the
    /// route with `rotate="auto"` ends up pointing this way.
    pub fn last_direction(&self) -> f64 {
        self.points
            .lines()
            .filter(|line| line.dx() != 0.0 || line.dy() != 0.0)
            .last()
            .map(|line| line.dy().atan2(line.dx()).to_degrees().rem_euclid(360.0))
            .unwrap_or(0.0)
    }
}
