//! The drawing state of a single rover run: where it is, which way it faces,
//! how far it has driven, and how it should be drawn.
use geo_types::Point;

use crate::errors::{Result, RoverError};
use crate::mission::MissionInfo;
use crate::palette::Color;

pub mod path;

pub use path::Route;

pub const DEFAULT_SPEED: u8 = 7;
pub const DEFAULT_PEN_WIDTH: u32 = 5;
pub const DEFAULT_PEN_COLOR: Color = Color::Yellow;
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::Black;
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (800, 500);
pub const MAX_SPEED: u8 = 10;
pub const MAX_NAME_LEN: usize = 15;
/// Headings are reported relative to "up the canvas".
const REPORT_ORIGIN: f64 = 270.0;

/// # Scene
///
/// One rover on one mission. Every command validates its input first and
/// only then mutates, so an `Err` always leaves the scene untouched.
///
/// Turns never count towards the travelled distance, and neither do
/// teleports (`goto`, `set_x`, `set_y`), although both kinds of move extend
/// the drawn route.
///
/// # Example
///
/// ```
/// use roverdrive::mission::MissionInfo;
/// use roverdrive::scene::Scene;
///
/// let mut scene = Scene::new(MissionInfo::fallback(0), 7, (800, 500));
/// scene.forward(100).right(90.0).unwrap().forward(50);
/// assert_eq!(scene.travel(), 150.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    mission: MissionInfo,
    window_size: (u32, u32),
    position: Point<f64>,
    heading: f64,
    travel: f64,
    route: Route,
    pen_down: bool,
    pen_color: Color,
    pen_width: u32,
    visible: bool,
    label: String,
    background: Color,
    speed: u8,
}

impl Scene {
    /// Fresh scene with the rover parked at the mission's start pose.
    pub fn new(mission: MissionInfo, speed: u8, window_size: (u32, u32)) -> Scene {
        let (x, y) = (f64::from(mission.start_x), f64::from(mission.start_y));
        Scene {
            window_size,
            position: Point::new(x, y),
            heading: (mission.start_heading as f64).rem_euclid(360.0),
            travel: 0.0,
            route: Route::new(x, y),
            pen_down: true,
            pen_color: DEFAULT_PEN_COLOR,
            pen_width: DEFAULT_PEN_WIDTH,
            visible: true,
            label: String::new(),
            background: DEFAULT_BACKGROUND_COLOR,
            speed: speed.min(MAX_SPEED),
            mission,
        }
    }

    pub fn mission(&self) -> &MissionInfo {
        &self.mission
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn position(&self) -> Point<f64> {
        self.position
    }

    /// Heading in degrees, `[0, 360)`, 0 along +x, 270 up the canvas.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn travel(&self) -> f64 {
        self.travel
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Human readable heading, measured clockwise from "up".
    pub fn heading_report(&self) -> String {
        format!(
            "rover is at {:.2} degrees.",
            (self.heading - REPORT_ORIGIN).rem_euclid(360.0)
        )
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.route.append(x, y);
        self.position = Point::new(x, y);
    }

    fn drive(&mut self, distance: f64) -> &mut Self {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        let x = self.position.x() + distance * cos;
        let y = self.position.y() + distance * sin;
        self.travel += distance.abs();
        self.move_to(x, y);
        self
    }

    /// Drives `units` along the current heading. Negative values reverse.
    pub fn forward(&mut self, units: i64) -> &mut Self {
        self.drive(units as f64)
    }

    // Negated as a float: i64::MIN has no positive counterpart.
    pub fn backward(&mut self, units: i64) -> &mut Self {
        self.drive(-(units as f64))
    }

    /// Turns clockwise on screen (y grows downward).
    pub fn right(&mut self, degrees: f64) -> Result<&mut Self> {
        if !degrees.is_finite() {
            return Err(RoverError::invalid("degrees should be a number"));
        }
        self.heading = (self.heading + degrees).rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs.
        if self.heading >= 360.0 {
            self.heading = 0.0;
        }
        Ok(self)
    }

    pub fn left(&mut self, degrees: f64) -> Result<&mut Self> {
        self.right(-degrees)
    }

    fn coordinate(value: i64, axis: &str) -> Result<f64> {
        if value < 0 {
            return Err(RoverError::invalid(format!(
                "new {} position should be nonnegative",
                axis
            )));
        }
        Ok(value as f64)
    }

    pub fn set_x(&mut self, x: i64) -> Result<&mut Self> {
        let x = Scene::coordinate(x, "x")?;
        self.move_to(x, self.position.y());
        Ok(self)
    }

    pub fn set_y(&mut self, y: i64) -> Result<&mut Self> {
        let y = Scene::coordinate(y, "y")?;
        self.move_to(self.position.x(), y);
        Ok(self)
    }

    /// Teleports to `(x, y)`. The route records the jump, the odometer
    /// doesn't.
    pub fn goto(&mut self, x: i64, y: i64) -> Result<&mut Self> {
        let x = Scene::coordinate(x, "x")?;
        let y = Scene::coordinate(y, "y")?;
        self.move_to(x, y);
        Ok(self)
    }

    pub fn set_speed(&mut self, speed: i64) -> Result<&mut Self> {
        if !(0..=i64::from(MAX_SPEED)).contains(&speed) {
            return Err(RoverError::invalid(
                "speed should be an integer in the interval [0,10]",
            ));
        }
        self.speed = speed as u8;
        Ok(self)
    }

    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(RoverError::invalid(format!(
                "the name should be {} characters or fewer",
                MAX_NAME_LEN
            )));
        }
        self.label = name.to_string();
        Ok(self)
    }

    pub fn set_pen_color(&mut self, color: Color) -> &mut Self {
        self.pen_color = color;
        self
    }

    pub fn set_background_color(&mut self, color: Color) -> &mut Self {
        self.background = color;
        self
    }

    pub fn set_width(&mut self, width: i64) -> Result<&mut Self> {
        match u32::try_from(width) {
            Ok(width) if width > 0 => {
                self.pen_width = width;
                Ok(self)
            }
            _ => Err(RoverError::invalid(format!(
                "pen width should be a positive integer, got {}",
                width
            ))),
        }
    }

    pub fn show(&mut self) -> &mut Self {
        self.visible = true;
        self
    }

    pub fn hide(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    pub fn pen_up(&mut self) -> &mut Self {
        self.pen_down = false;
        self
    }

    pub fn pen_down(&mut self) -> &mut Self {
        self.pen_down = true;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scene() -> Scene {
        Scene::new(MissionInfo::fallback(0), DEFAULT_SPEED, DEFAULT_WINDOW_SIZE)
    }

    fn close(a: Point<f64>, x: f64, y: f64) -> bool {
        (a.x() - x).abs() < 1e-9 && (a.y() - y).abs() < 1e-9
    }

    #[test]
    fn test_defaults() {
        let s = scene();
        assert_eq!(s.position(), Point::new(400.0, 250.0));
        assert_eq!(s.heading(), 270.0);
        assert_eq!(s.travel(), 0.0);
        assert_eq!(s.pen_color(), Color::Yellow);
        assert_eq!(s.background(), Color::Black);
        assert_eq!(s.pen_width(), 5);
        assert_eq!(s.speed(), 7);
        assert!(s.is_visible());
        assert!(s.is_pen_down());
        assert_eq!(s.route().description(), "M 400,250 ");
    }

    #[test]
    fn test_drive_square() {
        let mut s = scene();
        s.forward(100)
            .right(90.0)
            .unwrap()
            .forward(50)
            .right(90.0)
            .unwrap()
            .backward(20);
        assert_eq!(s.travel(), 170.0);
        assert!(close(s.position(), 450.0, 130.0));
        assert_eq!(s.heading(), 90.0);
        assert_eq!(s.route().segments(), 3);
    }

    #[test]
    fn test_backward_extremes() {
        let mut s = scene();
        s.backward(i64::MIN);
        assert_eq!(s.travel(), 9223372036854775808.0);
        assert!(s.position().y() > 1e18);
        let mut s = scene();
        s.backward(i64::MAX).forward(i64::MIN);
        assert_eq!(s.route().segments(), 2);
    }

    #[test]
    fn test_forward_then_turn_example() {
        let mut s = scene();
        s.forward(100);
        s.right(90.0).unwrap();
        s.forward(50);
        assert_eq!(s.travel(), 150.0);
        assert!(close(s.position(), 450.0, 150.0));
        assert_eq!(s.heading(), 0.0);
    }

    #[test]
    fn test_turns_keep_travel() {
        let mut s = scene();
        s.forward(-30);
        s.right(45.0).unwrap().left(45.0).unwrap();
        s.right(725.0).unwrap().right(-725.0).unwrap();
        assert_eq!(s.heading(), 270.0);
        assert_eq!(s.travel(), 30.0);
        assert_eq!(s.route().segments(), 1);
        assert!(s.right(f64::NAN).is_err());
        assert!(s.left(f64::INFINITY).is_err());
        assert_eq!(s.heading(), 270.0);
    }

    #[test]
    fn test_heading_normalized() {
        let mut s = scene();
        s.left(300.0).unwrap();
        assert_eq!(s.heading(), 330.0);
        s.right(-1e-20).unwrap();
        assert!(s.heading() >= 0.0 && s.heading() < 360.0);
    }

    #[test]
    fn test_teleports() {
        let mut s = scene();
        s.forward(10);
        s.goto(12, 34).unwrap();
        assert_eq!(s.position(), Point::new(12.0, 34.0));
        s.set_x(0).unwrap().set_y(7).unwrap();
        assert_eq!(s.position(), Point::new(0.0, 7.0));
        assert_eq!(s.travel(), 10.0);
        assert_eq!(s.route().segments(), 4);
    }

    #[test]
    fn test_rejected_teleports_leave_scene_alone() {
        let mut s = scene();
        s.forward(10);
        let before = s.clone();
        assert!(s.goto(-1, 5).is_err());
        assert!(s.goto(5, -1).is_err());
        assert!(s.set_x(-3).is_err());
        assert!(s.set_y(-3).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn test_attribute_validation() {
        let mut s = scene();
        assert!(s.set_speed(11).is_err());
        assert!(s.set_speed(-1).is_err());
        s.set_speed(0).unwrap();
        assert_eq!(s.speed(), 0);
        assert!(s.set_width(0).is_err());
        assert!(s.set_width(-4).is_err());
        s.set_width(12).unwrap();
        assert_eq!(s.pen_width(), 12);
        assert!(s.set_name("sixteen chars!!!").is_err());
        s.set_name("Curiosity").unwrap();
        assert_eq!(s.label(), "Curiosity");
        s.set_name("fifteen chars!!").unwrap();
    }

    #[test]
    fn test_heading_report() {
        let mut s = scene();
        assert_eq!(s.heading_report(), "rover is at 0.00 degrees.");
        s.right(90.0).unwrap();
        assert_eq!(s.heading_report(), "rover is at 90.00 degrees.");
        s.left(180.0).unwrap();
        assert_eq!(s.heading_report(), "rover is at 270.00 degrees.");
    }
}
