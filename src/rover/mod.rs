use crate::config::{RenderMode, RoverConfig};
use crate::display::{DisplaySink, Recorder};
use crate::errors::{Result, RoverError};
use crate::mission::{MissionInfo, MissionRegistry};
use crate::palette::Color;
use crate::render;
use crate::scene::Scene;
use crate::sensor::{self, Sample};

/// # Rover
///
/// The public face of the crate: one rover, the mission table it drives
/// over, and the display it draws on. Start a mission, then drive:
///
/// ```
/// use roverdrive::config::RoverConfig;
/// use roverdrive::display::Recorder;
/// use roverdrive::mission::MissionRegistry;
/// use roverdrive::rover::Rover;
///
/// let mut rover = Rover::new(RoverConfig::default(), MissionRegistry::default(), Recorder::new())
///     .unwrap();
/// rover.start_mission(0).unwrap();
/// rover.forward(100).unwrap()
///     .right(90.0).unwrap()
///     .forward(50).unwrap();
/// assert_eq!(rover.travel().unwrap(), 150.0);
/// // One frame for the mission start, one per command.
/// assert_eq!(rover.sink().frames().len(), 4);
/// ```
///
/// Every command checks its arguments before touching anything, so an
/// `Err` leaves the scene as it was. Commands issued before a mission has
/// been started fail with [`RoverError::NotInitialized`].
pub struct Rover<S: DisplaySink = Recorder> {
    config: RoverConfig,
    missions: MissionRegistry,
    scene: Option<Scene>,
    sink: S,
}

impl<S: DisplaySink> Rover<S> {
    pub fn new(config: RoverConfig, missions: MissionRegistry, sink: S) -> Result<Rover<S>> {
        config.validate()?;
        Ok(Rover {
            config,
            missions,
            scene: None,
            sink,
        })
    }

    pub fn config(&self) -> &RoverConfig {
        &self.config
    }

    pub fn missions(&self) -> &MissionRegistry {
        &self.missions
    }

    /// The live scene, once a mission has been started.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn live(&self) -> Result<&Scene> {
        self.scene.as_ref().ok_or(RoverError::NotInitialized)
    }

    /// Parks the rover at the start of mission `id` with every drawing
    /// setting back at its default, and shows the first frame. Ids missing
    /// from the table fall back to mission 0.
    pub fn start_mission(&mut self, id: i64) -> Result<&mut Self> {
        let id = if self.missions.contains(id) {
            id
        } else {
            if id != 0 {
                log::warn!("Unknown mission {}, starting mission 0 instead", id);
            }
            0
        };
        let mission = self.missions.lookup(id);
        log::info!(
            "Starting mission {} at ({}, {}) heading {}",
            mission.id,
            mission.start_x,
            mission.start_y,
            mission.start_heading
        );
        self.scene = Some(Scene::new(
            mission,
            self.config.initial_speed,
            self.config.window_size,
        ));
        self.push()?;
        Ok(self)
    }

    /// Restarts the current mission, or mission 0 if none is running.
    pub fn initialize(&mut self) -> Result<&mut Self> {
        let id = self.scene.as_ref().map(|s| s.mission().id).unwrap_or(0);
        self.start_mission(id)
    }

    pub fn mission(&self) -> Result<&MissionInfo> {
        Ok(self.live()?.mission())
    }

    /// The current frame, without pushing it anywhere.
    pub fn markup(&self) -> Result<String> {
        let scene = self.live()?;
        Ok(render::render(scene, scene.mission()))
    }

    fn push(&mut self) -> Result<()> {
        let markup = self.markup()?;
        if let Err(err) = self.sink.update(&markup) {
            log::warn!("Display update failed: {}", err);
        }
        Ok(())
    }

    /// Pushes the current frame regardless of the render mode.
    pub fn go(&mut self) -> Result<&mut Self> {
        let scene = self.live()?;
        log::debug!(
            "Route is {:.2} long, {:.2} of it driven",
            scene.route().length(),
            scene.travel()
        );
        self.push()?;
        Ok(self)
    }

    fn apply<F>(&mut self, what: &str, command: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Scene) -> Result<()>,
    {
        let scene = self.scene.as_mut().ok_or(RoverError::NotInitialized)?;
        command(scene)?;
        log::debug!("{}", what);
        if self.config.render_mode == RenderMode::EveryCommand {
            self.push()?;
        }
        Ok(self)
    }

    pub fn forward(&mut self, units: i64) -> Result<&mut Self> {
        self.apply(&format!("forward {}", units), |s| {
            s.forward(units);
            Ok(())
        })
    }

    pub fn backward(&mut self, units: i64) -> Result<&mut Self> {
        self.apply(&format!("backward {}", units), |s| {
            s.backward(units);
            Ok(())
        })
    }

    pub fn right(&mut self, degrees: f64) -> Result<&mut Self> {
        self.apply(&format!("right {}", degrees), |s| s.right(degrees).map(|_| ()))
    }

    pub fn left(&mut self, degrees: f64) -> Result<&mut Self> {
        self.apply(&format!("left {}", degrees), |s| s.left(degrees).map(|_| ()))
    }

    pub fn set_x(&mut self, x: i64) -> Result<&mut Self> {
        self.apply(&format!("setx {}", x), |s| s.set_x(x).map(|_| ()))
    }

    pub fn set_y(&mut self, y: i64) -> Result<&mut Self> {
        self.apply(&format!("sety {}", y), |s| s.set_y(y).map(|_| ()))
    }

    pub fn goto(&mut self, x: i64, y: i64) -> Result<&mut Self> {
        self.apply(&format!("goto {} {}", x, y), |s| s.goto(x, y).map(|_| ()))
    }

    pub fn set_speed(&mut self, speed: i64) -> Result<&mut Self> {
        self.apply(&format!("speed {}", speed), |s| s.set_speed(speed).map(|_| ()))
    }

    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        self.apply(&format!("name {:?}", name), |s| s.set_name(name).map(|_| ()))
    }

    pub fn set_pen_color(&mut self, color: &str) -> Result<&mut Self> {
        self.live()?;
        let color: Color = color.parse()?;
        self.apply(&format!("color {}", color), |s| {
            s.set_pen_color(color);
            Ok(())
        })
    }

    pub fn set_background_color(&mut self, color: &str) -> Result<&mut Self> {
        self.live()?;
        let color: Color = color.parse()?;
        self.apply(&format!("bgcolor {}", color), |s| {
            s.set_background_color(color);
            Ok(())
        })
    }

    pub fn set_width(&mut self, width: i64) -> Result<&mut Self> {
        self.apply(&format!("width {}", width), |s| s.set_width(width).map(|_| ()))
    }

    pub fn show(&mut self) -> Result<&mut Self> {
        self.apply("show", |s| {
            s.show();
            Ok(())
        })
    }

    pub fn hide(&mut self) -> Result<&mut Self> {
        self.apply("hide", |s| {
            s.hide();
            Ok(())
        })
    }

    pub fn pen_up(&mut self) -> Result<&mut Self> {
        self.apply("penup", |s| {
            s.pen_up();
            Ok(())
        })
    }

    pub fn pen_down(&mut self) -> Result<&mut Self> {
        self.apply("pendown", |s| {
            s.pen_down();
            Ok(())
        })
    }

    /// Reads the ground under the rover. Doesn't change or redraw anything.
    pub fn sample(&self) -> Sample {
        sensor::sample()
    }

    pub fn travel(&self) -> Result<f64> {
        Ok(self.live()?.travel())
    }

    pub fn heading_report(&self) -> Result<String> {
        Ok(self.live()?.heading_report())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo_types::Point;

    fn rover() -> Rover {
        let mut rover = Rover::new(
            RoverConfig::default(),
            MissionRegistry::default(),
            Recorder::new(),
        )
        .unwrap();
        rover.start_mission(0).unwrap();
        rover
    }

    #[test]
    fn test_not_initialized() {
        let mut rover = Rover::new(
            RoverConfig::default(),
            MissionRegistry::default(),
            Recorder::new(),
        )
        .unwrap();
        assert!(matches!(rover.forward(10), Err(RoverError::NotInitialized)));
        assert!(matches!(rover.go(), Err(RoverError::NotInitialized)));
        assert!(matches!(rover.markup(), Err(RoverError::NotInitialized)));
        assert!(matches!(rover.travel(), Err(RoverError::NotInitialized)));
        assert!(matches!(
            rover.set_pen_color("chartreuse"),
            Err(RoverError::NotInitialized)
        ));
        assert!(matches!(
            rover.set_background_color("not a color"),
            Err(RoverError::NotInitialized)
        ));
        assert!(rover.sink().frames().is_empty());
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = RoverConfig {
            initial_speed: 0,
            ..RoverConfig::default()
        };
        assert!(Rover::new(config, MissionRegistry::default(), Recorder::new()).is_err());
    }

    #[test]
    fn test_every_command_renders() {
        let mut rover = rover();
        rover.forward(10).unwrap().hide().unwrap().set_width(3).unwrap();
        assert_eq!(rover.sink().frames().len(), 4);
        assert_eq!(rover.sink().last().unwrap(), rover.markup().unwrap());
    }

    #[test]
    fn test_failed_command_changes_nothing() {
        let mut rover = rover();
        rover.forward(25).unwrap();
        let before = rover.scene().unwrap().clone();
        let frames = rover.sink().frames().len();
        assert!(rover.goto(-5, 3).is_err());
        assert!(rover.set_pen_color("chartreuse").is_err());
        assert!(rover.set_speed(42).is_err());
        assert!(rover.set_name("a name far too long").is_err());
        assert_eq!(rover.scene().unwrap(), &before);
        assert_eq!(rover.sink().frames().len(), frames);
    }

    #[test]
    fn test_explicit_mode_batches() {
        let config = RoverConfig {
            render_mode: RenderMode::Explicit,
            ..RoverConfig::default()
        };
        let mut rover = Rover::new(config, MissionRegistry::default(), Recorder::new()).unwrap();
        rover.start_mission(0).unwrap();
        rover.forward(10).unwrap().right(90.0).unwrap().forward(10).unwrap();
        assert_eq!(rover.sink().frames().len(), 1);
        rover.go().unwrap();
        assert_eq!(rover.sink().frames().len(), 2);
        assert!(rover.sink().last().unwrap().contains(r#"stroke-dasharray="20""#));
    }

    #[test]
    fn test_mission_start_and_fallback() {
        let missions = MissionRegistry::parse("0\t50\t60\t0\n4\t700\t450\t180\n", "bg").unwrap();
        let mut rover = Rover::new(RoverConfig::default(), missions, Recorder::new()).unwrap();
        rover.start_mission(4).unwrap();
        assert_eq!(rover.scene().unwrap().position(), Point::new(700.0, 450.0));
        assert_eq!(rover.scene().unwrap().heading(), 180.0);
        assert!(rover.markup().unwrap().contains("bg/004.jpeg"));

        rover.forward(100).unwrap().set_pen_color("red").unwrap();
        rover.initialize().unwrap();
        let scene = rover.scene().unwrap();
        assert_eq!(scene.travel(), 0.0);
        assert_eq!(scene.pen_color(), Color::Yellow);
        assert_eq!(scene.mission().id, 4);

        rover.start_mission(77).unwrap();
        assert_eq!(rover.mission().unwrap().id, 0);
        assert_eq!(rover.scene().unwrap().position(), Point::new(50.0, 60.0));
    }

    #[test]
    fn test_reports() {
        let mut rover = rover();
        rover.backward(30).unwrap().left(90.0).unwrap();
        assert_eq!(rover.travel().unwrap(), 30.0);
        assert_eq!(rover.heading_report().unwrap(), "rover is at 270.00 degrees.");
        let _ = rover.sample();
    }

    #[test]
    fn test_speed_from_config() {
        let config = RoverConfig {
            initial_speed: 2,
            window_size: (640, 400),
            ..RoverConfig::default()
        };
        let mut rover = Rover::new(config, MissionRegistry::default(), Recorder::new()).unwrap();
        rover.start_mission(0).unwrap().forward(160).unwrap();
        let markup = rover.markup().unwrap();
        assert!(markup.contains(r#"dur="2.00s""#));
        assert!(markup.contains(r#"width="640""#));
    }
}
