use roverdrive::prelude::*;
use roverdrive::render::timing::{duration, MAX_DURATION};
use roverdrive::script;

fn rover_on(missions: MissionRegistry) -> Rover {
    let mut rover = Rover::new(RoverConfig::default(), missions, Recorder::new()).unwrap();
    rover.start_mission(0).unwrap();
    rover
}

#[test]
fn test_travel_is_sum_of_moves() {
    let mut rover = rover_on(MissionRegistry::default());
    let moves = [17, -40, 3, 0, -1, 250];
    let mut expected = 0.0;
    for (i, units) in moves.iter().enumerate() {
        if i % 2 == 0 {
            rover.forward(*units).unwrap();
        } else {
            rover.backward(*units).unwrap();
        }
        expected += (*units as f64).abs();
        rover.right(37.0).unwrap().goto(100, 100).unwrap().set_x(3).unwrap();
        assert_eq!(rover.travel().unwrap(), expected);
    }
}

#[test]
fn test_goto_is_exact() {
    let mut rover = rover_on(MissionRegistry::default());
    for (x, y) in [(0, 0), (799, 499), (1234, 5)] {
        rover.goto(x, y).unwrap();
        let pos = rover.scene().unwrap().position();
        assert_eq!((pos.x(), pos.y()), (x as f64, y as f64));
    }
    assert!(rover.goto(-1, 0).is_err());
    let pos = rover.scene().unwrap().position();
    assert_eq!((pos.x(), pos.y()), (1234.0, 5.0));
}

#[test]
fn test_missing_mission_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missions = MissionRegistry::load(dir.path().join("nowhere"));
    assert!(missions.is_empty());
    let info = missions.lookup(0);
    assert_eq!(
        (info.start_x, info.start_y, info.start_heading, info.background),
        (400, 250, 270, None)
    );
    let rover = rover_on(missions);
    assert!(rover.markup().unwrap().contains(r#"d="M 400,250 ""#));
}

#[test]
fn test_duration_bounds() {
    for speed in 0..=10u8 {
        for travel in [0.0, 1.0, 99.5, 4800.0, 1e12] {
            assert!(duration(travel, speed) <= MAX_DURATION);
        }
    }
}

#[test]
fn test_script_to_html_page() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("run.html");
    let page = HtmlFile::new(&target, "crater run").unwrap();
    let mut rover = Rover::new(RoverConfig::default(), MissionRegistry::default(), page).unwrap();
    let steps = script::parse("mission 0\nname Crater\ncolor #ff0000\nforward 120\nright 90\n").unwrap();
    script::run(&mut rover, &steps).unwrap();

    let html = std::fs::read_to_string(&target).unwrap();
    assert!(html.contains("<title>crater run</title>"));
    assert!(html.contains(r#"id="route""#));
    assert!(html.contains(r#"stroke="red""#));
    assert!(html.contains("Crater"));
    assert!(html.contains(r#"from="90.00""#));
    assert!(html.contains(r#"begin="0.43s""#));
    assert_eq!(html.matches(r#"dur="0.43s""#).count(), 2);
}
