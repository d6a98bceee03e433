use roverdrive::prelude::*;
use std::path::Path;

fn main() {
    let fname = Path::new(file!()).file_stem().unwrap().to_str().unwrap();
    std::fs::create_dir_all("images").unwrap();
    let page = HtmlFile::new(format!("images/{}.html", fname), "Square patrol").unwrap();

    let mut rover = Rover::new(RoverConfig::default(), MissionRegistry::default(), page).unwrap();
    rover.start_mission(0).unwrap();
    rover
        .set_name("Patroller")
        .unwrap()
        .set_pen_color("orange")
        .unwrap()
        .set_width(3)
        .unwrap();
    for _ in 0..4 {
        rover.forward(150).unwrap().right(90.0).unwrap();
    }
    println!(
        "{} after {} pixels; found {}",
        rover.heading_report().unwrap(),
        rover.travel().unwrap(),
        rover.sample()
    );
}
