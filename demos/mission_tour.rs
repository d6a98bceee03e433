use roverdrive::prelude::*;
use roverdrive::script;

const MISSIONS: &str = "1\t120\t420\t270\n2\t680\t90\t180\n3\t400\t250\t45\n";

const TOUR: &str = "
# short hop on every mission
mission 1
forward 200
right 90
forward 120
travel
mission 2
bgcolor blue
forward 300
left 45
backward 40
travel
mission 3
goto 10 10
travel
heading
";

fn main() {
    let missions = MissionRegistry::parse(MISSIONS, "backgrounds/training").unwrap();
    let mut rover = Rover::new(RoverConfig::default(), missions, Recorder::new()).unwrap();
    let steps = script::parse(TOUR).unwrap();
    for line in script::run(&mut rover, &steps).unwrap() {
        println!("{}", line);
    }
    println!("{} frames rendered", rover.sink().frames().len());
    println!("{}", rover.markup().unwrap());
}
