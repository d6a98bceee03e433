//! Turns a [`Scene`] into the SVG fragment that gets pushed to the display.
//!
//! The rover glyph is never placed with a static transform: an
//! `animateMotion` drives it along the `#route` path while an `animate`
//! walks the route's dash offset down to zero, so the line appears to be
//! drawn behind the rover. Both run for the same duration. Once the motion
//! is over the glyph snaps round to the scene heading.
use svg::node::element::{
    Animate, AnimateMotion, AnimateTransform, Circle, Element, Group, Image, Path, Polygon,
    Rectangle,
};
use svg::{Document, Node};

use crate::mission::MissionInfo;
use crate::scene::Scene;

pub mod timing;

/// Logical canvas size. The window size only scales the view.
pub const VIEWBOX: (u32, u32) = (800, 500);

pub const ROUTE_ID: &str = "route";
pub const TURTLE_ID: &str = "turtle";

const XMLNS: &str = "http://www.w3.org/2000/svg";
const XMLNS_XLINK: &str = "http://www.w3.org/1999/xlink";
const SETTLE_DURATION: &str = "0.01s";

/// Rotation that lines the glyph up with the scene heading, on top of the
/// `rotate="auto"` orientation the motion animation leaves it in. Only
/// applied after the motion has finished.
pub fn glyph_rotation(scene: &Scene) -> f64 {
    let delta = (scene.heading() - scene.route().last_direction()).rem_euclid(360.0);
    if delta >= 360.0 {
        0.0
    } else {
        delta
    }
}

fn background(scene: &Scene, mission: &MissionInfo) -> Box<dyn Node> {
    match &mission.background {
        Some(href) => Box::new(
            Image::new()
                .set("href", href.as_str())
                .set("x", 0)
                .set("y", 0)
                .set("width", "100%")
                .set("height", "100%"),
        ),
        None => Box::new(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", scene.background().name()),
        ),
    }
}

fn route(scene: &Scene) -> Path {
    let path = Path::new()
        .set("id", ROUTE_ID)
        .set("d", scene.route().description())
        .set("stroke", scene.pen_color().name())
        .set("stroke-width", scene.pen_width())
        .set("stroke-dasharray", scene.travel())
        .set("stroke-dashoffset", scene.travel())
        .set("stroke-linecap", "round")
        .set("fill", "transparent");
    if scene.is_pen_down() {
        path
    } else {
        path.set("stroke-opacity", 0)
    }
}

/// Holds the glyph along the path while it moves, then turns it to face the
/// heading.
fn settle(scene: &Scene) -> AnimateTransform {
    let angle = format!("{:.2}", glyph_rotation(scene));
    AnimateTransform::new()
        .set("attributeName", "transform")
        .set("type", "rotate")
        .set("from", angle.as_str())
        .set("to", angle.as_str())
        .set("begin", timing::duration_attr(scene.travel(), scene.speed()))
        .set("dur", SETTLE_DURATION)
        .set("fill", "freeze")
}

/// Circle, nose and name tag, drawn pointing along +x.
fn turtle(scene: &Scene) -> Group {
    let color = scene.pen_color().name();
    let mut label = Element::new("text");
    label.assign("x", 0);
    label.assign("y", -22);
    label.assign("fill", color);
    label.append(svg::node::Text::new(scene.label()));

    let body = Group::new()
        .set("transform", "rotate(0)")
        .add(
            Circle::new()
                .set("stroke", color)
                .set("stroke-width", 3)
                .set("fill", "transparent")
                .set("r", 12)
                .set("cx", 0)
                .set("cy", 0),
        )
        .add(
            Polygon::new()
                .set("points", "19,0 16,3 16,-3")
                .set("fill", color)
                .set("stroke", color)
                .set("stroke-width", 2),
        )
        .add(label)
        .add(settle(scene));

    Group::new()
        .set("id", TURTLE_ID)
        .set(
            "visibility",
            if scene.is_visible() { "visible" } else { "hidden" },
        )
        .add(body)
}

fn animation(scene: &Scene) -> (AnimateMotion, Animate) {
    let dur = timing::duration_attr(scene.travel(), scene.speed());
    let mut mpath = Element::new("mpath");
    mpath.assign("xlink:href", format!("#{}", ROUTE_ID));
    let motion = AnimateMotion::new()
        .set("xlink:href", format!("#{}", TURTLE_ID))
        .set("dur", dur.as_str())
        .set("begin", "0s")
        .set("rotate", "auto")
        .set("fill", "freeze")
        .add(mpath);
    let reveal = Animate::new()
        .set("xlink:href", format!("#{}", ROUTE_ID))
        .set("attributeName", "stroke-dashoffset")
        .set("begin", "0s")
        .set("to", 0)
        .set("dur", dur.as_str())
        .set("fill", "freeze");
    (motion, reveal)
}

/// Builds the SVG document tree for the scene.
pub fn to_document(scene: &Scene, mission: &MissionInfo) -> Document {
    let (width, height) = scene.window_size();
    let (motion, reveal) = animation(scene);
    let mut document = Document::new()
        .set("xmlns", XMLNS)
        .set("xmlns:xlink", XMLNS_XLINK)
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0, 0, VIEWBOX.0, VIEWBOX.1));
    document.append(background(scene, mission));
    document
        .add(route(scene))
        .add(turtle(scene))
        .add(motion)
        .add(reveal)
}

/// Renders the scene as a markup fragment: the SVG inside a container div.
/// Same scene in, same bytes out.
pub fn render(scene: &Scene, mission: &MissionInfo) -> String {
    let mut container = Element::new("div");
    container.assign("class", "roverdrive");
    container.append(to_document(scene, mission));
    container.to_string()
}
