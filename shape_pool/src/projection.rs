//! Sensor space → drawing-surface projection.
//!
//! A fixed linear mapping: the sensor is assumed to cover ±200 mm on each
//! axis, `x` scales to half the surface width around the centre, `y` is
//! flipped so that `y = 0` sits on the bottom edge, and depth only affects
//! colour and size.

use crate::observation::Vec3;

/// Radius of a circle lying exactly on the depth-zero plane.
pub const DEFAULT_RADIUS:    f64 = 5.0;
/// Sensor half-range (mm) that maps onto half the surface.
pub const SENSOR_HALF_RANGE: f64 = 200.0;
/// Palm circles start this large.
pub const PALM_RADIUS:       f64 = 40.0;

// ════════════════════════════════════════════════════════════════════════════
// Color
// ════════════════════════════════════════════════════════════════════════════

/// Circle fill colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Blue,
    Purple,
}

impl Color {
    /// Default colour for points at or behind the depth-zero plane.
    pub const NEAR: Color = Color::Green;
    /// Default colour for points with negative depth.
    pub const FAR:  Color = Color::Red;

    /// CSS-style colour name.
    pub fn name(self) -> &'static str {
        match self {
            Color::Green  => "green",
            Color::Red    => "red",
            Color::Blue   => "blue",
            Color::Purple => "purple",
        }
    }

    /// Packed ARGB, opaque, using the CSS values for the named colours.
    pub fn argb(self) -> u32 {
        match self {
            Color::Green   => 0xFF00_8000,
            Color::Red     => 0xFFFF_0000,
            Color::Blue    => 0xFF00_00FF,
            Color::Purple  => 0xFF80_0080,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Inputs and outputs
// ════════════════════════════════════════════════════════════════════════════

/// Surface coordinates in pixels, origin top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub left: f64,
    pub top:  f64,
}

impl Point2 {
    pub const fn new(left: f64, top: f64) -> Self {
        Point2 { left, top }
    }
}

/// Everything the projection needs for one point.
///
/// `None` fields fall back to [`DEFAULT_RADIUS`], [`Color::NEAR`] and
/// [`Color::FAR`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectionInput {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius:     Option<f64>,
    pub near_color: Option<Color>,
    pub far_color:  Option<Color>,
}

impl ProjectionInput {
    /// Finger tips use every default.
    pub fn finger(p: Vec3) -> Self {
        ProjectionInput { x: p.x, y: p.y, z: p.z, ..Default::default() }
    }

    /// Palms are drawn larger and in blue/purple.
    pub fn palm(p: Vec3) -> Self {
        ProjectionInput {
            x: p.x,
            y: p.y,
            z: p.z,
            radius:     Some(PALM_RADIUS),
            near_color: Some(Color::Blue),
            far_color:  Some(Color::Purple),
        }
    }
}

/// Drawing parameters for one circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleParams {
    pub left:    f64,
    pub top:     f64,
    pub radius:  f64,
    pub fill:    Color,
    pub visible: bool,
}

impl CircleParams {
    pub fn position(&self) -> Point2 {
        Point2::new(self.left, self.top)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// project
// ════════════════════════════════════════════════════════════════════════════

/// Project a sensor point onto a surface whose reference centre is `center`.
///
/// * fill: `far_color` when `z < 0`, otherwise `near_color`
/// * `left = cx + x·(cx/200)`, `top = 2·cy − y·(cy/200)`
/// * `radius = radius_base + |z/3|`
/// * always visible
///
/// Non-finite input is not checked and flows straight into the output.
/// A NaN depth compares false against zero and therefore picks the near
/// colour.
pub fn project(input: ProjectionInput, center: Point2) -> CircleParams {
    let radius_base = input.radius.unwrap_or(DEFAULT_RADIUS);
    let fill = if input.z < 0.0 {
        input.far_color.unwrap_or(Color::FAR)
    } else {
        input.near_color.unwrap_or(Color::NEAR)
    };

    CircleParams {
        left:    center.left + input.x * (center.left / SENSOR_HALF_RANGE),
        top:     center.top * 2.0 - input.y * (center.top / SENSOR_HALF_RANGE),
        radius:  radius_base + (input.z / 3.0).abs(),
        fill,
        visible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, z: f64) -> ProjectionInput {
        ProjectionInput { x, y, z, ..Default::default() }
    }

    #[test]
    fn origin_maps_to_bottom_centre_with_defaults() {
        let c = Point2::new(400.0, 300.0);
        let p = project(at(0.0, 0.0, 0.0), c);
        assert_eq!(p.left, 400.0);
        // y = 0 lands on the bottom edge (2·cy)
        assert_eq!(p.top, 600.0);
        assert_eq!(p.radius, 5.0);
        assert_eq!(p.fill, Color::Green);
        assert!(p.visible);
    }

    #[test]
    fn origin_hits_centre_when_y_is_half_range() {
        let c = Point2::new(400.0, 300.0);
        let p = project(at(0.0, 200.0, 0.0), c);
        assert_eq!(p.position(), c);
    }

    #[test]
    fn negative_depth_is_red_and_larger() {
        let p = project(at(0.0, 0.0, -10.0), Point2::new(100.0, 50.0));
        assert_eq!(p.fill, Color::Red);
        assert!((p.radius - (5.0 + 10.0 / 3.0)).abs() < 1e-12);
        assert!((p.radius - 8.33).abs() < 0.01);
    }

    #[test]
    fn positive_depth_grows_radius_too() {
        let p = project(at(0.0, 0.0, 30.0), Point2::new(100.0, 50.0));
        assert_eq!(p.fill, Color::Green);
        assert_eq!(p.radius, 15.0);
    }

    #[test]
    fn scenario_center_100_50() {
        let p = project(at(200.0, 0.0, 0.0), Point2::new(100.0, 50.0));
        assert_eq!(p.left, 200.0);
        assert_eq!(p.top, 100.0);
        assert_eq!(p.fill, Color::Green);
        assert_eq!(p.radius, 5.0);
    }

    #[test]
    fn y_axis_is_flipped() {
        let c = Point2::new(100.0, 50.0);
        let low  = project(at(0.0,  50.0, 0.0), c);
        let high = project(at(0.0, 150.0, 0.0), c);
        assert!(high.top < low.top);
        assert_eq!(high.top, 100.0 - 150.0 * 0.25);
    }

    #[test]
    fn overrides_replace_defaults() {
        let c = Point2::new(100.0, 50.0);
        let near = project(ProjectionInput::palm(Vec3::new(0.0, 0.0, 3.0)), c);
        assert_eq!(near.fill, Color::Blue);
        assert_eq!(near.radius, 41.0);
        let far = project(ProjectionInput::palm(Vec3::new(0.0, 0.0, -3.0)), c);
        assert_eq!(far.fill, Color::Purple);
    }

    #[test]
    fn partial_override_keeps_other_default() {
        let input = ProjectionInput {
            z: -1.0,
            near_color: Some(Color::Blue),
            ..Default::default()
        };
        // far colour not overridden → default red
        assert_eq!(project(input, Point2::default()).fill, Color::Red);
    }

    #[test]
    fn non_finite_input_propagates() {
        let c = Point2::new(100.0, 50.0);
        let p = project(at(f64::NAN, f64::INFINITY, f64::NAN), c);
        assert!(p.left.is_nan());
        assert_eq!(p.top, f64::NEG_INFINITY);
        assert!(p.radius.is_nan());
        assert_eq!(p.fill, Color::Green);
    }

    #[test]
    fn color_names_and_argb() {
        assert_eq!(Color::Green.name(), "green");
        assert_eq!(Color::Purple.name(), "purple");
        assert_eq!(Color::Red.argb(), 0xFFFF_0000);
    }
}
