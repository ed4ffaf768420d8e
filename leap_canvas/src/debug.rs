//! Raw frame dumps for debugging.
//!
//! Subscribed behind a throttle: pretty-printing every frame of a 120 Hz
//! device would drown the log.

use serde::Serialize;
use shape_pool::{Frame, FrameHandler, HandlerError, Observation};
use tracing::debug;

/// Logs a frame's fingers and palms as pretty JSON at `debug` level.
#[derive(Debug, Default)]
pub struct FrameDump {
    dumped: u64,
}

impl FrameDump {
    pub fn new() -> Self {
        FrameDump::default()
    }

    /// Frames that produced at least one section.
    pub fn dumped(&self) -> u64 { self.dumped }
}

/// The `(label, json)` sections for one frame; empty lists are skipped.
pub fn dump_sections(frame: &Frame) -> Result<Vec<(&'static str, String)>, HandlerError> {
    let mut out = Vec::new();
    for (label, list) in [("pointables", &frame.fingers), ("hands", &frame.palms)] {
        if !list.is_empty() {
            out.push((label, pretty(list)?));
        }
    }
    Ok(out)
}

fn pretty(list: &[Observation]) -> Result<String, HandlerError> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    list.serialize(&mut ser).map_err(|e| HandlerError::Other(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| HandlerError::Other(e.to_string()))
}

impl FrameHandler for FrameDump {
    fn on_frame(&mut self, frame: &Frame) -> Result<(), HandlerError> {
        let sections = dump_sections(frame)?;
        if sections.is_empty() {
            return Ok(());
        }
        self.dumped += 1;
        for (label, json) in sections {
            debug!(frame = frame.id, "{}:\n{}", label, json);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_pool::Vec3;

    #[test]
    fn empty_frame_has_no_sections() {
        assert!(dump_sections(&Frame::new(1, 0)).unwrap().is_empty());
    }

    #[test]
    fn sections_follow_category() {
        let f = Frame::new(1, 0).with_palm(Vec3::new(1.0, 2.0, 3.0));
        let s = dump_sections(&f).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].0, "hands");
        let v: serde_json::Value = serde_json::from_str(&s[0].1).unwrap();
        assert_eq!(v[0]["position"]["z"], 3.0);
        assert_eq!(v[0]["category"], "palm");
    }

    #[test]
    fn json_indented_four_spaces() {
        let f = Frame::new(1, 0).with_finger(Vec3::default());
        let s = dump_sections(&f).unwrap();
        assert!(s[0].1.contains("\n    {"));
    }

    #[test]
    fn non_finite_positions_dump_as_null() {
        let f = Frame::new(1, 0).with_finger(Vec3::new(f64::NAN, f64::INFINITY, 1.0));
        let s = dump_sections(&f).unwrap();
        let v: serde_json::Value = serde_json::from_str(&s[0].1).unwrap();
        assert!(v[0]["position"]["x"].is_null());
        assert!(v[0]["position"]["y"].is_null());
        assert_eq!(v[0]["position"]["z"], 1.0);
    }

    #[test]
    fn counts_only_non_empty_frames() {
        let mut d = FrameDump::new();
        d.on_frame(&Frame::new(1, 0)).unwrap();
        d.on_frame(&Frame::new(2, 0).with_finger(Vec3::default())).unwrap();
        assert_eq!(d.dumped(), 1);
    }
}
