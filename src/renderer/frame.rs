//! Per-frame vertex list
//!
//! Effects and entities draw into a `FrameBuilder`; the pipeline uploads the
//! finished list once per frame.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

/// Accumulates triangles for one frame
#[derive(Debug, Default)]
pub struct FrameBuilder {
    vertices: Vec<Vertex>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything drawn so far (start of a new frame)
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        if radius <= 0.0 || color[3] <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::circle(center, radius, color, shapes::segments_for(radius)));
    }

    pub fn ring(&mut self, center: Vec2, inner: f32, outer: f32, color: [f32; 4]) {
        if outer <= inner || color[3] <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::ring(center, inner, outer, color, shapes::segments_for(outer)));
    }

    pub fn rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
        self.vertices.extend(shapes::rect(pos, size, color));
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.vertices.extend(shapes::triangle(a, b, c, color));
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invisible_shapes_skipped() {
        let mut frame = FrameBuilder::new();
        frame.circle(Vec2::ZERO, 0.0, [1.0; 4]);
        frame.circle(Vec2::ZERO, 5.0, [1.0, 1.0, 1.0, 0.0]);
        frame.ring(Vec2::ZERO, 5.0, 5.0, [1.0; 4]);
        assert!(frame.is_empty());

        frame.rect(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        assert_eq!(frame.vertices().len(), 6);
        frame.clear();
        assert!(frame.is_empty());
    }
}
