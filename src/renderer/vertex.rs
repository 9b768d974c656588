//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Screen-space pixels (origin top-left, y down) until uploaded
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Map a screen-pixel vertex (origin top-left, y down) into clip space
    pub fn to_ndc(&self, screen: [f32; 2]) -> Self {
        let [w, h] = screen;
        if w <= 0.0 || h <= 0.0 {
            return *self;
        }
        let [x, y] = self.position;
        Self::new(x / w * 2.0 - 1.0, 1.0 - y / h * 2.0, self.color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Fixed colors for non-configurable scene elements
pub mod colors {
    pub const LANE_DIVIDER: [f32; 4] = [1.0, 1.0, 1.0, 0.08];
    pub const OBSTACLE_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const PLAYER_CORE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_ndc_corners() {
        let screen = [400.0, 800.0];
        let top_left = Vertex::new(0.0, 0.0, [1.0; 4]).to_ndc(screen);
        let bottom_right = Vertex::new(400.0, 800.0, [1.0; 4]).to_ndc(screen);
        let center = Vertex::new(200.0, 400.0, [1.0; 4]).to_ndc(screen);
        assert_eq!(top_left.position, [-1.0, 1.0]);
        assert_eq!(bottom_right.position, [1.0, -1.0]);
        assert_eq!(center.position, [0.0, 0.0]);
    }

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
    }
}
