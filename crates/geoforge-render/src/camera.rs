//! Camera over the geo grid.

use bytemuck::{Pod, Zeroable};
use cgmath::{Deg, Matrix4, Point3, SquareMatrix, Vector3, perspective};

/// Depth-range correction: cgmath produces OpenGL clip space (z in [-1, 1]);
/// wgpu expects z in [0, 1].
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Perspective camera state, owned by the editor shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(eye: Point3<f32>, target: Point3<f32>, aspect: f32) -> Self {
        Self {
            eye,
            target,
            up: Vector3::unit_y(),
            aspect,
            fovy_deg: 60.0,
            znear: 0.1,
            zfar: 2048.0,
        }
    }

    /// Combined view-projection matrix in wgpu clip space.
    pub fn view_proj(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = perspective(Deg(self.fovy_deg), self.aspect, self.znear, self.zfar);
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

/// GPU-side camera matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn identity() -> Self {
        Self {
            view_proj: Matrix4::<f32>::identity().into(),
        }
    }

    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj().into(),
        }
    }
}
