use egui::{Pos2, Vec2};

/// A 2D affine transform stored as a 3x3 row-major matrix.
///
/// Composition follows canvas conventions: `a.then(b)` means "apply `b` in
/// the local space produced by `a`", so a chain of `translate`, `rotate`,
/// `scale` calls reads the same way a drawing surface receives them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: [[f32; 3]; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn translation(offset: Vec2) -> Self {
        Self {
            matrix: [[1.0, 0.0, offset.x], [0.0, 1.0, offset.y], [0.0, 0.0, 1.0]],
        }
    }

    /// Rotation by `radians`, clockwise on screen (y points down)
    pub fn rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            matrix: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub fn scaling(factor: f32) -> Self {
        Self {
            matrix: [[factor, 0.0, 0.0], [0.0, factor, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Append `local` so that it is applied before `self`
    pub fn then(&self, local: &Transform) -> Self {
        Self {
            matrix: multiply_matrices(&self.matrix, &local.matrix),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        self.then(&Self::translation(offset))
    }

    pub fn rotate(&self, radians: f32) -> Self {
        self.then(&Self::rotation(radians))
    }

    pub fn scale(&self, factor: f32) -> Self {
        self.then(&Self::scaling(factor))
    }

    pub fn apply(&self, point: Pos2) -> Pos2 {
        let m = &self.matrix;
        Pos2::new(
            m[0][0] * point.x + m[0][1] * point.y + m[0][2],
            m[1][0] * point.x + m[1][1] * point.y + m[1][2],
        )
    }

    /// Returns `None` when the transform is singular (zero scale)
    pub fn inverse(&self) -> Option<Self> {
        let m = &self.matrix;
        let det = m[0][0] * m[1][1] - m[0][1] * m[1][0];
        if det.abs() < f32::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let a = m[1][1] * inv_det;
        let b = -m[0][1] * inv_det;
        let c = -m[1][0] * inv_det;
        let d = m[0][0] * inv_det;
        Some(Self {
            matrix: [
                [a, b, -(a * m[0][2] + b * m[1][2])],
                [c, d, -(c * m[0][2] + d * m[1][2])],
                [0.0, 0.0, 1.0],
            ],
        })
    }

    /// Average linear scale factor, used to size strokes in device space
    pub fn approx_scale(&self) -> f32 {
        let m = &self.matrix;
        let sx = (m[0][0] * m[0][0] + m[1][0] * m[1][0]).sqrt();
        let sy = (m[0][1] * m[0][1] + m[1][1] * m[1][1]).sqrt();
        (sx + sy) * 0.5
    }
}

fn multiply_matrices(a: &[[f32; 3]; 3], b: &[[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut result = [[0.0; 3]; 3];
    for (i, row) in result.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    result
}

/// Save/restore stack of transforms shared by every drawing surface.
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Transform,
    saved: Vec<Transform>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    pub fn current(&self) -> &Transform {
        &self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Unbalanced restores fall back to the identity transform
    pub fn restore(&mut self) {
        self.current = self.saved.pop().unwrap_or(Transform::IDENTITY);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.current = self.current.translate(offset);
    }

    pub fn rotate(&mut self, radians: f32) {
        self.current = self.current.rotate(radians);
    }

    pub fn scale(&mut self, factor: f32) {
        self.current = self.current.scale(factor);
    }

    pub fn apply(&mut self, transform: &Transform) {
        self.current = self.current.then(transform);
    }

    pub fn reset(&mut self) {
        self.current = Transform::IDENTITY;
        self.saved.clear();
    }
}
