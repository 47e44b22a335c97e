use crate::traits::{HasColor, HasPosition};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointXYZ {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointXYZRGB {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PointXYZ {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl PointXYZRGB {
    pub fn new(position: [f32; 3], color: [u8; 3]) -> Self {
        Self {
            x: position[0],
            y: position[1],
            z: position[2],
            r: color[0],
            g: color[1],
            b: color[2],
        }
    }
}

impl HasPosition for PointXYZ {
    fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl HasPosition for PointXYZRGB {
    fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl HasColor for PointXYZRGB {
    fn color(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
