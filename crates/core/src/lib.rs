#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod point;
pub mod traits;

pub use bbox::Aabb;
pub use cloud::{Colors, PointCloud};
pub use point::{PointXYZ, PointXYZRGB};
pub use traits::{HasColor, HasPosition};
