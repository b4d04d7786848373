//! Translucent overlay that visualizes a detected plane.

use ardraw_math::{consts, Mat4, Vec3};
use ardraw_scene::{Geometry, Node};

use crate::SessionConfig;

pub struct Floor;

impl Floor {
    pub const NAME: &'static str = "floor";

    /// Overlay node sized to the plane's extent and laid flat.
    pub fn node(extent: Vec3, config: &SessionConfig) -> Node {
        Node::new(Self::NAME)
            .with_geometry(Geometry::Plane {
                width: extent.x,
                height: extent.z,
            })
            .with_transform(Mat4::from_rotation_x(-consts::FRAC_PI_2))
            .with_color(config.plane_overlay_color)
            .with_opacity(config.plane_overlay_opacity)
    }

    /// Follow a refined plane estimate. Nodes without plane geometry are
    /// left alone.
    pub fn update(node: &mut Node, center: Vec3, extent: Vec3) {
        let Geometry::Plane { width, height } = &mut node.geometry else {
            return;
        };
        *width = extent.x;
        *height = extent.z;
        node.set_position(Vec3::new(center.x, 0.0, center.z));
    }
}
