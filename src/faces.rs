//! Face markers and the "which side is up" query.
//!
//! Marker nodes are named `FACE_<value>` (1–4 digits). Their rest positions
//! are baked relative to the model root once at build time; a face query then
//! only needs the body pose, not the whole node graph.

use nalgebra::{Isometry3, Point3};
use tracing::warn;

use crate::model::{DieModel, NodeId};

/// Face value parsed from a marker node name.
pub type FaceId = u32;

/// One face marker record.
#[derive(Clone, Debug)]
pub struct FaceMarker {
    /// Node the marker was parsed from.
    pub node: NodeId,
    /// Marker position relative to the model root, at rest pose.
    pub position: Point3<f32>,
    /// Face value encoded in the node name.
    pub value: FaceId,
}

/// Table of face markers for one die.
#[derive(Clone, Debug, Default)]
pub struct FaceMap {
    markers: Vec<FaceMarker>,
}

const MARKER_PREFIX: &str = "FACE_";

/// Parse a face value out of a node name. The pattern is `FACE_` followed by
/// one to four decimal digits, anywhere in the name; extra digits beyond the
/// fourth are ignored. Anything else is not a marker.
fn parse_marker_name(name: &str) -> Option<FaceId> {
    let start = name.find(MARKER_PREFIX)? + MARKER_PREFIX.len();
    let digits = &name[start..];
    let len = digits
        .chars()
        .take(4)
        .take_while(char::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }
    digits[..len].parse().ok()
}

impl FaceMap {
    /// Scan `model` for marker nodes and bake their root-relative positions.
    ///
    /// Sub-root geometry is static for the life of a die, so baking once is
    /// equivalent to re-walking the hierarchy per query.
    pub fn from_model(model: &DieModel) -> Self {
        let mut markers = Vec::new();
        for (id, node) in model.nodes() {
            let Some(value) = parse_marker_name(&node.name) else {
                continue;
            };
            let position = model
                .root_relative_transform(id)
                .transform_point(&Point3::origin());
            markers.push(FaceMarker {
                node: id,
                position,
                value,
            });
        }
        if markers.is_empty() {
            warn!("model has no FACE_* marker nodes; face queries will report 0");
        }
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[FaceMarker] {
        &self.markers
    }

    /// All face values in the table, in marker order.
    pub fn values(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.markers.iter().map(|m| m.value)
    }

    /// The face whose marker sits highest once `pose` is applied to the root.
    ///
    /// Exact ties keep the first maximum in marker order, so the result is
    /// deterministic. An empty table reports the sentinel value 0.
    pub fn face_up(&self, pose: &Isometry3<f32>) -> FaceId {
        let mut best_height = f32::NEG_INFINITY;
        let mut best_value = 0;

        for marker in &self.markers {
            let world = pose.transform_point(&marker.position);
            if world.y > best_height {
                best_height = world.y;
                best_value = marker.value;
            }
        }
        best_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};
    use std::f32::consts::PI;

    #[test]
    fn test_parse_marker_name() {
        assert_eq!(parse_marker_name("FACE_1"), Some(1));
        assert_eq!(parse_marker_name("FACE_20"), Some(20));
        assert_eq!(parse_marker_name("FACE_0042"), Some(42));
        // Pattern may sit anywhere in the name.
        assert_eq!(parse_marker_name("Cube_FACE_3"), Some(3));
        // Only the first four digits count.
        assert_eq!(parse_marker_name("FACE_12345"), Some(1234));

        assert_eq!(parse_marker_name("FACE_"), None);
        assert_eq!(parse_marker_name("FACE_x"), None);
        assert_eq!(parse_marker_name("face_3"), None);
        assert_eq!(parse_marker_name("Mesh"), None);
    }

    fn cube_marker_model() -> DieModel {
        // Six markers at the canonical cube face directions.
        let mut model = DieModel::new("d6");
        let dirs = [
            ("FACE_1", Vector3::new(0.0, -1.0, 0.0)),
            ("FACE_2", Vector3::new(0.0, 1.0, 0.0)),
            ("FACE_3", Vector3::new(1.0, 0.0, 0.0)),
            ("FACE_4", Vector3::new(-1.0, 0.0, 0.0)),
            ("FACE_5", Vector3::new(0.0, 0.0, 1.0)),
            ("FACE_6", Vector3::new(0.0, 0.0, -1.0)),
        ];
        for (name, dir) in dirs {
            let id = model.add_child(model.root(), name);
            model.node_mut(id).transform.translation = dir;
        }
        model
    }

    #[test]
    fn test_from_model_finds_all_markers() {
        let model = cube_marker_model();
        let map = FaceMap::from_model(&model);
        assert_eq!(map.len(), 6);
        let mut values: Vec<_> = map.values().collect();
        values.sort();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_face_up_identity_pose_picks_highest_marker() {
        let map = FaceMap::from_model(&cube_marker_model());
        // FACE_2 sits at (0, 1, 0); everything else is at y <= 0.
        assert_eq!(map.face_up(&Isometry3::identity()), 2);
    }

    #[test]
    fn test_face_up_tracks_rotation() {
        let map = FaceMap::from_model(&cube_marker_model());
        // Half a turn around Z brings FACE_1 (0, -1, 0) to the top.
        let pose = Isometry3::rotation(Vector3::z() * PI);
        assert_eq!(map.face_up(&pose), 1);

        // A quarter turn around Z lifts the +X marker (FACE_3) up.
        let quarter =
            Isometry3::from_parts(Vector3::zeros().into(), UnitQuaternion::from_axis_angle(
                &Vector3::z_axis(),
                PI / 2.0,
            ));
        assert_eq!(map.face_up(&quarter), 3);
    }

    #[test]
    fn test_face_up_tie_keeps_first_marker() {
        let mut model = DieModel::new("degenerate");
        for name in ["FACE_7", "FACE_8"] {
            let id = model.add_child(model.root(), name);
            model.node_mut(id).transform.translation = Vector3::new(0.0, 1.0, 0.0);
        }
        let map = FaceMap::from_model(&model);
        assert_eq!(map.face_up(&Isometry3::identity()), 7);
    }

    #[test]
    fn test_face_up_empty_table_reports_sentinel() {
        let map = FaceMap::from_model(&DieModel::new("bare"));
        assert!(map.is_empty());
        assert_eq!(map.face_up(&Isometry3::identity()), 0);
    }

    #[test]
    fn test_marker_positions_bake_nested_transforms() {
        let mut model = DieModel::new("die");
        let group = model.add_child(model.root(), "markers");
        model.node_mut(group).transform.translation = Vector3::new(0.0, 0.5, 0.0);
        let marker = model.add_child(group, "FACE_9");
        model.node_mut(marker).transform.translation = Vector3::new(0.0, 0.5, 0.0);

        // The root's own transform must not leak into the baked position.
        model.node_mut(model.root()).transform.translation = Vector3::new(100.0, 0.0, 0.0);

        let map = FaceMap::from_model(&model);
        assert_eq!(map.markers()[0].position, Point3::new(0.0, 1.0, 0.0));
    }
}
