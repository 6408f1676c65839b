//! Procedural die models.
//!
//! Each submodule builds a complete [`DieModel`] for one die kind: an indexed
//! triangle mesh node plus `FACE_n` marker nodes at the spots used to read
//! the rolled value.

pub mod d10;
pub mod d12;
pub mod d20;
pub mod d4;
pub mod d6;
pub mod d8;

use nalgebra::{Point3, Vector3};

use crate::faces::FaceId;
use crate::model::{DieModel, MeshData};

pub use d10::create_d10;
pub use d12::create_d12;
pub use d20::create_d20;
pub use d4::create_d4;
pub use d6::create_d6;
pub use d8::create_d8;

/// All supported die kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DieKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl DieKind {
    /// Number of faces, which is also the highest face value.
    pub fn face_count(&self) -> u32 {
        match self {
            DieKind::D4 => 4,
            DieKind::D6 => 6,
            DieKind::D8 => 8,
            DieKind::D10 => 10,
            DieKind::D12 => 12,
            DieKind::D20 => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DieKind::D4 => "D4",
            DieKind::D6 => "D6",
            DieKind::D8 => "D8",
            DieKind::D10 => "D10",
            DieKind::D12 => "D12",
            DieKind::D20 => "D20",
        }
    }

    pub fn parse(s: &str) -> Option<DieKind> {
        match s.to_lowercase().as_str() {
            "d4" => Some(DieKind::D4),
            "d6" => Some(DieKind::D6),
            "d8" => Some(DieKind::D8),
            "d10" => Some(DieKind::D10),
            "d12" => Some(DieKind::D12),
            "d20" => Some(DieKind::D20),
            _ => None,
        }
    }

    /// Physical density of the die. Larger dice are heavier, which changes
    /// how hard they bounce and how quickly they come to rest.
    pub fn density(&self) -> f32 {
        match self {
            DieKind::D4 => 1.0,
            DieKind::D6 => 1.5,
            DieKind::D8 => 1.8,
            DieKind::D10 => 2.0,
            DieKind::D12 => 2.5,
            DieKind::D20 => 3.0,
        }
    }

    /// Uniform scale applied to the mesh and markers; affects both the
    /// visual size and the collision volume.
    pub fn scale(&self) -> f32 {
        match self {
            DieKind::D4 => 0.9,
            DieKind::D6 => 1.0,
            DieKind::D8 => 1.0,
            DieKind::D10 => 1.05,
            DieKind::D12 => 1.1,
            DieKind::D20 => 1.2,
        }
    }

    /// Build the visual model for this kind.
    pub fn model(&self) -> DieModel {
        match self {
            DieKind::D4 => create_d4(),
            DieKind::D6 => create_d6(),
            DieKind::D8 => create_d8(),
            DieKind::D10 => create_d10(),
            DieKind::D12 => create_d12(),
            DieKind::D20 => create_d20(),
        }
    }
}

/// Average of a polygonal face's vertices.
pub(crate) fn centroid(positions: &[Point3<f32>], face: &[u32]) -> Point3<f32> {
    let sum = face
        .iter()
        .fold(Vector3::zeros(), |acc, &i| acc + positions[i as usize].coords);
    Point3::from(sum / face.len() as f32)
}

/// Assemble a die model from a vertex table, polygonal faces and markers.
///
/// Every face is re-wound to point away from the origin before fan
/// triangulation, so authored tables do not need a consistent vertex order
/// for the trimesh volume to integrate positively. `scale` multiplies both
/// the geometry and the marker positions.
pub(crate) fn assemble(
    name: &str,
    positions: &[Point3<f32>],
    faces: &[&[u32]],
    markers: &[(Point3<f32>, FaceId)],
    scale: f32,
) -> DieModel {
    let mut indices: Vec<u32> = Vec::new();
    for face in faces {
        let a = positions[face[0] as usize];
        let b = positions[face[1] as usize];
        let c = positions[face[2] as usize];
        let normal = (b - a).cross(&(c - a));
        let outward = normal.dot(&centroid(positions, face).coords) >= 0.0;

        let order: Vec<u32> = if outward {
            face.to_vec()
        } else {
            face.iter().rev().copied().collect()
        };
        for i in 1..order.len() - 1 {
            indices.extend_from_slice(&[order[0], order[i], order[i + 1]]);
        }
    }

    let scaled: Vec<Point3<f32>> = positions
        .iter()
        .map(|p| Point3::from(p.coords * scale))
        .collect();

    let mut model = DieModel::new(name);
    let mesh_id = model.add_child(model.root(), format!("{name}_Mesh"));
    model.node_mut(mesh_id).mesh = Some(MeshData {
        positions: scaled,
        indices: Some(indices),
    });

    for (position, value) in markers {
        let id = model.add_child(model.root(), format!("FACE_{value}"));
        model.node_mut(id).transform.translation = position.coords * scale;
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::FaceMap;
    use nalgebra::Point3;

    fn check_die(kind: DieKind) {
        let model = kind.model();
        let n = kind.face_count();

        let mesh_id = model.mesh_node().unwrap_or_else(|| {
            panic!("{} model should carry a mesh node", kind.name())
        });
        let mesh = model.node(mesh_id).mesh.as_ref().expect("mesh data");
        assert!(!mesh.positions.is_empty());
        let indices = mesh.indices.as_ref().expect("die meshes are indexed");
        assert_eq!(indices.len() % 3, 0, "{} index count", kind.name());

        let map = FaceMap::from_model(&model);
        assert_eq!(
            map.len(),
            n as usize,
            "{} should have {} face markers",
            kind.name(),
            n
        );
        let mut values: Vec<_> = map.values().collect();
        values.sort();
        let expected: Vec<u32> = (1..=n).collect();
        assert_eq!(values, expected, "{} marker values", kind.name());
    }

    #[test]
    fn test_d4_model() {
        check_die(DieKind::D4);
    }

    #[test]
    fn test_d6_model() {
        check_die(DieKind::D6);
    }

    #[test]
    fn test_d8_model() {
        check_die(DieKind::D8);
    }

    #[test]
    fn test_d10_model() {
        check_die(DieKind::D10);
    }

    #[test]
    fn test_d12_model() {
        check_die(DieKind::D12);
    }

    #[test]
    fn test_d20_model() {
        check_die(DieKind::D20);
    }

    #[test]
    fn test_d6_mesh_shares_vertices() {
        let model = create_d6();
        let mesh_id = model.mesh_node().expect("mesh node");
        let mesh = model.node(mesh_id).mesh.as_ref().expect("mesh data");
        // 8 corners, 6 quads fan-split into 12 triangles.
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.indices.as_ref().map(Vec::len), Some(36));
    }

    #[test]
    fn test_die_kind_face_count() {
        assert_eq!(DieKind::D4.face_count(), 4);
        assert_eq!(DieKind::D6.face_count(), 6);
        assert_eq!(DieKind::D8.face_count(), 8);
        assert_eq!(DieKind::D10.face_count(), 10);
        assert_eq!(DieKind::D12.face_count(), 12);
        assert_eq!(DieKind::D20.face_count(), 20);
    }

    #[test]
    fn test_die_kind_parse() {
        assert_eq!(DieKind::parse("d6"), Some(DieKind::D6));
        assert_eq!(DieKind::parse("D6"), Some(DieKind::D6));
        assert_eq!(DieKind::parse("d20"), Some(DieKind::D20));
        assert_eq!(DieKind::parse("d100"), None);
        assert_eq!(DieKind::parse("invalid"), None);
        assert_eq!(DieKind::parse(""), None);
    }

    #[test]
    fn test_die_kind_density_ordering() {
        // Small dice are lighter than big ones.
        assert!(DieKind::D4.density() < DieKind::D6.density());
        assert!(DieKind::D6.density() < DieKind::D8.density());
        assert!(DieKind::D8.density() < DieKind::D10.density());
        assert!(DieKind::D10.density() < DieKind::D12.density());
        assert!(DieKind::D12.density() < DieKind::D20.density());
    }

    #[test]
    fn test_die_kind_scale_ordering() {
        assert!(DieKind::D4.scale() <= DieKind::D6.scale());
        assert!(DieKind::D6.scale() <= DieKind::D10.scale());
        assert!(DieKind::D10.scale() <= DieKind::D12.scale());
        assert!(DieKind::D12.scale() <= DieKind::D20.scale());
        assert_eq!(DieKind::D6.scale(), 1.0);
    }

    #[test]
    fn test_assemble_rewinds_inward_faces() {
        // A single triangle wound towards the origin must come out flipped.
        let positions = [
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let faces: [&[u32]; 1] = [&[0, 1, 2]];
        let model = assemble("tri", &positions, &faces, &[], 1.0);
        let mesh_id = model.mesh_node().expect("mesh node");
        let mesh = model.node(mesh_id).mesh.as_ref().expect("mesh data");

        // (1-0)x(2-0) for [0,1,2] points towards -z, i.e. at the origin.
        assert_eq!(mesh.indices.as_ref().expect("indices"), &vec![2, 1, 0]);
    }
}
