use nalgebra::Point3;

use super::{assemble, centroid, DieKind};
use crate::faces::FaceId;
use crate::model::DieModel;

pub fn create_d8() -> DieModel {
    let size = 0.5;

    let vertices = [
        Point3::new(0.0, size, 0.0),
        Point3::new(0.0, -size, 0.0),
        Point3::new(size, 0.0, 0.0),
        Point3::new(-size, 0.0, 0.0),
        Point3::new(0.0, 0.0, size),
        Point3::new(0.0, 0.0, -size),
    ];

    // One triangle per octant; values 1-4 around the top, 5-8 around the
    // bottom so opposite faces sum to 9.
    let faces: [(&[u32], FaceId); 8] = [
        (&[0, 4, 2], 1), // (+x, +y, +z)
        (&[0, 3, 4], 2), // (-x, +y, +z)
        (&[0, 2, 5], 3), // (+x, +y, -z)
        (&[0, 5, 3], 4), // (-x, +y, -z)
        (&[1, 2, 4], 8), // (+x, -y, +z)
        (&[1, 4, 3], 7), // (-x, -y, +z)
        (&[1, 5, 2], 6), // (+x, -y, -z)
        (&[1, 3, 5], 5), // (-x, -y, -z)
    ];

    let face_slices: Vec<&[u32]> = faces.iter().map(|(f, _)| *f).collect();
    let markers: Vec<(Point3<f32>, FaceId)> = faces
        .iter()
        .map(|(face, value)| (centroid(&vertices, face), *value))
        .collect();

    assemble(
        "D8",
        &vertices,
        &face_slices,
        &markers,
        DieKind::D8.scale(),
    )
}
