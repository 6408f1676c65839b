use nalgebra::Point3;

use super::{assemble, centroid, DieKind};
use crate::faces::FaceId;
use crate::model::DieModel;

/// Dodecahedron from the classic cube + three golden rectangles
/// construction; 12 pentagonal faces.
pub fn create_d12() -> DieModel {
    let size = 0.5;
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let inv_phi = 1.0 / phi;
    let s = size * 0.4;

    let vertices = [
        // Cube corners (0..=7)
        Point3::new(-s, -s, -s),
        Point3::new(-s, -s, s),
        Point3::new(-s, s, -s),
        Point3::new(-s, s, s),
        Point3::new(s, -s, -s),
        Point3::new(s, -s, s),
        Point3::new(s, s, -s),
        Point3::new(s, s, s),
        // Golden rectangles on each axis (8..=19)
        Point3::new(0.0, -phi * s, -inv_phi * s),
        Point3::new(0.0, -phi * s, inv_phi * s),
        Point3::new(0.0, phi * s, -inv_phi * s),
        Point3::new(0.0, phi * s, inv_phi * s),
        Point3::new(-inv_phi * s, 0.0, -phi * s),
        Point3::new(-inv_phi * s, 0.0, phi * s),
        Point3::new(inv_phi * s, 0.0, -phi * s),
        Point3::new(inv_phi * s, 0.0, phi * s),
        Point3::new(-phi * s, -inv_phi * s, 0.0),
        Point3::new(-phi * s, inv_phi * s, 0.0),
        Point3::new(phi * s, -inv_phi * s, 0.0),
        Point3::new(phi * s, inv_phi * s, 0.0),
    ];

    // Each pentagon straddles one short edge of a golden rectangle. Listed
    // roughly top to bottom; low values sit high, high values sit low.
    let faces: [&[u32]; 12] = [
        &[10, 11, 7, 19, 6],  // top, leaning +x
        &[11, 10, 2, 17, 3],  // top, leaning -x
        &[14, 12, 2, 10, 6],  // upper back
        &[15, 13, 3, 11, 7],  // upper front
        &[16, 17, 3, 13, 1],  // left front
        &[17, 16, 0, 12, 2],  // left back
        &[19, 18, 5, 15, 7],  // right front
        &[18, 19, 6, 14, 4],  // right back
        &[12, 14, 4, 8, 0],   // lower back
        &[13, 15, 5, 9, 1],   // lower front
        &[9, 8, 4, 18, 5],    // bottom, leaning +x
        &[8, 9, 1, 16, 0],    // bottom, leaning -x
    ];
    let values: [FaceId; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

    let markers: Vec<(Point3<f32>, FaceId)> = faces
        .iter()
        .zip(values)
        .map(|(face, value)| (centroid(&vertices, face), value))
        .collect();

    assemble("D12", &vertices, &faces, &markers, DieKind::D12.scale())
}
