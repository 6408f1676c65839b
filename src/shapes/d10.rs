use nalgebra::Point3;
use std::f32::consts::PI;

use super::{assemble, centroid, DieKind};
use crate::faces::FaceId;
use crate::model::DieModel;

/// A d10 is a pentagonal trapezohedron: two apexes and ten kite faces over
/// two offset rings of five vertices each.
pub fn create_d10() -> DieModel {
    let size = 0.5;
    let angle = 2.0 * PI / 5.0;

    // Vertex layout: 0 = top apex, 1 = bottom apex, 2..=6 upper ring,
    // 7..=11 lower ring (offset by half a step).
    let mut vertices = vec![
        Point3::new(0.0, size * 0.9, 0.0),
        Point3::new(0.0, -size * 0.9, 0.0),
    ];
    for i in 0..5 {
        let a = i as f32 * angle;
        vertices.push(Point3::new(
            a.cos() * size * 0.7,
            size * 0.3,
            a.sin() * size * 0.7,
        ));
    }
    for i in 0..5 {
        let a = (i as f32 + 0.5) * angle;
        vertices.push(Point3::new(
            a.cos() * size * 0.7,
            -size * 0.3,
            a.sin() * size * 0.7,
        ));
    }

    let upper = |i: u32| 2 + i % 5;
    let lower = |i: u32| 7 + i % 5;

    let mut faces: Vec<Vec<u32>> = Vec::new();
    let mut values: Vec<FaceId> = Vec::new();
    for i in 0..5u32 {
        // Upper kite: apex, two adjacent upper verts, the lower vert between
        // them. Odd values ring the top, even values the bottom.
        faces.push(vec![0, upper(i), lower(i), upper(i + 1)]);
        values.push(i * 2 + 1);

        faces.push(vec![1, lower(i + 1), upper(i + 1), lower(i)]);
        values.push(i * 2 + 2);
    }

    let face_slices: Vec<&[u32]> = faces.iter().map(Vec::as_slice).collect();
    let markers: Vec<(Point3<f32>, FaceId)> = face_slices
        .iter()
        .zip(&values)
        .map(|(face, &value)| (centroid(&vertices, face), value))
        .collect();

    assemble(
        "D10",
        &vertices,
        &face_slices,
        &markers,
        DieKind::D10.scale(),
    )
}
