use nalgebra::Point3;

use super::{assemble, centroid, DieKind};
use crate::faces::FaceId;
use crate::model::DieModel;

/// Icosahedron: 12 vertices on three golden rectangles, 20 triangular faces.
pub fn create_d20() -> DieModel {
    let size = 0.5;
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let s = size * 0.35;

    let vertices: Vec<Point3<f32>> = [
        [0.0, 1.0, phi],
        [0.0, -1.0, phi],
        [0.0, 1.0, -phi],
        [0.0, -1.0, -phi],
        [1.0, phi, 0.0],
        [-1.0, phi, 0.0],
        [1.0, -phi, 0.0],
        [-1.0, -phi, 0.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, 1.0],
        [phi, 0.0, -1.0],
        [-phi, 0.0, -1.0],
    ]
    .iter()
    .map(|v| Point3::new(v[0] * s, v[1] * s, v[2] * s))
    .collect();

    let faces: [&[u32]; 20] = [
        &[0, 1, 8],
        &[0, 8, 4],
        &[0, 4, 5],
        &[0, 5, 9],
        &[0, 9, 1],
        &[1, 6, 8],
        &[8, 6, 10],
        &[8, 10, 4],
        &[4, 10, 2],
        &[4, 2, 5],
        &[5, 2, 11],
        &[5, 11, 9],
        &[9, 11, 7],
        &[9, 7, 1],
        &[1, 7, 6],
        &[3, 6, 7],
        &[3, 10, 6],
        &[3, 2, 10],
        &[3, 11, 2],
        &[3, 7, 11],
    ];

    let markers: Vec<(Point3<f32>, FaceId)> = faces
        .iter()
        .enumerate()
        .map(|(i, face)| (centroid(&vertices, face), (i + 1) as FaceId))
        .collect();

    assemble("D20", &vertices, &faces, &markers, DieKind::D20.scale())
}
