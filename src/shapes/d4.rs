use nalgebra::Point3;

use super::{assemble, DieKind};
use crate::model::DieModel;

pub fn create_d4() -> DieModel {
    let size = 0.8;
    let h = size * (2.0_f32 / 3.0).sqrt();

    let vertices = [
        Point3::new(0.0, h, 0.0),
        Point3::new(-size / 2.0, 0.0, size * 0.577),
        Point3::new(size / 2.0, 0.0, size * 0.577),
        Point3::new(0.0, 0.0, -size * 0.577),
    ];

    let faces: [&[u32]; 4] = [
        &[1, 3, 2], // base
        &[0, 1, 2],
        &[0, 2, 3],
        &[0, 3, 1],
    ];

    // A d4 is read from the face resting on the floor, so each face's marker
    // sits at the vertex opposite that face.
    let markers = [
        (vertices[0], 1),
        (vertices[3], 2),
        (vertices[1], 3),
        (vertices[2], 4),
    ];

    assemble("D4", &vertices, &faces, &markers, DieKind::D4.scale())
}
