use nalgebra::Point3;

use super::{assemble, DieKind};
use crate::model::DieModel;

pub fn create_d6() -> DieModel {
    let size = 0.6;
    let h = size / 2.0;

    let vertices = [
        Point3::new(-h, -h, -h),
        Point3::new(h, -h, -h),
        Point3::new(h, h, -h),
        Point3::new(-h, h, -h),
        Point3::new(-h, -h, h),
        Point3::new(h, -h, h),
        Point3::new(h, h, h),
        Point3::new(-h, h, h),
    ];

    let faces: [&[u32]; 6] = [
        &[0, 1, 2, 3], // -Z
        &[4, 7, 6, 5], // +Z
        &[0, 4, 5, 1], // -Y
        &[2, 6, 7, 3], // +Y
        &[1, 5, 6, 2], // +X
        &[0, 3, 7, 4], // -X
    ];

    // Opposite faces sum to 7: 6 up / 1 down, 3 right / 4 left, 2 front /
    // 5 back.
    let markers = [
        (Point3::new(0.0, h, 0.0), 6),
        (Point3::new(0.0, -h, 0.0), 1),
        (Point3::new(h, 0.0, 0.0), 3),
        (Point3::new(-h, 0.0, 0.0), 4),
        (Point3::new(0.0, 0.0, h), 2),
        (Point3::new(0.0, 0.0, -h), 5),
    ];

    assemble("D6", &vertices, &faces, &markers, DieKind::D6.scale())
}
