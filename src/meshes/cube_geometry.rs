use glam::{Vec2, Vec3};

/// Corners of a unit cube centered at the origin
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
];

/// Four corner indices per face, in `Face::ALL` order (-z, +x, +z, -x, +y, -y)
pub const CUBE_FACES: [usize; 24] = [
    0, 1, 2, 3, //
    3, 2, 6, 7, //
    7, 6, 5, 4, //
    4, 5, 1, 0, //
    1, 5, 6, 2, //
    4, 0, 3, 7, //
];

/// Two triangles per quad, relative to the quad's first vertex
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];

pub fn face_corners(face_index: usize) -> [Vec3; 4] {
    let base = face_index * 4;
    [
        CUBE_VERTICES[CUBE_FACES[base]],
        CUBE_VERTICES[CUBE_FACES[base + 1]],
        CUBE_VERTICES[CUBE_FACES[base + 2]],
        CUBE_VERTICES[CUBE_FACES[base + 3]],
    ]
}
