//! Static vertex data shared by the demos, plus the sky dome generator.

use std::collections::HashMap;

/// Floats per position.
pub const VEC3: usize = 3;

#[rustfmt::skip]
pub const CUBE_POSITIONS: [f32; 108] = [
    -1.0,  1.0, -1.0,  -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,   1.0, -1.0,  1.0,   1.0,  1.0, -1.0,
     1.0, -1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
     1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,   1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,  -1.0, -1.0, -1.0,  -1.0,  1.0,  1.0,
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,  -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,
    -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
];

#[rustfmt::skip]
pub const PYRAMID_POSITIONS: [f32; 54] = [
    // front
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   0.0,  1.0,  0.0,
    // right
     1.0, -1.0,  1.0,   1.0, -1.0, -1.0,   0.0,  1.0,  0.0,
    // back
     1.0, -1.0, -1.0,  -1.0, -1.0, -1.0,   0.0,  1.0,  0.0,
    // left
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,   0.0,  1.0,  0.0,
    // base
    -1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,  -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,
];

#[rustfmt::skip]
pub const CUBE_UNIT: [f32; 108] = [
    -0.5, -0.5, -0.5,   0.5, -0.5, -0.5,   0.5,  0.5, -0.5,
     0.5,  0.5, -0.5,  -0.5,  0.5, -0.5,  -0.5, -0.5, -0.5,
    -0.5, -0.5,  0.5,   0.5, -0.5,  0.5,   0.5,  0.5,  0.5,
     0.5,  0.5,  0.5,  -0.5,  0.5,  0.5,  -0.5, -0.5,  0.5,
    -0.5,  0.5,  0.5,  -0.5,  0.5, -0.5,  -0.5, -0.5, -0.5,
    -0.5, -0.5, -0.5,  -0.5, -0.5,  0.5,  -0.5,  0.5,  0.5,
     0.5,  0.5,  0.5,   0.5,  0.5, -0.5,   0.5, -0.5, -0.5,
     0.5, -0.5, -0.5,   0.5, -0.5,  0.5,   0.5,  0.5,  0.5,
    -0.5, -0.5, -0.5,   0.5, -0.5, -0.5,   0.5, -0.5,  0.5,
     0.5, -0.5,  0.5,  -0.5, -0.5,  0.5,  -0.5, -0.5, -0.5,
    -0.5,  0.5, -0.5,   0.5,  0.5, -0.5,   0.5,  0.5,  0.5,
     0.5,  0.5,  0.5,  -0.5,  0.5,  0.5,  -0.5,  0.5, -0.5,
];

/// Position followed by texture coordinates.
#[rustfmt::skip]
pub const TEXTURED_CUBE: [f32; 180] = [
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,

    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,

    -0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 0.0,

     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,

    -0.5, -0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 1.0,

    -0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

#[rustfmt::skip]
pub const SKYBOX_POSITIONS: [f32; 108] = [
    -1.0,  1.0, -1.0,  -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,

    -1.0, -1.0,  1.0,  -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,  -1.0, -1.0,  1.0,

     1.0, -1.0, -1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,

    -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,

    -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,

    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,   1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,
];

/// Shifted on the x axis by the `offset` uniform.
#[rustfmt::skip]
pub const TRIANGLE: [f32; 9] = [
     0.25, -0.25, 0.0,
    -0.25, -0.25, 0.0,
     0.25,  0.25, 0.0,
];

#[rustfmt::skip]
pub const BLOB_QUAD_POSITIONS: [f32; 18] = [
    -0.8, -0.8, 0.0,   0.8, -0.8, 0.0,   0.8,  0.8, 0.0,
    -0.8, -0.8, 0.0,   0.8,  0.8, 0.0,  -0.8,  0.8, 0.0,
];

#[rustfmt::skip]
pub const BLOB_QUAD_TEX_COORDS: [f32; 12] = [
    0.0, 0.0,   1.0, 0.0,   1.0, 1.0,
    0.0, 0.0,   1.0, 1.0,   0.0, 1.0,
];

/// Interleaves [`BLOB_QUAD_POSITIONS`] and [`BLOB_QUAD_TEX_COORDS`].
pub fn blob_quad() -> Vec<f32> {
    BLOB_QUAD_POSITIONS
        .chunks_exact(3)
        .zip(BLOB_QUAD_TEX_COORDS.chunks_exact(2))
        .flat_map(|(p, t)| p.iter().chain(t.iter()).copied())
        .collect()
}

/// Collapses bit-identical vertices of `stride` floats into an index buffer.
pub fn index_vertices(data: &[f32], stride: usize) -> (Vec<f32>, Vec<u32>) {
    if stride == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut seen: HashMap<Vec<u32>, u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut indices = Vec::with_capacity(data.len() / stride);

    for vertex in data.chunks_exact(stride) {
        let key: Vec<u32> = vertex.iter().map(|f| f.to_bits()).collect();
        let next = seen.len() as u32;

        let index = *seen.entry(key).or_insert_with(|| {
            vertices.extend_from_slice(vertex);
            next
        });
        indices.push(index);
    }

    (vertices, indices)
}

/// UV sphere stored as one triangle strip per stack.
pub struct Sphere {
    vertices: Vec<f32>,
    row_len: usize,
    rows: usize,
}

impl Sphere {
    pub fn new(radius: f32, stacks: usize, slices: usize) -> Self {
        if stacks == 0 || slices == 0 {
            return Self {
                vertices: Vec::new(),
                row_len: 0,
                rows: 0,
            };
        }

        let pi = std::f32::consts::PI;
        let row_len = (slices + 1) * 2;
        let mut vertices = Vec::with_capacity(stacks * row_len * VEC3);

        for i in 0..stacks {
            let phi1 = pi * i as f32 / stacks as f32;
            let phi2 = pi * (i + 1) as f32 / stacks as f32;

            for j in 0..=slices {
                let theta = 2.0 * pi * j as f32 / slices as f32;

                for phi in [phi1, phi2] {
                    vertices.push(radius * phi.sin() * theta.cos());
                    vertices.push(radius * phi.cos());
                    vertices.push(radius * phi.sin() * theta.sin());
                }
            }
        }

        Self {
            vertices,
            row_len,
            rows: stacks,
        }
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VEC3
    }

    /// `(first, count)` for each strip, in vertices.
    pub fn strips(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).map(|r| (r * self.row_len, self.row_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_quad_is_interleaved() {
        let quad = blob_quad();

        assert_eq!(quad.len(), 30);
        assert_eq!(&quad[0..5], &[-0.8, -0.8, 0.0, 0.0, 0.0]);
        assert_eq!(&quad[25..30], &[-0.8, 0.8, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn skybox_has_eight_corners() {
        let (vertices, indices) = index_vertices(&SKYBOX_POSITIONS, VEC3);

        assert_eq!(vertices.len(), 8 * VEC3);
        assert_eq!(indices.len(), 36);

        for (i, index) in indices.iter().enumerate() {
            let at = *index as usize * VEC3;
            assert_eq!(&vertices[at..at + VEC3], &SKYBOX_POSITIONS[i * VEC3..(i + 1) * VEC3]);
        }
    }

    #[test]
    fn zero_stride_indexes_nothing() {
        assert_eq!(index_vertices(&[1.0, 2.0], 0), (Vec::new(), Vec::new()));
    }

    #[test]
    fn sphere_layout() {
        let sphere = Sphere::new(10.0, 4, 8);

        assert_eq!(sphere.vertex_count(), 4 * 9 * 2);

        let strips: Vec<_> = sphere.strips().collect();
        assert_eq!(strips.len(), 4);
        assert_eq!(strips[1], (18, 18));

        let (first, count) = *strips.last().unwrap();
        assert_eq!(first + count, sphere.vertex_count());
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = Sphere::new(10.0, 16, 16);

        for v in sphere.vertices().chunks_exact(3) {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 10.0).abs() < 1e-3);
        }

        // first strip starts at the north pole, last ends at the south pole
        assert!((sphere.vertices()[1] - 10.0).abs() < 1e-4);
        let last_y = sphere.vertices()[sphere.vertices().len() - 2];
        assert!((last_y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_sphere_is_empty() {
        let sphere = Sphere::new(1.0, 0, 12);

        assert_eq!(sphere.vertex_count(), 0);
        assert_eq!(sphere.strips().count(), 0);
    }
}
