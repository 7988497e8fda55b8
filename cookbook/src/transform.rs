use cgmath::{InnerSpace, Matrix3, Matrix4, Point3, Rad, SquareMatrix, Vector3};
use rand::Rng;

pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

pub fn multiply(a: Matrix4<f32>, b: Matrix4<f32>) -> Matrix4<f32> {
    a * b
}

/// Post-multiplies `m` by a translation, so the translation applies before `m`.
pub fn translate(m: Matrix4<f32>, x: f32, y: f32, z: f32) -> Matrix4<f32> {
    m * Matrix4::from_translation(Vector3::new(x, y, z))
}

/// Post-multiplies `m` by a rotation of `angle` radians around `axis`.
///
/// The axis does not need to be normalized. A zero axis leaves `m` untouched.
pub fn rotate(m: Matrix4<f32>, angle: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    if axis.magnitude2() == 0.0 {
        return m;
    }

    m * Matrix4::from_axis_angle(axis.normalize(), Rad(angle))
}

pub fn scale(m: Matrix4<f32>, x: f32, y: f32, z: f32) -> Matrix4<f32> {
    m * Matrix4::from_nonuniform_scale(x, y, z)
}

/// OpenGL style projection into `[-1, 1]` clip space. `fovy` is in radians.
#[rustfmt::skip]
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let f = 1.0 / (fovy / 2.0).tan();
    let nf = 1.0 / (near - far);

    Matrix4::new(
        f / aspect, 0.0, 0.0,                    0.0,
        0.0,        f,   0.0,                    0.0,
        0.0,        0.0, (far + near) * nf,      -1.0,
        0.0,        0.0, 2.0 * far * near * nf,  0.0,
    )
}

pub fn look_at(eye: Vector3<f32>, center: Vector3<f32>, up: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::look_at_rh(
        Point3::new(eye.x, eye.y, eye.z),
        Point3::new(center.x, center.y, center.z),
        up,
    )
}

/// Keeps only the rotational part of a view matrix, used for skyboxes.
pub fn strip_translation(view: Matrix4<f32>) -> Matrix4<f32> {
    let rot = Matrix3::from_cols(view.x.truncate(), view.y.truncate(), view.z.truncate());

    Matrix4::from(rot)
}

pub fn to_cols_array(m: &Matrix4<f32>) -> [f32; 16] {
    *AsRef::<[f32; 16]>::as_ref(m)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Uniform float in `[min, max)`. Degenerate ranges return `min`.
pub fn random_float<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min.is_nan() || max.is_nan() || min >= max {
        return min;
    }

    rng.gen_range(min..max)
}

/// Uniform integer in `[min, max]`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }

    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Vector4, Zero};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn approx(a: &Matrix4<f32>, b: &Matrix4<f32>) -> bool {
        to_cols_array(a)
            .iter()
            .zip(to_cols_array(b).iter())
            .all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn translate_moves_origin() {
        let m = translate(identity(), 1.0, 2.0, 3.0);

        assert_eq!(m * Vector4::new(0.0, 0.0, 0.0, 1.0), Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(to_cols_array(&m)[12..15], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn transforms_apply_in_call_order_from_the_right() {
        let rot = rotate(identity(), std::f32::consts::FRAC_PI_2, Vector3::unit_z());
        let m = translate(rot, 1.0, 0.0, 0.0);

        let p = m * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert!((p.x - 0.0).abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_normalizes_axis() {
        let a = rotate(identity(), 1.0, Vector3::new(0.0, 5.0, 0.0));
        let b = Matrix4::from_angle_y(Rad(1.0));

        assert!(approx(&a, &b));
    }

    #[test]
    fn rotate_zero_axis_is_noop() {
        let m = translate(identity(), 4.0, 0.0, 0.0);

        assert_eq!(rotate(m, 1.0, Vector3::zero()), m);
    }

    #[test]
    fn scale_then_multiply() {
        let s = scale(identity(), 2.0, 3.0, 4.0);
        let m = multiply(s, translate(identity(), 1.0, 1.0, 1.0));

        assert_eq!(m * Vector4::new(0.0, 0.0, 0.0, 1.0), Vector4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn perspective_matches_cgmath() {
        let ours = perspective(0.7854, 16.0 / 9.0, 0.1, 1000.0);
        let theirs = cgmath::perspective(Rad(0.7854), 16.0 / 9.0, 0.1, 1000.0);

        assert!(approx(&ours, &theirs));
        assert_eq!(to_cols_array(&ours)[11], -1.0);
        assert_eq!(to_cols_array(&ours)[15], 0.0);
    }

    #[test]
    fn strip_translation_keeps_rotation() {
        let view = look_at(
            Vector3::new(3.0, 2.0, 1.0),
            Vector3::zero(),
            Vector3::unit_y(),
        );
        let stripped = strip_translation(view);

        assert!(stripped.w.truncate().is_zero());
        assert_eq!(stripped.x.truncate(), view.x.truncate());
        assert_eq!(stripped.w.w, 1.0);
    }

    #[test]
    fn look_at_forward_is_negative_z() {
        let view = look_at(Vector3::zero(), -Vector3::unit_z(), Vector3::unit_y());

        assert!(approx(&view, &identity()));

        let side = look_at(Vector3::zero(), Vector3::unit_x(), Vector3::unit_y());
        assert!(approx(&side, &Matrix4::from_angle_y(Deg(90.0))));
    }

    #[test]
    fn scalar_helpers() {
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn random_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..1000 {
            let f = random_float(&mut rng, -1.0, 1.0);
            assert!((-1.0..1.0).contains(&f));

            let i = random_int(&mut rng, 3, 5);
            assert!((3..=5).contains(&i));
        }

        assert_eq!(random_float(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(random_int(&mut rng, 9, 1), 9);
    }
}
