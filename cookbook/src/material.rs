use cgmath::Vector4;

/// Phong material coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vector4<f32>,
    pub diffuse: Vector4<f32>,
    pub specular: Vector4<f32>,
    pub shininess: f32,
}

impl Material {
    pub fn gold() -> Self {
        Self {
            ambient: Vector4::new(0.2473, 0.1995, 0.0745, 1.0),
            diffuse: Vector4::new(0.7516, 0.6065, 0.2265, 1.0),
            specular: Vector4::new(0.6283, 0.5559, 0.3661, 1.0),
            shininess: 51.2,
        }
    }

    pub fn silver() -> Self {
        Self {
            ambient: Vector4::new(0.1923, 0.1923, 0.1923, 1.0),
            diffuse: Vector4::new(0.5075, 0.5075, 0.5075, 1.0),
            specular: Vector4::new(0.5083, 0.5083, 0.5083, 1.0),
            shininess: 51.2,
        }
    }

    pub fn bronze() -> Self {
        Self {
            ambient: Vector4::new(0.2125, 0.1275, 0.0540, 1.0),
            diffuse: Vector4::new(0.7140, 0.4284, 0.1814, 1.0),
            specular: Vector4::new(0.3936, 0.2719, 0.1667, 1.0),
            shininess: 25.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metal_coefficients() {
        let (gold, silver, bronze) = (Material::gold(), Material::silver(), Material::bronze());

        assert_eq!(gold.shininess, 51.2);
        assert_eq!(silver.shininess, 51.2);
        assert_eq!(bronze.shininess, 25.6);

        assert_eq!(gold.diffuse.x, 0.7516);
        assert_eq!(silver.ambient.x, 0.1923);
        assert_eq!(bronze.specular.y, 0.2719);
    }

    #[test]
    fn metals_are_distinct() {
        assert_ne!(Material::gold(), Material::silver());
        assert_ne!(Material::silver(), Material::bronze());
        assert_ne!(Material::bronze(), Material::gold());
    }
}
