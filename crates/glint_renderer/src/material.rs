//! Material trait for surface scattering.

use std::sync::Arc;

use glint_math::Vec3;
use rand::RngCore;

use crate::sampling::{gen_f32, random_unit_vector};
use crate::texture::{SolidColor, Texture};
use crate::{hittable::HitRecord, Ray};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of light carried along `scattered`
    pub attenuation: Color,
    /// Continuation ray, leaving the hit point at the parent ray's time
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    texture: Arc<dyn Texture>,
}

impl Lambertian {
    /// Diffuse surface with a constant albedo.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    /// Diffuse surface whose albedo is looked up in `texture`.
    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { texture }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.texture.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, clamped to [0, 1]; 0 is a perfect mirror
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz pushed the ray below the surface: absorbed
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scattered_dir, ray_in.time()),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    /// Refractive index relative to the enclosing medium
    refraction_index: f32,
}

impl Dielectric {
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
        let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let ri = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Total internal reflection
        let cannot_refract = ri * sin_theta > 1.0;

        let direction = if cannot_refract || Self::reflectance(cos_theta, ri) > gen_f32(rng) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, ri)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// True if every component is within `1e-8` of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < 1e-8
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(material: &'a dyn Material, normal: Vec3, front_face: bool) -> HitRecord<'a> {
        HitRecord {
            p: Vec3::new(0.0, 0.0, -1.0),
            normal,
            material,
            u: 0.25,
            v: 0.75,
            t: 1.0,
            front_face,
        }
    }

    fn in_unit_range(c: Color) -> bool {
        c.cmpge(Vec3::ZERO).all() && c.cmple(Vec3::ONE).all()
    }

    #[test]
    fn test_lambertian_scatters_into_normal_hemisphere() {
        let mat = Lambertian::new(Color::new(0.8, 0.3, 0.1));
        let rec = record(&mat, Vec3::Z, true);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.375);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("diffuse always scatters");
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.1));
            assert_eq!(result.scattered.origin(), rec.p);
            assert_eq!(result.scattered.time(), 0.375);
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert!(!near_zero(result.scattered.direction()));
        }
    }

    #[test]
    fn test_lambertian_samples_texture_at_hit() {
        struct UvTexture;
        impl Texture for UvTexture {
            fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
                Color::new(u, v, 0.0)
            }
        }

        let mat = Lambertian::from_texture(Arc::new(UvTexture));
        let rec = record(&mat, Vec3::Z, true);
        let mut rng = StdRng::seed_from_u64(2);
        let result = mat
            .scatter(&Ray::default(), &rec, &mut rng)
            .expect("diffuse always scatters");
        assert_eq!(result.attenuation, Color::new(0.25, 0.75, 0.0));
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mat = Metal::new(Color::new(0.9, 0.9, 0.9), 0.0);
        let rec = record(&mat, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.5);
        let mut rng = StdRng::seed_from_u64(3);

        let result = mat.scatter(&ray_in, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(result.scattered.time(), 0.5);
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_metal_grazing_fuzz_can_absorb() {
        let mat = Metal::new(Color::ONE, 1.0);
        let rec = record(&mat, Vec3::Y, true);
        // Nearly parallel to the surface
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.01, 0.0), 0.0);
        let mut rng = StdRng::seed_from_u64(4);

        let mut absorbed = 0;
        for _ in 0..200 {
            match mat.scatter(&ray_in, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        // Leaving the glass (back face) at a steep angle
        let rec = record(&mat, Vec3::Y, false);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.2, 0.0), 0.625);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..100 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("glass always scatters");
            assert_eq!(result.attenuation, Color::ONE);
            assert_eq!(result.scattered.time(), 0.625);
            // Reflected, so it stays on the normal's side
            assert!(result.scattered.direction().dot(rec.normal) > 0.0);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let mat = Dielectric::new(1.5);
        let rec = record(&mat, Vec3::Z, true);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::NEG_Z, 0.25);
        let mut rng = StdRng::seed_from_u64(6);

        let mut refracted = 0;
        for _ in 0..1000 {
            let result = mat.scatter(&ray_in, &rec, &mut rng).expect("glass always scatters");
            // Both the reflected and the refracted ray keep the shutter time
            assert_eq!(result.scattered.time(), 0.25);
            if result.scattered.direction().dot(rec.normal) < 0.0 {
                refracted += 1;
                assert!((result.scattered.direction() - Vec3::NEG_Z).length() < 1e-5);
            }
        }
        // Schlick gives 4% reflectance at normal incidence
        assert!(refracted > 900, "refracted {refracted}");
    }

    #[test]
    fn test_attenuation_bounded_for_all_materials() {
        let materials: Vec<Box<dyn Material>> = vec![
            Box::new(Lambertian::new(Color::new(0.2, 0.5, 1.0))),
            Box::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.3)),
            Box::new(Dielectric::new(1.5)),
            Box::new(Dielectric::new(1.0 / 1.33)),
        ];
        let incoming = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, -1e-4, 0.0),
            Vec3::new(-3.0, -0.5, 2.0),
        ];
        let mut rng = StdRng::seed_from_u64(8);

        for mat in &materials {
            for front_face in [true, false] {
                let rec = record(mat.as_ref(), Vec3::Y, front_face);
                for dir in incoming {
                    for _ in 0..50 {
                        let ray_in = Ray::new(Vec3::ZERO, dir, 0.0);
                        if let Some(result) = mat.scatter(&ray_in, &rec, &mut rng) {
                            assert!(in_unit_range(result.attenuation));
                            assert!(result.scattered.direction().is_finite());
                            assert!(!near_zero(result.scattered.direction()));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_schlick_reflectance() {
        // Normal incidence on glass: ((1 - 1.5) / (1 + 1.5))^2 = 0.04
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_and_refract_helpers() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));

        // Index ratio 1 passes straight through
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        assert!((refract(uv, Vec3::Y, 1.0) - uv).length() < 1e-5);

        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }
}
