//! Object retrieval example
//!
//! Computes descriptors for a small library of synthetic shapes in parallel,
//! then identifies randomly posed and rescaled copies of each shape by the
//! nearest descriptor.

use anyhow::Result;
use gasd_core::{Point3f, PointCloud};
use gasd_features::{GasdConfig, GasdEstimator};
use nalgebra::{UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sample_shape(name: &str, rng: &mut StdRng, num_points: usize) -> PointCloud<Point3f> {
    (0..num_points)
        .map(|_| {
            let u: f32 = rng.gen();
            let v: f32 = rng.gen();
            let w: f32 = rng.gen();
            match name {
                // solid box with a denser corner
                "box" => Point3f::new(3.0 * u * u, 1.5 * v, 0.5 * w),
                // cone along z with its tip at the top
                "cone" => {
                    let h = 1.0 - w.sqrt();
                    let angle = u * std::f32::consts::TAU;
                    Point3f::new(h * angle.cos(), 0.7 * h * angle.sin(), 3.0 * (1.0 - h))
                }
                // curved wedge
                _ => {
                    let angle = u * std::f32::consts::PI * 0.75;
                    let r = 2.0 + 0.3 * v;
                    Point3f::new(r * angle.cos(), r * angle.sin(), 0.8 * w * w)
                }
            }
        })
        .collect()
}

fn random_pose(cloud: &PointCloud<Point3f>, rng: &mut StdRng) -> PointCloud<Point3f> {
    let rotation = UnitQuaternion::from_euler_angles(
        rng.gen_range(-3.0..3.0),
        rng.gen_range(-1.5..1.5),
        rng.gen_range(-3.0..3.0),
    );
    let translation = Vector3::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
    let scale = rng.gen_range(0.2..5.0f32);

    cloud
        .iter()
        .map(|p| rotation * Point3f::from(p.coords * scale) + translation)
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    println!("GASD Object Retrieval Example");
    println!("=============================");

    let mut rng = StdRng::seed_from_u64(7);
    let names = ["box", "cone", "wedge"];
    let library: Vec<PointCloud<Point3f>> = names.iter().map(|name| sample_shape(name, &mut rng, 3_000)).collect();

    let estimator = GasdEstimator::new(GasdConfig::shape_only());
    let references = estimator
        .compute_batch(&library)
        .into_iter()
        .collect::<gasd_core::Result<Vec<_>>>()?;
    println!("Indexed {} shapes, {} values each", references.len(), estimator.descriptor_len());

    let mut correct = 0;
    for (truth, name) in names.iter().enumerate() {
        let query = random_pose(&sample_shape(name, &mut rng, 2_000), &mut rng);
        let descriptor = estimator.compute_cloud(&query)?;

        let mut best = (usize::MAX, f32::INFINITY);
        for (index, reference) in references.iter().enumerate() {
            let distance = descriptor.distance(reference)?;
            log::debug!("{} vs {}: {:.3}", name, names[index], distance);
            if distance < best.1 {
                best = (index, distance);
            }
        }

        let matched = names.get(best.0).copied().unwrap_or("none");
        println!("Query '{}' matched '{}' (L1 distance {:.3})", name, matched, best.1);
        if best.0 == truth {
            correct += 1;
        }
    }

    println!("\n{}/{} queries identified", correct, names.len());
    Ok(())
}
