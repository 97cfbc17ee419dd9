//! GASD descriptor example
//!
//! This example demonstrates:
//! - Building a colored point cloud
//! - Loading an estimator configuration from JSON (optional first argument)
//! - Computing the descriptor and inspecting its alignment
//!
//! Run with `RUST_LOG=debug` to see per-stage diagnostics.

use anyhow::{Context, Result};
use gasd_core::{ColoredPoint3f, PointCloud};
use gasd_features::{GasdConfig, GasdEstimator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A half cylinder shaded from red at the base to blue at the top
fn create_colored_half_cylinder(num_points: usize) -> PointCloud<ColoredPoint3f> {
    let mut rng = StdRng::seed_from_u64(2024);
    (0..num_points)
        .map(|_| {
            let angle = rng.gen_range(0.0..std::f32::consts::PI);
            let height = rng.gen_range(0.0..4.0f32);
            let t = height / 4.0;
            let color = [((1.0 - t) * 255.0) as u8, 40, (t * 255.0) as u8];
            ColoredPoint3f::new(angle.cos(), angle.sin() * 0.6, height, color)
        })
        .collect()
}

fn load_config() -> Result<GasdConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read configuration {}", path))?;
            let config = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse configuration {}", path))?;
            log::info!("Loaded configuration from {}", path);
            Ok(config)
        }
        None => Ok(GasdConfig::shape_and_color()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("GASD Descriptor Example");
    println!("=======================");

    let config = load_config()?;
    let estimator = GasdEstimator::new(config);
    println!(
        "Descriptor length: {} (shape {}, color {})",
        estimator.descriptor_len(),
        estimator.config().shape_len(),
        estimator.config().color_len()
    );

    let cloud = create_colored_half_cylinder(5_000);
    println!("Created point cloud with {} points", cloud.len());

    let descriptor = estimator.compute_cloud(&cloud)?;

    println!("\nAlignment:");
    let m = descriptor.transform().to_row_major();
    for row in m.chunks(4) {
        println!("  [{:8.4} {:8.4} {:8.4} {:8.4}]", row[0], row[1], row[2], row[3]);
    }
    println!("  degenerate: {}", descriptor.is_degenerate());

    println!("\nHistogram:");
    let shape_sum: f32 = descriptor.shape_histogram().iter().sum();
    let occupied = descriptor.shape_histogram().iter().filter(|&&v| v > 0.0).count();
    println!("  shape block sum {:.3}, {} occupied bins", shape_sum, occupied);
    if let Some(color) = descriptor.color_histogram() {
        let color_sum: f32 = color.iter().sum();
        println!("  color block sum {:.3}, {} bins", color_sum, color.len());
    }

    let peak = descriptor
        .histogram()
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, v)| (i, *v));
    if let Some((index, value)) = peak {
        println!("  peak bin {} holds {:.3}", index, value);
    }

    println!("\nExample completed successfully!");
    Ok(())
}
