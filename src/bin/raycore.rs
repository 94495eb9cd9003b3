//! raycore - build a random scene and cross-check the BVH against a linear scan.

#[macro_use]
extern crate log;

use clap::Parser;
use raycore::core::geometry::{Point3f, Ray, Vector3f};
use raycore::core::math::Float;
use raycore::core::mesh::TriangleMesh;
use raycore::core::options::Options;
use raycore::core::rng::Rng;
use raycore::core::scene::{Scene, SceneGeometry};
use raycore::core::stats_accumulator::StatsAccumulator;
use raycore::core::utils::float_to_string_general;
use std::io;
use std::process;
use std::time::Instant;

/// Half the side of the cube the scene is generated in.
const SCENE_EXTENT: Float = 50.0;

#[derive(Parser)]
#[command(name = "raycore")]
#[command(about = "Build a BVH over a random scene and verify it against brute force", long_about = None)]
struct Cli {
    /// Number of random spheres
    #[arg(long, default_value_t = 1000)]
    spheres: usize,
    /// Number of random triangles in the triangle soup
    #[arg(long, default_value_t = 1000)]
    triangles: usize,
    /// Number of random query rays
    #[arg(long, default_value_t = 10_000)]
    rays: usize,
    /// Seed for scene and ray generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Worker threads for the batch query, 0 uses all cores
    #[arg(long, default_value_t = 0)]
    threads: u32,
    /// Maximum primitives in a leaf node
    #[arg(long, default_value_t = 2)]
    leaf_size: u8,
    /// Log the build summary at debug level only
    #[arg(short, long)]
    quiet: bool,
    /// Print the statistics report at the end
    #[arg(long)]
    stats: bool,
}

fn random_point(rng: &mut Rng, extent: Float) -> Point3f {
    Point3f::new(
        rng.uniform_float_range(-extent, extent),
        rng.uniform_float_range(-extent, extent),
        rng.uniform_float_range(-extent, extent),
    )
}

fn random_direction(rng: &mut Rng) -> Vector3f {
    loop {
        let d = Vector3f::new(
            rng.uniform_float_range(-1.0, 1.0),
            rng.uniform_float_range(-1.0, 1.0),
            rng.uniform_float_range(-1.0, 1.0),
        );
        let len2 = d.length_squared();
        if len2 > 1e-4 && len2 <= 1.0 {
            return d.normalize();
        }
    }
}

fn random_geometry(cli: &Cli, rng: &mut Rng) -> raycore::core::error::Result<SceneGeometry> {
    let mut geometry = SceneGeometry::new();
    for _ in 0..cli.spheres {
        let center = random_point(rng, SCENE_EXTENT);
        let radius = rng.uniform_float_range(0.5, 2.0);
        geometry.add_sphere(center, radius);
    }

    if cli.triangles > 0 {
        let mut positions = Vec::with_capacity(3 * cli.triangles);
        for i in 0..cli.triangles {
            let anchor = random_point(rng, SCENE_EXTENT);
            let mut a = random_direction(rng) * 2.0;
            let mut b = random_direction(rng) * 2.0;
            // every other face lies flat in an axis plane
            if i % 2 == 0 {
                let axis = rng.uniform_uint32_bounded(3) as usize;
                a[axis] = 0.0;
                b[axis] = 0.0;
            }
            positions.push(anchor);
            positions.push(anchor + a);
            positions.push(anchor + b);
        }
        let indices = (0..positions.len() as u32).collect();
        geometry.add_mesh(TriangleMesh::from_positions(positions, None, indices)?);
    }
    Ok(geometry)
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = Rng::new(cli.seed);
    let geometry = match random_geometry(&cli, &mut rng) {
        Ok(geometry) => geometry,
        Err(e) => {
            error!("Failed to generate scene: {}", e);
            process::exit(1);
        }
    };

    let options = Options::new(cli.leaf_size, cli.threads, cli.quiet);
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(options.n_threads as usize).build() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to create thread pool: {}", e);
            process::exit(1);
        }
    };

    let start = Instant::now();
    let scene = match Scene::with_options(geometry, &options) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Failed to build scene: {}", e);
            process::exit(1);
        }
    };
    info!("Build took {} s, world bound [{} - {}]",
        float_to_string_general(start.elapsed().as_secs_f64() as Float, 3),
        scene.world_bound().min,
        scene.world_bound().max
    );

    let rays: Vec<Ray> = (0..cli.rays)
        .map(|_| Ray::new(random_point(&mut rng, SCENE_EXTENT * 1.2), random_direction(&mut rng)))
        .collect();

    let start = Instant::now();
    let mut bvh_rays = rays.clone();
    let bvh_hits = pool.install(|| scene.aggregate().intersect_batch(&mut bvh_rays));
    let bvh_time = start.elapsed().as_secs_f64();

    let shadow_mismatches = rays.iter()
        .filter(|ray| scene.intersect_p(ray) != scene.geometry().intersect_linear_p(ray))
        .count();

    let start = Instant::now();
    let linear_hits: Vec<_> = rays.iter()
        .map(|ray| {
            let mut ray = *ray;
            scene.geometry().intersect_linear(&mut ray)
        })
        .collect();
    let linear_time = start.elapsed().as_secs_f64();

    let stats = StatsAccumulator::instance();
    let mut mismatches = shadow_mismatches;
    if shadow_mismatches > 0 {
        warn!("{} shadow rays disagree with the linear scan", shadow_mismatches);
    }
    let mut hits = 0;
    for (ray, (bvh, linear)) in rays.iter().zip(bvh_hits.iter().zip(&linear_hits)) {
        let agree = match (bvh, linear) {
            (Some(a), Some(b)) => {
                hits += 1;
                (a.t_hit - b.t_hit).abs() <= 1e-4
            }
            (None, None) => true,
            _ => false
        };
        if !agree {
            mismatches += 1;
            warn!("Mismatch for ray {}: bvh {:?}, linear {:?}",
                ray,
                bvh.map(|si| si.t_hit),
                linear.map(|si| si.t_hit)
            );
        }
    }
    stats.report_percentage("Intersections/Rays hitting geometry", hits, cli.rays as i64);
    stats.report_float_distribution("Timing/BVH query seconds", bvh_time);
    stats.report_float_distribution("Timing/Linear query seconds", linear_time);

    info!("{} rays, {} hits, BVH {} s, linear {} s",
        cli.rays,
        hits,
        float_to_string_general(bvh_time as Float, 3),
        float_to_string_general(linear_time as Float, 3)
    );

    if cli.stats {
        if let Err(e) = stats.print(&mut io::stdout()) {
            error!("Failed to print statistics: {}", e);
        }
    }

    if mismatches > 0 {
        error!("{} of {} rays disagree with the linear scan", mismatches, cli.rays);
        process::exit(1);
    }
    info!("All rays agree with the linear scan");
}
