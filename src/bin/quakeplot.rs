use anyhow::Context;
use clap::Parser;
use quakemeans::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufReader;

/// Cluster earthquake epicenters from a USGS catalog CSV export and print
/// the result as a per-cluster report, optionally with projected plot
/// coordinates for a world-map canvas.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    /// Path to a USGS FDSN event CSV export
    file: String,

    /// Number of clusters (at most the palette's 30 colors)
    #[arg(short, long, default_value_t = 6)]
    k: usize,

    /// Number of assign + update rounds to run
    #[arg(short, long, default_value_t = 50)]
    repeats: usize,

    /// Seed for the centroid initialization (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Measure longitude the short way across the ±180° meridian
    #[arg(long)]
    wrap_longitude: bool,

    /// Emit one "dot <color> <x> <y>" line per epicenter
    #[arg(long)]
    plot: bool,

    /// Canvas width in pixels, for --plot coordinates
    #[arg(long, default_value_t = 1800)]
    width: u32,

    /// Canvas height in pixels, for --plot coordinates
    #[arg(long, default_value_t = 900)]
    height: u32,
}

struct StdoutCanvas;
impl render::Canvas for StdoutCanvas {
    fn dot(&mut self, color: &'static str, x: f64, y: f64) {
        println!("dot {:?} {:.1} {:.1}", color, x, y);
    }
}

fn cluster_and_report<D: DistanceFunction<f64>>(
    points: PointSet<f64>, distance: D, opts: &Opts,
) -> anyhow::Result<()> {
    let kmean = KMeans::new(points, distance);
    let config = match opts.seed {
        Some(seed) => KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build(),
        None => KMeansConfig::default(),
    };
    let state = kmean.run(opts.k, opts.repeats, KMeans::init_random_sample, &config)?;

    for (ci, members) in state.clusters.iter().enumerate() {
        let centroid = state.centroids.centroid(ci);
        println!(
            "cluster {:2} [{}]: {:4} quakes, centroid ({:.2}, {:.2})",
            ci,
            render::PALETTE[ci],
            members.len(),
            centroid[0],
            centroid[1]
        );
    }

    if opts.plot {
        let projection = render::Projection::new(opts.width, opts.height);
        render::draw(&mut StdoutCanvas, kmean.points(), &state.clusters, &projection)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    anyhow::ensure!(
        opts.k <= render::MAX_CLUSTERS,
        "k ({}) exceeds the palette's {} colors",
        opts.k,
        render::MAX_CLUSTERS
    );

    let file = File::open(&opts.file).with_context(|| format!("cannot open {}", opts.file))?;
    let points = quakes::parse_usgs_csv(BufReader::new(file))?;
    println!("loaded {} epicenters from {}", points.len(), opts.file);

    if opts.wrap_longitude {
        cluster_and_report(points, LonWrapDistance, &opts)
    } else {
        cluster_and_report(points, EuclideanDistance, &opts)
    }
}
