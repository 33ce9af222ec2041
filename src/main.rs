use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::PathBuf,
};

use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use salesman::{solve, Algorithm, DistanceMatrix, Error, Limits, Result, Solution};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A JSON distance matrix, either `[[...], ...]` or `{"matrix": [[...], ...]}`, else reads from stdin
    file: Option<PathBuf>,

    /// Use the built-in 4 city sample instead of reading a matrix
    #[arg(long, conflicts_with_all = ["file", "random"])]
    demo: bool,

    /// Generate a random asymmetric matrix with this many cities
    #[arg(long, conflicts_with = "file")]
    random: Option<usize>,

    /// Seed for --random, else seeded from entropy
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Largest edge cost for --random
    #[arg(long, default_value = "100", requires = "random")]
    max_cost: u32,

    /// Algorithms to run, in order. Runs all of them by default
    #[arg(short, long, value_enum)]
    algorithm: Vec<Algorithm>,

    /// Skip brute force above this many cities
    #[arg(long, default_value_t = Limits::default().brute_force)]
    brute_force_limit: usize,

    /// Skip Held-Karp above this many cities
    #[arg(long, default_value_t = Limits::default().held_karp)]
    held_karp_limit: usize,

    /// Print solutions as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "salesman=info")
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Opt::parse()) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    let matrix = read_matrix(&opt)?;
    let limits = Limits {
        brute_force: opt.brute_force_limit,
        held_karp: opt.held_karp_limit,
    };
    let algorithms = if opt.algorithm.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        opt.algorithm.clone()
    };

    let mut solutions = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        match solve::solve(&matrix, algorithm, &limits) {
            Ok(solution) => solutions.push(solution),
            Err(e @ Error::TooLarge { .. }) => warn!("Skipping: {e}"),
            Err(e) => return Err(e),
        }
    }

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&solutions)?);
    } else {
        println!("Distance matrix:");
        print!("{matrix}");
        println!();
        println!("Results:");
        for solution in &solutions {
            print_solution(solution);
        }
    }
    Ok(())
}

fn read_matrix(opt: &Opt) -> Result<DistanceMatrix> {
    if opt.demo {
        return DistanceMatrix::new(vec![
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ]);
    }
    if let Some(cities) = opt.random {
        let mut rng = match opt.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!("Generating {} random cities", cities);
        let grid = (0..cities)
            .map(|i| {
                (0..cities)
                    .map(|j| {
                        if i == j {
                            0
                        } else {
                            rng.gen_range(1..=i64::from(opt.max_cost.max(1)))
                        }
                    })
                    .collect()
            })
            .collect();
        return DistanceMatrix::new(grid);
    }

    let matrix = match &opt.file {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => {
            info!("Reading from stdin");
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            serde_json::from_str(&input)?
        }
    };
    Ok(matrix)
}

fn print_solution(solution: &Solution) {
    let tour = solution
        .tour
        .iter()
        .map(|city| city.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    if solution.algorithm.is_exact() {
        println!("{}: {} -> length: {}", solution.algorithm, tour, solution.cost);
    } else {
        println!(
            "{} (approximate): {} -> length: {}",
            solution.algorithm, tour, solution.cost
        );
    }
}
