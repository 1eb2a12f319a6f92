use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use topological_cuts::dot::{read_graph_from_file, DotAttributes};
use topological_cuts::graph::{convert_to_simple_data_flow, generate_dag_ss};
use topological_cuts::{
    max_cut, p_max_cut, CutError, CutOptions, Graph, MicroLpSolver, Relaxation,
};

/// Compares maximum topological cuts with budgeted p-cuts (rounded relaxation and exact).
#[derive(Parser)]
#[command(name = "topological-cuts", version)]
struct Cli {
    /// Log debug output of the cut search.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Tolerance used when rounding relaxed solutions.
    #[arg(long, global = true, default_value_t = CutOptions::default().tolerance)]
    tolerance: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Random DAGs converted to the simple data flow model.
    Random(RandomArgs),
    /// DOT files, or directories of DOT files.
    File(FileArgs),
}

#[derive(Args)]
struct RandomArgs {
    #[arg(long, default_value_t = 10)]
    count: usize,
    #[arg(long, default_value_t = 30)]
    vertices: usize,
    /// Probability of each forward edge.
    #[arg(long, default_value_t = 0.5)]
    connectedness: f64,
    #[arg(long, default_value_t = 500.0)]
    weight_max: f64,
    #[arg(long, default_value_t = 0.0)]
    time_max: f64,
    #[arg(long, value_delimiter = ',', default_values_t = [1, 3, 5, 10])]
    budgets: Vec<usize>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct FileArgs {
    #[arg(required = true)]
    paths: Vec<PathBuf>,
    #[arg(long, value_delimiter = ',', default_values_t = [1, 3, 5, 10])]
    budgets: Vec<usize>,
    #[arg(long, default_value = "")]
    time_label: String,
    #[arg(long, default_value = "size")]
    weight_label: String,
    #[arg(long, default_value = "")]
    computation_label: String,
    /// Show the maximum cut of every graph in a window.
    #[cfg(feature = "viewer")]
    #[arg(long)]
    draw: bool,
}

/// Counts failed cut computations without stopping the batch.
#[derive(Default)]
struct Tally {
    runs: usize,
    failures: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "topological_cuts=debug"
    } else {
        "topological_cuts=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = CutOptions {
        tolerance: cli.tolerance,
    };
    let tally = match cli.command {
        Command::Random(args) => run_random(&args, &options),
        Command::File(args) => run_files(&args, &options)?,
    };

    info!(failures = tally.failures, runs = tally.runs, "finished");
    println!("Failures : {} out of {}", tally.failures, tally.runs);
    Ok(())
}

fn run_random(args: &RandomArgs, options: &CutOptions) -> Tally {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut tally = Tally::default();

    for &budget in &args.budgets {
        println!("random/{} p={budget} MAXCUT LP ILP", args.count);
        for i in 0..args.count {
            let graph = generate_dag_ss(
                args.vertices,
                args.connectedness,
                args.weight_max,
                args.time_max,
                &mut rng,
            );
            compare(&i.to_string(), &graph, budget, options, &mut tally);
        }
    }
    tally
}

fn run_files(args: &FileArgs, options: &CutOptions) -> Result<Tally> {
    let attributes = DotAttributes {
        time_label: args.time_label.clone(),
        weight_label: args.weight_label.clone(),
        computation_label: args.computation_label.clone(),
    };

    let mut files = vec![];
    for path in &args.paths {
        files.extend(expand(path)?);
    }

    let mut graphs = vec![];
    for file in files {
        match read_graph_from_file(&file, &attributes) {
            Ok(graph) => {
                let name = file.display().to_string();
                graphs.push((name, convert_to_simple_data_flow(&graph)));
            }
            Err(err) => warn!(file = %file.display(), %err, "skipping unreadable graph"),
        }
    }

    let mut tally = Tally::default();
    for &budget in &args.budgets {
        println!("files p={budget} MAXCUT LP ILP");
        for (name, graph) in &graphs {
            compare(name, graph, budget, options, &mut tally);
        }
    }

    #[cfg(feature = "viewer")]
    if args.draw {
        for (name, graph) in &graphs {
            match max_cut(graph, &MicroLpSolver) {
                Ok(cut) => topological_cuts::visualization::draw_cut(graph, &cut)
                    .map_err(|err| anyhow::anyhow!("viewer failed for {name}: {err}"))?,
                Err(err) => warn!(%name, %err, "nothing to draw"),
            }
        }
    }

    Ok(tally)
}

/// A file stays as is, a directory becomes its files in name order.
fn expand(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = vec![];
    for entry in fs::read_dir(path).with_context(|| format!("listing {}", path.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

fn compare(name: &str, graph: &Graph, budget: usize, options: &CutOptions, tally: &mut Tally) {
    let solver = MicroLpSolver;
    let unconstrained = max_cut(graph, &solver).map(|cut| cut.value);
    let rounded = p_max_cut(graph, budget, Relaxation::Fractional, &solver, options)
        .map(|cut| cut.value);
    let exact =
        p_max_cut(graph, budget, Relaxation::Integral, &solver, options).map(|cut| cut.value);

    let mut column = |value: Result<f64, CutError>| match value {
        Ok(value) => format!("{value:.5}"),
        Err(err) => {
            warn!(%name, budget, %err, "cut computation failed");
            tally.failures += 1;
            "-".to_string()
        }
    };
    let columns = [column(unconstrained), column(rounded), column(exact)];
    tally.runs += 1;

    println!("{name} {}", columns.join(" "));
}
