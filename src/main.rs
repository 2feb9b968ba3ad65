//! Command-line driver: load a METIS graph, run Ja-be-Ja, write a result file.

use anyhow::Context;
use clap::Parser;
use jabeja::graph::{metis, InitialColoring};
use jabeja::jabeja::{AnnealingPolicy, JabejaConfig, JabejaRunner, NodeSelection};
use jabeja::report::{result_file_name, ResultWriter};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jabeja", about = "Ja-be-Ja graph partitioning simulator")]
struct Cli {
    /// Number of rounds
    #[arg(long, default_value_t = 1000)]
    rounds: usize,

    /// Number of partitions (colors)
    #[arg(long, default_value_t = 4)]
    num_partitions: u32,

    /// Uniform random sample size
    #[arg(long, default_value_t = 6)]
    uniform_rand_sample_size: usize,

    /// Simulated annealing temperature
    #[arg(long, default_value_t = 2.0)]
    temp: f64,

    /// Simulated annealing delta
    #[arg(long, default_value_t = 0.003)]
    delta: f64,

    /// Seed of the random stream
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Exponent of the benefit score
    #[arg(long, default_value_t = 2.0)]
    alpha: f64,

    /// Number of random neighbors sampled per node
    #[arg(long, default_value_t = 3)]
    rand_neighbors_sample_size: usize,

    /// Initial color policy: RANDOM, ROUND_ROBIN, BATCH
    #[arg(long, default_value = "ROUND_ROBIN")]
    graph_init_color_selection_policy: InitialColoring,

    /// Node selection policy: RANDOM, LOCAL, HYBRID
    #[arg(long, default_value = "HYBRID")]
    node_selection_policy: NodeSelection,

    /// Annealing policy: STANDARD, EXP, CUSTOM (EXP forces T to 1)
    #[arg(long, default_value = "STANDARD")]
    annealing_policy: AnnealingPolicy,

    /// Reset T after 400 rounds at its minimum (1 for STANDARD, 0.00001 otherwise)
    #[arg(long)]
    reset_t: bool,

    /// Location of the input graph
    #[arg(long, default_value = "./graphs/ws-250.graph")]
    graph: PathBuf,

    /// Location of the output file(s)
    #[arg(long, default_value = "./output")]
    output_dir: PathBuf,
}

impl Cli {
    fn config(&self) -> JabejaConfig {
        let mut temperature = self.temp;
        if self.annealing_policy == AnnealingPolicy::Exponential {
            log::info!("ignoring T since annealing policy is EXP");
            temperature = 1.0;
        }
        JabejaConfig::default()
            .with_rounds(self.rounds)
            .with_node_selection(self.node_selection_policy)
            .with_annealing(self.annealing_policy)
            .with_temperature(temperature)
            .with_delta(self.delta)
            .with_reheat(self.reset_t)
            .with_alpha(self.alpha)
            .with_local_sample_size(self.rand_neighbors_sample_size)
            .with_uniform_sample_size(self.uniform_rand_sample_size)
            .with_seed(self.seed)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    let adjacency = metis::read_metis_file(&cli.graph)
        .with_context(|| format!("reading graph {}", cli.graph.display()))?;
    let mut coloring_rng = InitialColoring::seeded_rng(cli.seed);
    let graph = cli
        .graph_init_color_selection_policy
        .apply(adjacency, cli.num_partitions, &mut coloring_rng)
        .with_context(|| format!("building graph {}", cli.graph.display()))?;
    log::info!(
        "loaded {} nodes and {} edges, colors {:?}",
        graph.len(),
        graph.edge_count(),
        graph.color_counts()
    );

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;
    let output = cli.output_dir.join(result_file_name(
        &cli.graph,
        cli.graph_init_color_selection_policy,
        cli.num_partitions,
        &config,
    ));
    let file = File::create(&output)
        .with_context(|| format!("creating result file {}", output.display()))?;
    let mut writer = ResultWriter::new(BufWriter::new(file));

    let result = JabejaRunner::run_with_reporter(graph, &config, &mut writer)?;
    log::info!(
        "done: best edge cut {} (round {:?}), {} swaps, results in {}",
        result.best_edge_cut,
        result.best_round,
        result.total_swaps,
        output.display()
    );
    Ok(())
}
