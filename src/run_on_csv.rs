use anyhow::{Context, Result};
use clap::Parser;
use lazy_dijkstra::edge_list::{load_graph, write_distances};
use lazy_dijkstra::{
    DirectedGraph, ShortestPath, UndirectedGraph, VertexId, WeightedGraph, INFINITY,
};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "csv")]
#[command(about = "Build a graph from a CSV of source,target,weight rows and run Dijkstra from a source vertex.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: PathBuf,

    /// Source vertex id
    #[arg(short, long)]
    source: VertexId,

    /// Treat every row as an undirected edge
    #[arg(short, long, default_value_t = false)]
    undirected: bool,

    /// Number of timed runs from the same source
    #[arg(short, long, default_value_t = 1)]
    num_runs: usize,

    /// Output CSV (vertex_id, distance). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Include unreachable vertices in output with infinite distance
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,

    /// Also write the loaded graph as a Graphviz file
    #[arg(long)]
    dot: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load(cli: &Cli) -> Result<Box<dyn WeightedGraph>> {
    let graph: Box<dyn WeightedGraph> = if cli.undirected {
        Box::new(load_graph::<UndirectedGraph>(&cli.csv)?)
    } else {
        Box::new(load_graph::<DirectedGraph>(&cli.csv)?)
    };
    Ok(graph)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph = load(&cli).with_context(|| format!("loading {}", cli.csv.display()))?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        undirected = cli.undirected,
        "graph loaded"
    );

    if let Some(dot_path) = &cli.dot {
        graph
            .write_dot_file(dot_path)
            .with_context(|| format!("writing {}", dot_path.display()))?;
    }

    let solver = ShortestPath::new(&*graph);

    let mut duration_millis = Vec::with_capacity(cli.num_runs);
    let mut dist = Vec::new();
    for _ in 0..cli.num_runs.max(1) {
        let now = Instant::now();
        dist = solver.compute(cli.source)?;
        duration_millis.push(now.elapsed().as_secs_f64() * 1000.0);
    }
    println!("{:?}", duration_millis);

    if let Some(out_path) = &cli.out {
        let file = File::create(out_path)
            .with_context(|| format!("creating CSV {}", out_path.display()))?;
        let rows = write_distances(file, &dist, cli.include_unreachable)?;
        println!("Wrote distances for {} vertices to {}", rows, out_path.display());
    } else {
        let reachable = dist.iter().filter(|&&d| d != INFINITY).count();
        println!("Vertices: {}", graph.vertex_count());
        println!("Reachable from {}: {}", cli.source, reachable);
        if let Some(maxd) = dist.iter().copied().filter(|&d| d != INFINITY).max() {
            println!("Max finite distance: {}", maxd);
        }
    }

    Ok(())
}
