use anyhow::{Context, Result};
use clap::Parser;
use lazy_dijkstra::{
    DirectedGraph, ShortestPath, UndirectedGraph, VertexId, Weight, WeightedGraph, INFINITY,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "demo")]
#[command(about = "Build the sample graphs, print them, and run Dijkstra from a source vertex.", long_about = None)]
struct Cli {
    /// Source vertex for every sample graph
    #[arg(short, long, default_value_t = 0)]
    source: VertexId,

    /// Directory to write graph1.dot .. graph3.dot into. Nothing is written if omitted.
    #[arg(short, long)]
    dot_dir: Option<PathBuf>,
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

const FIRST_EDGES: [(VertexId, VertexId, Weight); 10] = [
    (0, 1, 6),
    (0, 2, 2),
    (0, 3, 2),
    (1, 4, 3),
    (1, 5, 4),
    (2, 6, 3),
    (3, 7, 1),
    (4, 7, 3),
    (5, 7, 5),
    (6, 7, 4),
];

const SECOND_EDGES: [(VertexId, VertexId, Weight); 14] = [
    (0, 1, 4),
    (0, 7, 8),
    (1, 2, 8),
    (1, 7, 11),
    (7, 8, 7),
    (7, 6, 1),
    (2, 8, 2),
    (2, 5, 4),
    (2, 3, 7),
    (8, 6, 6),
    (6, 5, 2),
    (3, 5, 14),
    (3, 4, 9),
    (5, 4, 10),
];

fn build(graph: &mut dyn WeightedGraph, edges: &[(VertexId, VertexId, Weight)]) {
    for &(u, v, w) in edges {
        graph.add_edge(u, v, w);
    }
}

fn format_distances(dist: &[Weight]) -> String {
    dist.iter()
        .map(|&d| {
            if d == INFINITY {
                String::from("inf")
            } else {
                d.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut g1 = UndirectedGraph::new();
    build(&mut g1, &FIRST_EDGES);
    let mut g2 = DirectedGraph::new();
    build(&mut g2, &FIRST_EDGES);
    let mut g3 = UndirectedGraph::new();
    build(&mut g3, &SECOND_EDGES);

    let samples: [(&str, &dyn WeightedGraph, String); 3] = [
        ("Undirected Graph", &g1, g1.to_string()),
        ("Directed Graph", &g2, g2.to_string()),
        ("Undirected Graph 2", &g3, g3.to_string()),
    ];

    if let Some(dir) = &cli.dot_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    for (i, (title, graph, listing)) in samples.iter().enumerate() {
        println!("{}", title);
        println!("{}", listing);

        if let Some(dir) = &cli.dot_dir {
            let path = dir.join(format!("graph{}.dot", i + 1));
            graph
                .write_dot_file(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote dot file");
        }

        let dist = ShortestPath::new(*graph)
            .compute(cli.source)
            .with_context(|| format!("running dijkstra on {}", title))?;
        println!("Distances from vertex {} : {}", cli.source, format_distances(&dist));
    }

    Ok(())
}
