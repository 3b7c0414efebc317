use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use pathnet::{
    document::GraphDocument,
    graph::{GraphConfig, MatrixGraph},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Dot,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "pathnet",
    about = "Load a weighted digraph and query shortest paths between its vertices."
)]
struct Cli {
    /// Graph file: Graphviz digraph (.dot/.gv) or saved editor document (.json).
    input: PathBuf,
    /// Input format (inferred from the file extension when omitted).
    #[arg(long, value_enum)]
    format: Option<InputFormat>,
    /// Source vertex for a single-pair query.
    #[arg(long, value_name = "LABEL", requires = "to")]
    from: Option<String>,
    /// Target vertex for a single-pair query.
    #[arg(long, value_name = "LABEL", requires = "from")]
    to: Option<String>,
    /// Print shortest paths between every ordered pair of vertices.
    #[arg(long)]
    all_pairs: bool,
    /// Print the adjacency matrix.
    #[arg(long)]
    matrix: bool,
    /// Refuse graphs with more vertices than this.
    #[arg(long, value_name = "N")]
    max_vertices: Option<usize>,
    /// Emit results as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Some(limit) = cli.max_vertices {
        ensure!(limit > 0, "max-vertices must be greater than zero");
    }

    let config = GraphConfig {
        max_vertices: cli.max_vertices,
    };
    let format = match cli.format {
        Some(format) => format,
        None => infer_format(&cli.input)?,
    };
    let (graph, saved) = load(&cli.input, format, config)
        .with_context(|| format!("failed to load graph from {}", cli.input.display()))?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let single = cli.from.is_some() && cli.to.is_some();
    if cli.matrix || !(single || cli.all_pairs) {
        if cli.json {
            let doc = match &saved {
                Some(saved) => saved.updated_from(&graph),
                None => GraphDocument::from_graph(&graph, |_| (0.0, 0.0)),
            };
            println!("{}", doc.to_json()?);
        } else {
            print!("{graph}");
        }
    }

    if let (Some(from), Some(to)) = (&cli.from, &cli.to) {
        let result = graph
            .dijkstra(from, to)
            .with_context(|| format!("cannot search for a path from {from} to {to}"))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{from} -> {to}: {result}");
        }
    }

    if cli.all_pairs {
        let all = graph.floyd_warshall();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&all)?);
        } else {
            print!("{all}");
        }
    }

    Ok(())
}

fn infer_format(path: &Path) -> Result<InputFormat> {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("dot") | Some("gv") => Ok(InputFormat::Dot),
        Some("json") => Ok(InputFormat::Json),
        _ => bail!(
            "cannot infer the format of {}; pass --format dot|json",
            path.display()
        ),
    }
}

/// Loads the graph, keeping the source document for JSON input so editor
/// positions can be written back out.
fn load(
    path: &Path,
    format: InputFormat,
    config: GraphConfig,
) -> Result<(MatrixGraph, Option<GraphDocument>)> {
    match format {
        InputFormat::Dot => Ok((MatrixGraph::from_dot_file(path, config)?, None)),
        InputFormat::Json => {
            let doc = GraphDocument::from_file(path)?;
            Ok((doc.to_graph(config)?, Some(doc)))
        }
    }
}
