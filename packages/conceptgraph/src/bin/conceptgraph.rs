//! Conceptgraph CLI
//!
//! # Usage
//!
//! ```bash
//! # Build data/concepts.csv + data/connections.csv → output/knowledge_graph.json
//! conceptgraph
//!
//! # Concept summary instead of the node/edge document
//! conceptgraph --format summary --output-dir out
//!
//! # Inspect nodes
//! conceptgraph explore C1 C2
//! conceptgraph stats --top 10
//! conceptgraph interactive
//!
//! # Task prompt for a language model, with the concept summary as context
//! conceptgraph prompt "Suggest a warm-up question on slope" --with-context
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use conceptgraph::{
    explore, render_prompt, ConceptGraph, ConceptGraphError, ConfigOverrides, ExportFormat,
    GraphConfig, GraphStats, Pipeline, SummaryDocument,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conceptgraph")]
#[command(about = "Build a knowledge graph from concept and connection CSV files", long_about = None)]
struct Cli {
    /// Directory holding concepts.csv and connections.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory the JSON document is written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// YAML config file (version: 1)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output document layout
    #[arg(long, value_enum, global = true)]
    format: Option<ExportFormat>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and write it (default)
    Build,

    /// Build the graph and print a report for each node
    Explore {
        /// Node ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Build the graph and print statistics
    Stats {
        /// Number of most connected nodes to list
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Build the graph, then read node ids from stdin
    Interactive,

    /// Print a task prompt for a language model
    Prompt {
        /// The task to put to the model
        task: String,

        /// Build the graph and embed its concept summary
        #[arg(long)]
        with_context: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("conceptgraph={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<GraphConfig, ConceptGraphError> {
    let overrides = ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        output_dir: cli.output_dir.clone(),
        format: cli.format,
    };
    Ok(GraphConfig::resolve(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &overrides,
    )?)
}

fn run(cli: Cli) -> Result<(), ConceptGraphError> {
    let config = resolve_config(&cli)?;
    let pipeline = Pipeline::new(config);

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let outcome = pipeline.run()?;
            println!("Knowledge graph written to {}", outcome.output_path.display());
            print!("{}", outcome.stats);
        }
        Commands::Explore { ids } => {
            let graph = pipeline.build()?;
            for id in &ids {
                print_report(&graph, id, &pipeline.config().containment_type);
            }
        }
        Commands::Stats { top } => {
            let graph = pipeline.build()?;
            print!("{}", GraphStats::collect(&graph, top));
        }
        Commands::Interactive => {
            let graph = pipeline.build()?;
            interactive(&graph, &pipeline.config().containment_type)?;
        }
        Commands::Prompt { task, with_context } => {
            let prompt = if with_context {
                let summary = SummaryDocument::from_graph(&pipeline.build()?);
                render_prompt(&task, Some(&summary))?
            } else {
                render_prompt(&task, None)?
            };
            print!("{prompt}");
        }
    }
    Ok(())
}

fn print_report(graph: &ConceptGraph, id: &str, containment_type: &str) {
    match explore(graph, id, containment_type) {
        Some(report) => print!("{report}"),
        None => println!("Node '{id}' not found"),
    }
}

fn interactive(graph: &ConceptGraph, containment_type: &str) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("node id (or 'quit')> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let id = line.trim();
        if id.eq_ignore_ascii_case("quit") {
            break;
        }
        if !id.is_empty() {
            print_report(graph, id, containment_type);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conceptgraph::ErrorKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_subcommand_means_build() {
        let cli = Cli::try_parse_from(["conceptgraph"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or(Commands::Build), Commands::Build));
    }

    #[test]
    fn test_explore_requires_ids() {
        assert!(Cli::try_parse_from(["conceptgraph", "explore"]).is_err());

        let cli = Cli::try_parse_from(["conceptgraph", "explore", "A", "B"]).unwrap();
        match cli.command {
            Some(Commands::Explore { ids }) => assert_eq!(ids, vec!["A", "B"]),
            _ => panic!("expected explore"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["conceptgraph", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("conceptgraph.yaml");
        fs::write(
            &config_path,
            "version: 1\ndata_dir: yaml_data\noutput_dir: yaml_out\nformat: summary\n",
        )
        .unwrap();
        let config_arg = config_path.to_str().unwrap();

        let cli = Cli::try_parse_from(["conceptgraph", "--config", config_arg]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.format, ExportFormat::Summary);

        // global flags are accepted after the subcommand too
        let cli = Cli::try_parse_from([
            "conceptgraph",
            "stats",
            "--config",
            config_arg,
            "--data-dir",
            "flag_data",
            "--output-dir",
            "flag_out",
            "--format",
            "graph",
        ])
        .unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("flag_data"));
        assert_eq!(config.output_dir, PathBuf::from("flag_out"));
        assert_eq!(config.format, ExportFormat::Graph);
    }

    #[test]
    fn test_run_reports_build_errors() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("concepts.csv"), "node_id,node_name,Complexity\nA,Alpha,1\n").unwrap();
        fs::write(
            data.join("connections.csv"),
            "ID,connection_type,node_id1,node_id2,node_id3\nC1,contains,A,Z,\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let cli = Cli::try_parse_from([
            "conceptgraph",
            "--data-dir",
            data.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEndpoint);
        assert!(!out.exists());
    }

    #[test]
    fn test_run_builds_by_default() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("concepts.csv"), "node_id,node_name,Complexity\nA,Alpha,1\n").unwrap();
        fs::write(
            data.join("connections.csv"),
            "ID,connection_type,node_id1,node_id2,node_id3\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        let cli = Cli::try_parse_from([
            "conceptgraph",
            "--data-dir",
            data.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();
        assert!(out.join("knowledge_graph.json").exists());
    }

    #[test]
    fn test_prompt_without_context_needs_no_input() {
        let cli = Cli::try_parse_from([
            "conceptgraph",
            "--data-dir",
            "/nonexistent",
            "prompt",
            "Write five questions",
        ])
        .unwrap();
        run(cli).unwrap();
    }
}
