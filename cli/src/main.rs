//! genenet CLI: build and inspect gene and pathway networks from TSV inputs

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use genenet::data::tsv;
use genenet::{
    AnalysisConfig, CentralityMeasure, DistanceMethod, HubScorer, Network, NetworkBuilder,
    NodeKey, Order, PathwayNetworkBuilder, PathwaySimilarityEngine, SubnetworkExtractor,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "genenet", version, about = "Gene interaction and pathway network analysis")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML analysis configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Output {
    Nodes,
    Edges,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a gene interaction network around seed genes and score hubs
    Network {
        /// Seed gene list, one id per line ("-" for stdin). Defaults to the significant
        /// genes of --expression
        #[arg(long)]
        seeds: Option<PathBuf>,

        /// Interaction table (gene_a, gene_b, weight)
        #[arg(long)]
        interactions: PathBuf,

        /// Differential-expression table used to annotate nodes
        #[arg(long)]
        expression: Option<PathBuf>,

        #[arg(long)]
        order: Option<String>,

        #[arg(long)]
        measure: Option<String>,

        /// Anchor gene list; extracts a connecting subnetwork around them
        #[arg(long)]
        anchors: Option<PathBuf>,

        /// Keep only connecting-path edges in the extracted subnetwork
        #[arg(long)]
        trim: Option<bool>,

        #[arg(long, value_enum, default_value = "nodes")]
        output: Output,
    },
    /// Build a pathway-similarity network overlaid with enrichment results
    Pathways {
        /// Pathway membership table (pathway_id, pathway_name, parent_group, gene_id)
        #[arg(long)]
        membership: PathBuf,

        /// Enrichment table (pathway_id, direction, p_value, adj_p_value, comparison, genes)
        #[arg(long)]
        enrichment: PathBuf,

        #[arg(long)]
        max_distance: Option<f64>,

        #[arg(long)]
        method: Option<String>,

        /// Keep background components without any enriched pathway
        #[arg(long)]
        no_trim: bool,

        #[arg(long, value_enum, default_value = "nodes")]
        output: Output,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Commands::Network {
            seeds,
            interactions,
            expression,
            order,
            measure,
            anchors,
            trim,
            output,
        } => {
            let mut config = config;
            if let Some(order) = order {
                config.network.order = order.parse::<Order>()?;
            }
            if let Some(measure) = measure {
                config.network.measure = measure.parse::<CentralityMeasure>()?;
            }
            if let Some(trim) = trim {
                config.extraction.trim = trim;
            }
            let args = NetworkArgs {
                seeds: seeds.as_deref(),
                interactions: &interactions,
                expression: expression.as_deref(),
                anchors: anchors.as_deref(),
            };
            run_network(&config, &args, output, &cli.format)
        }
        Commands::Pathways {
            membership,
            enrichment,
            max_distance,
            method,
            no_trim,
            output,
        } => {
            let mut config = config;
            if let Some(d) = max_distance {
                config.pathway.max_distance = d;
            }
            if let Some(method) = method {
                config.pathway.method = method.parse::<DistanceMethod>()?;
            }
            if no_trim {
                config.pathway.trim = false;
            }
            config.validate()?;
            run_pathways(&config, &membership, &enrichment, output, &cli.format)
        }
    }
}

struct NetworkArgs<'a> {
    seeds: Option<&'a Path>,
    interactions: &'a Path,
    expression: Option<&'a Path>,
    anchors: Option<&'a Path>,
}

fn run_network(
    config: &AnalysisConfig,
    args: &NetworkArgs<'_>,
    output: Output,
    format: &OutputFormat,
) -> Result<()> {
    let mut db = tsv::read_interactions(open(args.interactions)?)
        .with_context(|| format!("reading {}", args.interactions.display()))?;
    if let Some(min) = config.network.min_confidence {
        db = db.with_min_confidence(min);
    }

    let table = match args.expression {
        Some(path) => {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let table = tsv::read_diff_exp(&name, open(path)?, &config.expression)
                .with_context(|| format!("reading {}", path.display()))?;
            Some(table)
        }
        None => None,
    };

    let seeds = match (args.seeds, &table) {
        (Some(path), _) => tsv::read_gene_list(open(path)?)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, Some(table)) => table.significant_genes(),
        (None, None) => bail!("either --seeds or --expression is required"),
    };

    let mut net = NetworkBuilder::from_config(&config.network).build(&seeds, &db)?;
    if let Some(table) = &table {
        net.annotate_expression(table);
    }
    let mut net = HubScorer::from_config(&config.network)?.score(net);

    if let Some(path) = args.anchors {
        let anchors = tsv::read_gene_list(open(path)?)
            .with_context(|| format!("reading {}", path.display()))?;
        net = SubnetworkExtractor::new(config.extraction.trim).extract(&net, &anchors)?;
    }

    let summary = net.summary();
    info!(
        "Network: {} nodes, {} edges, {} components, {} hubs",
        summary.nodes, summary.edges, summary.components, summary.hubs
    );
    print_network(&net, output, format)
}

fn run_pathways(
    config: &AnalysisConfig,
    membership: &Path,
    enrichment: &Path,
    output: Output,
    format: &OutputFormat,
) -> Result<()> {
    let pathways = tsv::read_pathways(open(membership)?)
        .with_context(|| format!("reading {}", membership.display()))?
        .filter_by_size(config.pathway.min_size, config.pathway.max_size);
    let enrichment = tsv::read_enrichment(open(enrichment)?)
        .with_context(|| format!("reading {}", enrichment.display()))?;

    let matrix = PathwaySimilarityEngine::new(config.pathway.method).distances_for(&pathways)?;
    let builder = PathwayNetworkBuilder::new();
    let mut foundation = builder.foundation(&matrix, config.pathway.max_distance)?;
    foundation.describe(&pathways);

    let net = builder.create(&foundation, &enrichment, config.pathway.trim)?;
    print_network(&net, output, format)
}

fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn print_network<K: NodeKey>(net: &Network<K>, output: Output, format: &OutputFormat) -> Result<()> {
    let (header, rows): (Vec<String>, Vec<Vec<String>>) = match output {
        Output::Nodes => {
            let records = net.node_table();
            if let OutputFormat::Json = format {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            let columns = net.node_columns();
            let rows = records
                .iter()
                .map(|r| columns.iter().map(|c| r.cell(c)).collect())
                .collect();
            (columns, rows)
        }
        Output::Edges => {
            let records = net.edge_table();
            if let OutputFormat::Json = format {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            let header = ["source", "target", "weight"].map(String::from).to_vec();
            let rows = records
                .into_iter()
                .map(|e| vec![e.source, e.target, e.weight.to_string()])
                .collect();
            (header, rows)
        }
    };

    match format {
        OutputFormat::Csv => {
            println!("{}", header.join(","));
            for row in &rows {
                let cells: Vec<String> = row.iter().map(|v| format_csv_value(v)).collect();
                println!("{}", cells.join(","));
            }
        }
        _ => {
            if rows.is_empty() {
                println!("(empty network)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&header);
            for row in rows.iter() {
                table.add_row(row);
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }

    Ok(())
}

fn format_csv_value(v: &str) -> String {
    if v.contains(',') || v.contains('"') || v.contains('\n') {
        format!("\"{}\"", v.replace('"', "\"\""))
    } else {
        v.to_string()
    }
}
