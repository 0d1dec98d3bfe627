use std::fs;
use std::io::{self, Read};

use clap::{Parser, Subcommand, ValueEnum};
use schematic::config::{ConfigError, EditorConfig};
use schematic::doc::Schematic;
use schematic::engine::Scene;
use schematic::geom::Point;
use schematic::hit::{HitPart, hit_test};
use schematic::junction::find_junctions;
use schematic::snap::resolve;
use schematic::snapshot::{Snapshot, SnapshotError};
use schematic::symbol::SymbolLibrary;
use schematic::terminal::{AnchorTable, all_terminals};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "schematic-cli", about = "Inspect and canonicalize schematic snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in symbol library.
    Symbols,
    /// Load a snapshot, canonicalize its wires, and print it back.
    Canon {
        #[arg(env = "SCHEMATIC_SNAPSHOT", default_value = "-", help = "Snapshot file path, or - for stdin")]
        input: String,
    },
    /// Print the junction dots of a snapshot.
    Junctions {
        #[arg(env = "SCHEMATIC_SNAPSHOT", default_value = "-", help = "Snapshot file path, or - for stdin")]
        input: String,
    },
    /// Print the terminal anchor table of a snapshot.
    Anchors {
        #[arg(env = "SCHEMATIC_SNAPSHOT", default_value = "-", help = "Snapshot file path, or - for stdin")]
        input: String,
    },
    /// Print the full render scene of a snapshot.
    Scene {
        #[arg(env = "SCHEMATIC_SNAPSHOT", default_value = "-", help = "Snapshot file path, or - for stdin")]
        input: String,
    },
    /// Resolve what a pointer at (x, y) would attach to or pick.
    Snap {
        #[arg(env = "SCHEMATIC_SNAPSHOT", default_value = "-", help = "Snapshot file path, or - for stdin")]
        input: String,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, value_enum, default_value_t = ToolArg::Wire)]
        tool: ToolArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ToolArg {
    Select,
    Wire,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;
    let library = SymbolLibrary::builtin();

    match cli.command {
        Command::Symbols => run_symbols(&library),
        Command::Canon { input } => run_canon(&library, &input),
        Command::Junctions { input } => {
            let doc = load(&library, &input)?;
            let points = find_junctions(doc.wires(), &all_terminals(doc.components()));
            tracing::info!(count = points.len(), "junctions found");
            print_json(&serde_json::to_value(points)?)
        }
        Command::Anchors { input } => {
            let doc = load(&library, &input)?;
            let table = AnchorTable::build(doc.components());
            let entries: Vec<Value> = table
                .entries()
                .iter()
                .map(|(p, reference)| json!({ "x": p.x, "y": p.y, "ref": reference }))
                .collect();
            print_json(&Value::Array(entries))
        }
        Command::Scene { input } => {
            let doc = load(&library, &input)?;
            print_json(&serde_json::to_value(Scene::build(&doc))?)
        }
        Command::Snap { input, x, y, tool } => {
            let doc = load(&library, &input)?;
            run_snap(&doc, &config, Point::new(x, y), tool)
        }
    }
}

fn run_symbols(library: &SymbolLibrary) -> Result<(), CliError> {
    let mut symbols: Vec<Value> = library
        .iter()
        .map(|def| {
            json!({
                "key": def.key,
                "category": def.category,
                "name": def.name,
                "prefix": def.name_prefix,
                "poles": def.pole_count(),
                "emit": def.emit_style,
            })
        })
        .collect();
    symbols.sort_by(|a, b| a["key"].as_str().cmp(&b["key"].as_str()));
    print_json(&Value::Array(symbols))
}

fn run_canon(library: &SymbolLibrary, input: &str) -> Result<(), CliError> {
    let raw = Snapshot::from_json(&read_input(input)?)?;
    let doc = raw.restore(library)?;
    tracing::info!(before = raw.wires.len(), after = doc.wires().len(), "canonicalized snapshot");
    println!("{}", Snapshot::capture(&doc).to_json()?);
    Ok(())
}

fn run_snap(doc: &Schematic, config: &EditorConfig, p: Point, tool: ToolArg) -> Result<(), CliError> {
    match tool {
        ToolArg::Wire => print_json(&serde_json::to_value(resolve(p, doc, config))?),
        ToolArg::Select => {
            let value = match hit_test(p, doc, config) {
                None => Value::Null,
                Some(hit) => {
                    let part = match hit.part {
                        HitPart::Component => json!({ "kind": "component" }),
                        HitPart::WireEndpoint(end) => json!({ "kind": "wire_endpoint", "end": end }),
                        HitPart::WireBody(segment) => {
                            json!({ "kind": "wire_body", "segment": format!("{segment:?}") })
                        }
                    };
                    json!({ "id": hit.id.to_string(), "part": part, "point": hit.point })
                }
            };
            print_json(&value)
        }
    }
}

fn load(library: &SymbolLibrary, input: &str) -> Result<Schematic, CliError> {
    Ok(Snapshot::from_json(&read_input(input)?)?.restore(library)?)
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "stdin".to_owned(), source })?;
        return Ok(buf);
    }
    fs::read_to_string(input).map_err(|source| CliError::Read { path: input.to_owned(), source })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
