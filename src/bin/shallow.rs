//! Command-line interface for shallow
//! Shallow-renders a fixture file and prints its snapshot, or queries the rendered tree.
//!
//! Usage:
//!   shallow snapshot `<fixture>` [--format `<format>`] [--config `<file>`]   - Print the rendered snapshot
//!   shallow find `<fixture>` (--test-id|--type|--class-name) `<value>`       - Print matching nodes
//!   shallow list-formats                                                - List available output formats

use clap::{Arg, ArgGroup, ArgMatches, Command};
use shallow::fixture::load_fixture;
use shallow::formats::FormatRegistry;
use shallow::normalize::Normalizer;
use shallow::settings::{Loader, Settings};
use shallow::{Explorer, ExplorerNode, Mode, Shallow, ShallowRenderer};

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML settings file layered over the built-in defaults")
}

fn fixture_arg() -> Arg {
    Arg::new("fixture")
        .help("Path to a JSON or YAML fixture")
        .required(true)
        .index(1)
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = Command::new("shallow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shallow-render component fixtures and inspect the result")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("snapshot")
                .about("Render a fixture one level deep and print its snapshot")
                .arg(fixture_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'snapshot', 'treeviz', 'json')")
                        .default_value("snapshot"),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("find")
                .about("Render a fixture and print the snapshot of every matching node")
                .arg(fixture_arg())
                .arg(Arg::new("test-id").long("test-id").help("Match by test id"))
                .arg(Arg::new("type").long("type").help("Match by element type"))
                .arg(
                    Arg::new("class-name")
                        .long("class-name")
                        .help("Match by class name"),
                )
                .group(
                    ArgGroup::new("query")
                        .args(["test-id", "type", "class-name"])
                        .required(true),
                )
                .arg(config_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("snapshot", snapshot_matches)) => {
            let fixture = required(snapshot_matches, "fixture");
            let format = required(snapshot_matches, "format");
            let settings = load_settings(snapshot_matches);
            handle_snapshot_command(fixture, format, settings);
        }
        Some(("find", find_matches)) => {
            let fixture = required(find_matches, "fixture");
            let settings = load_settings(find_matches);
            handle_find_command(fixture, find_matches, settings);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

fn required<'m>(matches: &'m ArgMatches, id: &str) -> &'m str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_else(|| fail(&format!("missing argument: {id}")))
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_settings(matches: &ArgMatches) -> Settings {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader
        .build()
        .unwrap_or_else(|e| fail(&format!("Invalid settings: {}", e)))
}

fn render(fixture: &str, settings: &Settings) -> Shallow {
    let target = load_fixture(fixture).unwrap_or_else(|e| fail(&e.to_string()));
    ShallowRenderer::new()
        .settings(settings.clone())
        .shallow(target)
}

/// Handle the snapshot command
fn handle_snapshot_command(fixture: &str, format: &str, settings: Settings) {
    let output = match render(fixture, &settings) {
        Shallow::Rendered(result) => result.snapshot_as(format),
        Shallow::Unrendered(target) => {
            // snapshot the untouched target, as a test would see it
            let tree = Normalizer::new(Mode::Snapshot).normalize(&target);
            FormatRegistry::with_snapshot_config(settings.snapshot).serialize(&tree, format)
        }
    };
    match output {
        Ok(text) => println!("{}", text.trim_end_matches('\n')),
        Err(e) => fail(&e.to_string()),
    }
}

/// Handle the find command
fn handle_find_command(fixture: &str, matches: &ArgMatches, settings: Settings) {
    let outcome = render(fixture, &settings);
    let fallback;
    let root = match &outcome {
        Shallow::Rendered(result) => result.instance(),
        Shallow::Unrendered(target) => {
            fallback = Explorer::with_config(
                Normalizer::new(Mode::Query).normalize(target),
                settings.query.clone(),
            )
            .with_snapshot_config(settings.snapshot.clone());
            fallback.root()
        }
    };

    let found: Vec<ExplorerNode<'_>> = if let Some(test_id) = matches.get_one::<String>("test-id")
    {
        root.find_by_test_id(test_id)
    } else if let Some(type_name) = matches.get_one::<String>("type") {
        root.find_by_type(type_name)
    } else if let Some(class_name) = matches.get_one::<String>("class-name") {
        root.find_by_class_name(class_name)
    } else {
        unreachable!()
    };

    if found.is_empty() {
        eprintln!("No matching nodes");
        std::process::exit(1);
    }
    let snapshots: Vec<String> = found.iter().map(ExplorerNode::snapshot).collect();
    println!("{}", snapshots.join("\n\n"));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        println!("  {}", name);
        if let Some(formatter) = registry.get(&name) {
            println!("    {}", formatter.description());
        }
    }
}
