mod output;

use clap::Parser;
use directory::Directory;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = concat!(env!("MUSTER_VERSION"), " ", env!("MUSTER_BUILD_HASH"));

#[derive(Parser)]
#[command(
    name = "muster",
    version = VERSION,
    about = "Resolve host expressions against a tagged host directory"
)]
struct Arguments {
    /// Host expressions to resolve (e.g. "prod^intel"), or filter patterns
    /// with --usage.
    names: Vec<String>,

    /// Directory file to load instead of $MUSTER_FILE or ~/.muster.
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Print one host per line instead of space-joined.
    #[arg(short = '1', long)]
    lines: bool,

    /// List all hosts in declaration order.
    #[arg(long, conflicts_with_all = ["tags", "macros", "usage"])]
    hosts: bool,

    /// List tag and macro names in first-seen order.
    #[arg(long, conflicts_with_all = ["macros", "usage"])]
    tags: bool,

    /// List macros with their expressions.
    #[arg(long, conflicts_with = "usage")]
    macros: bool,

    /// Show host counts per tag and macro, filtered by the given patterns.
    #[arg(long)]
    usage: bool,
}

/// Log to stderr so stdout stays clean for resolved host lists.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(file: Option<&Path>) -> Result<Directory, directory::LoadError> {
    match file {
        Some(path) => Directory::load_from_path(path),
        None => Directory::load(),
    }
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing();

    let dir = match load(args.file.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.hosts {
        let names: Vec<&str> = dir.hosts().iter().map(|h| h.name.as_str()).collect();
        output::print_names(&names, args.lines);
        return ExitCode::SUCCESS;
    }

    if args.tags {
        for name in dir.tag_names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    if args.macros {
        for (name, expr) in dir.macros() {
            println!("{name} = {expr}");
        }
        return ExitCode::SUCCESS;
    }

    if args.usage {
        match dir.usage(&args.names) {
            Ok(rows) => {
                let table = output::usage_table(&rows);
                if !table.is_empty() {
                    println!("{table}");
                }
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if args.names.is_empty() {
        eprintln!("Error: no expressions given (try --hosts to list the directory)");
        return ExitCode::FAILURE;
    }

    // Each expression is an independent query: a bad one is reported and
    // the rest still resolve.
    let mut failed = false;
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for expr in &args.names {
        match dir.evaluate(expr) {
            Ok(hosts) => {
                for host in hosts {
                    if seen.insert(host.sequence()) {
                        resolved.push(host);
                    }
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                failed = true;
            }
        }
    }

    if resolved.is_empty() && !failed {
        eprintln!("no matching hosts");
    }
    let names: Vec<&str> = resolved.iter().map(|h| h.name.as_str()).collect();
    output::print_names(&names, args.lines);

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
