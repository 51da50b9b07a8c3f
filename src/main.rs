use clap::{Parser as ClapParser, Subcommand};
use jsonlogic::cli::{self, CheckOptions, CliError, EvalOptions, RenderOptions};
use std::io::{self, Read};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "jsonlogic")]
#[command(about = "jsonlogic - Evaluate JsonLogic rules against JSON data")]
#[command(version)]
struct Cli {
    /// Log compilation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a rule against JSON data
    Eval {
        /// The rule, as JSON
        rule: String,

        /// JSON data (reads from stdin if not provided)
        #[arg(short, long)]
        data: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Enable non-standard operators such as `match`
        #[arg(long)]
        extensions: bool,
    },

    /// Check that a rule parses and compiles
    Check {
        /// The rule, as JSON
        rule: String,

        /// Enable non-standard operators such as `match`
        #[arg(long)]
        extensions: bool,
    },

    /// Print a rule in canonical form
    Render {
        /// The rule, as JSON
        rule: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List the available operators
    Ops {
        /// Include non-standard operators
        #[arg(long)]
        extensions: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let result = match cli.command {
        Commands::Eval {
            rule,
            data,
            pretty,
            extensions,
        } => run_eval(rule, data, pretty, extensions),
        Commands::Check { rule, extensions } => {
            cli::execute_check(&CheckOptions { rule, extensions }).map(|()| {
                println!("Rule is valid");
            })
        }
        Commands::Render { rule, pretty } => {
            cli::execute_render(&RenderOptions { rule, pretty }).map(|json| {
                println!("{}", json);
            })
        }
        Commands::Ops { extensions } => {
            for name in cli::list_operators(extensions) {
                println!("{}", name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(
    rule: String,
    data: Option<String>,
    pretty: bool,
    extensions: bool,
) -> Result<(), CliError> {
    let data = match data {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = EvalOptions {
        rule,
        data,
        pretty,
        extensions,
    };

    println!("{}", cli::execute_eval(&options)?);
    Ok(())
}
