use anyhow::Context;
use canvas_cli::{list_kinds, read_deltas, replay};
use canvas_session::SessionConfig;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .value_name("TOML")
        .value_parser(value_parser!(PathBuf))
        .help("Session configuration file");
    let json_arg = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");

    Command::new("canvas")
        .version(canvas_session::VERSION)
        .about("Streaming artifact reducer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("replay")
                .about("Replay a recorded delta stream (one JSON delta per line)")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSONL delta recording"),
                )
                .arg(config_arg.clone())
                .arg(json_arg.clone()),
        )
        .subcommand(
            Command::new("kinds")
                .about("List registered artifact kinds")
                .arg(config_arg)
                .arg(json_arg),
        )
}

fn load_config(args: &ArgMatches) -> anyhow::Result<SessionConfig> {
    match args.get_one::<PathBuf>("config") {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("replay", args)) => {
            let config = load_config(args)?;
            let path = args
                .get_one::<PathBuf>("file")
                .context("missing FILE")?;
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let deltas = read_deltas(BufReader::new(file))
                .with_context(|| format!("reading {}", path.display()))?;

            let report = replay(config, deltas).await?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Some(("kinds", args)) => {
            let config = load_config(args)?;
            let kinds = list_kinds(&config.stream);
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&kinds)?);
            } else {
                for info in kinds {
                    let hook = if info.hook { "" } else { " (hook disabled)" };
                    println!("{:<6} {}{hook}", info.kind, info.description);
                }
            }
        }
        _ => {}
    }

    Ok(())
}
