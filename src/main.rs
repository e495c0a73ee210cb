use anyhow::Result;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atm_sim::{run_demo, AtmConfig, Session};

const USAGE: &str = "Usage: atm-sim [--accounts <file.json|file.csv>] [demo]";

#[derive(Debug, PartialEq)]
enum Mode {
    Interactive,
    Demo,
}

struct Args {
    mode: Mode,
    accounts: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args {
        mode: Mode::Interactive,
        accounts: None,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "demo" => parsed.mode = Mode::Demo,
            "--accounts" => parsed.accounts = Some(PathBuf::from(iter.next()?)),
            _ => return None,
        }
    }

    Some(parsed)
}

fn main() {
    // Diagnostics go to stderr; stdout carries the ATM conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return;
    };

    // Exit code stays 0: failures are reported, not propagated
    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.accounts {
        Some(path) => AtmConfig::from_file(path)?,
        None => AtmConfig::default(),
    };

    tracing::info!(version = atm_sim::VERSION, accounts = config.accounts.len(), "starting ATM");

    let mut atm = config.into_atm();

    match args.mode {
        Mode::Demo => run_demo(&mut atm, &mut io::stdout().lock())?,
        Mode::Interactive => {
            let stdin = io::stdin();
            let mut session = Session::new(&mut atm, stdin.lock(), io::stdout());
            session.run()?;
        }
    }

    Ok(())
}
