use std::env;
use std::io::{self, Write};
use std::process;

use anyhow::Result;

use tinygrep::config::{Config, USAGE};
use tinygrep::search;
use tinygrep::Pattern;

const ERROR_EXIT_CODE: i32 = 2;

// Usage: tinygrep [-r] -E <pattern> [PATH...]
fn main() {
    env_logger::init();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tinygrep: {}", err);
            eprintln!("{}", USAGE);
            process::exit(ERROR_EXIT_CODE);
        }
    };

    match run(&config) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("tinygrep: {:#}", err);
            process::exit(ERROR_EXIT_CODE);
        }
    }
}

fn run(config: &Config) -> Result<i32> {
    let pattern = Pattern::new(&config.pattern)?;
    log::debug!("searching with {:?}", config);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut diagnostics = io::stderr();

    let summary = search::run(&pattern, config, &mut out, &mut diagnostics)?;
    out.flush()?;
    Ok(summary.exit_code())
}
