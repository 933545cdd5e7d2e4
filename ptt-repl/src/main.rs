mod command;
mod config;
mod error;
mod host;

use config::Config;
use host::Host;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}};
use tracing::warn;
use tracing_subscriber::FmtSubscriber;

/// Runs one command line, printing its output or its error.
fn run_line(host: &mut Host, line: &str) {
    match host.execute(line) {
        Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
        Err(err) => err.report_to_stderr("input", line),
    }
}

/// Runs every line of a script, skipping blank lines and `#` comments.
fn run_script(host: &mut Host, input: &str) {
    for line in input.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        println!("> {}", trimmed);
        run_line(host, line);
        if host.should_quit() {
            break;
        }
    }
}

fn init_logging(config: &Config) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set up logging: {}", err);
    }
    for ignored in &config.ignored {
        warn!(%ignored, "ignoring unknown setting");
    }
}

fn main() {
    let config = Config::from_env();
    init_logging(&config);
    let mut host = Host::new(&config);

    if let Some(path) = &config.script {
        // run a script file
        match fs::read_to_string(path) {
            Ok(input) => run_script(&mut host, &input),
            Err(err) => {
                eprintln!("could not read {}: {}", path.display(), err);
                std::process::exit(1);
            },
        }
    } else if !io::stdin().is_terminal() {
        // read a script from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            std::process::exit(1);
        }
        run_script(&mut host, &input);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("could not open the terminal: {}", err);
                std::process::exit(1);
            },
        };
        println!("type `help` for the list of commands");

        fn process_line(rl: &mut DefaultEditor, host: &mut Host) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(host, &input);
            Ok(())
        }

        while !host.should_quit() {
            if let Err(err) = process_line(&mut rl, &mut host) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
