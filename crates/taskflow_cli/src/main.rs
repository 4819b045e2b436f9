//! Interactive TaskFlow front-end.
//!
//! # Responsibility
//! - Read one line at a time and hand it to the core session.
//! - Render responses and stop when the session asks to exit.

mod cli;
mod reminder;

use clap::Parser;
use cli::Cli;
use log::info;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use taskflow_core::{core_version, init_logging, Response, TaskSession};

const GREETING: &str = "Hello! I'm TaskFlow, your personal task tracker.\n\
What can I do for you? Enter 'help' for a list of commands.";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.session_config();

    match cli.log_dir(&config) {
        Ok(log_dir) => {
            if let Err(err) = init_logging(&cli.log_level(), &log_dir) {
                eprintln!("Warning: logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("Warning: logging disabled: {err}"),
    }

    let (mut session, notices) = TaskSession::open(&config);
    for notice in &notices {
        eprintln!("{notice}");
    }

    if !cli.no_banner && !cli.json {
        println!("{GREETING}");
        let now = chrono::Local::now().naive_local();
        if let Some(text) = reminder::render(&reminder::due_soon(session.tasks(), now)) {
            println!("{text}");
        }
    }

    match run_loop(&cli, &mut session) {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok version={}", core_version());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_loop(cli: &Cli, session: &mut TaskSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        if !cli.json {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        let response = session.handle(&line);
        render_response(cli, &mut stdout, &response)?;
        if response.exit {
            return Ok(());
        }
    }
}

fn render_response(cli: &Cli, out: &mut impl Write, response: &Response) -> io::Result<()> {
    if cli.json {
        let encoded = serde_json::to_string(response).map_err(io::Error::other)?;
        writeln!(out, "{encoded}")?;
    } else {
        writeln!(out, "{}", response.message)?;
    }
    out.flush()
}
