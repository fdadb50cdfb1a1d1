//! Interactive terminal front end for the client book.
//!
//! Reads one command per line from stdin, prints feedback, and re-renders the
//! filtered person list whenever a command changed what is shown.

use anyhow::{Context, Result};
use clap::Parser;
use clientdesk_core::{
    init_logging, open_db, AppConfig, CommandDispatcher, PersonRepository,
    Session, SqlitePersonRepository,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "clientdesk", version, about = "Client book for insurance agents")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, default_value = "clientdesk.toml")]
    config: PathBuf,
    /// Overrides the configured database file.
    #[arg(long)]
    data_file: Option<PathBuf>,
    /// Overrides the configured log level.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_with_env(&cli.config)?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level, &config.log_dir).context("failed to start logging")?;
    let conn = open_db(&config.data_file)
        .with_context(|| format!("failed to open `{}`", config.data_file.display()))?;
    let mut dispatcher = CommandDispatcher::new(SqlitePersonRepository::new(&conn))?;

    run(&mut dispatcher, &config, io::stdin().lock(), io::stdout().lock())
}

fn run<R: PersonRepository>(
    dispatcher: &mut CommandDispatcher<R>,
    config: &AppConfig,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    render_persons(&mut out, dispatcher.session())?;
    render_upcoming(&mut out, dispatcher.session(), config)?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            prompt(&mut out)?;
            continue;
        }
        match dispatcher.execute(&line) {
            Ok(outcome) => {
                writeln!(out, "{}", outcome.feedback)?;
                if outcome.exit {
                    break;
                }
                if !outcome.show_help {
                    render_persons(&mut out, dispatcher.session())?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        prompt(&mut out)?;
    }

    dispatcher.flush()?;
    info!("event=app_exit module=cli status=ok");
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn render_persons(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let persons = session.filtered_persons();
    if persons.is_empty() {
        writeln!(out, "(no persons to show)")?;
    }
    for (position, person) in persons.iter().enumerate() {
        writeln!(out, "{}. {} [{}]", position + 1, person, person.client_status())?;
        for (i, policy) in person.policies().iter().enumerate() {
            writeln!(out, "     policy {}: {}", i + 1, policy)?;
        }
        for (i, meeting) in person.meetings().iter().enumerate() {
            writeln!(out, "     meeting {}: {}", i + 1, meeting)?;
        }
    }

    let summary = session.registry().client_status_summary();
    writeln!(
        out,
        "Clients: {} without policies, {} active, {} fully covered; {} non-clients",
        summary.no_policies, summary.active, summary.fully_covered, summary.not_client
    )
}

fn render_upcoming(out: &mut impl Write, session: &Session, config: &AppConfig) -> io::Result<()> {
    let upcoming = session.upcoming_meetings(config.upcoming_window());
    if upcoming.is_empty() {
        return Ok(());
    }
    writeln!(out, "Coming up in the next {} days:", config.upcoming_window_days)?;
    for (person, meeting) in upcoming {
        writeln!(out, "  {} with {}", meeting, person.name())?;
    }
    Ok(())
}
