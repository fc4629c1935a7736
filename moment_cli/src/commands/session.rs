//! Interactive load entry
//!
//! Mirrors a small form: add forces and couples one at a time, review and
//! delete table rows, then draw the diagram as often as needed. Loads live
//! only for the duration of the prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use moment_core::calculations::calculate;
use moment_core::loads::{Direction, ForceDirection, LoadSession, MomentDirection};
use moment_core::plot::save_svg;
use moment_core::report::{render_diagram, render_session};
use moment_core::DiagramConfig;
use tracing::warn;

use super::ConfigOverrides;
use crate::load_args::{parse_fields, AddToSession, LoadSpec};

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Which table a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Force,
    Moment,
}

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    AddForce(LoadSpec<ForceDirection>),
    AddMoment(LoadSpec<MomentDirection>),
    List,
    Delete { table: Table, index: usize },
    Plot { svg: Option<PathBuf> },
    Json,
    Clear,
    Help,
    Quit,
}

fn split_load_fields(args: &[&str]) -> Vec<String> {
    // accept both `10 down 5` and `10,down,5`
    args.join(" ")
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_load<D: Direction>(args: &[&str]) -> Result<LoadSpec<D>, String> {
    let fields = split_load_fields(args);
    let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    parse_fields(&refs)
}

/// Parse one prompt line. Empty lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match verb.to_lowercase().as_str() {
        "force" | "f" => SessionCommand::AddForce(parse_load(rest)?),
        "moment" | "m" => SessionCommand::AddMoment(parse_load(rest)?),
        "list" | "ls" => SessionCommand::List,
        "delete" | "del" | "rm" => {
            let [table, index] = rest else {
                return Err("usage: delete force|moment INDEX".to_string());
            };
            let table = match table.to_lowercase().as_str() {
                "force" | "f" => Table::Force,
                "moment" | "m" => Table::Moment,
                other => return Err(format!("unknown table '{}', expected force or moment", other)),
            };
            let index = index
                .parse::<usize>()
                .map_err(|_| format!("index '{}' is not a row number", index))?;
            SessionCommand::Delete { table, index }
        }
        "plot" | "draw" => SessionCommand::Plot {
            svg: rest.first().map(PathBuf::from),
        },
        "json" => SessionCommand::Json,
        "clear" => SessionCommand::Clear,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(Some(command))
}

fn print_help() {
    println!("Commands:");
    println!("  force POS DIR MAG     add a point force   (DIR: {})", ForceDirection::accepted_labels());
    println!("  moment POS DIR MAG    add a couple        (DIR: {})", MomentDirection::accepted_labels());
    println!("  list                  show both tables");
    println!("  delete force|moment N remove row N");
    println!("  plot [FILE.svg]       compute the diagram, optionally write an SVG");
    println!("  json                  print the diagram as JSON");
    println!("  clear                 remove all loads");
    println!("  quit                  leave the session");
}

/// Apply one command. Returns false when the session should end.
pub fn apply(command: SessionCommand, session: &mut LoadSession, cfg: &DiagramConfig) -> Result<bool> {
    match command {
        SessionCommand::AddForce(spec) => {
            spec.add_to(session)?;
            println!("Force added ({} in table)", session.forces().len());
        }
        SessionCommand::AddMoment(spec) => {
            spec.add_to(session)?;
            println!("Moment added ({} in table)", session.moments().len());
        }
        SessionCommand::List => print!("{}", render_session(session, &cfg.units)),
        SessionCommand::Delete { table, index } => {
            match table {
                Table::Force => session.remove_force(index).map(|_| ())?,
                Table::Moment => session.remove_moment(index).map(|_| ())?,
            }
            println!("Row {} deleted", index);
        }
        SessionCommand::Plot { svg } => {
            let diagram = calculate(&cfg.diagram_input(session))?;
            print!("{}", render_diagram(&diagram, &cfg.units));
            if let Some(path) = svg {
                save_svg(&diagram, &cfg.plot, &cfg.units, &path)?;
                println!("Plot written to {}", path.display());
            }
        }
        SessionCommand::Json => {
            let diagram = calculate(&cfg.diagram_input(session))?;
            println!("{}", serde_json::to_string_pretty(&diagram)?);
        }
        SessionCommand::Clear => {
            session.clear();
            println!("All loads removed");
        }
        SessionCommand::Help => print_help(),
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

pub fn execute(args: SessionArgs) -> Result<()> {
    let cfg = args.overrides.resolve()?;
    let mut session = LoadSession::new();

    println!("Flexure interactive session");
    println!(
        "Beam length {} {}, positions in {}, forces in {}, couples in {}",
        cfg.beam_length,
        cfg.units.length.symbol(),
        cfg.units.length.symbol(),
        cfg.units.force.symbol(),
        cfg.units.couple_symbol()
    );
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match apply(command, &mut session, &cfg) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = %e, "command failed");
                    println!("Error: {}", e);
                }
            },
            Err(msg) => println!("{}", msg),
        }
    }
    Ok(())
}
