//! One-shot diagram from command-line loads

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use moment_core::calculations::calculate;
use moment_core::loads::{ForceDirection, LoadSession, MomentDirection};
use moment_core::plot::save_svg;
use moment_core::report::render_text;
use tracing::info;

use super::ConfigOverrides;
use crate::load_args::{parse_load_spec, AddToSession, LoadSpec};

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Point force as POS,DIR,MAG (DIR: up/down); repeatable
    #[arg(short = 'f', long = "force", value_name = "POS,DIR,MAG", value_parser = parse_load_spec::<ForceDirection>)]
    pub forces: Vec<LoadSpec<ForceDirection>>,

    /// Applied couple as POS,DIR,MAG (DIR: cw/ccw); repeatable
    #[arg(short = 'm', long = "moment", value_name = "POS,DIR,MAG", value_parser = parse_load_spec::<MomentDirection>)]
    pub moments: Vec<LoadSpec<MomentDirection>>,

    /// Write the plot to this SVG file
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,

    /// Print the diagram as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: PlotArgs) -> Result<()> {
    let cfg = args.overrides.resolve()?;

    let mut session = LoadSession::new();
    for force in &args.forces {
        force.add_to(&mut session)?;
    }
    for moment in &args.moments {
        moment.add_to(&mut session)?;
    }

    let diagram = calculate(&cfg.diagram_input(&session))?;
    info!(
        samples = diagram.len(),
        critical_points = diagram.critical_points.len(),
        "diagram computed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diagram)?);
    } else {
        println!("Flexure moment diagram - {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
        println!();
        print!("{}", render_text(&session, &diagram, &cfg.units));
    }

    if let Some(path) = &args.svg {
        save_svg(&diagram, &cfg.plot, &cfg.units, path)
            .with_context(|| format!("writing plot to {}", path.display()))?;
        if !args.json {
            println!();
            println!("Plot written to {}", path.display());
        }
    }

    Ok(())
}
