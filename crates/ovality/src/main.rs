use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::debug;
use ovality::{Config, config::timeout_from_secs};

/// compute the ovality of a molecule with GEPOL
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// coordinate file to read. The format is chosen by the extension: .xyz,
    /// .pdb, or .mol
    #[arg(long)]
    coord_file_path: PathBuf,

    /// TOML configuration file. Every key is optional
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// path to the GEPOL binary. Defaults to
    /// fortran/gepol93_with_args.out in the current directory
    #[arg(short, long)]
    solver: Option<PathBuf>,

    /// seconds to wait for the solver before killing it. Defaults to 300
    #[arg(short, long)]
    timeout: Option<f64>,

    /// directory for the per-calculation work directories. Defaults to output
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Don't delete the solver's input and output files. Defaults to false
    #[arg(short, long, default_value_t = false)]
    keep_files: bool,

    /// Print the full result as JSON instead of the two summary lines
    #[arg(short, long, default_value_t = false)]
    json: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("loading config from {path:?}"))?,
            None => Config::default(),
        };
        if let Some(solver) = &self.solver {
            config.solver.clone_from(solver);
        }
        if let Some(t) = self.timeout {
            config.timeout = timeout_from_secs(t).map_err(anyhow::Error::msg)?;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        config.keep_files |= self.keep_files;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config()?;
    debug!("{config}");

    let res = ovality::calculate(&args.coord_file_path, &config)
        .with_context(|| {
            format!("computing the ovality of {:?}", args.coord_file_path)
        })?;

    if args.json {
        println!("{}", serde_json::to_string(&res)?);
    } else {
        println!("{res}");
    }

    Ok(())
}
