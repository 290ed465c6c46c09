use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sporogen::config::ScriptConfig;
use sporogen::lifecycle::LifeCycle;
use std::fs;
use std::path::PathBuf;

/// Sporogen: a SLiM script generator for plant life cycles.
///
/// Turns a JSON description of a genome and a reproductive life cycle into a
/// complete simulator program.
#[derive(Parser, Debug)]
#[command(name = "sporogen")]
#[command(author, version, about = "Generates SLiM scripts for plant life-cycle simulations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starting-point configuration file.
    Init {
        /// Output path for the configuration
        #[arg(short, long, default_value = "sporogen.json")]
        output: PathBuf,

        /// Life-cycle mode to pre-fill (see `--help` for the list)
        #[arg(short, long, default_value = "bryophyte-monoicous")]
        life_cycle: String,
    },

    /// Generate the simulator program from a configuration file.
    Generate {
        /// Configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Output path (stdout if not given)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the chromosome seed (random strategy only)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check a configuration file without writing anything.
    Validate {
        /// Configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output, life_cycle } => {
            let life_cycle: LifeCycle = life_cycle.parse()?;
            let config = ScriptConfig::example(life_cycle);
            let json = serde_json::to_string_pretty(&config)?;
            fs::write(&output, json)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote starting configuration to {}", output.display());
        }

        Commands::Generate { config, output, seed } => {
            let mut config = load_config(&config)?;
            if let Some(seed) = seed {
                config.set_seed(seed);
            }
            let script = config.build_script()?;
            match output {
                Some(path) => {
                    fs::write(&path, &script)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Wrote script to {}", path.display());
                }
                None => print!("{script}"),
            }
        }

        Commands::Validate { config } => {
            let config = load_config(&config)?;
            let chromosome = config.build_chromosome()?;
            config.build_script()?;
            println!("Configuration OK");
            println!("  Genome length: {} bp", chromosome.genome_length());
            println!("  Intervals: {}", chromosome.interval_count());
            println!("  Mutation types: {}", chromosome.mutation_types().len());
            println!("  Sim time: {} cycles", config.run.sim_time);
        }
    }

    Ok(())
}

fn load_config(path: &PathBuf) -> Result<ScriptConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: ScriptConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}
