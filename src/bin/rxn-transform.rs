use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rxn_template::*;
use tracing::{info, warn};

/// Apply a reaction recipe to a reactant adjacency list.
#[derive(Parser)]
#[command(name = "rxn-transform", version, about)]
struct Cli {
    /// Reactant adjacency list
    #[arg(short, long, value_name = "FILE")]
    reactant: PathBuf,

    /// Recipe: a list of ['ACTION', ...] entries
    #[arg(short = 'a', long, value_name = "FILE")]
    recipe: PathBuf,

    /// Reaction family name, used in log output
    #[arg(short, long, default_value = "unnamed")]
    family: String,

    /// Write the product here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write reactant.dot and product.dot into this directory
    #[arg(long, value_name = "DIR")]
    dot_dir: Option<PathBuf>,

    /// trace, debug, info, warn, error or off
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {} from {}", what, path.display()))
}

fn write_dot(dir: &Path, name: &str, graph: &MoleculeGraph) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, generate_dot(graph))
        .with_context(|| format!("Failed to write DOT file {}", path.display()))?;
    info!("DOT file saved to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let reactant = read(&cli.reactant, "reactant")?;
    let recipe = read(&cli.recipe, "recipe")?;

    let template = ReactionTemplate::parse(cli.family.as_str(), &recipe)
        .with_context(|| format!("Failed to parse recipe {}", cli.recipe.display()))?;
    if template.actions.is_empty() {
        warn!("Recipe {} has no actions, the product equals the reactant", cli.recipe.display());
    }

    let product = template
        .apply_to_graph(&reactant)
        .with_context(|| format!("Failed to apply {} to {}", template.family, cli.reactant.display()))?;

    if let Some(dir) = &cli.dot_dir {
        let reactant_graph = parse_adjacency_list(&reactant)?;
        write_dot(dir, "reactant.dot", &reactant_graph)?;
        write_dot(dir, "product.dot", &product)?;
    }

    let text = serialize(&product);
    match &cli.output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write product to {}", path.display()))?;
            info!("Product written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
