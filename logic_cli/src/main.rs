//! Generate a puzzle circuit on the command line and poke at it: print the
//! wiring, the truth table over the free inputs, and one winning play.

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use logic_circuit::{Circuit, NodeKind};
use logic_gen::{ChaCha8Rng, DifficultyProfile, ProbabilityCurve, first_solution, generate};
use logic_session::Session;
use rand::SeedableRng;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of player-controlled inputs.
    #[arg(long, default_value_t = 4)]
    inputs: usize,

    /// Desired output bit the puzzle must be able to reach.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    desired: u8,

    /// Number of circuit layers (the deepest holds the inputs).
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// Gates per layer, lower bound.
    #[arg(long, default_value_t = 1)]
    min_gates: usize,

    /// Gates per layer, upper bound.
    #[arg(long, default_value_t = 3)]
    max_gates: usize,

    /// Inputs per gate, lower bound (NOT always takes one).
    #[arg(long, default_value_t = 2)]
    min_inputs: usize,

    /// Inputs per gate, upper bound.
    #[arg(long, default_value_t = 3)]
    max_inputs: usize,

    /// Allow feedback edges.
    #[arg(long)]
    allow_loops: bool,

    /// Longest feedback cycle to accept, in edges.
    #[arg(long, default_value_t = 3)]
    max_loop_length: usize,

    /// Read the difficulty profile from a JSON file instead of the flags.
    #[arg(long)]
    profile: Option<std::path::PathBuf>,

    /// Print the full truth table over the free inputs.
    #[arg(long)]
    truth_table: bool,
}

fn main() -> Result<()> {
    setup_logger();
    let args = Args::parse();

    let profile = match &args.profile {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("could not read profile {}", path.display()))?;
            serde_json::from_str(&text).context("could not parse difficulty profile")?
        }
        None => profile_from_flags(&args),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let desired = args.desired == 1;
    info!(seed, desired, "generating circuit");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut circuit = generate(&profile, args.inputs, desired, &mut rng)
        .context("could not generate a solvable circuit")?;

    println!("seed: {seed}");
    print_wiring(&circuit)?;

    if args.truth_table {
        print_truth_table(&mut circuit)?;
    }

    let solution = first_solution(&mut circuit, desired)?
        .context("generated circuit has no winning assignment")?;
    println!(
        "one winning assignment for output {}: [{}]",
        args.desired,
        solution.iter().map(|&bit| bit as u8).join(", ")
    );

    let mut session = Session::new(circuit);
    let inputs = session.free_inputs().to_vec();
    for (&id, &bit) in inputs.iter().zip(&solution) {
        session.set_free_input(id, Some(bit))?;
    }
    println!(
        "session replay: output = {}, solved = {}",
        format_tri(session.current_output()?),
        session.is_solved(desired)?
    );
    Ok(())
}

fn profile_from_flags(args: &Args) -> DifficultyProfile {
    let defaults = DifficultyProfile::default();
    DifficultyProfile {
        max_depth: args.depth,
        min_inputs: args.min_inputs,
        max_inputs: args.max_inputs,
        min_gates_per_layer: args.min_gates,
        max_gates_per_layer: args.max_gates,
        allow_loops: args.allow_loops,
        max_loop_length: args.max_loop_length,
        loop_chance: if args.allow_loops {
            ProbabilityCurve::constant(0.5)
        } else {
            defaults.loop_chance.clone()
        },
        ..defaults
    }
}

fn print_wiring(circuit: &Circuit) -> Result<()> {
    let output = circuit.output()?;
    println!("{} nodes:", circuit.node_count());
    for id in circuit.node_ids() {
        let node = circuit.node(id);
        let label = match node.kind() {
            NodeKind::Gate(kind) => kind.to_string(),
            NodeKind::Source if circuit.is_free_input(id) => "input".to_string(),
            NodeKind::Source => format!(
                "const {}",
                node.source_value().map(|bit| bit as u8).unwrap_or(0)
            ),
        };
        let wires = node.inputs().iter().map(|input| input.to_string()).join(", ");
        let marker = if id == output { "  <- output" } else { "" };
        println!("  {id}: {label:<8} [{wires}]{marker}");
    }
    Ok(())
}

fn print_truth_table(circuit: &mut Circuit) -> Result<()> {
    let rows = logic_gen::truth_table(circuit)?;
    println!("truth table ({} rows):", rows.len());
    for (bits, value) in rows {
        println!(
            "  {} -> {}",
            bits.iter().map(|&bit| bit as u8).join(""),
            format_tri(value)
        );
    }
    Ok(())
}

fn format_tri(value: Option<bool>) -> String {
    match value {
        Some(bit) => (bit as u8).to_string(),
        None => "?".to_string(),
    }
}

fn setup_logger() {
    use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    fmt()
        .compact()
        .without_time()
        .with_env_filter(filter)
        .init();
}
