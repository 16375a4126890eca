//! Command line options for the `connect4` binary

use clap::{Args, Parser, Subcommand};

use connect4_minimax::search::DEFAULT_DEPTH;
use connect4_minimax::SearchConfig;

#[derive(Parser, Debug)]
#[command(name = "connect4")]
#[command(version, about = "Connect 4 against a minimax game tree agent", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the minimax agent in the terminal
    Play(PlayArgs),

    /// Run many games between the greedy and the minimax agent
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Search depth of the minimax agent
    #[arg(long, env = "CONNECT4_DEPTH", default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Let the agent make the first move
    #[arg(long)]
    pub ai_first: bool,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, env = "CONNECT4_GAMES", default_value_t = 100)]
    pub games: usize,

    /// Search depth of the minimax agent
    #[arg(long, env = "CONNECT4_DEPTH", default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Seed of the first game; game i uses seed + i for the greedy agent
    #[arg(long, env = "CONNECT4_SEED", default_value_t = 0)]
    pub seed: u64,

    /// Search without alpha-beta pruning (same moves, more nodes)
    #[arg(long)]
    pub no_pruning: bool,
}

impl PlayArgs {
    pub fn search_config(&self) -> connect4_minimax::Result<SearchConfig> {
        SearchConfig::new(self.depth)
    }
}

impl SimulateArgs {
    pub fn search_config(&self) -> connect4_minimax::Result<SearchConfig> {
        Ok(SearchConfig::new(self.depth)?.with_pruning(!self.no_pruning))
    }
}
