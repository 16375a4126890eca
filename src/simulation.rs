//! Batches of greedy-vs-minimax games

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use connect4_minimax::{Agent, GreedyAgent, Grid, MinimaxAgent, Piece, SearchConfig, Status};

/// How a single game ended
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GameOutcome {
    pub status: Status,
    pub moves: usize,
}

/// Plays one game with the greedy agent moving first as `Piece::One`
pub fn play_game(config: SearchConfig, seed: u64) -> Result<GameOutcome> {
    let mut grid = Grid::new();
    let mut greedy = GreedyAgent::seeded(Piece::One, seed);
    let mut minimax = MinimaxAgent::with_config(Piece::Two, config);

    while !grid.is_over() {
        if grid.move_count() % 2 == 0 {
            greedy.choose_and_apply(&mut grid)?;
        } else {
            minimax.choose_and_apply(&mut grid)?;
        }
    }

    Ok(GameOutcome {
        status: grid.status(),
        moves: grid.move_count(),
    })
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SimulationSummary {
    pub games: usize,
    pub minimax_wins: usize,
    pub greedy_wins: usize,
    pub ties: usize,
    pub total_moves: usize,
}

impl SimulationSummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        self.total_moves += outcome.moves;
        match outcome.status {
            Status::Won(Piece::Two) => self.minimax_wins += 1,
            Status::Won(Piece::One) => self.greedy_wins += 1,
            Status::Draw | Status::Playing => self.ties += 1,
        }
    }

    pub fn average_moves(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }
}

/// Plays `games` games in parallel, seeding game `i` with `base_seed + i`
pub fn run(games: usize, config: SearchConfig, base_seed: u64) -> Result<SimulationSummary> {
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Simulating games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let outcomes: Result<Vec<GameOutcome>> = (0..games)
        .into_par_iter()
        .map(|game| {
            let outcome = play_game(config, base_seed.wrapping_add(game as u64));
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish();

    let mut summary = SimulationSummary::default();
    for outcome in outcomes? {
        summary.record(outcome);
    }
    info!(?summary, "simulation finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn games_are_reproducible() -> Result<()> {
        let config = SearchConfig::new(2)?;
        let first = play_game(config, 7)?;
        let second = play_game(config, 7)?;

        assert_eq!(first, second);
        assert_ne!(first.status, Status::Playing);
        assert!(first.moves >= 7 && first.moves <= 42);
        Ok(())
    }

    #[test]
    fn summary_counts_every_game() -> Result<()> {
        let summary = run(4, SearchConfig::new(2)?, 0)?;

        assert_eq!(summary.games, 4);
        assert_eq!(summary.minimax_wins + summary.greedy_wins + summary.ties, 4);
        assert!(summary.average_moves() >= 7.0);
        Ok(())
    }
}
