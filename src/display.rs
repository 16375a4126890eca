use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{Cell, Grid, Piece, WIDTH};

/// Draws `grid` to stdout, one coloured tile per cell
pub fn draw(grid: &Grid) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in grid.rows() {
        for cell in row.iter() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(tile_color(*cell)),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

fn tile_color(cell: Cell) -> Color {
    match cell {
        Cell::Occupied(Piece::One) => Color::Red,
        Cell::Occupied(Piece::Two) => Color::Yellow,
        Cell::Empty => Color::DarkBlue,
    }
}

/// The name a piece is reported under
pub fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::One => "Red",
        Piece::Two => "Yellow",
    }
}
