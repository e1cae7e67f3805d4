#![cfg(feature = "std")]

//! Text rendering and other best-effort terminal helpers.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::process::Command;

use crate::board::Grid;
use crate::common::Cell;
use crate::config::BOARD_SIZE;
use crate::coord::{row_label, Coord};

pub fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Water => '-',
        Cell::Ship => 'B',
        Cell::Hit => 'X',
        Cell::Miss => 'O',
    }
}

/// Board as text: a header of column numbers, then one labelled line per
/// row.
pub fn render_grid(grid: &Grid) -> String {
    let mut out = String::from("  ");
    for c in 1..=BOARD_SIZE {
        let _ = write!(out, " {}", c);
    }
    out.push('\n');
    for (r, row) in grid.rows().iter().enumerate() {
        out.push(row_label(r));
        out.push(' ');
        for cell in row {
            out.push(' ');
            out.push(glyph(*cell));
        }
        out.push('\n');
    }
    out
}

/// One-line summary of where a shot landed.
pub fn describe_target(coord: Coord) -> String {
    if coord.in_bounds() {
        coord.to_string()
    } else {
        format!("(row {}, column {})", coord.row + 1, coord.col + 1)
    }
}

/// Clear the console. Failures are logged and otherwise ignored.
pub fn clear_screen() {
    if let Err(e) = try_clear_screen() {
        log::warn!("could not clear the console: {}", e);
    }
}

fn try_clear_screen() -> io::Result<()> {
    if cfg!(windows) {
        let status = Command::new("cmd").args(["/c", "cls"]).status()?;
        if !status.success() {
            return Err(io::Error::other(format!("cls exited with {}", status)));
        }
        Ok(())
    } else {
        let mut out = io::stdout();
        out.write_all(b"\x1b[H\x1b[2J")?;
        out.flush()
    }
}

/// Print `prompt` and block until a line (or end of input) arrives.
pub fn pause<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<()> {
    writeln!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
