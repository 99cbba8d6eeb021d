use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, SetBackgroundColor, SetForegroundColor, ResetColor},
};

use crate::constants::{BACKGROUND_COLOR, CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::types::Playfield;

/// Drawable area measured in playfield pixels.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn fill_background(&mut self, color: Color);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    fn playfield(&self) -> Playfield {
        Playfield::new(self.width() as f64, self.height() as f64)
    }
}

/// Receives the score every time it changes.
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u32);
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row_text(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Colors and cursor state are meaningless here
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: a Surface made of terminal cells ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Cell {
    const EMPTY: Cell = Cell { glyph: ' ', color: BACKGROUND_COLOR };
}

/// Each cell stands for `CELL_WIDTH_PX` x `CELL_HEIGHT_PX` playfield pixels.
pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub columns: u16,
    pub rows: u16,
    background: Color,
}

impl GameGrid {
    pub fn new(columns: u16, rows: u16) -> Self {
        GameGrid {
            grid: vec![vec![Cell::EMPTY; columns as usize]; rows as usize],
            columns,
            rows,
            background: BACKGROUND_COLOR,
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        info!("Playfield resized to {}x{} cells", columns, rows);
        self.columns = columns;
        self.rows = rows;
        self.fill_background(self.background);
    }

    pub fn cell(&self, column: u16, row: u16) -> Option<Cell> {
        self.grid.get(row as usize).and_then(|r| r.get(column as usize)).copied()
    }

    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        for (y, row) in self.grid.iter().enumerate() {
            out.execute_move_to(MoveTo(0, y as u16))?;
            out.execute_other_command(SetBackgroundColor(self.background))?;
            let mut current: Option<Color> = None;
            for cell in row {
                if current != Some(cell.color) {
                    out.execute_other_command(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                write!(out, "{}", cell.glyph)?;
            }
        }
        out.execute_other_command(ResetColor)?;
        Ok(())
    }
}

/// Half-open cell range covered by `[start, start + length)` pixels.
fn cell_span(start: f64, length: f64, cell_size: f64, limit: u16) -> (usize, usize) {
    let first = (start / cell_size).floor().max(0.0);
    let last = ((start + length) / cell_size).ceil().min(limit as f64);
    if last <= first {
        return (0, 0);
    }
    (first as usize, last as usize)
}

impl Surface for GameGrid {
    fn width(&self) -> u32 {
        (self.columns as f64 * CELL_WIDTH_PX) as u32
    }

    fn height(&self) -> u32 {
        (self.rows as f64 * CELL_HEIGHT_PX) as u32
    }

    fn fill_background(&mut self, color: Color) {
        self.background = color;
        let empty = Cell { glyph: ' ', color };
        self.grid = vec![vec![empty; self.columns as usize]; self.rows as usize];
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (col_start, col_end) = cell_span(x, width, CELL_WIDTH_PX, self.columns);
        let (row_start, row_end) = cell_span(y, height, CELL_HEIGHT_PX, self.rows);
        for row in &mut self.grid[row_start..row_end] {
            for cell in &mut row[col_start..col_end] {
                *cell = Cell { glyph: '█', color };
            }
        }
    }
}

// --- HUD score readout ---
#[derive(Debug, Default)]
pub struct Hud {
    pub score: u32,
    pub visible: bool,
}

impl Hud {
    pub fn new() -> Self {
        Hud::default()
    }

    pub fn reveal(&mut self) {
        self.visible = true;
    }

    pub fn render(&self, out: &mut OutputTarget) -> io::Result<()> {
        if !self.visible {
            return Ok(());
        }
        out.execute_move_to(MoveTo(1, 0))?;
        out.execute_other_command(SetForegroundColor(Color::White))?;
        write!(out, "Score: {}", self.score)?;
        out.execute_other_command(ResetColor)?;
        Ok(())
    }
}

impl ScoreDisplay for Hud {
    fn show_score(&mut self, score: u32) {
        self.score = score;
    }
}
