use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::core::{GameEngine, GameStatus};

pub const PLAYER_GLYPH: char = '@';
pub const ITEM_GLYPH: char = '*';
pub const CAUGHT_GLYPH: char = 'X';
pub const EMPTY_GLYPH: char = '.';

/// Somewhere a frame can be drawn.
pub trait Screen: Send {
    fn draw(&mut self, lines: &[String]) -> anyhow::Result<()>;
}

/// Screen that discards every frame, for headless games.
pub struct NullScreen;

impl Screen for NullScreen {
    fn draw(&mut self, _lines: &[String]) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Glyph for an opponent id: `1` for id 0 and so on.
fn opponent_glyph(id: usize) -> char {
    char::from_digit(id as u32 + 1, 10).unwrap_or('?')
}

/// Text rendering of the game: one header line, then one line per board row.
pub fn render_lines(engine: &GameEngine) -> Vec<String> {
    let board = engine.board();
    let size = board.size() as usize;
    let mut grid = vec![vec![EMPTY_GLYPH; size]; size];

    for item in engine.items() {
        grid[item.row as usize][item.col as usize] = ITEM_GLYPH;
    }
    for (id, opp) in engine.opponents().iter().enumerate() {
        grid[opp.row as usize][opp.col as usize] = opponent_glyph(id);
    }
    let player = engine.player();
    grid[player.row as usize][player.col as usize] =
        if matches!(engine.status(), GameStatus::Caught { .. }) {
            CAUGHT_GLYPH
        } else {
            PLAYER_GLYPH
        };

    let mut lines = Vec::with_capacity(size + 1);
    lines.push(format!(
        "stage {}  life {:>3}  tick {:>5}",
        engine.config().stage,
        engine.life(),
        engine.ticks()
    ));
    for row in grid {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        lines.push(cells.join(" "));
    }
    lines
}

/// Console text shown once the game has ended.
pub fn game_over_message(engine: &GameEngine) -> String {
    let reason = match engine.status() {
        GameStatus::Running => "Game stopped.".to_string(),
        GameStatus::Starved => "GAME OVER: you ran out of life.".to_string(),
        GameStatus::Caught { by } => {
            let kind = engine
                .mover_kind(by)
                .map(|k| k.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!("GAME OVER: caught by opponent {} ({}).", by as usize + 1, kind)
        }
        GameStatus::Quit => "Bye!".to_string(),
    };
    format!(
        "{}\nSurvived {} ticks, collected {} items, {} life left.",
        reason,
        engine.ticks(),
        engine.items_collected(),
        engine.life()
    )
}

fn glyph_color(ch: char) -> Option<Color> {
    match ch {
        PLAYER_GLYPH => Some(Color::Blue),
        ITEM_GLYPH => Some(Color::Yellow),
        CAUGHT_GLYPH => Some(Color::Magenta),
        c if c.is_ascii_digit() => Some(Color::Red),
        _ => None,
    }
}

/// Raw-mode alternate screen; the previous terminal state is restored on drop.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().map_err(|e| anyhow::anyhow!("Failed to enable raw mode: {}", e))?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = terminal::disable_raw_mode();
            return Err(anyhow::anyhow!("Failed to set up terminal: {}", e));
        }
        Ok(Self { out })
    }
}

impl Screen for Terminal {
    fn draw(&mut self, lines: &[String]) -> anyhow::Result<()> {
        for (y, line) in lines.iter().enumerate() {
            queue!(self.out, MoveTo(0, y as u16), Clear(ClearType::CurrentLine))?;
            // header is plain text
            if y == 0 {
                queue!(self.out, Print(line))?;
                continue;
            }
            for ch in line.chars() {
                match glyph_color(ch) {
                    Some(color) => queue!(self.out, SetForegroundColor(color), Print(ch), ResetColor)?,
                    None => queue!(self.out, Print(ch))?,
                }
            }
        }
        queue!(
            self.out,
            MoveTo(0, lines.len() as u16 + 1),
            Print("WASD/arrows to move, q to quit")
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
