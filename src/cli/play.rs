//! Play command implementation - interactive TUI.

use super::{CliError, ConfigArgs, highscore_store, seed_or_clock};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tilemerge::{Coord, Direction, FileHighScoreStore, GameState, Phase, Scoreboard};

/// Width of one rendered cell in columns.
const CELL_WIDTH: usize = 7;

/// Frame poll interval.
const FRAME: Duration = Duration::from_millis(16);

type Game = GameState<Scoreboard<FileHighScoreStore>>;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config is invalid or the terminal fails.
pub(crate) fn execute(
    config: &ConfigArgs,
    seed: Option<u64>,
    highscore: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = config.resolve()?;
    let seed = seed_or_clock(seed);
    let store = highscore_store(highscore)?;

    let mut game = GameState::new(config, seed, Scoreboard::new(store))?;
    game.new_game();
    info!("starting {}x{} game with seed {seed}", config.width, config.height);

    // Setup terminal; the guard restores it on every exit path from here on
    enable_raw_mode()?;
    let _restore = RestoreOnDrop(restore_terminal);
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    run_loop(&mut terminal, &mut game)
}

/// Runs the closure when dropped.
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}

/// Ignores errors; the caller reports the one that ended the session.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> Result<(), CliError> {
    let mut last_frame = Instant::now();

    loop {
        terminal
            .draw(|f| ui(f, game))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(FRAME)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('n') => game.new_game(),
                code => {
                    if let Some(direction) = key_direction(code) {
                        game.apply_move(direction);
                    }
                }
            }
        }

        let now = Instant::now();
        game.update(now.duration_since(last_frame));
        last_frame = now;
    }

    Ok(())
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

fn ui(f: &mut Frame, game: &Game) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], game);
    render_board(f, chunks[1], game);
    render_footer(f, chunks[2], game);
}

fn render_header(f: &mut Frame, area: Rect, game: &Game) {
    let scores = game.score_sink();
    let status = match game.phase() {
        Phase::GameOver => "GAME OVER",
        Phase::Moving | Phase::Settling => "MOVING",
        Phase::Idle => "READY",
    };

    let title = format!(
        " Tilemerge | Score {} | Best {} | Moves {} | {status} ",
        scores.score(),
        scores.best(),
        game.moves_made()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, game: &Game) {
    let board = game.board();
    let mut lines: Vec<Line> = Vec::with_capacity(usize::from(board.height()) * 2);

    for y in 0..board.height() {
        let spans: Vec<Span> = (0..board.width())
            .map(|x| match board.tile_at(Coord::new(x, y)) {
                Some(tile) => Span::styled(
                    format!("{:^CELL_WIDTH$}", tile.value()),
                    tile_style(tile.value()),
                ),
                None => Span::styled(
                    format!("{:^CELL_WIDTH$}", "."),
                    Style::default().fg(Color::DarkGray),
                ),
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let title = if game.phase() == Phase::GameOver {
        " Game over - press n for a new game "
    } else {
        " Board "
    };

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn tile_style(value: u32) -> Style {
    let color = match value.trailing_zeros() {
        1 => Color::White,
        2 => Color::LightYellow,
        3 => Color::Yellow,
        4 => Color::LightRed,
        5 => Color::Red,
        6 => Color::LightMagenta,
        7 => Color::Magenta,
        8 => Color::LightBlue,
        9 => Color::Blue,
        10 => Color::LightGreen,
        _ => Color::Green,
    };
    let style = Style::default().fg(color);
    if value >= 128 {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn render_footer(f: &mut Frame, area: Rect, game: &Game) {
    let controls = if game.phase() == Phase::GameOver {
        " [q] Quit  [n] New game "
    } else {
        " [q] Quit  [←↑↓→/WASD] Move  [n] New game "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
