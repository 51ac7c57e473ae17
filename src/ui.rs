//! Layout and drawing: playfield, next preview, score sidebar, banners.

use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use shricktris::brick::DIMENSION;
use shricktris::{Figure, Game, GameState};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each grid cell is two terminal columns wide so cells look square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 30;
/// Fade of the playfield to the grid colour once the game is over.
const GAME_OVER_FADE_MS: u32 = 800;
/// The stuck figure is visible one frame out of this many after game over.
const FLICKER_PERIOD: u64 = 3;

const FILLED: &str = "██";
const EMPTY: &str = "· ";

/// Playfield size in terminal cells (border + grid) for given grid dimensions.
fn playfield_pixel_size(columns: u16, rows: u16) -> (u16, u16) {
    (columns * CELL_WIDTH + 2, rows + 2)
}

/// Largest grid (columns, rows) whose playfield and sidebar fit the terminal.
pub fn max_grid_for_terminal(term_cols: u16, term_rows: u16) -> (u16, u16) {
    let cols = term_cols.saturating_sub(2 + SIDEBAR_WIDTH) / CELL_WIDTH;
    let rows = term_rows.saturating_sub(2);
    (cols, rows)
}

/// Per-frame presentation state the app keeps between draws.
#[derive(Default)]
pub struct ViewState {
    pub frame_count: u64,
    pub game_over_effect: Option<Effect>,
    pub effect_process_time: Option<Instant>,
}

impl ViewState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Draw the whole screen for the current game.
pub fn draw(frame: &mut Frame, game: &Game, theme: &Theme, view: &mut ViewState, now: Instant) {
    view.frame_count = view.frame_count.wrapping_add(1);
    let area = frame.area();
    let field = game.field();
    let (pw, ph) = playfield_pixel_size(field.columns() as u16, field.rows() as u16);
    let total_w = pw + SIDEBAR_WIDTH;

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    let (playfield_area, sidebar_area) = (inner[0], inner[1]);

    let board_rect = draw_playfield(frame, game, theme, view, playfield_area);
    draw_sidebar(frame, game, theme, sidebar_area);

    match game.state() {
        GameState::NotStarted => draw_banner(
            frame,
            theme,
            playfield_area,
            " Shricktris ",
            Color::Green,
            &["Press P to start!"],
        ),
        GameState::Paused => draw_banner(
            frame,
            theme,
            playfield_area,
            " Paused ",
            Color::Blue,
            &["P — Continue    Q — Quit"],
        ),
        GameState::Running => {}
        GameState::Stopped => {
            apply_game_over_effect(frame, theme, view, board_rect, now);
            let summary = game.score().final_summary().to_string();
            draw_banner(
                frame,
                theme,
                playfield_area,
                " Game Over ",
                Color::Red,
                &[summary.as_str(), "", "R — Restart    Q — Quit"],
            );
        }
    }
}

/// Create the game-over fade on first use and advance it (TachyonFX).
fn apply_game_over_effect(
    frame: &mut Frame,
    theme: &Theme,
    view: &mut ViewState,
    board_rect: Rect,
    now: Instant,
) {
    let delta = view
        .effect_process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    view.effect_process_time = Some(now);

    let effect = view.game_over_effect.get_or_insert_with(|| {
        fx::fade_to(
            theme.grid,
            theme.bg,
            (GAME_OVER_FADE_MS, Interpolation::Linear),
        )
        .with_area(board_rect)
    });
    if !effect.done() {
        frame.render_effect(effect, board_rect, TfxDuration::from_millis(delta_ms));
    }
}

fn game_over_faded(game: &Game, view: &ViewState) -> bool {
    game.state() == GameState::Stopped
        && view.game_over_effect.as_ref().is_some_and(Effect::done)
}

/// Draws border, frozen cells and the figure; returns the inner board rect.
fn draw_playfield(
    frame: &mut Frame,
    game: &Game,
    theme: &Theme,
    view: &ViewState,
    area: Rect,
) -> Rect {
    let title = format!(" Shricktris  | Score: {} ", game.score().total());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line).bg(theme.bg))
        .title(Span::styled(title, Style::default().fg(theme.title)));
    let board_rect = block.inner(area);
    block.render(area, frame.buffer_mut());

    let faded = game_over_faded(game, view);
    let buf = frame.buffer_mut();
    let right = board_rect.x + board_rect.width;
    let bottom = board_rect.y + board_rect.height;

    for (x, y, key) in game.cells() {
        let rx = board_rect.x + x as u16 * CELL_WIDTH;
        let ry = board_rect.y + y as u16;
        if rx + CELL_WIDTH > right || ry >= bottom {
            continue;
        }
        let (symbol, style) = match key {
            Some(key) => {
                let color = if faded { theme.grid } else { theme.brick_color(key) };
                (FILLED, Style::default().fg(color).bg(theme.bg))
            }
            None => (EMPTY, Style::default().fg(theme.grid).bg(theme.bg)),
        };
        buf.set_string(rx, ry, symbol, style);
    }

    let figure = game.figure();
    let color = match game.state() {
        GameState::NotStarted => None,
        GameState::Stopped => {
            (view.frame_count % FLICKER_PERIOD == 0).then_some(theme.grid)
        }
        GameState::Paused | GameState::Running => Some(theme.brick_color(figure.color_key())),
    };
    if let Some(color) = color {
        for (x, y) in figure.cells() {
            if x < 0 || y < 0 {
                continue;
            }
            let rx = board_rect.x + x as u16 * CELL_WIDTH;
            let ry = board_rect.y + y as u16;
            if rx + CELL_WIDTH <= right && ry < bottom {
                buf.set_string(rx, ry, FILLED, Style::default().fg(color).bg(theme.bg));
            }
        }
    }
    board_rect
}

fn draw_sidebar(frame: &mut Frame, game: &Game, theme: &Theme, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DIMENSION as u16 + 3), // Next (border + title + 4x4 box)
            Constraint::Length(6),                    // Stats
            Constraint::Length(3),                    // Last clear
            Constraint::Fill(1),                      // Keys
        ])
        .split(area);

    // --- Next ---
    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    let next_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(DIMENSION as u16)])
        .split(next_inner);
    let next = game.next_figure();
    Paragraph::new(Line::from(vec![
        Span::styled("Next: ", title_style),
        Span::styled(next.name(), fg_style),
    ]))
    .render(next_layout[0], frame.buffer_mut());
    if game.state() != GameState::NotStarted {
        draw_next_preview(frame, theme, next, next_layout[1]);
    }

    // --- Stats ---
    let score = game.score();
    let stats_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let stats_inner = stats_block.inner(chunks[1]);
    stats_block.render(chunks[1], frame.buffer_mut());
    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value, fg_style),
        ])
    };
    let state_label = match game.state() {
        GameState::NotStarted => "waiting",
        GameState::Paused => "paused",
        GameState::Running => "running",
        GameState::Stopped => "game over",
    };
    Paragraph::new(Text::from(vec![
        stat("Score: ", score.total().to_string()),
        stat("Lines: ", score.total_lines().to_string()),
        stat("Step:  ", format!("every {} ticks", game.step_interval())),
        stat("State: ", state_label.to_string()),
    ]))
    .render(stats_inner, frame.buffer_mut());

    // --- Last clear ---
    let clear_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let clear_inner = clear_block.inner(chunks[2]);
    clear_block.render(chunks[2], frame.buffer_mut());
    let last = if score.history().is_empty() {
        "No lines yet".to_string()
    } else {
        let summary = score.current_summary();
        format!("+{} for {} line(s)", summary.last_bonus, summary.last_lines)
    };
    Paragraph::new(Line::from(Span::styled(last, fg_style)))
        .render(clear_inner, frame.buffer_mut());

    // --- Keys ---
    let keys_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Keys ", title_style));
    let keys_inner = keys_block.inner(chunks[3]);
    keys_block.render(chunks[3], frame.buffer_mut());
    let keys = [
        ("←/→", "move"),
        ("↓", "move down"),
        ("↑", "rotate"),
        ("Space", "fall down"),
        ("P", "pause/continue"),
        ("+/-", "speed up/down"),
        ("Q", "quit"),
    ];
    let lines: Vec<Line> = keys
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:<7}"), title_style),
                Span::styled(*what, fg_style),
            ])
        })
        .collect();
    Paragraph::new(Text::from(lines)).render(keys_inner, frame.buffer_mut());
}

/// Draw the next figure inside its 4x4 box.
fn draw_next_preview(frame: &mut Frame, theme: &Theme, next: &Figure, area: Rect) {
    let style = Style::default().fg(theme.kind_color(next.kind())).bg(theme.bg);
    let buf = frame.buffer_mut();
    for (dx, dy) in next.brick().plain_coordinates() {
        let rx = area.x + u16::from(dx) * CELL_WIDTH;
        let ry = area.y + u16::from(dy);
        if rx + CELL_WIDTH <= area.x + area.width && ry < area.y + area.height {
            buf.set_string(rx, ry, FILLED, style);
        }
    }
}

/// Centered popup with a coloured title line and message lines.
fn draw_banner(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    title: &str,
    color: Color,
    message: &[&str],
) {
    let popup_w = message
        .iter()
        .map(|l| l.chars().count() as u16)
        .max()
        .unwrap_or(0)
        .max(title.len() as u16)
        + 4;
    let popup_h = message.len() as u16 + 4;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    lines.extend(message.iter().map(|l| {
        Line::from(Span::styled(
            (*l).to_string(),
            Style::default().fg(theme.main_fg),
        ))
    }));
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use shricktris::{GameConfig, Intents};

    fn render(game: &Game) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut view = ViewState::default();
        terminal
            .draw(|f| draw(f, game, &Theme::classic(), &mut view, Instant::now()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn game() -> Game {
        Game::new(&GameConfig {
            columns: 10,
            rows: 20,
            step_interval: 8,
            seed: Some(9),
        })
        .unwrap()
    }

    #[test]
    fn test_max_grid_for_terminal() {
        assert_eq!(max_grid_for_terminal(80, 24), (24, 22));
        assert_eq!(max_grid_for_terminal(10, 1), (0, 0));
    }

    #[test]
    fn test_start_banner() {
        let screen = render(&game());
        assert!(screen.contains("Press P to start!"));
    }

    #[test]
    fn test_running_screen_shows_stats() {
        let mut game = game();
        game.tick(&Intents {
            pause: true,
            ..Intents::default()
        });
        let screen = render(&game);
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("running"));
        assert!(!screen.contains("Press P to start!"));
    }
}
