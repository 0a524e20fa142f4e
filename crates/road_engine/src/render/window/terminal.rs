//! Terminal surface
//!
//! Each character cell shows two vertically stacked pixels using the upper
//! half block: the foreground colour paints the top pixel and the background
//! colour the bottom one. The first row is reserved for the title.

use std::io::{self, BufWriter, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode as TermKey, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use super::{Surface, SurfaceError};
use crate::application::AppEvent;
use crate::input::KeyCode;
use crate::render::{Color, Framebuffer};

const HALF_BLOCK: char = '▀';

/// Rows reserved above the picture
const TITLE_ROWS: u16 = 1;

/// Surface drawing into the current terminal
///
/// Raw mode and the alternate screen are entered on creation and restored on
/// drop.
pub struct TerminalSurface {
    out: BufWriter<Stdout>,
    columns: u16,
    rows: u16,
    title: String,
}

impl TerminalSurface {
    /// Take over the terminal
    pub fn new() -> Result<Self, SurfaceError> {
        let (columns, rows) = terminal::size()?;
        if rows <= TITLE_ROWS || columns == 0 {
            return Err(SurfaceError::Unavailable(format!("terminal too small ({columns}x{rows})")));
        }

        terminal::enable_raw_mode()?;
        let mut out = BufWriter::new(io::stdout());
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::info!("Terminal surface {}x{} cells", columns, rows);

        Ok(Self {
            out,
            columns,
            rows,
            title: String::new(),
        })
    }

    fn pixel_size(columns: u16, rows: u16) -> (u32, u32) {
        (u32::from(columns), u32::from(rows.saturating_sub(TITLE_ROWS)) * 2)
    }

    fn draw_title(&mut self) -> io::Result<()> {
        let width = usize::from(self.columns);
        let mut line: String = self.title.chars().take(width).collect();
        let padding = width.saturating_sub(line.chars().count());
        line.extend(std::iter::repeat(' ').take(padding));

        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            style::ResetColor,
            style::SetAttribute(style::Attribute::Bold),
            Print(line),
            style::SetAttribute(style::Attribute::Reset)
        )
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, TermKey::Char('c' | 'C')) {
        return Some(AppEvent::WindowCloseRequested);
    }

    let code = match key.code {
        TermKey::Left => KeyCode::Left,
        TermKey::Right => KeyCode::Right,
        TermKey::Up => KeyCode::Up,
        TermKey::Down => KeyCode::Down,
        TermKey::Char(' ') => KeyCode::Space,
        TermKey::Enter => KeyCode::Enter,
        TermKey::Esc => KeyCode::Escape,
        TermKey::Char('q' | 'Q') => KeyCode::Q,
        _ => return None,
    };
    Some(AppEvent::KeyPressed(code))
}

const fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (u32, u32) {
        Self::pixel_size(self.columns, self.rows)
    }

    fn set_title(&mut self, title: &str) -> Result<(), SurfaceError> {
        if title != self.title {
            self.title = title.to_string();
            queue!(self.out, terminal::SetTitle(title))?;
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<AppEvent>, SurfaceError> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => events.extend(map_key(key)),
                Event::Resize(columns, rows) => {
                    self.columns = columns;
                    self.rows = rows.max(TITLE_ROWS + 1);
                    queue!(self.out, terminal::Clear(ClearType::All))?;
                    let (width, height) = Self::pixel_size(self.columns, self.rows);
                    events.push(AppEvent::WindowResized { width, height });
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn present(&mut self, framebuffer: &Framebuffer) -> Result<(), SurfaceError> {
        self.draw_title()?;

        let columns = framebuffer.width().min(usize::from(self.columns));
        let cell_rows = framebuffer.height() / 2;
        let mut current: Option<(Color, Color)> = None;

        for row in 0..cell_rows {
            let screen_row = u16::try_from(row).unwrap_or(u16::MAX).saturating_add(TITLE_ROWS);
            if screen_row >= self.rows {
                break;
            }
            queue!(self.out, cursor::MoveTo(0, screen_row))?;

            for x in 0..columns {
                let top = framebuffer.pixel(x, row * 2).unwrap_or_default();
                let bottom = framebuffer.pixel(x, row * 2 + 1).unwrap_or_default();

                match current {
                    Some((fg, bg)) if fg == top && bg == bottom => {}
                    Some((fg, _)) if fg == top => queue!(self.out, SetBackgroundColor(to_terminal(bottom)))?,
                    Some((_, bg)) if bg == bottom => queue!(self.out, SetForegroundColor(to_terminal(top)))?,
                    _ => queue!(
                        self.out,
                        SetForegroundColor(to_terminal(top)),
                        SetBackgroundColor(to_terminal(bottom))
                    )?,
                }
                current = Some((top, bottom));
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }

        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        // Best effort; there is nowhere left to report a failure
        let _ = execute!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
        log::debug!("Terminal restored");
    }
}
