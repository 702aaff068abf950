// render.rs - Turns grid snapshots into terminal frames

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Color, ResetColor, style, Stylize},
    terminal::{Clear, ClearType},
};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::grid::Grid;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal write failed: {0}")]
    Io(#[from] io::Error),

    #[error("render task failed: {0}")]
    Task(#[from] JoinError),
}

/// Colours and glyph used for cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub alive: Color,
    pub dead:  Color,
    pub glyph: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self { alive: Color::White, dead: Color::Black, glyph: "██" }
    }
}

/// Writes frames to a terminal-like output.
pub struct Renderer<W> {
    out:        W,
    alive_cell: String,
    dead_cell:  String,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_palette(out, Palette::default())
    }

    pub fn with_palette(out: W, palette: Palette) -> Self {
        Self {
            out,
            alive_cell: style(palette.glyph).with(palette.alive).to_string(),
            dead_cell:  style(palette.glyph).with(palette.dead).to_string(),
        }
    }

    /// Serialise `grid` as one newline-terminated line per row.
    pub fn render(&self, grid: &Grid) -> String {
        let mut frame = String::with_capacity(grid.width() * (grid.length() * self.alive_cell.len() + 1));
        for row in grid.rows() {
            for &alive in row {
                frame.push_str(if alive { &self.alive_cell } else { &self.dead_cell });
            }
            frame.push('\n');
        }
        frame
    }

    /// Home the cursor and write `frame` as a single block. The screen is
    /// not cleared, each frame overwrites the previous one.
    pub fn present(&mut self, frame: &str) -> io::Result<()> {
        let mut block = Vec::with_capacity(frame.len() + 8);
        queue!(block, MoveTo(0, 0))?;
        block.extend_from_slice(frame.as_bytes());
        self.out.write_all(&block)?;
        self.out.flush()
    }

    /// Clear the screen and hide the cursor, once before the first frame.
    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Hide)?;
        self.out.flush()
    }

    /// Put colours and cursor back the way the shell expects them.
    pub fn restore(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, Show)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> Renderer<W> {
    /// Render and present `grid` on the blocking pool.
    ///
    /// The renderer moves into the task and comes back through
    /// [`PendingRender::wait`], so at most one render is ever in flight.
    pub fn spawn(mut self, grid: Arc<Grid>) -> PendingRender<W> {
        let handle = tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let frame = self.render(&grid);
            let result = self.present(&frame);
            tracing::trace!(bytes = frame.len(), elapsed = ?started.elapsed(), "frame presented");
            (self, result)
        });
        PendingRender { handle }
    }
}

/// A render in flight. Awaiting it is the signal that the grid it was
/// handed is no longer being read.
pub struct PendingRender<W> {
    handle: JoinHandle<(Renderer<W>, io::Result<()>)>,
}

impl<W: Write> PendingRender<W> {
    /// Wait for the render to finish and take the renderer back.
    ///
    /// A failed write still tries to restore the terminal before the error
    /// is returned. A panicked task takes the renderer with it.
    pub async fn wait(self) -> Result<Renderer<W>, RenderError> {
        let (mut renderer, result) = self.handle.await?;
        if let Err(err) = result {
            if let Err(restore_err) = renderer.restore() {
                tracing::warn!(%restore_err, "failed to restore terminal");
            }
            return Err(err.into());
        }
        Ok(renderer)
    }
}
