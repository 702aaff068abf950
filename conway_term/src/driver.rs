// driver.rs - Tick loop overlapping rendering with computation

use std::collections::hash_map::DefaultHasher;
use std::future::{self, Future};
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::grid::Grid;
use crate::render::{RenderError, Renderer};

/// Number of recent generations remembered for cycle detection.
const HISTORY_LEN: usize = 10;

/// Runs the simulation against one output stream.
pub struct Driver<W> {
    config:   Config,
    renderer: Renderer<W>,
}

impl<W: Write + Send + 'static> Driver<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self::with_renderer(config, Renderer::new(out))
    }

    pub fn with_renderer(config: Config, renderer: Renderer<W>) -> Self {
        Self { config, renderer }
    }

    /// Build the first generation: a random fill, seeded from the config
    /// when it carries a seed.
    pub fn seed(&self) -> Grid {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None       => ChaCha8Rng::from_entropy(),
        };
        let mut grid = Grid::new(self.config.width, self.config.length, self.config.rule.clone(), self.config.edges);
        grid.fill_random(&mut rng);
        grid
    }

    /// Seed, then alternate sleeping, computing and presenting.
    ///
    /// Generation N+1 is computed while generation N is still being drawn.
    /// The displayed grid is only replaced once that draw has finished.
    /// Returns the last generation when a generation limit is configured,
    /// otherwise runs until the task is dropped.
    pub async fn run(self) -> Result<Arc<Grid>, RenderError> {
        self.run_until(future::pending::<()>()).await
    }

    /// Like [`Driver::run`], but also stops once `shutdown` completes.
    ///
    /// The in-flight render is always awaited and the terminal restored
    /// before returning, so nothing is written after the cursor comes back.
    pub async fn run_until<F: Future>(self, shutdown: F) -> Result<Arc<Grid>, RenderError> {
        tokio::pin!(shutdown);
        let mut grid = Arc::new(self.seed());
        let Self { config, mut renderer } = self;

        tracing::info!(
            width = config.width,
            length = config.length,
            rule = %config.rule,
            edges = %config.edges,
            interval = ?config.interval,
            "starting simulation"
        );

        renderer.clear()?;
        let mut pending = renderer.spawn(Arc::clone(&grid));

        let mut history = History::default();
        let mut settled = false;
        let mut generation: u64 = 0;

        while config.generations.is_none_or(|limit| generation < limit) {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!(generation, "shutdown requested");
                    break;
                },
                _ = tokio::time::sleep(config.interval) => {},
            }
            let next = grid.advance();

            let renderer = pending.wait().await?;
            grid = Arc::new(next);
            generation += 1;
            pending = renderer.spawn(Arc::clone(&grid));

            tracing::debug!(generation, population = grid.population(), "advanced");

            if history.observe(fingerprint(&grid)) && !settled {
                settled = true;
                tracing::info!(generation, "pattern settled into a cycle");
            }
        }

        let mut renderer = pending.wait().await?;
        renderer.restore()?;
        tracing::info!(generation, "simulation finished");
        Ok(grid)
    }
}

fn fingerprint(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    for row in grid.rows() {
        row.hash(&mut hasher);
    }
    hasher.finish()
}

/// Ring of recent fingerprints.
#[derive(Debug, Default)]
struct History {
    hashes: [u64; HISTORY_LEN],
    count:  usize,
}

impl History {
    /// Record `hash`, returning true if it was already among the recent ones.
    fn observe(&mut self, hash: u64) -> bool {
        let seen = self.count.min(HISTORY_LEN);
        if self.hashes[..seen].contains(&hash) {
            return true;
        }
        self.hashes[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }
}
