use crate::{
    algorithm::cache::CacheStats,
    algorithm::cost::EdgeCostModel,
    algorithm::selection::ProbeDepth,
    algorithm::solutions::{RecordOutcome, SolutionCache, SolutionKey},
    algorithm::solver::SearchLimits,
    algorithm::sweep::{Solution, SweepRange, sweep},
    io::configuration::{
        DEFAULT_BRANCH_FACTOR, DEFAULT_CACHE_CAPACITY, DEFAULT_ITERATIONS_PER_TILE,
        DEFAULT_MAX_ITERATIONS,
        DEFAULT_MEMO_CAPACITY, DEFAULT_OFFSET, DEFAULT_PROBE_DEPTH, DEFAULT_TILE_SIZE,
        MAX_INDIVIDUAL_COST, PENDING_CACHE_NUM, SWEEP_RADIUS, SWEEP_STEP,
    },
    io::error::{Result, invalid_parameter, unusable_image},
    spatial::pixels::PixelCanvas,
    spatial::stitch::stitch,
    spatial::tiles::{TileGeometry, TileLayout},
};
use ndarray::Array2;
use parking_lot::Mutex;

/// Engine parameters controlling geometry sweep, search and caching
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DescramblerConfig {
    /// Gap strip width used by the scrambler
    pub offset: u32,
    /// Initial tile width guess
    pub base_width: u32,
    /// Initial tile height guess
    pub base_height: u32,
    /// Hard cap on states popped per geometry
    pub max_iters: usize,
    /// States popped per tile before a geometry is given up
    pub iters_per_tile: usize,
    /// Candidates expanded per search state
    pub branch_factor: usize,
    /// Lines probed on each side of the two seams
    pub probe: ProbeDepth,
    /// Distance between tile sizes tried by the sweep
    pub sweep_step: u32,
    /// Largest deviation from the base size tried by the sweep
    pub sweep_radius: u32,
    /// Records of one solution needed before it is trusted
    pub confirmations: usize,
    /// Maximum number of memoized seam costs
    pub memo_capacity: usize,
    /// Bound on trusted source keys and, separately, on pending
    /// key and solution pairs awaiting confirmation
    pub cache_capacity: usize,
    /// Per-axis seam cost above which a candidate is pruned
    pub max_edge_cost: f64,
}

impl Default for DescramblerConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            base_width: DEFAULT_TILE_SIZE,
            base_height: DEFAULT_TILE_SIZE,
            max_iters: DEFAULT_MAX_ITERATIONS,
            iters_per_tile: DEFAULT_ITERATIONS_PER_TILE,
            branch_factor: DEFAULT_BRANCH_FACTOR,
            probe: ProbeDepth::uniform(DEFAULT_PROBE_DEPTH),
            sweep_step: SWEEP_STEP,
            sweep_radius: SWEEP_RADIUS,
            confirmations: PENDING_CACHE_NUM,
            memo_capacity: DEFAULT_MEMO_CAPACITY,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            max_edge_cost: MAX_INDIVIDUAL_COST,
        }
    }
}

impl DescramblerConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter that is zero where a
    /// positive value is required, or a cost cutoff that is not a positive
    /// finite number.
    pub fn validate(&self) -> Result<()> {
        let positive_sizes = [
            ("offset", self.offset),
            ("base_width", self.base_width),
            ("base_height", self.base_height),
            ("probe.vertical", self.probe.vertical),
            ("probe.horizontal", self.probe.horizontal),
        ];
        for (parameter, value) in positive_sizes {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }

        let positive_counts = [
            ("max_iters", self.max_iters),
            ("iters_per_tile", self.iters_per_tile),
            ("branch_factor", self.branch_factor),
            ("confirmations", self.confirmations),
            ("memo_capacity", self.memo_capacity),
            ("cache_capacity", self.cache_capacity),
        ];
        for (parameter, value) in positive_counts {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }

        if !self.max_edge_cost.is_finite() || self.max_edge_cost <= 0.0 {
            return Err(invalid_parameter(
                "max_edge_cost",
                &self.max_edge_cost,
                &"must be a positive finite number",
            ));
        }

        Ok(())
    }

    /// Tile sizes the sweep explores
    pub const fn sweep_range(&self) -> SweepRange {
        SweepRange {
            offset: self.offset,
            base_width: self.base_width,
            base_height: self.base_height,
            step: self.sweep_step,
            radius: self.sweep_radius,
        }
    }

    /// Bounds applied to each search
    pub const fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_iters: self.max_iters,
            iters_per_tile: self.iters_per_tile,
            branch_factor: self.branch_factor,
        }
    }
}

/// A descrambled image and how it was obtained
#[derive(Clone, Debug)]
pub struct Restoration<I> {
    /// Image with every gap removed and tiles in true order
    pub image: I,
    /// Geometry the image was solved with
    pub geometry: TileGeometry,
    /// `order[[row, col]]` is the slot index of the tile at `(row, col)`
    pub order: Array2<usize>,
    /// Whether a trusted cached solution was replayed
    pub from_cache: bool,
    /// Effect on the solution cache, when a source key was given and a search ran
    pub record: Option<RecordOutcome>,
}

struct EngineState {
    costs: EdgeCostModel,
    solutions: SolutionCache,
}

/// Descrambling engine owning the seam memo and the solution cache
///
/// Safe to share between threads; calls are serialized on one internal lock.
pub struct Descrambler {
    config: DescramblerConfig,
    state: Mutex<EngineState>,
}

impl Descrambler {
    /// Create an engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: DescramblerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: Mutex::new(EngineState {
                costs: EdgeCostModel::new(config.memo_capacity, config.max_edge_cost),
                solutions: SolutionCache::new(config.cache_capacity, config.confirmations),
            }),
        })
    }

    /// Access the configuration
    pub const fn config(&self) -> &DescramblerConfig {
        &self.config
    }

    /// Restore the true tile order of a scrambled image
    ///
    /// With a `source_key`, a trusted solution for the same key and image size
    /// is replayed without searching, and any fresh solution is recorded for
    /// later confirmation. Returns `Ok(None)` when no tried geometry could be
    /// fully arranged.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is empty, or if a solution refers to a
    /// tile the image does not have.
    pub fn solve_image<I: PixelCanvas>(
        &self,
        image: &I,
        source_key: Option<&str>,
    ) -> Result<Option<Restoration<I>>> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(unusable_image(&format!(
                "image has no pixels ({width}x{height})"
            )));
        }

        let key = source_key.map(|source| SolutionKey::new(source, width, height));
        let mut state = self.state.lock();

        if let Some(solution) = key
            .as_ref()
            .and_then(|key| state.solutions.lookup_trusted(key))
        {
            log::info!(
                "{}: replaying trusted {}x{} solution",
                source_key.unwrap_or_default(),
                solution.geometry.width,
                solution.geometry.height
            );
            drop(state);
            return restore(image, solution, true, None).map(Some);
        }

        state.costs.reset();
        let report = sweep(
            image,
            &self.config.sweep_range(),
            self.config.search_limits(),
            self.config.probe,
            &mut state.costs,
        );
        log::debug!(
            "sweep made {} attempts, {} iterations",
            report.attempts.len(),
            report.total_iterations()
        );

        let Some(solution) = report.solution else {
            return Ok(None);
        };

        let record = key
            .as_ref()
            .map(|key| state.solutions.record(key, &solution));
        if let Some(RecordOutcome::Pending { confirmations }) = record {
            log::debug!(
                "{}: solution pending, {confirmations} of {} confirmations",
                source_key.unwrap_or_default(),
                state.solutions.threshold()
            );
        }
        drop(state);

        restore(image, solution, false, record).map(Some)
    }

    /// Forget every solution recorded for a source key and image size
    ///
    /// Returns whether a trusted solution was removed.
    pub fn invalidate(&self, source_key: &str, width: u32, height: u32) -> bool {
        self.state
            .lock()
            .solutions
            .invalidate(&SolutionKey::new(source_key, width, height))
    }

    /// Trusted solution for a source key and image size, if any
    pub fn trusted_solution(&self, source_key: &str, width: u32, height: u32) -> Option<Solution> {
        self.state
            .lock()
            .solutions
            .lookup_trusted(&SolutionKey::new(source_key, width, height))
    }

    /// Seam memo hit, miss and eviction counts
    pub fn memo_stats(&self) -> CacheStats {
        self.state.lock().costs.stats()
    }
}

fn restore<I: PixelCanvas>(
    image: &I,
    solution: Solution,
    from_cache: bool,
    record: Option<RecordOutcome>,
) -> Result<Restoration<I>> {
    let layout = TileLayout::partition(image.width(), image.height(), solution.geometry)
        .ok_or_else(|| {
            unusable_image(&format!(
                "{}x{} tiles with offset {} do not fit a {}x{} image",
                solution.geometry.width,
                solution.geometry.height,
                solution.geometry.offset,
                image.width(),
                image.height()
            ))
        })?;

    Ok(Restoration {
        image: stitch(image, &layout, &solution.order)?,
        geometry: solution.geometry,
        order: solution.order,
        from_cache,
        record,
    })
}
