//! Walk Coordinator
//!
//! ```text
//! open store ─► Phase A (declarations, per file) ─► barrier
//!            ─► Phase B (members + expressions, per file) ─► commit/close
//! ```
//!
//! Both phases run one task per compilation unit on a dedicated Rayon pool,
//! or on the calling thread when `enable_rayon` is off. The first error stops
//! the phase and aborts the run; the store is left as written so far.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use tracing::info;
use xrefgraph_storage::GraphStore;

use super::session::{IndexSession, WalkPhase};
use super::walker::walk_unit;
use crate::config::IndexerConfig;
use crate::errors::{IndexError, Result};
use crate::features::graph_sink::{GraphSink, IndexStats};
use crate::features::resolved_ast::ResolvedAstProvider;

pub struct Indexer {
    config: IndexerConfig,
}

impl Indexer {
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Index everything `provider` exposes into `store`.
    pub fn index<P, S>(&self, provider: &P, store: S) -> Result<IndexStats>
    where
        P: ResolvedAstProvider + ?Sized,
        S: GraphStore,
    {
        self.config.parallel.validate()?;
        let pool = self.build_pool()?;
        let started = Instant::now();

        let sink = GraphSink::open(store, &self.config)?;
        let session = IndexSession::new(provider, sink, self.config.omit_externals);
        let units = provider.units().len();

        for phase in [WalkPhase::Declarations, WalkPhase::Members] {
            info!("Indexing phase '{}' over {} files", phase.as_str(), units);
            self.run_phase(&session, phase, pool.as_ref())?;
        }
        info!(
            "Interface index: {} implementing types",
            session.interfaces.len()
        );

        let stats = IndexStats {
            elapsed: started.elapsed(),
            ..session.sink.finish()?
        };
        info!(
            "Indexed {} files: {} symbols, {} references, {} errors in {:.2}s",
            stats.files,
            stats.symbols,
            stats.references,
            stats.errors,
            stats.elapsed.as_secs_f64()
        );
        Ok(stats)
    }

    /// Index into a SQLite database at `output_path`.
    #[cfg(feature = "sqlite")]
    pub fn run<P>(&self, provider: &P) -> Result<IndexStats>
    where
        P: ResolvedAstProvider + ?Sized,
    {
        self.check_output()?;
        let store = xrefgraph_storage::SqliteGraphStore::open(&self.config.output_path)?;
        self.index(provider, store)
    }

    /// The output path must be set and its directory must exist.
    pub fn check_output(&self) -> Result<()> {
        let path = &self.config.output_path;
        if path.as_os_str().is_empty() {
            return Err(IndexError::InvalidOutput("no output path given".to_string()));
        }
        if path.is_dir() {
            return Err(IndexError::InvalidOutput(format!(
                "{} is a directory",
                path.display()
            )));
        }
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(IndexError::InvalidOutput(format!(
                    "directory {} does not exist",
                    parent.display()
                )))
            }
            _ => Ok(()),
        }
    }

    fn build_pool(&self) -> Result<Option<ThreadPool>> {
        if !self.config.parallel.enable_rayon {
            return Ok(None);
        }
        ThreadPoolBuilder::new()
            .num_threads(self.config.parallel.effective_workers())
            .thread_name(|i| format!("xrefgraph-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| IndexError::ThreadPool(e.to_string()))
    }

    fn run_phase<P, S>(
        &self,
        session: &IndexSession<'_, P, S>,
        phase: WalkPhase,
        pool: Option<&ThreadPool>,
    ) -> Result<()>
    where
        P: ResolvedAstProvider + ?Sized,
        S: GraphStore,
    {
        let units = session.provider.units();
        match pool {
            Some(pool) => pool.install(|| {
                units
                    .par_iter()
                    .try_for_each(|unit| walk_unit(session, unit, phase))
            }),
            None => units
                .iter()
                .try_for_each(|unit| walk_unit(session, unit, phase)),
        }
    }
}
