//! Root-level resolution pass
//!
//! Every eligible marker-tagged type is a root. Roots are verified up front,
//! then resolved independently on a `rayon` pool; each worker runs the
//! depth-first algorithm of [`ResolutionEngine`] for its root. Shared
//! dependencies are deduplicated by the engine's construction gates.
//!
//! The first failure cancels the pass. Workers stop picking up roots and
//! in-flight chains return at their next step. Instances already committed by
//! other branches stay registered.

use super::resolution_engine::{ResolutionChain, ResolutionEngine};
use graft_domain::error::{Error, Result};
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Outcome of a successful pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Roots resolved
    pub roots: usize,
    /// Constructors invoked during the pass
    pub constructed: usize,
    /// Keys registered in the repository, aliases and provided types included
    pub registered: usize,
    /// Wall-clock duration
    pub elapsed: Duration,
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} roots, {} constructed, {} registered in {:?}",
            self.roots, self.constructed, self.registered, self.elapsed
        )
    }
}

impl ResolutionEngine {
    /// Resolve every eligible root
    ///
    /// Blocks until every root is resolved or the pass has failed. On failure
    /// the returned error is the first one recorded by any worker.
    pub fn run(&self) -> Result<PassReport> {
        let started = Instant::now();
        let roots = self.eligible.roots().to_vec();
        let constructed_before = self.constructed();

        info!(roots = roots.len(), workers = ?self.settings.workers, "Starting resolution pass");
        self.verify(&roots)?;

        // A pool per pass: the global pool cannot be resized once built
        let mut pool = rayon::ThreadPoolBuilder::new()
            .thread_name(|index| format!("graft-worker-{index}"));
        if let Some(workers) = self.settings.workers {
            pool = pool.num_threads(workers);
        }
        let pool = pool
            .build()
            .map_err(|e| Error::configuration_with_source("Failed to start resolution workers", e))?;

        let resolved = AtomicUsize::new(0);
        let outcome = pool.install(|| {
            roots.par_iter().try_for_each(|root| {
                self.resolve_in(root, root, &mut ResolutionChain::default())
                    .map(|_| {
                        resolved.fetch_add(1, Ordering::Relaxed);
                    })
                    .map_err(|error| self.record_failure(error))
            })
        });

        if outcome.is_err() {
            warn!(
                resolved = resolved.load(Ordering::Relaxed),
                roots = roots.len(),
                "Resolution pass aborted"
            );
            return Err(self.take_failure().unwrap_or(Error::Cancelled));
        }

        let report = PassReport {
            roots: roots.len(),
            constructed: self.constructed() - constructed_before,
            registered: self.repository.len(),
            elapsed: started.elapsed(),
        };
        info!(%report, "Resolution pass complete");
        Ok(report)
    }
}
