//! Per-device cache of compiled programs
//!
//! The cache belongs to whoever owns the graphics context. Entries are keyed
//! by [`ProgramId`] and tagged with the [`ContextEpoch`] they were compiled
//! in; when the context is lost and recreated the owner bumps the epoch and
//! every entry compiled against the old context is dropped on next use.

use crate::error::GlslError;
use crate::glsl::GlslOptions;
use crate::shader::{Program, ProgramId, ProgramSources};
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;
use std::fmt;

/// Generation counter of a graphics context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextEpoch(u32);

impl ContextEpoch {
    pub fn new(value: u32) -> Self {
        ContextEpoch(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Epoch of the context that replaces this one
    pub fn next(self) -> Self {
        ContextEpoch(self.0.wrapping_add(1))
    }
}

impl fmt::Display for ContextEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch {}", self.0)
    }
}

/// Compiled backend objects of type `T`, one per program
pub struct ProgramCache<T> {
    options: GlslOptions,
    epoch: ContextEpoch,
    entries: IndexMap<ProgramId, T>,
}

impl<T> ProgramCache<T> {
    pub fn new(options: GlslOptions) -> Self {
        ProgramCache {
            options,
            epoch: ContextEpoch::default(),
            entries: IndexMap::new(),
        }
    }

    pub fn options(&self) -> &GlslOptions {
        &self.options
    }

    /// Epoch the current entries were compiled in
    pub fn epoch(&self) -> ContextEpoch {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, program: &Program) -> bool {
        self.entries.contains_key(&program.id())
    }

    pub fn get(&self, program: &Program) -> Option<&T> {
        self.entries.get(&program.id())
    }

    /// Drop every entry
    pub fn invalidate(&mut self) {
        if !self.entries.is_empty() {
            debug!("Invalidating {} cached programs", self.entries.len());
        }
        self.entries.clear();
    }

    /// Return the compiled object for `program`, generating GLSL and calling
    /// `compile` only if there is no entry for it in `epoch`.
    ///
    /// An epoch different from the cache's current one means the context
    /// changed: all existing entries are dropped first. Nothing is inserted
    /// when generation or `compile` fails.
    pub fn get_or_try_insert_with<E, F>(
        &mut self,
        program: &Program,
        epoch: ContextEpoch,
        compile: F,
    ) -> Result<&T, E>
    where
        E: From<GlslError>,
        F: FnOnce(&ProgramSources) -> Result<T, E>,
    {
        if epoch != self.epoch {
            debug!(
                "Context changed from {} to {}, dropping {} cached programs",
                self.epoch,
                epoch,
                self.entries.len()
            );
            self.entries.clear();
            self.epoch = epoch;
        }

        match self.entries.entry(program.id()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(slot) => {
                let sources = program.to_glsl(&self.options)?;
                let compiled = compile(&sources)?;
                debug!("Compiled {} in {}", program, epoch);
                Ok(slot.insert(compiled))
            }
        }
    }
}

impl<T> fmt::Debug for ProgramCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramCache")
            .field("options", &self.options)
            .field("epoch", &self.epoch)
            .field("len", &self.entries.len())
            .finish()
    }
}
