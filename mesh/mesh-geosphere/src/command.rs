//! Command-driven sphere state for interactive viewers.
//!
//! A viewer translates its input events (buttons, key presses, sliders) into
//! [`SphereCommand`]s and feeds them to [`SphereState::update`]. The state
//! owns the refiner and a generation counter; whenever the counter moves the
//! viewer re-packs and re-uploads its buffers. Nothing here knows about any
//! particular UI toolkit or graphics API.

use tracing::{debug, warn};

use crate::error::RefineError;
use crate::params::RefineParams;
use crate::refiner::GeodesicRefiner;
use crate::stats::LevelChange;

/// A discrete request against the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SphereCommand {
    /// Refine by one level.
    Subdivide,
    /// Go back one level.
    Coarsen,
    /// Move to an absolute level.
    SetLevel(u32),
    /// Return to the base tetrahedron, releasing all positions.
    Reset,
}

/// What [`SphereState::update`] did with a command.
#[derive(Debug)]
pub enum CommandOutcome {
    /// Geometry changed; one entry per level step taken.
    Changed(Vec<LevelChange>),
    /// The command was valid but left the geometry as it was.
    Unchanged,
    /// The command was refused; state is untouched.
    Rejected(RefineError),
}

impl CommandOutcome {
    /// Whether buffers need to be re-uploaded.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Owned viewer state: the refiner plus a change counter.
#[derive(Debug, Clone, Default)]
pub struct SphereState {
    refiner: GeodesicRefiner,
    generation: u64,
}

impl SphereState {
    /// Create a state at level 0.
    #[must_use]
    pub fn new(params: RefineParams) -> Self {
        Self {
            refiner: GeodesicRefiner::new(params),
            generation: 0,
        }
    }

    /// Wrap an existing refiner.
    #[must_use]
    pub const fn from_refiner(refiner: GeodesicRefiner) -> Self {
        Self {
            refiner,
            generation: 0,
        }
    }

    /// The refiner being driven.
    #[must_use]
    pub const fn refiner(&self) -> &GeodesicRefiner {
        &self.refiner
    }

    /// Incremented on every command that changes geometry.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply a single command.
    pub fn update(&mut self, command: SphereCommand) -> CommandOutcome {
        let result = match command {
            SphereCommand::Subdivide => self.refiner.subdivide().map(|c| vec![c]),
            SphereCommand::Coarsen => self.refiner.coarsen().map(|c| vec![c]),
            SphereCommand::SetLevel(level) => self.refiner.set_level(level),
            SphereCommand::Reset => Ok(self.reset_refiner()),
        };

        match result {
            Ok(changes) if changes.is_empty() => CommandOutcome::Unchanged,
            Ok(changes) => {
                self.generation += 1;
                debug!("{:?} -> generation {}", command, self.generation);
                CommandOutcome::Changed(changes)
            }
            Err(err) => {
                warn!("Rejected {:?}: {}", command, err);
                CommandOutcome::Rejected(err)
            }
        }
    }

    fn reset_refiner(&mut self) -> Vec<LevelChange> {
        let stats = self.refiner.stats();
        if stats.level == 0 && stats.stale_vertices() == 0 {
            return Vec::new();
        }
        self.refiner.reset();
        vec![LevelChange {
            from: stats.level,
            to: 0,
            faces_before: stats.faces,
            faces_after: self.refiner.face_count(),
            vertices_before: stats.vertices,
            vertices_after: self.refiner.vertex_count(),
        }]
    }

    /// Apply commands in order, returning each outcome.
    pub fn apply_all<I>(&mut self, commands: I) -> Vec<CommandOutcome>
    where
        I: IntoIterator<Item = SphereCommand>,
    {
        commands.into_iter().map(|c| self.update(c)).collect()
    }
}
