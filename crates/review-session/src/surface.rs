//! Scroll targets registered by the hosting view.
//!
//! The view registers one handle per on-screen surface; the session looks the
//! handle up when a selection needs to be brought into view.

use clause_engine::ClauseLocation;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// The editable document text.
    Editor,
    /// The list of risk details.
    RiskList,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RevealTarget {
    /// Scroll the risk list to the entry for this risk.
    RiskEntry(usize),
    /// Select and scroll to a clause in the editable text.
    Clause(ClauseLocation),
}

pub trait ScrollSurface: Send {
    fn reveal(&mut self, target: &RevealTarget);
}

#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<SurfaceKind, Box<dyn ScrollSurface>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `surface`, returning whatever was registered for `kind` before.
    pub fn register(
        &mut self,
        kind: SurfaceKind,
        surface: Box<dyn ScrollSurface>,
    ) -> Option<Box<dyn ScrollSurface>> {
        self.surfaces.insert(kind, surface)
    }

    pub fn unregister(&mut self, kind: SurfaceKind) -> Option<Box<dyn ScrollSurface>> {
        self.surfaces.remove(&kind)
    }

    pub fn is_registered(&self, kind: SurfaceKind) -> bool {
        self.surfaces.contains_key(&kind)
    }

    /// Returns false when no surface of that kind is registered.
    pub fn reveal(&mut self, kind: SurfaceKind, target: &RevealTarget) -> bool {
        match self.surfaces.get_mut(&kind) {
            Some(surface) => {
                surface.reveal(target);
                true
            }
            None => {
                tracing::debug!(?kind, "no surface registered, skipping reveal");
                false
            }
        }
    }
}

impl std::fmt::Debug for SurfaceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceRegistry")
            .field("surfaces", &self.surfaces.keys().collect::<Vec<_>>())
            .finish()
    }
}
