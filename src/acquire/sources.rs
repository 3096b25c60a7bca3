//! The set of catalogs available to one run.

use crate::config::Platform;
use crate::source::ModSource;

use std::sync::Arc;

/// One optional [`ModSource`] per [`Platform`].
///
/// A missing source makes every entry of that platform fail as unavailable
/// without touching the network.
#[derive(Clone, Default)]
pub struct Sources {
    modrinth: Option<Arc<dyn ModSource>>,
    curseforge: Option<Arc<dyn ModSource>>,
}

impl Sources {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modrinth(mut self, source: Arc<dyn ModSource>) -> Self {
        self.modrinth = Some(source);
        self
    }

    pub fn with_curseforge(mut self, source: Arc<dyn ModSource>) -> Self {
        self.curseforge = Some(source);
        self
    }

    /// The source serving `platform`, if any.
    pub fn get(&self, platform: Platform) -> Option<&Arc<dyn ModSource>> {
        match platform {
            Platform::Modrinth => self.modrinth.as_ref(),
            Platform::CurseForge => self.curseforge.as_ref(),
        }
    }

    pub fn has(&self, platform: Platform) -> bool {
        self.get(platform).is_some()
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources")
            .field("modrinth", &self.modrinth.is_some())
            .field("curseforge", &self.curseforge.is_some())
            .finish()
    }
}
