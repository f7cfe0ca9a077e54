//! Map Catalog Controller
//!
//! Backs the map list screen: the user's maps, the recent timeline, and
//! create / rename / delete. Same contract as the tree controller: no local
//! patching, a full refresh after every successful change.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use crate::domain::{GatewayResult, MapLogEntry, MindMap, NodeId};
use crate::gateway::{MapGateway, PageRequest};
use crate::status::{Notice, Notices, Outcome, Phase, Rejection};

const LOAD_FAILED: &str = "Failed to load maps";

/// What the list screen draws
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub phase: Phase,
    pub maps: Vec<MindMap>,
    pub timeline: Vec<MapLogEntry>,
}

#[derive(Debug, Default)]
struct CatalogState {
    maps: Vec<MindMap>,
    timeline: Vec<MapLogEntry>,
    phase: Phase,
    notices: Notices,
    /// Bumped by every refresh; only the newest may apply its result
    load_generation: u64,
}

impl CatalogState {
    /// A finished refresh ends `Loading`, never a running mutation
    fn settle_load(&mut self) {
        if self.phase == Phase::Loading {
            self.phase = Phase::Ready;
        }
    }
}

pub struct MapCatalog<G> {
    gateway: Rc<G>,
    state: Rc<RefCell<CatalogState>>,
}

impl<G> Clone for MapCatalog<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Rc::clone(&self.gateway),
            state: Rc::clone(&self.state),
        }
    }
}

impl<G: MapGateway> MapCatalog<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_shared_gateway(Rc::new(gateway))
    }

    pub fn with_shared_gateway(gateway: Rc<G>) -> Self {
        Self {
            gateway,
            state: Rc::new(RefCell::new(CatalogState::default())),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn maps(&self) -> Vec<MindMap> {
        self.state.borrow().maps.clone()
    }

    pub fn timeline(&self) -> Vec<MapLogEntry> {
        self.state.borrow().timeline.clone()
    }

    pub fn find(&self, map_id: &NodeId) -> Option<MindMap> {
        self.state.borrow().maps.iter().find(|m| &m.id == map_id).cloned()
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.borrow();
        CatalogSnapshot {
            phase: state.phase,
            maps: state.maps.clone(),
            timeline: state.timeline.clone(),
        }
    }

    pub fn drain_notices(&self) -> Vec<Notice> {
        self.state.borrow_mut().notices.drain()
    }

    /// Reload the map list, then the first timeline page.
    ///
    /// A list failure is reported; a timeline failure only keeps the old
    /// timeline. When a newer refresh starts meanwhile, this result is dropped.
    pub async fn refresh(&self) -> Outcome {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.load_generation += 1;
            if state.phase != Phase::Mutating {
                state.phase = Phase::Loading;
            }
            state.load_generation
        };

        let maps = match self.gateway.list_maps().await {
            Ok(maps) => maps,
            Err(e) => {
                let mut state = self.state.borrow_mut();
                if state.load_generation != generation {
                    return Outcome::Superseded;
                }
                warn!("Loading mind maps failed: {}", e);
                state.notices.push(Notice::error(LOAD_FAILED));
                state.settle_load();
                return Outcome::Failed(e);
            }
        };
        let timeline = self.gateway.map_log(PageRequest::default()).await;

        let mut state = self.state.borrow_mut();
        if state.load_generation != generation {
            return Outcome::Superseded;
        }
        info!("Loaded {} mind maps", maps.len());
        state.maps = maps;
        match timeline {
            Ok(timeline) => state.timeline = timeline,
            Err(e) => warn!("Loading map timeline failed: {}", e),
        }
        state.settle_load();
        Outcome::Applied
    }

    pub async fn create_map(&self, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Outcome::Rejected(Rejection::EmptyName);
        }
        if !self.begin_mutation() {
            return Outcome::Busy;
        }
        let result = self.gateway.create_map(name).await;
        self.finish_mutation(result, "Map created successfully", "Failed to create map")
            .await
    }

    pub async fn rename_map(&self, map_id: &NodeId, name: &str) -> Outcome {
        let name = name.trim();
        if name.is_empty() {
            return Outcome::Rejected(Rejection::EmptyName);
        }
        if self.find(map_id).is_none() {
            return Outcome::Rejected(Rejection::UnknownNode(map_id.clone()));
        }
        if !self.begin_mutation() {
            return Outcome::Busy;
        }
        let result = self.gateway.rename_map(map_id, name).await;
        self.finish_mutation(result, "Map renamed successfully", "Failed to rename map")
            .await
    }

    pub async fn delete_map(&self, map_id: &NodeId) -> Outcome {
        if self.find(map_id).is_none() {
            return Outcome::Rejected(Rejection::UnknownNode(map_id.clone()));
        }
        if !self.begin_mutation() {
            return Outcome::Busy;
        }
        let result = self.gateway.delete_map(map_id).await;
        self.finish_mutation(result, "Map deleted successfully", "Failed to delete map")
            .await
    }

    fn begin_mutation(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.phase == Phase::Mutating {
            warn!("Ignoring catalog change: another one is in flight");
            return false;
        }
        state.phase = Phase::Mutating;
        true
    }

    /// Success refreshes while still `Mutating`; `Ready` comes after
    async fn finish_mutation(
        &self,
        result: GatewayResult<()>,
        success: &str,
        failure: &str,
    ) -> Outcome {
        match result {
            Ok(()) => {
                self.state.borrow_mut().notices.push(Notice::info(success));
                self.refresh().await;
                self.state.borrow_mut().phase = Phase::Ready;
                Outcome::Applied
            }
            Err(e) => {
                warn!("Catalog change failed ({}): {}", e.kind(), e);
                let mut state = self.state.borrow_mut();
                state.phase = Phase::Ready;
                state.notices.push(Notice::error(failure));
                Outcome::Failed(e)
            }
        }
    }
}
