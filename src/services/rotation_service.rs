//! Banner rotation service
//!
//! Orchestrates the four rotation operations against a [`CounterStore`],
//! using the UCB1 engine for the choose path. Shared by the HTTP handlers
//! and the integration tests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::RotationConfig;
use crate::errors::{Result, RotatorError};
use crate::selection::ucb;
use crate::storage::{CounterStore, Rotation};

/// Active candidates of one slot/group, read once for a choose decision.
///
/// The snapshot is not locked: other requests may record shows or attach
/// banners between [`RotationService::snapshot`] and
/// [`RotationService::commit`]. UCB1 tolerates this staleness.
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    slot_id: Uuid,
    group_id: Uuid,
    rotations: Vec<Rotation>,
    total_shows: u64,
}

impl SelectionSnapshot {
    pub fn new(slot_id: Uuid, group_id: Uuid, rotations: Vec<Rotation>) -> Self {
        let total_shows = ucb::total_shows(&rotations);
        Self {
            slot_id,
            group_id,
            rotations,
            total_shows,
        }
    }

    pub fn slot_id(&self) -> Uuid {
        self.slot_id
    }

    pub fn group_id(&self) -> Uuid {
        self.group_id
    }

    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    pub fn total_shows(&self) -> u64 {
        self.total_shows
    }

    /// Run the selection engine over the snapshot. Pure.
    pub fn decide(&self) -> Result<Uuid> {
        ucb::choose(&self.rotations, self.total_shows)
            .ok_or_else(|| no_active_banners(self.slot_id, self.group_id))
    }
}

fn no_active_banners(slot_id: Uuid, group_id: Uuid) -> RotatorError {
    RotatorError::no_active_banners(format!(
        "slot {} has no active banners for group {}",
        slot_id, group_id
    ))
}

/// Service for banner rotation
///
/// Every public call is bounded by the configured request timeout. When it
/// expires the pending store future is dropped and the call fails with
/// `Timeout`; increments that already completed are not undone.
pub struct RotationService {
    store: Arc<dyn CounterStore>,
    timeout: Duration,
}

impl RotationService {
    pub fn new(store: Arc<dyn CounterStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn from_config(store: Arc<dyn CounterStore>, config: &RotationConfig) -> Self {
        Self::new(store, Duration::from_millis(config.request_timeout_ms))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Attach a banner to a slot for every known group.
    pub async fn add_banner(&self, banner_id: Uuid, slot_id: Uuid) -> Result<()> {
        self.bounded("add_banner", self.store.activate(banner_id, slot_id))
            .await?;
        info!("RotationService: banner {} added to slot {}", banner_id, slot_id);
        Ok(())
    }

    /// Detach a banner from a slot. Counters are kept for a later re-add.
    pub async fn remove_banner(&self, slot_id: Uuid, banner_id: Uuid) -> Result<()> {
        self.bounded("remove_banner", self.store.deactivate(slot_id, banner_id))
            .await?;
        info!(
            "RotationService: banner {} removed from slot {}",
            banner_id, slot_id
        );
        Ok(())
    }

    /// Record a click. Does not reactivate a detached banner.
    pub async fn click_banner(&self, slot_id: Uuid, banner_id: Uuid, group_id: Uuid) -> Result<()> {
        self.bounded(
            "click_banner",
            self.store.record_click(slot_id, banner_id, group_id),
        )
        .await
    }

    /// Pick a banner for the slot and group, then record the show.
    ///
    /// Read, decide and write are three separate store round trips with no
    /// transaction around them. Concurrent choose calls may decide on the
    /// same stale counters.
    pub async fn choose_banner(&self, slot_id: Uuid, group_id: Uuid) -> Result<Uuid> {
        self.bounded("choose_banner", async {
            let snapshot = self.load_snapshot(slot_id, group_id).await?;
            let winner = snapshot.decide()?;
            self.store.record_show(slot_id, winner, group_id).await?;

            debug!(
                "RotationService: slot {} group {} -> banner {} (total shows {})",
                slot_id,
                group_id,
                winner,
                snapshot.total_shows()
            );
            Ok(winner)
        })
        .await
    }

    /// Read the candidate set. `NoActiveBanners` when it is empty.
    pub async fn snapshot(&self, slot_id: Uuid, group_id: Uuid) -> Result<SelectionSnapshot> {
        self.bounded("snapshot", self.load_snapshot(slot_id, group_id))
            .await
    }

    /// Record the show for a banner decided from `snapshot`.
    pub async fn commit(&self, snapshot: &SelectionSnapshot, banner_id: Uuid) -> Result<()> {
        self.bounded(
            "commit",
            self.store
                .record_show(snapshot.slot_id(), banner_id, snapshot.group_id()),
        )
        .await
    }

    /// Every rotation of a slot with its counters and status.
    pub async fn slot_stats(&self, slot_id: Uuid) -> Result<Vec<Rotation>> {
        self.bounded("slot_stats", self.store.slot_rotations(slot_id))
            .await
    }

    /// Counters of a single triple
    pub async fn rotation(
        &self,
        banner_id: Uuid,
        slot_id: Uuid,
        group_id: Uuid,
    ) -> Result<Rotation> {
        self.bounded("rotation", async {
            self.store
                .get_rotation(banner_id, slot_id, group_id)
                .await?
                .ok_or_else(|| {
                    RotatorError::not_found(format!(
                        "no rotation for banner {} in slot {} and group {}",
                        banner_id, slot_id, group_id
                    ))
                })
        })
        .await
    }

    async fn load_snapshot(&self, slot_id: Uuid, group_id: Uuid) -> Result<SelectionSnapshot> {
        let rotations = self.store.active_rotations(slot_id, group_id).await?;
        if rotations.is_empty() {
            return Err(no_active_banners(slot_id, group_id));
        }
        Ok(SelectionSnapshot::new(slot_id, group_id, rotations))
    }

    /// 超时控制 + 错误上下文 + 日志
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let err = match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e.with_context(operation),
            Err(_) => RotatorError::timeout(format!(
                "{}: no answer from store within {} ms",
                operation,
                self.timeout.as_millis()
            )),
        };

        match err {
            RotatorError::NotFound(_)
            | RotatorError::NoActiveBanners(_)
            | RotatorError::InvalidArgument(_) => warn!("RotationService: {}", err),
            _ => error!("RotationService: {}", err),
        }
        Err(err)
    }
}
