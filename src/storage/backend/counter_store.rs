use async_trait::async_trait;
use uuid::Uuid;

use super::SeaOrmStorage;
use super::mutations::Counter;
use crate::errors::Result;
use crate::storage::{CounterStore, Rotation};

#[async_trait]
impl CounterStore for SeaOrmStorage {
    async fn activate(&self, banner_id: Uuid, slot_id: Uuid) -> Result<()> {
        self.attach_banner(banner_id, slot_id).await.map(|_| ())
    }

    async fn deactivate(&self, slot_id: Uuid, banner_id: Uuid) -> Result<()> {
        self.detach_banner(slot_id, banner_id).await.map(|_| ())
    }

    async fn record_click(&self, slot_id: Uuid, banner_id: Uuid, group_id: Uuid) -> Result<()> {
        self.increment(Counter::Clicks, slot_id, banner_id, group_id)
            .await
    }

    async fn record_show(&self, slot_id: Uuid, banner_id: Uuid, group_id: Uuid) -> Result<()> {
        self.increment(Counter::Shows, slot_id, banner_id, group_id)
            .await
    }

    async fn active_rotations(&self, slot_id: Uuid, group_id: Uuid) -> Result<Vec<Rotation>> {
        self.load_active(slot_id, group_id).await
    }

    async fn get_rotation(
        &self,
        banner_id: Uuid,
        slot_id: Uuid,
        group_id: Uuid,
    ) -> Result<Option<Rotation>> {
        self.load_rotation(banner_id, slot_id, group_id).await
    }

    async fn slot_rotations(&self, slot_id: Uuid) -> Result<Vec<Rotation>> {
        self.load_slot(slot_id).await
    }
}
