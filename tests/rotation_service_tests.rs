//! RotationService tests
//!
//! Runs the rotation operations against a temporary SQLite store, plus
//! in-test CounterStore implementations for failure and timeout paths.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use migration::entities::rotation;
use rotator::config::DatabaseConfig;
use rotator::errors::{Result, RotatorError};
use rotator::services::RotationService;
use rotator::storage::{
    CatalogKind, CatalogStore, CounterStore, Rotation, RotationStatus, SeaOrmStorage,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};
use tempfile::TempDir;
use uuid::Uuid;

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("rotation.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        pool_size: 5,
        timeout: 5,
    };
    let storage = SeaOrmStorage::new(&config)
        .await
        .expect("Failed to create storage");
    (Arc::new(storage), temp_dir)
}

async fn create_service() -> (RotationService, Arc<SeaOrmStorage>, TempDir) {
    let (storage, dir) = create_temp_storage().await;
    let service = RotationService::new(storage.clone(), TEST_TIMEOUT);
    (service, storage, dir)
}

async fn register_group(storage: &SeaOrmStorage) -> Uuid {
    let id = Uuid::new_v4();
    storage
        .register(CatalogKind::Group, id, "audience")
        .await
        .expect("register group");
    id
}

/// 直接写入计数，跳过逐次 record_click / record_show
async fn seed_counters(
    storage: &SeaOrmStorage,
    slot: Uuid,
    banner: Uuid,
    group: Uuid,
    clicks: i64,
    shows: i64,
) {
    let result = rotation::Entity::update_many()
        .col_expr(rotation::Column::Clicks, Expr::value(clicks))
        .col_expr(rotation::Column::Shows, Expr::value(shows))
        .filter(rotation::Column::SlotId.eq(slot))
        .filter(rotation::Column::BannerId.eq(banner))
        .filter(rotation::Column::GroupId.eq(group))
        .exec(storage.get_db())
        .await
        .expect("seed counters");
    assert_eq!(result.rows_affected, 1);
}

/// 挂载若干 banner 并写入 (clicks, shows)，banner 顺序与 counters 一致
async fn seeded_slot(
    service: &RotationService,
    storage: &SeaOrmStorage,
    group: Uuid,
    counters: &[(i64, i64)],
) -> (Uuid, Vec<Uuid>) {
    let slot = Uuid::new_v4();
    let mut banners = Vec::with_capacity(counters.len());
    for (clicks, shows) in counters {
        let banner = Uuid::new_v4();
        service.add_banner(banner, slot).await.unwrap();
        seed_counters(storage, slot, banner, group, *clicks, *shows).await;
        banners.push(banner);
    }
    (slot, banners)
}

async fn run_rounds(
    service: &RotationService,
    slot: Uuid,
    group: Uuid,
    rounds: usize,
) -> HashMap<Uuid, usize> {
    let mut picks: HashMap<Uuid, usize> = HashMap::new();
    for _ in 0..rounds {
        let winner = service.choose_banner(slot, group).await.unwrap();
        *picks.entry(winner).or_insert(0) += 1;
    }
    picks
}

// =============================================================================
// 基本场景
// =============================================================================

#[tokio::test]
async fn test_add_choose_click_scenario() {
    let (service, storage, _dir) = create_service().await;
    let g1 = register_group(&storage).await;
    let g2 = register_group(&storage).await;
    let (b1, s1) = (Uuid::new_v4(), Uuid::new_v4());

    service.add_banner(b1, s1).await.unwrap();

    assert_eq!(service.choose_banner(s1, g1).await.unwrap(), b1);
    service.click_banner(s1, b1, g1).await.unwrap();

    let rotation = service.rotation(b1, s1, g1).await.unwrap();
    assert_eq!(rotation.clicks, 1);
    assert_eq!(rotation.shows, 1);

    // g2 没有被触碰
    let untouched = service.rotation(b1, s1, g2).await.unwrap();
    assert_eq!((untouched.shows, untouched.clicks), (0, 0));
}

#[tokio::test]
async fn test_add_banner_twice_keeps_single_rotation() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let (banner, slot) = (Uuid::new_v4(), Uuid::new_v4());

    service.add_banner(banner, slot).await.unwrap();
    service.add_banner(banner, slot).await.unwrap();

    let stats = service.slot_stats(slot).await.unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].group_id, group);
}

#[tokio::test]
async fn test_remove_then_add_restores_counters() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let (banner, slot) = (Uuid::new_v4(), Uuid::new_v4());

    service.add_banner(banner, slot).await.unwrap();
    service.choose_banner(slot, group).await.unwrap();
    service.click_banner(slot, banner, group).await.unwrap();

    service.remove_banner(slot, banner).await.unwrap();
    let removed = service.rotation(banner, slot, group).await.unwrap();
    assert_eq!(removed.status, RotationStatus::Inactive);

    service.add_banner(banner, slot).await.unwrap();
    let restored = service.rotation(banner, slot, group).await.unwrap();
    assert_eq!(restored.status, RotationStatus::Active);
    assert_eq!((restored.shows, restored.clicks), (1, 1));
}

#[tokio::test]
async fn test_choose_excludes_removed_banner() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let slot = Uuid::new_v4();
    let (kept, removed) = (Uuid::new_v4(), Uuid::new_v4());

    service.add_banner(kept, slot).await.unwrap();
    service.add_banner(removed, slot).await.unwrap();
    service.remove_banner(slot, removed).await.unwrap();

    for _ in 0..10 {
        assert_eq!(service.choose_banner(slot, group).await.unwrap(), kept);
    }
}

#[tokio::test]
async fn test_choose_on_empty_slot_is_no_active_banners() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;

    let err = service
        .choose_banner(Uuid::new_v4(), group)
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::NoActiveBanners(_)));
    assert!(err.message().starts_with("choose_banner: "));
}

#[tokio::test]
async fn test_click_unknown_triple_is_not_found() {
    let (service, _storage, _dir) = create_service().await;
    let err = service
        .click_banner(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::NotFound(_)));
}

#[tokio::test]
async fn test_click_does_not_reactivate() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let (banner, slot) = (Uuid::new_v4(), Uuid::new_v4());

    service.add_banner(banner, slot).await.unwrap();
    service.remove_banner(slot, banner).await.unwrap();
    service.click_banner(slot, banner, group).await.unwrap();

    let rotation = service.rotation(banner, slot, group).await.unwrap();
    assert_eq!(rotation.status, RotationStatus::Inactive);
    assert_eq!(rotation.clicks, 1);
}

#[tokio::test]
async fn test_new_banner_is_explored_first() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let slot = Uuid::new_v4();
    let veteran = Uuid::new_v4();

    service.add_banner(veteran, slot).await.unwrap();
    for _ in 0..5 {
        service.choose_banner(slot, group).await.unwrap();
    }

    let newcomer = Uuid::new_v4();
    service.add_banner(newcomer, slot).await.unwrap();
    assert_eq!(service.choose_banner(slot, group).await.unwrap(), newcomer);
}

#[tokio::test]
async fn test_every_banner_shown_over_many_rounds() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let slot = Uuid::new_v4();
    let banners: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
    for banner in &banners {
        service.add_banner(*banner, slot).await.unwrap();
    }

    let mut picks: HashMap<Uuid, usize> = HashMap::new();
    for _ in 0..60 {
        let winner = service.choose_banner(slot, group).await.unwrap();
        *picks.entry(winner).or_insert(0) += 1;
    }

    for banner in &banners {
        assert!(picks.get(banner).copied().unwrap_or(0) >= 1);
    }
    let total: u64 = service
        .slot_stats(slot)
        .await
        .unwrap()
        .iter()
        .map(|r| r.shows)
        .sum();
    assert_eq!(total, 60);
}

#[tokio::test]
async fn test_identical_seeded_banners_all_selected() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let (slot, banners) =
        seeded_slot(&service, &storage, group, &[(10, 30), (10, 30), (10, 30)]).await;

    let picks = run_rounds(&service, slot, group, 1000).await;

    for banner in &banners {
        assert!(
            picks.get(banner).copied().unwrap_or(0) >= 1,
            "banner {} never selected: {:?}",
            banner,
            picks
        );
    }
    let total: u64 = service
        .slot_stats(slot)
        .await
        .unwrap()
        .iter()
        .map(|r| r.shows)
        .sum();
    assert_eq!(total, 90 + 1000);
}

#[tokio::test]
async fn test_seeded_popular_banner_selected_most() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let (slot, banners) = seeded_slot(
        &service,
        &storage,
        group,
        &[(1000, 30), (10, 30), (10, 30), (10, 30)],
    )
    .await;

    let picks = run_rounds(&service, slot, group, 1000).await;

    let popular = picks.get(&banners[0]).copied().unwrap_or(0);
    for other in &banners[1..] {
        let count = picks.get(other).copied().unwrap_or(0);
        assert!(popular >= count, "popular {} < {} ({:?})", popular, count, picks);
    }
}

#[tokio::test]
async fn test_snapshot_and_decide_report_empty_slot_alike() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let slot = Uuid::new_v4();

    let from_store = service.snapshot(slot, group).await.unwrap_err();
    let from_decide = rotator::services::SelectionSnapshot::new(slot, group, Vec::new())
        .decide()
        .unwrap_err();

    assert!(matches!(from_store, RotatorError::NoActiveBanners(_)));
    assert_eq!(
        from_store.message(),
        format!("snapshot: {}", from_decide.message())
    );
}

#[tokio::test]
async fn test_snapshot_decide_commit() {
    let (service, storage, _dir) = create_service().await;
    let group = register_group(&storage).await;
    let (banner, slot) = (Uuid::new_v4(), Uuid::new_v4());
    service.add_banner(banner, slot).await.unwrap();

    let snapshot = service.snapshot(slot, group).await.unwrap();
    assert_eq!(snapshot.total_shows(), 0);
    let winner = snapshot.decide().unwrap();
    assert_eq!(winner, banner);

    service.commit(&snapshot, winner).await.unwrap();
    assert_eq!(service.rotation(banner, slot, group).await.unwrap().shows, 1);
}

// =============================================================================
// 失败路径（测试内的 CounterStore 实现）
// =============================================================================

/// 所有操作都返回连接错误
struct UnavailableStore;

#[async_trait]
impl CounterStore for UnavailableStore {
    async fn activate(&self, _: Uuid, _: Uuid) -> Result<()> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
    async fn deactivate(&self, _: Uuid, _: Uuid) -> Result<()> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
    async fn record_click(&self, _: Uuid, _: Uuid, _: Uuid) -> Result<()> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
    async fn record_show(&self, _: Uuid, _: Uuid, _: Uuid) -> Result<()> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
    async fn active_rotations(&self, _: Uuid, _: Uuid) -> Result<Vec<Rotation>> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
    async fn get_rotation(&self, _: Uuid, _: Uuid, _: Uuid) -> Result<Option<Rotation>> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
    async fn slot_rotations(&self, _: Uuid) -> Result<Vec<Rotation>> {
        Err(RotatorError::store_unavailable("connection refused"))
    }
}

/// 读操作正常，写入展示时卡住
struct StallingStore {
    rotations: Vec<Rotation>,
}

#[async_trait]
impl CounterStore for StallingStore {
    async fn activate(&self, _: Uuid, _: Uuid) -> Result<()> {
        Ok(())
    }
    async fn deactivate(&self, _: Uuid, _: Uuid) -> Result<()> {
        Ok(())
    }
    async fn record_click(&self, _: Uuid, _: Uuid, _: Uuid) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
    async fn record_show(&self, _: Uuid, _: Uuid, _: Uuid) -> Result<()> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
    async fn active_rotations(&self, _: Uuid, _: Uuid) -> Result<Vec<Rotation>> {
        Ok(self.rotations.clone())
    }
    async fn get_rotation(&self, _: Uuid, _: Uuid, _: Uuid) -> Result<Option<Rotation>> {
        Ok(None)
    }
    async fn slot_rotations(&self, _: Uuid) -> Result<Vec<Rotation>> {
        Ok(self.rotations.clone())
    }
}

#[tokio::test]
async fn test_store_unavailable_is_propagated_with_context() {
    let service = RotationService::new(Arc::new(UnavailableStore), TEST_TIMEOUT);

    let err = service
        .add_banner(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::StoreUnavailable(_)));
    assert_eq!(err.message(), "add_banner: connection refused");

    let err = service
        .choose_banner(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_slow_store_times_out() {
    let banner = Uuid::new_v4();
    let store = StallingStore {
        rotations: vec![Rotation::new(banner, Uuid::nil(), Uuid::nil())],
    };
    let service = RotationService::new(Arc::new(store), Duration::from_millis(50));

    let started = std::time::Instant::now();
    let err = service
        .choose_banner(Uuid::nil(), Uuid::nil())
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::Timeout(_)));
    assert!(started.elapsed() < Duration::from_secs(5));

    let err = service
        .click_banner(Uuid::nil(), banner, Uuid::nil())
        .await
        .unwrap_err();
    assert!(matches!(err, RotatorError::Timeout(_)));

    // 读操作不受影响
    assert_eq!(service.slot_stats(Uuid::nil()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_from_config_uses_request_timeout() {
    let config = rotator::config::RotationConfig {
        request_timeout_ms: 1234,
    };
    let service = RotationService::from_config(Arc::new(UnavailableStore), &config);
    assert_eq!(service.timeout(), Duration::from_millis(1234));
}
