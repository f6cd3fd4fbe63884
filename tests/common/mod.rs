#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;
use utm_tracker::application::services::{
    AdvancedTracker, ClickLogger, MappingService, ResolutionService,
};
use utm_tracker::domain::entities::{
    ClickLog, NewClickLog, NewTrackingRecord, NewUrlMapping, TrackingRecord, UrlMapping,
};
use utm_tracker::domain::repositories::{ClickRepository, MappingRepository, TrackingRepository};
use utm_tracker::error::AppError;
use utm_tracker::state::AppState;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// In-memory mapping store.
#[derive(Default)]
pub struct InMemoryMappings {
    rows: Mutex<Vec<UrlMapping>>,
    fail_lookups: bool,
}

impl InMemoryMappings {
    /// A store whose lookups and pings fail like an unreachable database.
    pub fn failing() -> Self {
        Self {
            fail_lookups: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, new_mapping: NewUrlMapping) -> UrlMapping {
        let mut rows = self.rows.lock().unwrap();
        let mapping = UrlMapping {
            id: rows.len() as i64 + 1,
            slug: new_mapping.slug,
            destination_url: new_mapping.destination_url,
            utm: new_mapping.utm,
            expires_at: new_mapping.expires_at,
            created_at: Utc::now(),
        };
        rows.push(mapping.clone());
        mapping
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappings {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<UrlMapping>, AppError> {
        if self.fail_lookups {
            return Err(AppError::Persistence(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.slug == slug)
            .cloned())
    }

    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        Ok(self.insert(new_mapping))
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_lookups {
            return Err(AppError::Persistence(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// In-memory click log; optionally fails every insert.
#[derive(Default)]
pub struct InMemoryClicks {
    rows: Mutex<Vec<ClickLog>>,
    fail_inserts: bool,
}

impl InMemoryClicks {
    /// A click log whose inserts always fail.
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn all(&self) -> Vec<ClickLog> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClicks {
    async fn insert(&self, new_click: NewClickLog) -> Result<ClickLog, AppError> {
        if self.fail_inserts {
            return Err(AppError::Persistence(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows.lock().unwrap();
        let click = new_click.into_click_log(rows.len() as i64 + 1);
        rows.push(click.clone());
        Ok(click)
    }

    async fn count_by_slug(&self, slug: &str) -> Result<i64, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.slug == slug)
            .count() as i64)
    }
}

/// In-memory tracking store.
#[derive(Default)]
pub struct InMemoryTracking {
    rows: Mutex<Vec<TrackingRecord>>,
}

impl InMemoryTracking {
    pub fn all(&self) -> Vec<TrackingRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackingRepository for InMemoryTracking {
    async fn insert(&self, new_record: NewTrackingRecord) -> Result<TrackingRecord, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let record = new_record.into_record(rows.len() as i64 + 1);
        rows.push(record.clone());
        Ok(record)
    }

    async fn increment_click_count(&self, tracking_id: &str) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.tracking_id == tracking_id) {
            Some(record) => {
                record.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> Result<Option<TrackingRecord>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.tracking_id == tracking_id)
            .cloned())
    }
}

/// Stores backing a test [`AppState`], kept for assertions.
pub struct TestStores {
    pub mappings: Arc<InMemoryMappings>,
    pub clicks: Arc<InMemoryClicks>,
    pub tracking: Arc<InMemoryTracking>,
}

impl TestStores {
    pub fn new() -> Self {
        Self::with(InMemoryMappings::default(), InMemoryClicks::default())
    }

    pub fn with(mappings: InMemoryMappings, clicks: InMemoryClicks) -> Self {
        Self {
            mappings: Arc::new(mappings),
            clicks: Arc::new(clicks),
            tracking: Arc::new(InMemoryTracking::default()),
        }
    }

    pub fn state(&self, behind_proxy: bool) -> AppState {
        let resolution_service = Arc::new(ResolutionService::new(
            self.mappings.clone(),
            ClickLogger::new(self.clicks.clone()),
            Some(AdvancedTracker::new(self.tracking.clone())),
        ));
        let mapping_service = Arc::new(MappingService::new(self.mappings.clone()));

        AppState::new(resolution_service, mapping_service, behind_proxy)
    }
}

/// Injects `ConnectInfo(127.0.0.1:12345)` the way `axum::serve` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
