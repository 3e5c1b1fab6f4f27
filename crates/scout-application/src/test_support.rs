//! Shared mock implementations of the core trait seams for store tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use scout_core::gateway::{RegisterAck, SchoolGateway};
use scout_core::interaction::InteractionEvent;
use scout_core::school::{Location, RecommendedSchool, School};
use scout_core::session::Session;
use scout_core::storage::KeyValueStore;
use scout_core::{Result, ScoutError};

/// In-memory `KeyValueStore` with switchable write failures.
#[derive(Default)]
pub struct MockStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set`/`remove` fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw stored value for assertions.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ScoutError::storage("mock storage quota exceeded"));
        }
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ScoutError::storage("mock storage quota exceeded"));
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Stub gateway accepting exactly the `admin`/`admin` credentials and
/// recording reported interactions.
#[derive(Default)]
pub struct MockGateway {
    interactions: Mutex<Vec<InteractionEvent>>,
    /// Number of leading `report_interaction` calls that fail.
    failing_reports: AtomicU32,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the first `count` interaction reports fail with a network
    /// error.
    pub fn fail_first_reports(&self, count: u32) {
        self.failing_reports.store(count, Ordering::SeqCst);
    }

    pub fn interactions(&self) -> Vec<InteractionEvent> {
        self.interactions.lock().unwrap().clone()
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.lock().unwrap().len()
    }
}

#[async_trait]
impl SchoolGateway for MockGateway {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username == "admin" && password == "admin" {
            Ok(Session {
                user_id: "u1".to_string(),
                name: "Admin".to_string(),
                username: "admin".to_string(),
            })
        } else {
            Err(ScoutError::auth("Invalid credentials"))
        }
    }

    async fn register(&self, username: &str, _password: &str, _name: &str) -> Result<RegisterAck> {
        if username == "admin" {
            return Err(ScoutError::validation("Username already exists"));
        }
        Ok(RegisterAck {
            message: "User registered successfully".to_string(),
        })
    }

    async fn list_schools(&self) -> Result<Vec<School>> {
        Ok(vec![sample_school("s1"), sample_school("s2")])
    }

    async fn get_recommendations(&self, _user_id: &str) -> Result<Vec<RecommendedSchool>> {
        Ok(Vec::new())
    }

    async fn report_interaction(&self, event: &InteractionEvent) -> Result<()> {
        let remaining = self.failing_reports.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_reports.store(remaining - 1, Ordering::SeqCst);
            return Err(ScoutError::network("analytics endpoint unavailable"));
        }
        self.interactions.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A canonical school snapshot for tests.
pub fn sample_school(id: &str) -> School {
    School {
        id: id.to_string(),
        name: format!("School {}", id),
        kind: "Public".to_string(),
        curriculum: "National".to_string(),
        rating: 4.0,
        tuition: 2500.0,
        focus: "Science".to_string(),
        facilities: "Library".to_string(),
        location: Location {
            latitude: 31.5,
            longitude: 74.3,
        },
        student_teacher_ratio: 16.0,
        test_scores: 80.0,
    }
}

/// Polls until the gateway has recorded `expected` interactions, failing
/// after a bounded wait. Detached reports run on the runtime, so tests
/// yield to them here.
pub async fn wait_for_reports(gateway: &MockGateway, expected: usize) {
    for _ in 0..100 {
        if gateway.interaction_count() == expected {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!(
        "timed out waiting for {} interaction reports (got {})",
        expected,
        gateway.interaction_count()
    );
}
