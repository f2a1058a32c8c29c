//! Interpreter tests against a recording backend.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use yardstick_core::{
    Business, BusinessSample, Criteria, Entity, EntityKind, Error, Instruction, RawInstruction,
    ReferenceCorpus, Result, ReviewSample, UserSample,
};

use crate::{full_scan_units, insert_units, point_read_units, Backend, Interpreter};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Insert(EntityKind),
    GetById(EntityKind, String),
    Search(EntityKind, Criteria, usize),
    GetAll(EntityKind),
}

/// Keeps every record in a vector and every call in a log.
#[derive(Default)]
struct RecordingBackend {
    records: Mutex<Vec<Entity>>,
    calls: Mutex<Vec<Call>>,
    fail_inserts: bool,
}

impl RecordingBackend {
    fn with(records: Vec<Entity>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn inserted(&self, kind: EntityKind) -> Vec<Entity> {
        self.records
            .lock()
            .iter()
            .filter(|e| e.kind() == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn insert(&self, entity: Entity) -> Result<()> {
        self.calls.lock().push(Call::Insert(entity.kind()));
        if self.fail_inserts {
            return Err(Error::backend("recording", "insert", "read-only"));
        }
        self.records.lock().push(entity);
        Ok(())
    }

    async fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>> {
        self.calls.lock().push(Call::GetById(kind, id.to_string()));
        Ok(self
            .records
            .lock()
            .iter()
            .find(|e| e.kind() == kind && e.id() == id)
            .cloned())
    }

    async fn search(&self, kind: EntityKind, criteria: &Criteria, limit: usize) -> Result<Vec<Entity>> {
        self.calls
            .lock()
            .push(Call::Search(kind, criteria.clone(), limit));
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|e| e.kind() == kind && criteria.matches(e))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_all(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        self.calls.lock().push(Call::GetAll(kind));
        Ok(self.inserted(kind))
    }
}

fn taqueria() -> Entity {
    Entity::Business(Business {
        business_id: "b-taco".into(),
        name: "El Toro".into(),
        city: "Tucson".into(),
        categories: Some("Mexican, Tacos".into()),
        ..Default::default()
    })
}

async fn run(backend: &Arc<RecordingBackend>, instruction: Instruction) -> Result<()> {
    let shared: Arc<dyn Backend> = backend.clone();
    Interpreter::new().bind(&instruction, shared).await
}

// =============================================================================
// Per-kind mapping
// =============================================================================

#[tokio::test]
async fn test_create_user_inserts_fresh_user() {
    let backend = Arc::new(RecordingBackend::default());
    run(&backend, Instruction::CreateUser { name: "user_17".into() })
        .await
        .unwrap();

    let users = backend.inserted(EntityKind::User);
    assert_eq!(users.len(), 1);
    match &users[0] {
        Entity::User(u) => {
            assert_eq!(u.name, "user_17");
            assert_eq!(u.review_count, 0);
            assert_eq!(u.user_id.len(), 36);
            assert!(u.yelping_since.is_some());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_search_business_uses_city_and_category() {
    let backend = Arc::new(RecordingBackend::with(vec![taqueria()]));
    run(
        &backend,
        Instruction::SearchBusiness {
            category: "Tacos".into(),
            city: "Tucson".into(),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        backend.calls(),
        vec![Call::Search(
            EntityKind::Business,
            Criteria::new().equals("city", "Tucson").contains("categories", "Tacos"),
            crate::DEFAULT_SEARCH_LIMIT
        )]
    );
}

#[tokio::test]
async fn test_view_missing_business_succeeds() {
    let backend = Arc::new(RecordingBackend::default());
    run(
        &backend,
        Instruction::ViewBusiness {
            business_id: "nope".into(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        backend.calls(),
        vec![Call::GetById(EntityKind::Business, "nope".into())]
    );
}

#[tokio::test]
async fn test_review_tip_and_checkin_inserts() {
    let backend = Arc::new(RecordingBackend::default());
    run(
        &backend,
        Instruction::PostReview {
            user_id: "u1".into(),
            business_id: "b1".into(),
            stars: 5.0,
            text: "great".into(),
        },
    )
    .await
    .unwrap();
    run(
        &backend,
        Instruction::PostTip {
            user_id: "u1".into(),
            business_id: "b1".into(),
            text: "go early".into(),
        },
    )
    .await
    .unwrap();
    let ts = Utc.with_ymd_and_hms(2020, 6, 1, 12, 30, 0).single().unwrap();
    run(
        &backend,
        Instruction::Checkin {
            business_id: "b1".into(),
            timestamp: ts,
        },
    )
    .await
    .unwrap();

    match &backend.inserted(EntityKind::Review)[0] {
        Entity::Review(r) => {
            assert_eq!((r.user_id.as_str(), r.business_id.as_str()), ("u1", "b1"));
            assert_eq!(r.stars, 5.0);
        }
        other => panic!("unexpected {:?}", other),
    }
    match &backend.inserted(EntityKind::Tip)[0] {
        Entity::Tip(t) => assert_eq!(t.compliment_count, 0),
        other => panic!("unexpected {:?}", other),
    }
    match &backend.inserted(EntityKind::Checkin)[0] {
        Entity::Checkin(c) => assert_eq!(c.date, "2020-06-01 12:30:00"),
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_prefix_search_uses_instruction_limit() {
    let backend = Arc::new(RecordingBackend::default());
    run(
        &backend,
        Instruction::SearchByNamePrefix {
            prefix: "Ann".into(),
            limit: 20,
        },
    )
    .await
    .unwrap();
    assert_eq!(
        backend.calls(),
        vec![Call::Search(
            EntityKind::User,
            Criteria::new().prefix("name", "Ann"),
            20
        )]
    );
}

#[tokio::test]
async fn test_view_photos_filters_by_business() {
    let backend = Arc::new(RecordingBackend::default());
    run(
        &backend,
        Instruction::ViewPhotos {
            business_id: "b9".into(),
        },
    )
    .await
    .unwrap();
    assert!(matches!(
        &backend.calls()[0],
        Call::Search(EntityKind::Photo, c, _) if *c == Criteria::new().equals("business_id", "b9")
    ));
}

// =============================================================================
// Composite flow
// =============================================================================

fn flow(category: &str) -> Instruction {
    Instruction::SubmitReviewFlow {
        name: "user_5".into(),
        category: category.into(),
        city: "Tucson".into(),
        stars: 4.0,
        text: "This is a test review.".into(),
    }
}

#[tokio::test]
async fn test_review_flow_reviews_first_hit_as_new_user() {
    let backend = Arc::new(RecordingBackend::with(vec![taqueria()]));
    run(&backend, flow("Mexican")).await.unwrap();

    let user_id = backend.inserted(EntityKind::User)[0].id().to_string();
    match &backend.inserted(EntityKind::Review)[0] {
        Entity::Review(r) => {
            assert_eq!(r.user_id, user_id);
            assert_eq!(r.business_id, "b-taco");
        }
        other => panic!("unexpected {:?}", other),
    }

    let kinds: Vec<_> = backend
        .calls()
        .into_iter()
        .map(|c| match c {
            Call::Insert(k) => format!("insert {}", k),
            Call::Search(k, _, limit) => format!("search {} {}", k, limit),
            other => format!("{:?}", other),
        })
        .collect();
    assert_eq!(kinds, vec!["insert user", "search business 1", "insert review"]);
}

#[tokio::test]
async fn test_review_flow_without_match_stops_after_search() {
    let backend = Arc::new(RecordingBackend::with(vec![taqueria()]));
    run(&backend, flow("Sushi")).await.unwrap();
    assert!(backend.inserted(EntityKind::Review).is_empty());
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test]
async fn test_backend_failure_propagates() {
    let backend = Arc::new(RecordingBackend {
        fail_inserts: true,
        ..Default::default()
    });
    let err = run(&backend, flow("Mexican")).await.unwrap_err();
    assert!(err.is_backend_failure());
    assert_eq!(backend.calls().len(), 1);
}

// =============================================================================
// Raw binding
// =============================================================================

#[tokio::test]
async fn test_bind_raw_rejects_missing_field_before_any_call() {
    let backend = Arc::new(RecordingBackend::default());
    let shared: Arc<dyn Backend> = backend.clone();
    let raw = RawInstruction::new("ViewBusiness");

    let err = Interpreter::new().bind_raw(&raw, shared.clone()).err().unwrap();
    assert_eq!(err.malformed_field(), Some("business_id"));

    let deferred = Interpreter::new().bind_raw_deferred(&raw, shared);
    assert!(deferred.await.unwrap_err().is_malformed());
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_bind_all_preserves_count() {
    let backend: Arc<dyn Backend> = Arc::new(RecordingBackend::default());
    let instructions = vec![
        Instruction::ViewUser { user_id: "a".into() },
        Instruction::ViewUser { user_id: "b".into() },
    ];
    let units = Interpreter::new().bind_all(&instructions, &backend);
    assert_eq!(units.len(), 2);
    for unit in units {
        unit.await.unwrap();
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_unit_counts() {
    let backend = Arc::new(RecordingBackend::default());
    let shared: Arc<dyn Backend> = backend.clone();

    let corpus = ReferenceCorpus::new(
        vec![BusinessSample {
            business_id: "b1".into(),
            ..Default::default()
        }],
        vec![UserSample {
            user_id: "u1".into(),
            ..Default::default()
        }],
        vec![ReviewSample {
            review_id: "r1".into(),
            ..Default::default()
        }],
    );
    assert_eq!(point_read_units(&corpus, &shared, 10).len(), 5);
    assert_eq!(full_scan_units(&shared).len(), EntityKind::ALL.len());

    let units = insert_units(vec![taqueria(), taqueria()], &shared);
    for unit in units {
        unit.await.unwrap();
    }
    assert_eq!(backend.inserted(EntityKind::Business).len(), 2);
}
