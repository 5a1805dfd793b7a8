use actor_framework::{ActorEntity, FrameworkError, Persistence, ResourceActor, StorageError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test Entity: a storage bay with a store-assigned number ---

#[derive(Clone, Debug, PartialEq)]
struct Bay {
    id: u64,
    label: String,
    load: u32,
    capacity: u32,
}

#[derive(Debug)]
struct BayCreate {
    label: String,
    capacity: u32,
}

#[derive(Debug)]
struct BayRename(String);

#[derive(Debug)]
enum BayAction {
    Fill(u32),
    Peek,
}

#[derive(Debug, thiserror::Error)]
#[error("Bay {id} is full: load {load}, capacity {capacity}")]
struct BayFull {
    id: u64,
    load: u32,
    capacity: u32,
}

/// Counts how often a create was rolled back.
type AbortCounter = Arc<AtomicUsize>;

#[async_trait]
impl ActorEntity for Bay {
    type Id = u64;
    type Create = BayCreate;
    type Update = BayRename;
    type Action = BayAction;
    type ActionResult = u32;
    type Context = AbortCounter;
    type Error = BayFull;

    fn id(&self) -> &u64 {
        &self.id
    }

    fn assign_id(_params: &BayCreate, sequence: u64) -> u64 {
        sequence
    }

    fn sequence(&self) -> u64 {
        self.id
    }

    fn from_create_params(id: u64, params: BayCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            label: params.label,
            load: 0,
            capacity: params.capacity,
        })
    }

    fn action_mutates(action: &BayAction) -> bool {
        !matches!(action, BayAction::Peek)
    }

    async fn on_create_aborted(&self, aborts: &AbortCounter) -> Result<(), Self::Error> {
        aborts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn on_update(&mut self, update: BayRename, _ctx: &AbortCounter) -> Result<(), Self::Error> {
        self.label = update.0;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BayAction,
        _ctx: &AbortCounter,
    ) -> Result<u32, Self::Error> {
        match action {
            BayAction::Fill(amount) => {
                if self.load + amount > self.capacity {
                    return Err(BayFull {
                        id: self.id,
                        load: self.load,
                        capacity: self.capacity,
                    });
                }
                self.load += amount;
                Ok(self.load)
            }
            BayAction::Peek => Ok(self.load),
        }
    }
}

// --- Test Entity: a zone keyed by the caller ---

#[derive(Clone, Debug, PartialEq)]
struct Zone {
    code: String,
    name: String,
}

#[derive(Debug)]
struct ZoneCreate {
    code: String,
    name: String,
}

#[derive(Debug, thiserror::Error)]
#[error("zone error")]
struct ZoneError;

#[async_trait]
impl ActorEntity for Zone {
    type Id = String;
    type Create = ZoneCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ZoneError;

    fn id(&self) -> &String {
        &self.code
    }

    fn assign_id(params: &ZoneCreate, _sequence: u64) -> String {
        params.code.clone()
    }

    fn from_create_params(code: String, params: ZoneCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            code,
            name: params.name,
        })
    }

    async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

// --- Test Persistence: an in-memory journal that can be told to fail ---

#[derive(Clone, Default)]
struct Journal {
    rows: Arc<Mutex<Vec<Bay>>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
    /// Milliseconds every write takes.
    latency_ms: Arc<AtomicU64>,
}

impl Journal {
    fn check(&self, context: &str) -> Result<(), StorageError> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            std::thread::sleep(Duration::from_millis(latency));
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::new(context, "disk unplugged"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Persistence<Bay> for Journal {
    fn load(&mut self) -> Result<Vec<Bay>, StorageError> {
        Ok(self.rows.lock().clone())
    }

    fn insert(&mut self, item: &Bay) -> Result<(), StorageError> {
        self.check("insert bay")?;
        self.rows.lock().push(item.clone());
        Ok(())
    }

    fn update(&mut self, item: &Bay) -> Result<(), StorageError> {
        self.check("update bay")?;
        let mut rows = self.rows.lock();
        if let Some(row) = rows.iter_mut().find(|row| row.id == item.id) {
            *row = item.clone();
        }
        Ok(())
    }

    fn remove(&mut self, id: &u64) -> Result<(), StorageError> {
        self.check("remove bay")?;
        self.rows.lock().retain(|row| row.id != *id);
        Ok(())
    }
}

fn bay(label: &str, capacity: u32) -> BayCreate {
    BayCreate {
        label: label.to_string(),
        capacity,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bay>::new(10);
    tokio::spawn(actor.run(AbortCounter::default()));

    // 1. Create
    let created = client.create(bay("A1", 10)).await.unwrap();
    assert_eq!(created.id, 1); // First ID should be 1

    // 2. Action
    let load = client.perform_action(1, BayAction::Fill(4)).await.unwrap();
    assert_eq!(load, 4);

    // A failing action leaves the entity as it was
    let overflow = client.perform_action(1, BayAction::Fill(7)).await;
    let err = overflow.unwrap_err().into_entity_error::<BayFull>().unwrap();
    assert_eq!(err.load, 4);
    assert_eq!(client.get(1).await.unwrap().unwrap().load, 4);

    // 3. Update
    let renamed = client.update(1, BayRename("A1-north".into())).await.unwrap();
    assert_eq!(renamed.label, "A1-north");

    // 4. List keeps insertion order
    client.create(bay("B2", 5)).await.unwrap();
    let labels: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.label)
        .collect();
    assert_eq!(labels, vec!["A1-north", "B2"]);

    // 5. Delete
    client.delete(1).await.unwrap();
    assert!(client.get(1).await.unwrap().is_none());
    assert!(matches!(
        client.delete(1).await,
        Err(FrameworkError::NotFound(id)) if id == "1"
    ));
}

#[tokio::test]
async fn test_empty_actor_lists_nothing() {
    let (actor, client) = ResourceActor::<Zone>::new(4);
    tokio::spawn(actor.run(()));

    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_natural_key_is_rejected() {
    let (actor, client) = ResourceActor::<Zone>::new(4);
    tokio::spawn(actor.run(()));

    client
        .create(ZoneCreate {
            code: "cold".into(),
            name: "Cold storage".into(),
        })
        .await
        .unwrap();

    let second = client
        .create(ZoneCreate {
            code: "cold".into(),
            name: "Overwritten".into(),
        })
        .await;
    assert!(matches!(second, Err(FrameworkError::DuplicateKey(id)) if id == "cold"));

    let kept = client.get("cold".to_string()).await.unwrap().unwrap();
    assert_eq!(kept.name, "Cold storage");
}

#[tokio::test]
async fn test_persisted_entities_are_reloaded_and_sequence_resumes() {
    let journal = Journal::default();

    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();
    let handle = tokio::spawn(actor.run(AbortCounter::default()));
    client.create(bay("A1", 10)).await.unwrap();
    client.create(bay("A2", 10)).await.unwrap();
    client.perform_action(2, BayAction::Fill(3)).await.unwrap();
    drop(client);
    handle.await.unwrap();

    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();
    assert_eq!(actor.len(), 2);
    tokio::spawn(actor.run(AbortCounter::default()));

    assert_eq!(client.get(2).await.unwrap().unwrap().load, 3);
    let third = client.create(bay("A3", 10)).await.unwrap();
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn test_read_only_action_skips_durable_write() {
    let journal = Journal::default();
    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();
    tokio::spawn(actor.run(AbortCounter::default()));

    client.create(bay("A1", 10)).await.unwrap();
    let writes_after_create = journal.writes.load(Ordering::SeqCst);

    client.perform_action(1, BayAction::Peek).await.unwrap();
    assert_eq!(journal.writes.load(Ordering::SeqCst), writes_after_create);
}

#[tokio::test]
async fn test_failed_write_leaves_state_untouched() {
    let journal = Journal::default();
    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();
    tokio::spawn(actor.run(AbortCounter::default()));

    client.create(bay("A1", 10)).await.unwrap();
    journal.failing.store(true, Ordering::SeqCst);

    let fill = client.perform_action(1, BayAction::Fill(5)).await;
    assert!(matches!(fill, Err(FrameworkError::Storage(_))));

    let rename = client.update(1, BayRename("lost".into())).await;
    assert!(matches!(rename, Err(FrameworkError::Storage(_))));

    let current = client.get(1).await.unwrap().unwrap();
    assert_eq!(current.load, 0);
    assert_eq!(current.label, "A1");
}

#[tokio::test]
async fn test_failed_insert_runs_abort_hook() {
    let journal = Journal::default();
    journal.failing.store(true, Ordering::SeqCst);
    let aborts = AbortCounter::default();

    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();
    tokio::spawn(actor.run(aborts.clone()));

    let result = client.create(bay("A1", 10)).await;
    match result {
        Err(FrameworkError::Storage(e)) => assert_eq!(e.context(), "insert bay"),
        other => panic!("expected storage failure, got {other:?}"),
    }
    assert_eq!(aborts.load(Ordering::SeqCst), 1);
    assert!(client.list().await.unwrap().is_empty());

    // The rejected create did not use up a number
    journal.failing.store(false, Ordering::SeqCst);
    let stored = client.create(bay("A1", 10)).await.unwrap();
    assert_eq!(stored.id, 1);
}

#[tokio::test]
async fn test_create_queued_past_its_deadline_is_abandoned() {
    let journal = Journal::default();
    let aborts = AbortCounter::default();
    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();

    // Queue the request while nothing is serving the channel yet
    let late = client.clone().with_timeout(Duration::from_millis(50));
    let pending = tokio::spawn(async move { late.create(bay("late", 10)).await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    tokio::spawn(actor.run(aborts.clone()));

    let result = pending.await.unwrap();
    assert!(matches!(result, Err(FrameworkError::Timeout)));
    assert_eq!(journal.writes.load(Ordering::SeqCst), 0);
    // on_create never ran, so there is nothing to undo
    assert_eq!(aborts.load(Ordering::SeqCst), 0);
    assert!(client.list().await.unwrap().is_empty());

    let next = client.create(bay("A1", 10)).await.unwrap();
    assert_eq!(next.id, 1);
}

#[tokio::test]
async fn test_slow_write_past_deadline_reports_the_stored_entity() {
    let journal = Journal::default();
    journal.latency_ms.store(200, Ordering::SeqCst);
    let (actor, client) = ResourceActor::<Bay>::with_persistence(4, Box::new(journal.clone())).unwrap();
    tokio::spawn(actor.run(AbortCounter::default()));

    let hurried = client.clone().with_timeout(Duration::from_millis(50));
    let created = hurried.create(bay("A1", 10)).await.unwrap();
    assert_eq!(created.id, 1);

    journal.latency_ms.store(0, Ordering::SeqCst);
    assert_eq!(client.list().await.unwrap(), vec![created]);
    assert_eq!(journal.rows.lock().len(), 1);
}

#[tokio::test]
async fn test_client_deadline() {
    // The actor is never run, so nothing answers.
    let (_actor, client) = ResourceActor::<Zone>::new(4);
    let client = client.with_timeout(Duration::from_millis(50));

    let result = client.get("dry".to_string()).await;
    assert!(matches!(result, Err(FrameworkError::Timeout)));
}

#[tokio::test]
async fn test_closed_actor() {
    let (actor, client) = ResourceActor::<Zone>::new(4);
    drop(actor);

    let result = client.list().await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
