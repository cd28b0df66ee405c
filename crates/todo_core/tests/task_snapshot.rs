use todo_core::{
    InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore, Task, TaskRepository,
    DEFAULT_TASKS_KEY, DEFAULT_TASKS_NAMESPACE,
};

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(3, "Groceries", "milk\neggs\nbread"),
        Task::new(1, "Call mom", "Sunday").toggled_completion(),
        Task::new(2, "Ship release", "tag v0.1").toggled_favourite(),
        Task::new(2, "Ship release", "duplicate id is stored as-is")
            .toggled_completion()
            .toggled_favourite(),
    ]
}

#[test]
fn first_run_loads_empty_collection() {
    let repo = TaskRepository::new(SqliteKeyValueStore::open_in_memory().unwrap());
    assert_eq!(repo.load_tasks().unwrap(), Vec::<Task>::new());
}

#[test]
fn save_then_load_preserves_order_and_fields() {
    let mut repo = TaskRepository::new(SqliteKeyValueStore::open_in_memory().unwrap());
    let tasks = sample_tasks();

    repo.load_tasks().unwrap();
    repo.save_tasks(&tasks).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), tasks);
}

#[test]
fn save_overwrites_previous_snapshot_entirely() {
    let mut repo = TaskRepository::new(InMemoryKeyValueStore::new());
    repo.save_tasks(&sample_tasks()).unwrap();
    repo.save_tasks(&[Task::new(9, "only", "one")]).unwrap();

    assert_eq!(repo.load_tasks().unwrap(), vec![Task::new(9, "only", "one")]);

    repo.save_tasks(&[]).unwrap();
    assert!(repo.load_tasks().unwrap().is_empty());
    assert_eq!(
        repo.store()
            .get(DEFAULT_TASKS_NAMESPACE, DEFAULT_TASKS_KEY)
            .unwrap()
            .as_deref(),
        Some("[]")
    );
}

#[test]
fn snapshot_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");
    let tasks = sample_tasks();

    {
        let mut repo = TaskRepository::new(SqliteKeyValueStore::open(&path).unwrap());
        repo.save_tasks(&tasks).unwrap();
    }

    let repo = TaskRepository::new(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(repo.load_tasks().unwrap(), tasks);
}

#[test]
fn loads_snapshot_written_with_legacy_field_names() {
    let mut store = InMemoryKeyValueStore::new();
    store
        .put(
            DEFAULT_TASKS_NAMESPACE,
            DEFAULT_TASKS_KEY,
            r#"[{"id":1,"title":"A","description":"d1","isCompleted":true,"isFavourite":false},
                {"id":2,"title":"B","description":"d2"}]"#,
        )
        .unwrap();
    let repo = TaskRepository::new(store);

    let loaded = repo.load_tasks().unwrap();
    assert_eq!(
        loaded,
        vec![
            Task::new(1, "A", "d1").toggled_completion(),
            Task::new(2, "B", "d2"),
        ]
    );
}

#[test]
fn custom_slot_does_not_touch_default_slot() {
    let mut repo = TaskRepository::with_slot(InMemoryKeyValueStore::new(), "Other", "k");
    repo.save_tasks(&[Task::new(1, "A", "d1")]).unwrap();

    assert!(repo
        .store()
        .get(DEFAULT_TASKS_NAMESPACE, DEFAULT_TASKS_KEY)
        .unwrap()
        .is_none());
    assert!(repo.store().get("Other", "k").unwrap().is_some());
}
