//! End-to-end CRUD through the store abstraction

use dojo_roster::model::{Group, Member};
use dojo_roster::repo::{sample_groups, sample_members, MemoryStore, RosterStore};

#[tokio::test]
async fn member_lifecycle() {
    let store = MemoryStore::new(sample_members());

    let added = store
        .add(Member {
            id: String::new(),
            name: "Fiona Grant".to_string(),
            age: 17,
            belt: "Orange".to_string(),
            group: "Juniors".to_string(),
            phone: "+1 555 0106".to_string(),
            email: "fiona@example.com".to_string(),
            join_date: "2025-08-01".to_string(),
        })
        .await
        .unwrap();
    assert!(!added.id.is_empty());

    let members = store.list().await.unwrap();
    assert_eq!(members.len(), 6);

    // Fetching by the generated id returns the same field values.
    let fetched = store.get(&added.id).await.unwrap().unwrap();
    assert_eq!(fetched, added);

    let mut promoted = fetched.clone();
    promoted.belt = "Green".to_string();
    store.update(promoted).await.unwrap();
    assert_eq!(
        store.get(&added.id).await.unwrap().unwrap().belt,
        "Green"
    );

    store.delete(&added.id).await.unwrap();
    assert!(store.get(&added.id).await.unwrap().is_none());
    assert_eq!(store.list().await.unwrap().len(), 5);
}

#[tokio::test]
async fn group_lifecycle() {
    let store = MemoryStore::new(Vec::<Group>::new());
    assert!(store.list().await.unwrap().is_empty());

    for group in sample_groups() {
        store.add(group).await.unwrap();
    }
    assert_eq!(store.list().await.unwrap().len(), 3);

    let juniors = store.get("2").await.unwrap().unwrap();
    assert_eq!(juniors.name, "Juniors");

    let mut bigger = juniors.clone();
    bigger.max_capacity = 18;
    store.update(bigger).await.unwrap();
    assert_eq!(store.get("2").await.unwrap().unwrap().max_capacity, 18);

    store.delete("1").await.unwrap();
    let names: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Juniors", "Adults"]);
}
