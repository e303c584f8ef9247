//! End-to-end itinerary generation and history against an in-memory store.

use std::sync::Arc;

use mock_generator::{FailingGenerator, ScriptedGenerator};
use planner::{
    ConversationStore, ItineraryGenerator, ItineraryHistory, ItineraryStore, SqliteStore,
    DEFAULT_HISTORY_LIMIT,
};
use planner_core::{Interest, Pace, Role, TripRequest};
use planner_database::{itinerary, Database};

async fn test_store() -> Arc<SqliteStore> {
    let db = Database::connect_with_pool_size("sqlite::memory:", 1)
        .await
        .unwrap();
    db.migrate().await.unwrap();
    Arc::new(SqliteStore::new(db))
}

fn da_nang() -> TripRequest {
    TripRequest {
        origin: "Hanoi".to_string(),
        destination: "Da Nang, Vietnam".to_string(),
        start_date: "2024-03-01".to_string(),
        end_date: "2024-03-03".to_string(),
        interests: vec![Interest::Food, Interest::Nature],
        pace: Pace::Normal,
    }
}

#[tokio::test]
async fn test_generates_and_stores_one_itinerary() {
    let store = test_store().await;
    let scripted = Arc::new(ScriptedGenerator::new("## Day 1\n### Morning\n- Beach walk"));
    let generator = ItineraryGenerator::new(scripted.clone(), store.clone());

    let outcome = generator.generate_itinerary(&da_nang(), "traveler").await;

    assert!(outcome.is_generated());
    assert!(outcome.saved_id.is_some());
    assert_eq!(outcome.display_text(), "## Day 1\n### Morning\n- Beach walk");

    // Exactly one call with a system and a user message
    let calls = scripted.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0][0].role, Role::System);
    assert_eq!(calls[0][1].role, Role::User);
    assert!(calls[0][0].content.contains("3-day itinerary"));
    assert!(calls[0][0].content.contains("- Interests: Food, Nature"));
    assert!(calls[0][1]
        .content
        .contains("from Hanoi to Da Nang, Vietnam from 2024-03-01 to 2024-03-03"));

    let records = store.load_itinerary_history("traveler", 5).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].role, "assistant");
    assert_eq!(records[0].content, "## Day 1\n### Morning\n- Beach walk");
}

#[tokio::test]
async fn test_generation_failure_stores_nothing() {
    let store = test_store().await;
    let failing = Arc::new(FailingGenerator::network("connection refused"));
    let generator = ItineraryGenerator::new(failing.clone(), store.clone())
        .with_conversation_log(store.clone());

    let outcome = generator.generate_itinerary(&da_nang(), "traveler").await;

    assert!(!outcome.is_generated());
    assert!(outcome.saved_id.is_none());
    assert!(outcome.display_text().starts_with("[LLM error]"));
    assert_eq!(failing.attempts(), 1);

    let count = itinerary::count_itineraries(store.database().pool(), "traveler")
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert!(store.load_last_messages("traveler", 8).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_failure_keeps_text_and_warns() {
    let store = test_store().await;
    store.database().close().await;

    let generator = ItineraryGenerator::new(Arc::new(ScriptedGenerator::new("## Day 1")), store);
    let outcome = generator.generate_itinerary(&da_nang(), "traveler").await;

    assert!(outcome.is_generated());
    assert!(outcome.saved_id.is_none());
    assert!(outcome.save_error.is_some());

    let text = outcome.display_text();
    assert!(text.starts_with("## Day 1\n\n"));
    assert!(text.contains("[Warning: failed to save itinerary: "));
}

#[tokio::test]
async fn test_conversation_log_records_turns() {
    let store = test_store().await;
    let generator = ItineraryGenerator::new(Arc::new(ScriptedGenerator::new("## Day 1")), store.clone())
        .with_conversation_log(store.clone());

    generator.generate_itinerary(&da_nang(), "traveler").await;

    let messages = store.load_last_messages("traveler", 8).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert!(messages[0].content.starts_with("Generate a 3-day itinerary"));
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "## Day 1");
}

#[tokio::test]
async fn test_unparsable_dates_still_generate() {
    let store = test_store().await;
    let scripted = Arc::new(ScriptedGenerator::new("## Day 1"));
    let generator = ItineraryGenerator::new(scripted.clone(), store);

    let mut request = da_nang();
    request.start_date = "March 1st".to_string();

    let outcome = generator.generate_itinerary(&request, "traveler").await;
    assert!(outcome.is_generated());

    let calls = scripted.calls().await;
    assert!(calls[0][0].content.contains("N/A-day itinerary"));
}

#[tokio::test]
async fn test_history_newest_first_with_limit() {
    let store = test_store().await;
    for n in 1..=7 {
        store
            .save_itinerary("traveler", &format!("itinerary {}", n))
            .await
            .unwrap();
    }

    let history = ItineraryHistory::new(store);
    let view = history
        .load_itinerary_history("traveler", DEFAULT_HISTORY_LIMIT)
        .await;

    assert!(view.warning.is_none());
    assert_eq!(view.entries.len(), 5);
    assert_eq!(view.entries[0].content, "itinerary 7");
    assert_eq!(view.entries[4].content, "itinerary 3");
    assert!(!view.entries[0].created_label.is_empty());
}

#[tokio::test]
async fn test_history_returns_fewer_than_limit() {
    let store = test_store().await;
    store.save_itinerary("traveler", "one").await.unwrap();
    store.save_itinerary("traveler", "two").await.unwrap();

    let view = ItineraryHistory::new(store)
        .load_itinerary_history("traveler", 5)
        .await;

    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[0].content, "two");
}

#[tokio::test]
async fn test_history_is_per_user() {
    let store = test_store().await;
    store.save_itinerary("alice", "alice trip").await.unwrap();
    store.save_itinerary("bob", "bob trip").await.unwrap();

    let history = ItineraryHistory::new(store);
    let alice = history.load_itinerary_history("alice", 5).await;
    let carol = history.load_itinerary_history("carol", 5).await;

    assert_eq!(alice.entries.len(), 1);
    assert_eq!(alice.entries[0].content, "alice trip");
    assert!(carol.is_empty());
    assert!(carol.warning.is_none());
}

#[tokio::test]
async fn test_history_read_failure_is_a_warning() {
    let store = test_store().await;
    store.save_itinerary("traveler", "one").await.unwrap();
    store.database().close().await;

    let view = ItineraryHistory::new(store)
        .load_itinerary_history("traveler", 5)
        .await;

    assert!(view.is_empty());
    let warning = view.warning.unwrap();
    assert!(warning.starts_with("Failed to load history: "));
}
