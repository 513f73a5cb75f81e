mod common;

use common::{Fault, FaultyStore, Seed};
use llmnote_core::{LoadError, LoadStage, ProjectDetailLoader};
use uuid::Uuid;

#[tokio::test]
async fn tags_are_joined_per_note_in_name_order() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let t1 = seed.tag("alpha");
    let t2 = seed.tag("beta");
    let t3 = seed.tag("gamma");
    let n1 = seed.note(project, 1, 1);
    seed.link(n1, t3);
    seed.link(n1, t1);
    let store = seed.into_store();

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap();

    let tag_ids: Vec<_> = detail.notes[0].tags.iter().map(|tag| tag.id).collect();
    assert_eq!(tag_ids, vec![t1, t3]);
    assert!(!tag_ids.contains(&t2));
    let catalog: Vec<_> = detail.tags.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(catalog, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn notes_are_ordered_by_update_time_with_refs_inline() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let other = seed.project("other", 1, false);
    let source = seed.source("claude");
    let topic = seed.topic("design");
    let stale = seed.note(project, 1, 10);
    let fresh = seed.note_with_refs(project, 2, 30, Some(source), Some(topic));
    let middle = seed.note(project, 3, 20);
    seed.note(other, 4, 40);
    let store = seed.into_store();

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap();

    let ids: Vec<_> = detail.notes.iter().map(|note| note.id()).collect();
    assert_eq!(ids, vec![fresh, middle, stale]);
    assert_eq!(detail.project.id, project);
    let first = &detail.notes[0].note;
    assert_eq!(first.source.as_ref().map(|s| s.id), Some(source));
    assert_eq!(first.topic.as_ref().map(|t| t.name.as_str()), Some("design"));
    assert!(detail.notes[1].tags.is_empty());
}

#[tokio::test]
async fn catalogs_are_sorted_by_name() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    seed.source("gpt");
    seed.source("claude");
    seed.topic("testing");
    seed.topic("async");
    let store = seed.into_store();

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap();

    let sources: Vec<_> = detail.sources.iter().map(|s| s.name.as_str()).collect();
    let topics: Vec<_> = detail.topics.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(sources, vec!["claude", "gpt"]);
    assert_eq!(topics, vec!["async", "testing"]);
}

#[tokio::test]
async fn duplicate_and_dangling_links_are_tolerated() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let tag = seed.tag("work");
    let note = seed.note(project, 1, 1);
    seed.link(note, tag);
    seed.link(note, tag);
    seed.link(note, Uuid::new_v4());
    let store = seed.into_store();

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap();

    let tag_ids: Vec<_> = detail.notes[0].tags.iter().map(|tag| tag.id).collect();
    assert_eq!(tag_ids, vec![tag]);
}

#[tokio::test]
async fn project_without_notes_still_queries_junction_with_empty_set() {
    let seed = Seed::new();
    let project = seed.project("empty", 1, false);
    seed.tag("unused");
    let store = FaultyStore::new(seed.into_store(), &[]);

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap();

    assert!(detail.notes.is_empty());
    assert_eq!(detail.tags.len(), 1);
    assert_eq!(store.note_tag_requests(), vec![0]);
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let seed = Seed::new();
    seed.project("p", 1, false);
    let store = FaultyStore::new(seed.into_store(), &[]);

    let err = ProjectDetailLoader::new(&store)
        .load_project_detail(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::NotFound { source: None }));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.user_message(), "Project not found");
    assert!(store.note_tag_requests().is_empty());
}

#[tokio::test]
async fn malformed_project_id_is_not_found() {
    let store = Seed::new().into_store();

    let err = ProjectDetailLoader::new(&store)
        .load_project_detail_str("not-a-uuid")
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[tokio::test]
async fn route_parameter_entry_point_loads_project() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let store = seed.into_store();

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail_str(&project.to_string())
        .await
        .unwrap();

    assert_eq!(detail.project.title, "p");
}

#[tokio::test]
async fn project_fetch_error_is_reported_as_not_found() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let store = FaultyStore::new(seed.into_store(), &[Fault::ProjectFetch]);

    let err = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::NotFound { source: Some(_) }));
    assert_eq!(err.error_code(), "project_fetch_failed");
    assert!(err.diagnostic().contains("injected ProjectFetch"));
    assert!(!err.user_message().contains("injected"));
}

#[tokio::test]
async fn each_failing_fetch_reports_its_stage() {
    let cases = [
        (Fault::Notes, LoadStage::Notes, "Failed to load notes"),
        (Fault::Sources, LoadStage::Sources, "Failed to load LLM sources"),
        (Fault::Topics, LoadStage::Topics, "Failed to load topics"),
        (Fault::Tags, LoadStage::Tags, "Failed to load tags"),
        (Fault::NoteTags, LoadStage::NoteTags, "Failed to load note tags"),
    ];

    for (fault, stage, message) in cases {
        let seed = Seed::new();
        let project = seed.project("p", 1, false);
        let note = seed.note(project, 1, 1);
        seed.link(note, seed.tag("t"));
        let store = FaultyStore::new(seed.into_store(), &[fault]);

        let err = ProjectDetailLoader::new(&store)
            .load_project_detail(project)
            .await
            .unwrap_err();

        assert_eq!(err.stage(), Some(stage), "fault {fault:?}");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.user_message(), message);
    }
}

#[tokio::test]
async fn earliest_stage_wins_when_several_fetches_fail() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let store = FaultyStore::new(
        seed.into_store(),
        &[Fault::NoteTags, Fault::Tags, Fault::Sources],
    );

    let err = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(LoadStage::Sources));
    // The junction fetch was still issued and allowed to finish.
    assert_eq!(store.note_tag_requests(), vec![0]);
}

#[tokio::test]
async fn repeated_loads_are_identical() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let a = seed.tag("a");
    let b = seed.tag("b");
    for idx in 0..5 {
        let note = seed.note(project, idx, 100);
        seed.link(note, if idx % 2 == 0 { a } else { b });
    }
    let store = seed.into_store();
    let loader = ProjectDetailLoader::new(&store);

    let first = loader.load_project_detail(project).await.unwrap();
    let second = loader.load_project_detail(project).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.notes.len(), 5);
}

#[tokio::test]
async fn detail_serializes_ui_shape() {
    let seed = Seed::new();
    let project = seed.project("p", 1, false);
    let source = seed.source("claude");
    let note = seed.note_with_refs(project, 1, 1, Some(source), None);
    seed.link(note, seed.tag("idea"));
    let store = seed.into_store();

    let detail = ProjectDetailLoader::new(&store)
        .load_project_detail(project)
        .await
        .unwrap();
    let json = serde_json::to_value(&detail).unwrap();

    assert_eq!(json["project"]["title"], "p");
    assert_eq!(json["llmSources"][0]["name"], "claude");
    assert_eq!(json["notes"][0]["llm_sources"]["name"], "claude");
    assert!(json["notes"][0]["topics"].is_null());
    assert_eq!(json["notes"][0]["tags"][0]["name"], "idea");
}
