//! Integration tests driving the editor through the file-backed adapters.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use reqtab_application::{DropTarget, Editor, EditorPorts};
use reqtab_domain::{CellField, EditorSettings, ResponseStatus, TableKind};
use reqtab_infrastructure::{
    ArboardClipboard, JsonFileCollectionStore, StaticPrompt, SystemClock, TracingNotifier,
};
use tempfile::tempdir;

fn editor(file: &Path) -> Editor {
    let ports = EditorPorts {
        store: Arc::new(JsonFileCollectionStore::new(file)),
        notifier: Arc::new(TracingNotifier::new()),
        clipboard: Arc::new(ArboardClipboard::new()),
        prompt: Arc::new(StaticPrompt(true)),
        clock: Arc::new(SystemClock::new()),
    };
    Editor::new(EditorSettings::default(), ports)
}

#[test]
fn test_session_survives_reload() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let file = temp_dir.path().join("data/collections.json");

    let mut first = editor(&file);
    first.load().unwrap();
    let collection_id = first.create_collection();
    let request_id = first.create_request(&collection_id).unwrap();
    first.edit_cell(TableKind::Params, 0, CellField::Key, "page").unwrap();
    first.edit_cell(TableKind::Params, 0, CellField::Value, "2").unwrap();
    first.edit_cell(TableKind::Params, 1, CellField::Key, "size").unwrap();
    first.start_drag(TableKind::Params, 1).unwrap();
    first
        .drop_within_table(DropTarget {
            kind: TableKind::Params,
            index: 0,
            same_container: true,
        })
        .unwrap();
    first.end_drag();
    first.record_response("{\"ok\":true}", ResponseStatus::Success).unwrap();
    assert!(first.is_saved(&request_id));

    let mut second = editor(&file);
    assert_eq!(second.load().unwrap(), 1);
    second.activate(&collection_id, &request_id).unwrap();
    let request = second.active_request().unwrap();
    assert_eq!(request.table(TableKind::Params).keys(), vec!["size", "page", ""]);
    assert_eq!(request.params[1].value, "2");
    assert_eq!(request.responses.len(), 1);
    assert!(request.is_settled());
}

#[test]
fn test_confirmed_delete_is_persisted() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let file = temp_dir.path().join("collections.json");

    let mut first = editor(&file);
    first.load().unwrap();
    first.create_collection();
    first.create_collection();
    assert!(first.delete_collection(0).unwrap());

    let mut second = editor(&file);
    assert_eq!(second.load().unwrap(), 1);
    assert_eq!(second.collections()[0].title, "New collection 2");
}

#[test]
fn test_copy_survives_headless_clipboard() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let file = temp_dir.path().join("collections.json");

    let mut session = editor(&file);
    session.load().unwrap();
    let collection_id = session.create_collection();
    session.create_request(&collection_id).unwrap();
    session.toggle_selection(TableKind::Headers, 0).unwrap();

    assert_eq!(session.copy_rows(TableKind::Headers).unwrap(), 1);
    assert!(session.clipboard().has_data());
    assert_eq!(session.paste_rows(TableKind::Params).unwrap(), 1);
    assert_eq!(
        session.active_request().unwrap().table(TableKind::Params).keys(),
        vec!["Accept", ""]
    );
}
