use chrono::{TimeZone, Utc};
use jobtrack::model::{JobApplicationPatch, JobStatus, NewJobApplication};
use jobtrack::store::fs_backend::FsBackend;
use jobtrack::store::RecordStore;
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> RecordStore<FsBackend> {
    let mut store = RecordStore::new(FsBackend::new(dir.path()));
    store.initialize().unwrap();
    store
}

fn application(i: u32) -> NewJobApplication {
    let mut fields = NewJobApplication::new(
        format!("Company {}", i),
        "Engineer",
        Utc.with_ymd_and_hms(2024, 1, 1 + (i % 28), 9, 30, 0).unwrap(),
        JobStatus::ALL[i as usize % JobStatus::ALL.len()],
    );
    if i % 2 == 0 {
        fields.notes = Some(format!("note {}", i));
        fields.salary = Some("$100k".to_string());
    }
    fields
}

#[test]
fn test_session_history_is_reproduced_on_reload() {
    let dir = TempDir::new().unwrap();
    let expected = {
        let mut store = open(&dir);
        let ids: Vec<String> = (0..40).map(|i| store.create(application(i)).unwrap()).collect();
        for id in ids.iter().step_by(3) {
            let patch = JobApplicationPatch {
                location: Some(Some("Berlin".into())),
                ..JobApplicationPatch::status(JobStatus::OfferDeclined)
            };
            store.update(id, &patch).unwrap().unwrap();
        }
        for id in ids.iter().skip(1).step_by(5) {
            assert!(store.delete(id).unwrap());
        }
        store.list_all().to_vec()
    };

    let reopened = open(&dir);
    assert_eq!(reopened.list_all(), expected.as_slice());
}

#[test]
fn test_update_without_company_keeps_company() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let ids: Vec<String> = (0..10).map(|i| store.create(application(i)).unwrap()).collect();

    for id in &ids {
        let before = store.get_by_id(id).unwrap().clone();
        let after = store
            .update(id, &JobApplicationPatch::status(JobStatus::Ghosted))
            .unwrap()
            .unwrap();

        assert_eq!(after.company_name, before.company_name);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert!(after.created_at <= after.updated_at);
    }
}

#[test]
fn test_delete_absent_id_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    store.create(application(1)).unwrap();
    let db = dir.path().join("job-tracker.json");
    let before = fs::read_to_string(&db).unwrap();
    let snapshot = store.list_all().to_vec();

    assert!(!store.delete("not-a-real-id").unwrap());
    assert_eq!(store.list_all(), snapshot.as_slice());
    assert_eq!(fs::read_to_string(&db).unwrap(), before);
}

#[test]
fn test_file_is_a_plain_json_array() {
    let dir = TempDir::new().unwrap();
    let mut store = open(&dir);
    let id = store.create(application(2)).unwrap();

    let raw = fs::read_to_string(dir.path().join("job-tracker.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["id"], id.as_str());
    assert_eq!(array[0]["notes"], "note 2");
    assert!(array[0].get("jobLink").is_none());
}
