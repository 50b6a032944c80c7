use super::*;
use crate::api::{Fixture, InMemoryApi};
use crate::config::StoreConfig;

fn api() -> Arc<dyn LearningApi> {
    Arc::new(InMemoryApi::new(Fixture::default()))
}

#[test]
fn defaults_cover_every_slice() {
    let defaults = default_slices().unwrap();
    let keys: Vec<&str> = defaults.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 13);
    for key in ["auth", "courses", "lesson", "flashcards", "adminUsers", "adminFlashcardSets"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(defaults["lesson"]["loading"], Value::Bool(true));
}

#[test]
fn defaults_never_expose_auth_token() {
    let defaults = default_slices().unwrap();
    assert!(defaults["auth"].get("token").is_none());
}

#[test]
fn install_all_injects_every_slice_once() {
    let store = Store::new(StoreConfig::default());
    install_all(&store, api()).unwrap();
    let installed = store.state();
    assert_eq!(installed.len(), 13);
    assert!(store.has_effect("courses"));
    assert!(!store.has_effect("writing"));

    install_all(&store, api()).unwrap();
    assert!(store.state().ptr_eq(&installed));
}
