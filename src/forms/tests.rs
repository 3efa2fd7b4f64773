//! Tests for the forms module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
}

impl FormModel for Profile {
    const COLLECTION: &'static str = "profiles";

    fn field_names() -> &'static [&'static str] {
        &["name", "age"]
    }
}

fn form_data(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

// ============================================================================
// Create Tests
// ============================================================================

#[test]
fn test_build_new_instance_filters_undeclared_fields() {
    let data = form_data(json!({"name": "x", "age": 3, "extra": "y"}));
    let form = ModelForm::<Profile>::bind(data, None);

    assert!(!form.is_update());
    let profile = form.build().unwrap();
    assert_eq!(
        profile,
        Profile {
            name: "x".to_string(),
            age: 3
        }
    );
}

#[test]
fn test_build_fails_on_incomplete_data() {
    let data = form_data(json!({"name": "x"}));
    let err = ModelForm::<Profile>::bind(data, None).build().unwrap_err();
    assert!(matches!(err, Error::Form { .. }));
}

// ============================================================================
// Update Tests
// ============================================================================

#[test]
fn test_build_updates_existing_instance() {
    let existing = Profile {
        name: "before".to_string(),
        age: 30,
    };
    let data = form_data(json!({"name": "after", "extra": "ignored"}));
    let form = ModelForm::bind(data, Some(existing));

    assert!(form.is_update());
    let profile = form.build().unwrap();
    assert_eq!(profile.name, "after");
    // fields absent from the form data keep their value
    assert_eq!(profile.age, 30);
}

// ============================================================================
// Save Tests
// ============================================================================

#[tokio::test]
async fn test_save_without_commit_returns_unsaved_instance() {
    // a lazy driver client gives us a Database without any I/O
    let options = mongodb::options::ClientOptions::builder()
        .hosts(vec![mongodb::options::ServerAddress::Tcp {
            host: "localhost".to_string(),
            port: None,
        }])
        .build();
    let client = mongodb::Client::with_options(options).unwrap();
    let database = client.database("test");

    let data = form_data(json!({"name": "x", "age": 3}));
    let profile = ModelForm::<Profile>::bind(data, None)
        .save(&database, false)
        .await
        .unwrap();

    assert_eq!(profile.name, "x");
    assert_eq!(profile.age, 3);
}
