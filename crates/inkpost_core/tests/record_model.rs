use inkpost_core::{Author, Post, ValidationError};
use serde_json::json;

#[test]
fn unsaved_records_serialize_without_store_fields() {
    let author = Author::new("Ann").with_phone_number("1234567890");
    let value = serde_json::to_value(&author).unwrap();

    assert_eq!(value, json!({ "name": "Ann", "phone_number": "1234567890" }));
    assert!(!author.is_persisted());
}

#[test]
fn stored_post_roundtrips_through_json() {
    let post = Post {
        id: Some(4),
        created_at: Some(1_700_000_000_000),
        ..Post::new("Guess Again").with_category("Non-Fiction")
    };

    let value = serde_json::to_value(&post).unwrap();
    assert_eq!(value["id"], 4);
    assert_eq!(value["category"], "Non-Fiction");
    assert_eq!(value["content"], serde_json::Value::Null);

    let decoded: Post = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, post);
}

#[test]
fn from_json_keeps_well_typed_values_unchanged() {
    let post = Post::from_json(&json!({
        "title": "Top Picks",
        "content": "body",
        "category": "Fiction"
    }))
    .unwrap();

    assert_eq!(post.title, "Top Picks");
    assert_eq!(post.content.as_deref(), Some("body"));
    assert_eq!(post.summary, None);
    assert_eq!(post.category.as_deref(), Some("Fiction"));
    assert_eq!(post.id, None);
}

#[test]
fn from_json_rejects_wrong_types_with_the_field_error() {
    assert_eq!(
        Post::from_json(&json!({ "title": "Top", "content": 250 })),
        Err(ValidationError::InvalidContent)
    );
    assert_eq!(
        Post::from_json(&json!({ "title": "Top", "summary": ["short"] })),
        Err(ValidationError::InvalidSummary)
    );
    assert_eq!(
        Post::from_json(&json!({ "title": "Top", "category": 1 })),
        Err(ValidationError::InvalidCategory("1".to_string()))
    );
    assert_eq!(
        Post::from_json(&json!({ "content": "no title" })),
        Err(ValidationError::BlankTitle)
    );
    assert_eq!(
        Author::from_json(&json!({ "name": 12 })),
        Err(ValidationError::MissingAuthorName)
    );
    assert_eq!(
        Author::from_json(&json!({ "name": "Ann", "phone_number": 1234567890 })),
        Err(ValidationError::InvalidPhoneNumber)
    );
}

#[test]
fn from_json_does_not_apply_value_rules() {
    let post = Post::from_json(&json!({ "title": "Ordinary title" })).unwrap();
    assert_eq!(post.validate(), Err(ValidationError::MissingTitleMarker));

    let author = Author::from_json(&json!({ "name": "Ann", "phone_number": "12345" })).unwrap();
    let existing: &[Author] = &[];
    assert_eq!(
        author.validate(existing),
        Err(ValidationError::InvalidPhoneNumber)
    );
}

#[test]
fn author_validate_uses_injected_lookup() {
    let existing = vec![Author {
        id: Some(1),
        ..Author::new("Ann")
    }];

    assert_eq!(
        Author::new("Ann").validate(existing.as_slice()),
        Err(ValidationError::AuthorNameTaken("Ann".to_string()))
    );
    assert_eq!(existing[0].validate(existing.as_slice()), Ok(()));
}

#[test]
fn from_json_rejects_explicit_null_values() {
    assert_eq!(
        Post::from_json(&json!({ "title": "Top", "content": null })),
        Err(ValidationError::InvalidContent)
    );
    assert_eq!(
        Post::from_json(&json!({ "title": "Top", "summary": null })),
        Err(ValidationError::InvalidSummary)
    );
    assert_eq!(
        Post::from_json(&json!({ "title": "Top", "category": null })),
        Err(ValidationError::InvalidCategory("null".to_string()))
    );
    assert_eq!(
        Author::from_json(&json!({ "name": "Ann", "phone_number": null })),
        Err(ValidationError::InvalidPhoneNumber)
    );
}

#[test]
fn from_json_leaves_absent_keys_unassigned() {
    let author = Author::from_json(&json!({ "name": "Ann" })).unwrap();
    assert_eq!(author.phone_number, None);

    let post = Post::from_json(&json!({ "title": "Top" })).unwrap();
    assert_eq!(post.content, None);
    assert_eq!(post.summary, None);
    assert_eq!(post.category, None);
}

#[test]
fn records_display_as_compact_labels() {
    let author = Author {
        id: Some(3),
        ..Author::new("Ann").with_phone_number("1234567890")
    };
    assert_eq!(author.to_string(), "Author(id=3, name=Ann)");
    assert_eq!(Author::new("Draft").to_string(), "Author(id=-, name=Draft)");

    let post = Post {
        id: Some(7),
        ..Post::new("Top Picks")
            .with_content("é".repeat(250))
            .with_category("Fiction")
    };
    assert_eq!(
        post.to_string(),
        "Post(id=7, title=Top Picks, category=Fiction, content_chars=250, summary_chars=0)"
    );
}
