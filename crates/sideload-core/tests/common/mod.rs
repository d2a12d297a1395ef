use serde_json::{json, Value};
use sideload_core::AssociationDescriptor;

/// Associations of the `post` fixture type
#[allow(dead_code)]
pub fn post_associations() -> Vec<AssociationDescriptor> {
    vec![
        AssociationDescriptor::to_one("author", "user"),
        AssociationDescriptor::to_many("tags", "tag"),
        AssociationDescriptor::to_many("comments", "comment").with_via("post"),
    ]
}

/// A post with an author, two tags and one comment, all embedded
#[allow(dead_code)]
pub fn post(id: u64, author_id: u64, tag_ids: &[u64]) -> Value {
    json!({
        "id": id,
        "title": format!("Post {}", id),
        "author": { "id": author_id, "name": format!("user-{}", author_id) },
        "tags": tag_ids
            .iter()
            .map(|t| json!({ "id": t, "name": format!("tag-{}", t) }))
            .collect::<Vec<_>>(),
        "comments": [{ "id": id * 100, "body": "first!" }],
    })
}

/// Ids found in a side-loaded bucket, in document order
#[allow(dead_code)]
pub fn ids(entities: &[Value]) -> Vec<Value> {
    entities.iter().map(|e| e["id"].clone()).collect()
}
