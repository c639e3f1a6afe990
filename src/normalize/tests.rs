use super::*;
use salesdesk_shared::{Sale, Seller, User};
use serde_json::json;

fn ana() -> SessionUser {
    SessionUser {
        id: 1,
        name: "Ana".into(),
        email: "ana@example.com".into(),
    }
}

// =========================================================
// normalize_auth
// =========================================================

#[test]
fn auth_top_level_access_token() {
    let raw = json!({
        "access_token": "jwt-1",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": { "id": 1, "name": "Ana", "email": "ana@example.com" }
    });
    assert_eq!(
        normalize_auth(raw),
        AuthShape::Recognized {
            token: "jwt-1".into(),
            user: Some(ana())
        }
    );
}

#[test]
fn auth_top_level_token_field() {
    let raw = json!({ "token": "jwt-2", "user": { "id": "1", "name": "Ana", "email": "ana@example.com" } });
    assert_eq!(
        normalize_auth(raw),
        AuthShape::Recognized {
            token: "jwt-2".into(),
            user: Some(ana())
        }
    );
}

#[test]
fn auth_nested_under_data() {
    let raw = json!({
        "status": "success",
        "message": "Usuário registrado",
        "data": { "token": "jwt-3", "token_type": "bearer", "expires_in": 3600 }
    });
    assert_eq!(
        normalize_auth(raw),
        AuthShape::Recognized {
            token: "jwt-3".into(),
            user: None
        }
    );
}

#[test]
fn auth_nested_access_token_and_user() {
    let raw = json!({
        "data": {
            "access_token": "jwt-4",
            "user": { "id": 1, "name": "Ana", "email": "ana@example.com" }
        }
    });
    assert_eq!(
        normalize_auth(raw),
        AuthShape::Recognized {
            token: "jwt-4".into(),
            user: Some(ana())
        }
    );
}

#[test]
fn auth_top_level_token_with_user_under_data() {
    let raw = json!({
        "access_token": "jwt-5",
        "data": { "user": { "id": 1, "name": "Ana", "email": "ana@example.com" } }
    });
    assert_eq!(
        normalize_auth(raw),
        AuthShape::Recognized {
            token: "jwt-5".into(),
            user: Some(ana())
        }
    );
}

#[test]
fn auth_unrecognized_shapes() {
    for raw in [
        json!({ "status": "success", "message": "ok" }),
        json!({ "access_token": "" }),
        json!({ "data": [ { "token": "x" } ] }),
        json!({ "access_token": 42 }),
        json!(null),
    ] {
        assert_eq!(normalize_auth(raw.clone()), AuthShape::Unrecognized(raw));
    }
}

// =========================================================
// normalize_user
// =========================================================

#[test]
fn user_direct_object() {
    let raw = json!({ "id": 1, "name": "Ana", "email": "ana@example.com", "created_at": null });
    assert_eq!(normalize_user(&raw), Some(ana()));
}

#[test]
fn user_under_data() {
    let raw = json!({ "status": "success", "data": { "id": 1, "name": "Ana", "email": "ana@example.com" } });
    assert_eq!(normalize_user(&raw), Some(ana()));
}

#[test]
fn user_best_effort_extraction() {
    let raw = json!({ "id": 7, "name": "Caio" });
    assert_eq!(
        normalize_user(&raw),
        Some(SessionUser {
            id: 7,
            name: "Caio".into(),
            email: String::new()
        })
    );
    assert_eq!(normalize_user(&json!({ "status": "success" })), None);
    assert_eq!(normalize_user(&json!("nope")), None);
}

// =========================================================
// decode_page
// =========================================================

fn seller_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Vendedor {}", id),
        "email": format!("v{}@example.com", id),
        "total_sales": 2,
        "total_amount": "300.00",
        "total_commission": "25.50"
    })
}

#[test]
fn page_laravel_paginator_under_data() {
    let raw = json!({
        "status": "success",
        "data": {
            "current_page": 2,
            "data": [seller_json(1), seller_json(2)],
            "last_page": 5,
            "per_page": 2,
            "total": 10
        }
    });
    let page: Page<Seller> = decode_page(&raw).unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].total_amount, 300.0);
    assert_eq!(
        page.pagination,
        Pagination {
            current_page: 2,
            total_pages: 5,
            total_items: 10
        }
    );
}

#[test]
fn page_array_with_meta() {
    let raw = json!({
        "data": [{
            "id": 9,
            "seller_id": 1,
            "seller": { "id": 1, "name": "Ana", "email": "ana@example.com" },
            "amount": 100,
            "commission": 8.5,
            "sale_date": "2024-05-01"
        }],
        "meta": { "current_page": 3, "last_page": 4, "per_page": 15, "total": 46 }
    });
    let page: Page<Sale> = decode_page(&raw).unwrap();
    assert_eq!(page.items[0].seller_name(), Some("Ana"));
    assert_eq!(page.pagination.current_page, 3);
    assert_eq!(page.pagination.total_pages, 4);
    assert_eq!(page.pagination.total_items, 46);
}

#[test]
fn page_top_level_paginator() {
    let raw = json!({
        "current_page": "1",
        "data": [ { "id": 4, "name": "Op", "email": "op@example.com" } ],
        "last_page": "1",
        "total": "1"
    });
    let page: Page<User> = decode_page(&raw).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.total_items, 1);
}

#[test]
fn page_missing_or_malformed_collection_is_empty() {
    for raw in [
        json!({}),
        json!(null),
        json!({ "status": "success" }),
        json!({ "data": { "current_page": 1 } }),
        json!({ "data": { "data": "oops" } }),
        json!({ "data": { "data": null, "total": 0 } }),
        json!("not even an object"),
    ] {
        let page: Page<Seller> = decode_page(&raw).unwrap();
        assert!(page.items.is_empty(), "payload: {}", raw);
        assert_eq!(page.pagination, Pagination::default());
    }
}

#[test]
fn page_with_wrong_item_shape_is_typed_error() {
    let raw = json!({ "data": [ { "id": "not-a-number" } ] });
    let err = decode_page::<Seller>(&raw).unwrap_err();
    assert_eq!(err.code(), "DECODE_ERROR");
}

#[test]
fn page_zero_values_fall_back_to_defaults() {
    let raw = json!({ "data": [], "meta": { "current_page": 0, "last_page": 0, "total": 0 } });
    let page: Page<Seller> = decode_page(&raw).unwrap();
    assert_eq!(page.pagination, Pagination::default());
}

#[test]
fn page_numbers_beyond_u32_fall_back_to_defaults() {
    let raw = json!({
        "data": [],
        "meta": { "current_page": 4_294_967_297u64, "last_page": 4_294_967_298u64, "total": 4_294_967_298u64 }
    });
    let page: Page<Seller> = decode_page(&raw).unwrap();
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.total_items, 4_294_967_298);
}

// =========================================================
// decode_item
// =========================================================

#[test]
fn item_wrapped_and_bare() {
    let wrapped = json!({ "status": "success", "data": seller_json(3) });
    let bare = seller_json(3);
    let a: Seller = decode_item(&wrapped).unwrap();
    let b: Seller = decode_item(&bare).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.id, 3);
}

#[test]
fn item_mismatch_is_decode_error() {
    let err = decode_item::<Seller>(&json!({ "data": { "name": "sem id" } })).unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
