use bookstore_server::book_store::Book;
use bookstore_server::location_log::Location;
use bookstore_server::server::ServerNode;
use bookstore_server::storage::memory_record_file::MemoryRecordFile;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};
use std::sync::Arc;

mod utils;

#[rocket::async_test]
async fn test_root() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;
    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "message": "Welcome to my bookstore app!" }));
}

#[rocket::async_test]
async fn test_add_and_list_books() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;

    let response = client
        .post("/add-book")
        .header(ContentType::JSON)
        .body(r#"{"name":"Dune","genre":"fiction","price":9.99,"book_id":"chosen-by-caller"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    let book_id = body["book_id"].as_str().unwrap().to_string();
    assert_eq!(book_id.len(), 32);
    assert_ne!(book_id, "chosen-by-caller");

    let response = client.get("/list-books").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(
        body,
        json!({ "books": [{ "name": "Dune", "genre": "fiction", "price": 9.99, "book_id": book_id }] })
    );

    let on_disk: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("books.json")).unwrap())
            .unwrap();
    assert_eq!(on_disk, body["books"]);
}

#[rocket::async_test]
async fn test_book_by_index() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;
    let mut ids = Vec::new();
    for name in ["first", "second"].iter() {
        let response = client
            .post("/add-book")
            .json(&json!({ "name": name, "genre": "non-fiction", "price": 1 }))
            .dispatch()
            .await;
        let body: Value = response.into_json().await.unwrap();
        ids.push(body["book_id"].as_str().unwrap().to_string());
    }

    let response = client.get("/book_by_index/1").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["name"], "second");
    assert_eq!(body["book_id"], ids[1].as_str());
    assert_eq!(body["price"], 1.0);

    let response = client.get("/book_by_index/5").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Book index 5 out of range (2)." }));

    let response = client.get("/book_by_index/-1").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Book index -1 out of range (2)." }));

    let response = client
        .get("/book_by_index/99999999999999999999999999999999999999999")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(
        body,
        json!({ "detail": "Book index 99999999999999999999999999999999999999999 out of range (2)." })
    );

    let response = client.get("/book_by_index/minus-one").dispatch().await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["path", "index"]));
}

#[rocket::async_test]
async fn test_get_book() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;
    let response = client
        .post("/add-book")
        .json(&json!({ "name": "Dune", "genre": "fiction", "price": 9.99 }))
        .dispatch()
        .await;
    let body: Value = response.into_json().await.unwrap();
    let book_id = body["book_id"].as_str().unwrap().to_string();

    let response = client
        .get(format!("/get-book?book_id={}", book_id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["name"], "Dune");

    let response = client.get("/get-book?book_id=nope").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Book ID nope not found in database." }));

    let response = client.get("/get-book").dispatch().await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["query", "book_id"]));
}

#[rocket::async_test]
async fn test_add_book_validation() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;

    let response = client
        .post("/add-book")
        .json(&json!({ "name": "X", "genre": "mystery", "price": 1 }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["body", "genre"]));
    assert_eq!(body["detail"][0]["type"], "literal_error");

    let response = client
        .post("/add-book")
        .json(&json!({ "genre": "fiction", "price": "cheap" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["detail"].as_array().unwrap().len(), 2);

    let response = client
        .post("/add-book")
        .header(ContentType::JSON)
        .body("{not json")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::UnprocessableEntity);

    let response = client.get("/list-books").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "books": [] }));
    assert!(!dir.path().join("books.json").exists());
}

#[rocket::async_test]
async fn test_books_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let book_id = {
        let client = utils::launch_server_node(&dir).await;
        let response = client
            .post("/add-book")
            .json(&json!({ "name": "Dune", "genre": "fiction", "price": 9.99 }))
            .dispatch()
            .await;
        let body: Value = response.into_json().await.unwrap();
        body["book_id"].as_str().unwrap().to_string()
    };

    let client = utils::launch_server_node(&dir).await;
    let response = client.get("/book_by_index/0").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["book_id"], book_id.as_str());
}

#[rocket::async_test]
async fn test_unknown_route() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;
    let response = client.get("/no-such-thing").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Not Found" }));
}

#[rocket::async_test]
async fn test_numeric_string_price_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let client = utils::launch_server_node(&dir).await;
    let response = client
        .post("/add-book")
        .json(&json!({ "name": "Dune", "genre": "fiction", "price": "9.99" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = client.get("/book_by_index/0").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["price"], 9.99);
}

#[rocket::async_test]
async fn test_failed_write_is_500_and_kept_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let book_file = Arc::new(MemoryRecordFile::<Book>::new(Vec::new()));
    let location_file = Arc::new(MemoryRecordFile::<Location>::new(Vec::new()));
    let node = ServerNode::with_record_files(
        utils::get_server_config(&dir),
        Box::new(book_file.clone()),
        Box::new(location_file),
    )
    .await
    .unwrap();
    let client = Client::tracked(node.build()).await.unwrap();

    book_file.set_fail_writes(true);
    let response = client
        .post("/add-book")
        .json(&json!({ "name": "Dune", "genre": "fiction", "price": 9.99 }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Internal Server Error" }));

    let response = client.get("/list-books").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
    assert!(book_file.snapshot().is_empty());
    assert_eq!(book_file.save_count(), 0);
}
