extern crate log;
use log::info;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::{self, Json};
use rocket::{catch, catchers, get, post, routes, Build, Data, Request, Response, Rocket, State};
use serde_json::{json, Value};
use std::num::IntErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use crate::book_store::{Book, BookStore, NewBook};
use crate::error::{ApiError, ApiResult, StoreError};
use crate::location_log::{Location, LocationLog, TimedLocation};
use crate::storage::json_record_file::JsonRecordFile;
use crate::storage::record_file::RecordFile;
use crate::validation::{FieldError, ValidationErrors};

pub const WELCOME_MESSAGE: &str = "Welcome to my bookstore app!";

// Routes ---------------------------------------------------------------------

#[get("/")]
fn root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

#[get("/list-books")]
async fn list_books(books: &State<Arc<BookStore>>) -> Json<Value> {
    Json(json!({ "books": books.list().await }))
}

#[get("/book_by_index/<index>")]
async fn book_by_index(index: &str, books: &State<Arc<BookStore>>) -> ApiResult<Json<Book>> {
    match index.parse::<i128>() {
        Ok(position) => Ok(Json(books.by_index(position).await?)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(books.index_out_of_range(index).await)
            }
            _ => Err(ValidationErrors::single(FieldError::new(
                &["path", "index"],
                format!("Input should be a valid integer, got '{}'", index),
                "int_parsing",
            ))
            .into()),
        },
    }
}

#[get("/get-book?<book_id>")]
async fn get_book(book_id: Option<String>, books: &State<Arc<BookStore>>) -> ApiResult<Json<Book>> {
    let book_id =
        book_id.ok_or_else(|| ValidationErrors::single(FieldError::missing(&["query", "book_id"])))?;
    Ok(Json(books.by_id(&book_id).await?))
}

#[post("/add-book", data = "<body>")]
async fn add_book(
    body: Result<Json<Value>, json::Error<'_>>,
    books: &State<Arc<BookStore>>,
) -> ApiResult<Json<Value>> {
    let new_book = NewBook::from_json(&json_body(body)?)?;
    let book_id = books.add(new_book).await?;
    Ok(Json(json!({ "book_id": book_id })))
}

#[post("/add-location", data = "<body>")]
async fn add_location(
    body: Result<Json<Value>, json::Error<'_>>,
    locations: &State<Arc<LocationLog>>,
) -> ApiResult<Json<Value>> {
    let location = Location::from_json(&json_body(body)?)?;
    locations.add(location).await?;
    Ok(Json(json!({})))
}

#[get("/get-locations")]
async fn get_locations(locations: &State<Arc<LocationLog>>) -> ApiResult<Json<Vec<TimedLocation>>> {
    Ok(Json(locations.newest_first().await?))
}

fn json_body(body: Result<Json<Value>, json::Error<'_>>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(e) => Err(ValidationErrors::single(FieldError::new(
            &["body"],
            format!("JSON decode error: {}", e),
            "json_invalid",
        ))
        .into()),
    }
}

// Catchers -------------------------------------------------------------------

#[catch(404)]
fn not_found() -> Json<Value> {
    Json(json!({ "detail": "Not Found" }))
}

#[catch(422)]
fn unprocessable(req: &Request<'_>) -> Json<Value> {
    Json(json!({
        "detail": [{
            "loc": ["request"],
            "msg": format!("Unprocessable request to {}", req.uri().path()),
            "type": "invalid",
        }]
    }))
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> Custom<Json<Value>> {
    let reason = status.reason().unwrap_or("Error");
    Custom(status, Json(json!({ "detail": reason })))
}

// Request logging ------------------------------------------------------------

pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        info!("→ {} {}", req.method(), req.uri().path());
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        info!("← {} {} — {}", req.method(), req.uri().path(), res.status().code);
    }
}

// Server node ----------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub books_file: PathBuf,
    pub locations_file: PathBuf,
    pub log_file: PathBuf,
    pub log_level: log::LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: String::from("127.0.0.1"),
            port: 8000,
            books_file: PathBuf::from("books.json"),
            locations_file: PathBuf::from("locations.json"),
            log_file: PathBuf::from("bookstore.log"),
            log_level: log::LevelFilter::Info,
        }
    }
}

pub struct ServerNode {
    config: ServerConfig,
    books: Arc<BookStore>,
    locations: Arc<LocationLog>,
}

impl ServerNode {
    /// Loads both collections from the JSON files named in `config`.
    pub async fn new(config: ServerConfig) -> Result<Self, StoreError> {
        let book_file = JsonRecordFile::<Book>::new(config.books_file.clone());
        let location_file = JsonRecordFile::<Location>::new(config.locations_file.clone());
        Self::with_record_files(config, Box::new(book_file), Box::new(location_file)).await
    }

    pub async fn with_record_files(
        config: ServerConfig,
        book_file: Box<dyn RecordFile<Book>>,
        location_file: Box<dyn RecordFile<Location>>,
    ) -> Result<Self, StoreError> {
        let books = Arc::new(BookStore::open(book_file).await?);
        let locations = Arc::new(LocationLog::open(location_file).await?);
        Ok(ServerNode {
            config,
            books,
            locations,
        })
    }

    pub fn build(&self) -> Rocket<Build> {
        let figment = rocket::Config::figment()
            .merge(("address", self.config.address.clone()))
            .merge(("port", self.config.port));
        rocket::custom(figment)
            .attach(RequestLogger)
            .manage(self.books.clone())
            .manage(self.locations.clone())
            .mount(
                "/",
                routes![
                    root,
                    list_books,
                    book_by_index,
                    get_book,
                    add_book,
                    add_location,
                    get_locations,
                ],
            )
            .register("/", catchers![not_found, unprocessable, default_catcher])
    }
}
