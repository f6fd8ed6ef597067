use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for bookstore clients
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Error happens on connection with bookstore server: {0}")]
    Connection(#[from] reqwest::Error),
    #[error("Server answered {status}: {detail}")]
    Status { status: u16, detail: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fiction,
    NonFiction,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::Fiction => write!(f, "fiction"),
            Genre::NonFiction => write!(f, "non-fiction"),
        }
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fiction" => Ok(Genre::Fiction),
            "non-fiction" => Ok(Genre::NonFiction),
            other => Err(format!("unknown genre '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub genre: Genre,
    pub price: f64,
    pub book_id: String,
}

/// Body of an add-book request; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub name: String,
    pub genre: Genre,
    pub price: f64,
}

/// `time` is milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub time: f64,
    pub lat: f64,
    pub lng: f64,
}

/// A location as listed by the server, with `time` already formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedLocation {
    pub time: String,
    pub lat: f64,
    pub lng: f64,
}

/// [`BookstoreApi`] covers every endpoint the bookstore server exposes.
#[async_trait::async_trait]
pub trait BookstoreApi: Send + Sync {
    /// Returns the welcome message of the root route.
    async fn health(&self) -> Result<String>;

    async fn list_books(&self) -> Result<Vec<Book>>;

    async fn book_by_index(&self, index: usize) -> Result<Book>;

    async fn get_book(&self, book_id: &str) -> Result<Book>;

    /// Returns the id the server generated for the book.
    async fn add_book(&self, book: &NewBook) -> Result<String>;

    async fn add_location(&self, location: &Location) -> Result<()>;

    /// Newest first.
    async fn get_locations(&self) -> Result<Vec<TimedLocation>>;
}
