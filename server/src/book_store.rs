// book_store.rs
use log::info;
use std::convert::TryFrom;
use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{ApiError, ApiResult, StoreError};
use crate::storage::record_file::RecordFile;
use crate::util::{generate_book_id, BookId};
use crate::validation::{ObjectValidator, ValidationErrors};

const GENRES: [&str; 2] = ["fiction", "non-fiction"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    Fiction,
    NonFiction,
}

impl Genre {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "fiction" => Some(Genre::Fiction),
            "non-fiction" => Some(Genre::NonFiction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub genre: Genre,
    pub price: f64,
    pub book_id: BookId,
}

/// A book as submitted by a caller. Any `book_id` in the body is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub name: String,
    pub genre: Genre,
    pub price: f64,
}

impl NewBook {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut v = ObjectValidator::new(body);
        let name = v.string("name");
        let genre = v.choice("genre", &GENRES).and_then(|g| Genre::parse(&g));
        let price = v.number("price");
        v.finish()?;
        match (name, genre, price) {
            (Some(name), Some(genre), Some(price)) => Ok(NewBook { name, genre, price }),
            _ => Err(ValidationErrors::default()),
        }
    }
}

fn out_of_range(index: impl fmt::Display, len: usize) -> ApiError {
    ApiError::NotFound(format!("Book index {} out of range ({}).", index, len))
}

/// Insertion-ordered books mirrored to a record file.
pub struct BookStore {
    books: Mutex<Vec<Book>>,
    file: Box<dyn RecordFile<Book>>,
}

impl BookStore {
    pub async fn open(file: Box<dyn RecordFile<Book>>) -> Result<Self, StoreError> {
        let books = file.load().await?;
        info!("loaded {} books", books.len());
        Ok(Self {
            books: Mutex::new(books),
            file,
        })
    }

    pub async fn list(&self) -> Vec<Book> {
        self.books.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.books.lock().await.len()
    }

    /// Negative positions are out of range, never counted from the end.
    pub async fn by_index(&self, index: i128) -> ApiResult<Book> {
        let books = self.books.lock().await;
        usize::try_from(index)
            .ok()
            .and_then(|i| books.get(i))
            .cloned()
            .ok_or_else(|| out_of_range(index, books.len()))
    }

    /// For integer positions too wide to parse.
    pub async fn index_out_of_range(&self, index: &str) -> ApiError {
        out_of_range(index, self.len().await)
    }

    pub async fn by_id(&self, book_id: &str) -> ApiResult<Book> {
        let books = self.books.lock().await;
        books
            .iter()
            .find(|b| b.book_id == book_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Book ID {} not found in database.", book_id)))
    }

    /// Appends under a fresh id and rewrites the file while holding the
    /// lock. A failed write leaves the book in memory.
    pub async fn add(&self, new_book: NewBook) -> Result<BookId, StoreError> {
        let book = Book {
            name: new_book.name,
            genre: new_book.genre,
            price: new_book.price,
            book_id: generate_book_id(),
        };
        let book_id = book.book_id.clone();
        let mut books = self.books.lock().await;
        books.push(book);
        self.file.save(&books).await?;
        info!("added book {} ({} total)", book_id, books.len());
        Ok(book_id)
    }
}
