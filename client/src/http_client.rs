use log::debug;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::client_api::{
    BookstoreApi, Book, ClientError, Location, NewBook, Result, TimedLocation,
};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

#[derive(Deserialize)]
struct Welcome {
    message: String,
}

#[derive(Deserialize)]
struct BookList {
    books: Vec<Book>,
}

#[derive(Deserialize)]
struct AddedBook {
    book_id: String,
}

/// Talks to a bookstore server over HTTP
pub struct HttpBookstoreClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBookstoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        debug!("{} {}", status, response.url());
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Flattens the `detail` of an error body into one line.
pub fn error_detail(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return body.to_string(),
    };
    match &value["detail"] {
        Value::String(message) => message.clone(),
        Value::Array(errors) => errors
            .iter()
            .map(|e| {
                let loc: Vec<String> = e["loc"]
                    .as_array()
                    .map(|parts| {
                        parts
                            .iter()
                            .map(|p| p.as_str().map(String::from).unwrap_or_else(|| p.to_string()))
                            .collect()
                    })
                    .unwrap_or_default();
                format!("{}: {}", loc.join("."), e["msg"].as_str().unwrap_or("invalid"))
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}

#[async_trait::async_trait]
impl BookstoreApi for HttpBookstoreClient {
    async fn health(&self) -> Result<String> {
        let response = self.http.get(self.url("/")).send().await?;
        let welcome: Welcome = Self::decode(response).await?;
        Ok(welcome.message)
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let response = self.http.get(self.url("/list-books")).send().await?;
        let list: BookList = Self::decode(response).await?;
        Ok(list.books)
    }

    async fn book_by_index(&self, index: usize) -> Result<Book> {
        let path = format!("/book_by_index/{}", index);
        let response = self.http.get(self.url(&path)).send().await?;
        Self::decode(response).await
    }

    async fn get_book(&self, book_id: &str) -> Result<Book> {
        let response = self
            .http
            .get(self.url("/get-book"))
            .query(&[("book_id", book_id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn add_book(&self, book: &NewBook) -> Result<String> {
        let response = self.http.post(self.url("/add-book")).json(book).send().await?;
        let added: AddedBook = Self::decode(response).await?;
        Ok(added.book_id)
    }

    async fn add_location(&self, location: &Location) -> Result<()> {
        let response = self
            .http
            .post(self.url("/add-location"))
            .json(location)
            .send()
            .await?;
        let _: Value = Self::decode(response).await?;
        Ok(())
    }

    async fn get_locations(&self) -> Result<Vec<TimedLocation>> {
        let response = self.http.get(self.url("/get-locations")).send().await?;
        Self::decode(response).await
    }
}
