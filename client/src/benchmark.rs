use anyhow::{ensure, Result};
use bookstore_client::client_api::{BookstoreApi, Genre, Location, NewBook};
use bookstore_client::http_client::{HttpBookstoreClient, DEFAULT_SERVER};
use clap::{App, Arg};
use log::info;
use std::time::Instant;

// Adds `count` books and `count` locations one request at a time, reports
// how long each phase took, then checks the list endpoints grew by `count`.

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let matches = App::new("benchmark")
        .about("Load generator for a bookstore server")
        .arg(
            Arg::new("server")
                .long("server")
                .takes_value(true)
                .default_value(DEFAULT_SERVER),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .takes_value(true)
                .default_value("100"),
        )
        .get_matches();
    let server = matches.value_of("server").unwrap_or(DEFAULT_SERVER);
    let count = matches.value_of("count").unwrap_or("100").parse::<usize>()?;
    let client = HttpBookstoreClient::new(server);

    let books_before = client.list_books().await?.len();
    let locations_before = client.get_locations().await?.len();

    println!("Start adding {} books", count);
    let start = Instant::now();
    for i in 0..count {
        let book = NewBook {
            name: format!("bench book {}", i),
            genre: if i % 2 == 0 { Genre::Fiction } else { Genre::NonFiction },
            price: i as f64,
        };
        let book_id = client.add_book(&book).await?;
        info!("added {}", book_id);
    }
    println!("Books: {:?}", start.elapsed());

    println!("Start adding {} locations", count);
    let start = Instant::now();
    for i in 0..count {
        let location = Location {
            time: 1_700_000_000_000.0 + i as f64 * 1000.0,
            lat: 0.0,
            lng: 0.0,
        };
        client.add_location(&location).await?;
    }
    println!("Locations: {:?}", start.elapsed());

    let start = Instant::now();
    let books_after = client.list_books().await?.len();
    let locations_after = client.get_locations().await?.len();
    println!("Listing both collections: {:?}", start.elapsed());
    ensure!(
        books_after == books_before + count,
        "expected {} books, found {}",
        books_before + count,
        books_after
    );
    ensure!(
        locations_after == locations_before + count,
        "expected {} locations, found {}",
        locations_before + count,
        locations_after
    );
    Ok(())
}
