use anyhow::{anyhow, Result};
use bookstore_client::client_api::{BookstoreApi, Genre, Location, NewBook};
use bookstore_client::http_client::{HttpBookstoreClient, DEFAULT_SERVER};
use clap::{App, Arg, ArgMatches};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn number(matches: &ArgMatches, name: &str) -> Result<f64> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| anyhow!("missing --{}", name))?;
    raw.parse::<f64>()
        .map_err(|e| anyhow!("--{} must be a number: {}", name, e))
}

fn now_millis() -> Result<f64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as f64)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let matches = App::new("bookstore-client")
        .version("1.0")
        .about("Talks to a bookstore server")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .default_value(DEFAULT_SERVER)
                .help("Base URL of the server"),
        )
        .subcommand_required(true)
        .subcommand(App::new("health").about("Call the root route"))
        .subcommand(App::new("list-books").about("List every book"))
        .subcommand(
            App::new("book-by-index")
                .about("Fetch the book at a zero-based position")
                .arg(Arg::new("index").required(true)),
        )
        .subcommand(
            App::new("get-book")
                .about("Fetch a book by its id")
                .arg(Arg::new("book_id").required(true)),
        )
        .subcommand(
            App::new("add-book")
                .about("Add a book and print its generated id")
                .arg(Arg::new("name").long("name").takes_value(true).required(true))
                .arg(
                    Arg::new("genre")
                        .long("genre")
                        .takes_value(true)
                        .required(true)
                        .possible_values(["fiction", "non-fiction"]),
                )
                .arg(Arg::new("price").long("price").takes_value(true).required(true)),
        )
        .subcommand(
            App::new("add-location")
                .about("Record a position fix")
                .arg(
                    Arg::new("time")
                        .long("time")
                        .takes_value(true)
                        .help("Milliseconds since the epoch (defaults to now)"),
                )
                .arg(Arg::new("lat").long("lat").takes_value(true).required(true))
                .arg(Arg::new("lng").long("lng").takes_value(true).required(true)),
        )
        .subcommand(App::new("get-locations").about("List locations, newest first"))
        .get_matches();

    let server = matches.value_of("server").unwrap_or(DEFAULT_SERVER);
    let client = HttpBookstoreClient::new(server);

    match matches.subcommand() {
        Some(("health", _)) => println!("{}", client.health().await?),
        Some(("list-books", _)) => print_json(&client.list_books().await?)?,
        Some(("book-by-index", sub)) => {
            let index = sub
                .value_of("index")
                .ok_or_else(|| anyhow!("missing index"))?
                .parse::<usize>()?;
            print_json(&client.book_by_index(index).await?)?
        }
        Some(("get-book", sub)) => {
            let book_id = sub
                .value_of("book_id")
                .ok_or_else(|| anyhow!("missing book id"))?;
            print_json(&client.get_book(book_id).await?)?
        }
        Some(("add-book", sub)) => {
            let book = NewBook {
                name: String::from(sub.value_of("name").unwrap_or_default()),
                genre: sub
                    .value_of("genre")
                    .unwrap_or_default()
                    .parse::<Genre>()
                    .map_err(|e| anyhow!(e))?,
                price: number(sub, "price")?,
            };
            println!("{}", client.add_book(&book).await?);
        }
        Some(("add-location", sub)) => {
            let time = match sub.value_of("time") {
                Some(_) => number(sub, "time")?,
                None => now_millis()?,
            };
            let location = Location {
                time,
                lat: number(sub, "lat")?,
                lng: number(sub, "lng")?,
            };
            client.add_location(&location).await?;
            println!("ok");
        }
        Some(("get-locations", _)) => print_json(&client.get_locations().await?)?,
        _ => return Err(anyhow!("unknown command, try --help")),
    }
    Ok(())
}
