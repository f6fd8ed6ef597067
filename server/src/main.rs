use bookstore_server::logging::setup_logger;
use bookstore_server::server::{ServerConfig, ServerNode};
use clap::{App, Arg};
use std::path::PathBuf;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = App::new("bookstore-server")
        .version("1.0")
        .about("Serves the book and location collections over HTTP")
        .arg(
            Arg::with_name("address")
                .long("address")
                .takes_value(true)
                .default_value("127.0.0.1")
                .help("Address to bind"),
        )
        .arg(
            Arg::with_name("port")
                .long("port")
                .takes_value(true)
                .help("Port to listen on (falls back to BOOKSTORE_PORT, then 8000)"),
        )
        .arg(
            Arg::with_name("books_file")
                .long("books-file")
                .takes_value(true)
                .help("JSON file holding the books (falls back to BOOKS_FILE)"),
        )
        .arg(
            Arg::with_name("locations_file")
                .long("locations-file")
                .takes_value(true)
                .help("JSON file holding the locations (falls back to LOCATIONS_FILE)"),
        )
        .arg(
            Arg::with_name("log_file")
                .long("log-file")
                .takes_value(true)
                .default_value("bookstore.log")
                .help("File receiving a copy of the log"),
        )
        .arg(
            Arg::with_name("log_level")
                .long("log-level")
                .takes_value(true)
                .default_value("info")
                .possible_values(["off", "error", "warn", "info", "debug", "trace"])
                .help("Minimum level written to the log"),
        )
        .get_matches();

    let defaults = ServerConfig::default();
    let port = match matches.value_of("port") {
        Some(port) => port.parse::<u16>()?,
        None => match std::env::var("BOOKSTORE_PORT") {
            Ok(port) => port.parse::<u16>()?,
            Err(_) => defaults.port,
        },
    };
    let books_file = matches
        .value_of("books_file")
        .map(PathBuf::from)
        .or_else(|| std::env::var("BOOKS_FILE").ok().map(PathBuf::from))
        .unwrap_or(defaults.books_file);
    let locations_file = matches
        .value_of("locations_file")
        .map(PathBuf::from)
        .or_else(|| std::env::var("LOCATIONS_FILE").ok().map(PathBuf::from))
        .unwrap_or(defaults.locations_file);
    let log_level = matches
        .value_of("log_level")
        .unwrap_or("info")
        .parse::<log::LevelFilter>()?;
    let config = ServerConfig {
        address: String::from(matches.value_of("address").unwrap_or("127.0.0.1")),
        port,
        books_file,
        locations_file,
        log_file: PathBuf::from(matches.value_of("log_file").unwrap_or("bookstore.log")),
        log_level,
    };

    setup_logger(config.log_level, &config.log_file)?;
    let server_node = ServerNode::new(config).await?;
    let _ = server_node.build().launch().await?;
    Ok(())
}
