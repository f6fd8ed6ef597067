use bookstore_server::server::{ServerConfig, ServerNode};
use rocket::local::asynchronous::Client;
use tempfile::TempDir;

pub fn get_server_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        books_file: dir.path().join("books.json"),
        locations_file: dir.path().join("locations.json"),
        log_file: dir.path().join("bookstore.log"),
        ..ServerConfig::default()
    }
}

pub async fn launch_server_node(dir: &TempDir) -> Client {
    let node = ServerNode::new(get_server_config(dir))
        .await
        .expect("collections load");
    Client::tracked(node.build())
        .await
        .expect("valid rocket instance")
}
