use std::env;

use actix_web::HttpServer;
use preselection::{create_app, AppRepositories};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    env_logger::init();

    let mongo_uri = env::var("MONGOURI").expect("MONGOURI must be set");
    let database = env::var("DATABASE").unwrap_or_else(|_| "journal".to_string());

    let repos = AppRepositories::mongo(&mongo_uri, &database).await;

    HttpServer::new(move || create_app(repos.clone()))
        .bind(("0.0.0.0", 3012))?
        .run()
        .await
}
