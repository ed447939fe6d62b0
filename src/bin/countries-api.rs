use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::Result;
use clap::Parser;
use countries_api::{Config, Db, api, routes};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "countries-api",
    version,
    about = "Mirror REST Countries data into Postgres and serve it as JSON"
)]
struct Cli {
    /// Listening port (overrides the PORT environment variable).
    #[arg(long)]
    port: Option<u16>,
    /// Bind address.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let db = Db::connect(&config)?;
    // The pool builds without eager connections; if the store is down at
    // boot, serve 503s until it returns instead of refusing to start.
    if let Err(err) = db.init_schema() {
        warn!("schema init failed, store unreachable? {err}");
    }

    let db = web::Data::new(db);
    let upstream = web::Data::new(api::Client::default());
    let bind = (cli.bind.clone(), config.port);
    let config = web::Data::new(config);

    info!("listening on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(upstream.clone())
            .app_data(config.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
