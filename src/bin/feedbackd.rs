use actix_web::{middleware, App, HttpServer};
use failure::ResultExt;
use feedbackd::mode::Mode;
use feedbackd::{db, routes, setup};
use std::net::SocketAddr;
use structopt::StructOpt;

/// Feedback survey server
#[derive(StructOpt)]
struct Args {
    /// Address to listen on
    #[structopt(short, long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
    /// Path to the SQLite database file
    #[structopt(short, long, env = "DATABASE_URL", default_value = "./feedback.db")]
    database_url: String,
    /// Survey to serve: `questions` or `fixed`
    #[structopt(short, long, env = "SURVEY_MODE", default_value = "questions")]
    mode: Mode,
    /// Maximum number of pooled database connections
    #[structopt(short, long, default_value = "4")]
    pool_size: u32,
}

#[actix_rt::main]
async fn main() -> Result<(), exitfailure::ExitFailure> {
    let _ = dotenv::dotenv();
    env_logger::init();
    let args = Args::from_args();

    let pool = db::connect(&args.database_url, args.pool_size)
        .context("unable to open database")?;
    {
        let conn = pool.get().context("unable to open database")?;
        setup::initialize(&conn, args.mode).context("unable to create tables")?;
    }
    let mode = args.mode;

    log::info!("serving {} survey on {}", mode, args.bind);
    HttpServer::new(move || {
        App::new()
            .data(pool.clone())
            .configure(routes::for_mode(mode))
            .wrap(middleware::Logger::default())
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}
