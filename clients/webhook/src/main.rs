use actix_web::{
    middleware::{self, Condition},
    web::Data,
    App, HttpServer,
};
use clap::Parser;
use directory::{
    consts::consts::{DEFAULT_COLLECTION, DEFAULT_SEARCH_URL, RESPONSE_SIZE},
    search::{options::SearchOptions, SearchEngine},
    session::{controller::PaginationController, options::PaginationOptions},
};
use directory_webhook::{routes, tracers};
use std::io;

/// 📇 iSearch directory webhook, answers voice assistant turns by searching the university directory
#[derive(Parser, Debug)]
struct Cli {
    /// Port the webhook will listen on
    #[clap(short, long, default_value = "9000")]
    port: u16,

    /// Address the webhook will listen on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Log every HTTP request
    #[clap(long)]
    log_http: bool,

    /// Print tracing spans of turns and searches
    #[clap(long)]
    trace: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// Base url of the directory search service
    #[clap(long, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Search service collection holding the people records
    #[clap(long, default_value = DEFAULT_COLLECTION)]
    collection: String,

    /// Answer searches from a JSON file in the search service's response shape instead of the
    /// service. Note: Does not support shell paths, e.g. ~
    #[clap(long)]
    fixture: Option<std::path::PathBuf>,

    /// Maximum number of records requested per search
    #[clap(long, default_value_t = RESPONSE_SIZE)]
    response_size: usize,
}

fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    if args.trace {
        tracers::init_tracing_subscriber();
    }

    let engine = match args.fixture {
        Some(path) => SearchEngine::Fixture(path),
        None => SearchEngine::Solr(args.search_url),
    };

    let search_options = SearchOptions::default()
        .set_engine(engine)
        .set_collection(args.collection)
        .set_response_size(args.response_size);

    // The blocking search client has to be built outside of the async runtime
    let directory = SearchEngine::get_engine(search_options)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let controller = Data::new(PaginationController::new(
        directory,
        PaginationOptions::default(),
    ));

    log::info!("starting HTTP server on port {}.", args.port);

    log::info!(
        "Webhook endpoint: http://{}:{}/directory",
        args.address,
        args.port
    );

    let log_http = args.log_http;
    let address = args.address;
    let port = args.port;
    let http_workers = args.http_workers;

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            App::new()
                .app_data(controller.clone())
                .configure(routes::configure)
                .wrap(Condition::new(log_http, middleware::Logger::default()))
        })
        .workers(http_workers)
        .bind((address, port))?
        .run()
        .await
    })
}
