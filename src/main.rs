#![forbid(unsafe_code)]

use log::info;
use poem::listener::TcpListener;

// GLS Utilities
use gls_server::utils::config::init_log;
use gls_server::utils::errors::Errors;
use gls_server::{build_app, CATALOG, RUNTIME_CTX, SERVER_NAME};

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize GLS -----------------
    // Announce ourselves.
    println!("Starting gls_server!");

    // Initialize the server.
    gls_init();

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let gls_url = format!("{}:{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port);
    info!("Try: {}/api/games", gls_url);
    info!("Try: {}/api/games?search=zelda", gls_url);

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let app = build_app(&gls_url);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// gls_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems other than those needed to configure the main
 * loop processor.
 */
fn gls_init() {
    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of the
    // runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Force construction of the fixed catalog.
    info!("Serving a catalog of {} games.", CATALOG.len());
}
