#![forbid(unsafe_code)]

use anyhow::Result;
use std::io::{self, BufRead, Write};
use structopt::StructOpt;

use gls_server::client::games_view::{GamesView, ViewState};

// ***************************************************************************
//                             Command Line Args
// ***************************************************************************
#[derive(Debug, StructOpt)]
#[structopt(name = "gls_view", about = "Terminal view for the GLS catalog service.")]
struct GlsViewArgs {
    /// Base URL of the catalog service.
    #[structopt(short, long, default_value = "http://localhost:5000")]
    url: String,
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
/** One query per entered search term.  An empty line retries after an error
 * and clears the search otherwise; EOF (ctrl-d) exits.
 */
#[tokio::main]
async fn main() -> Result<()> {
    let args = GlsViewArgs::from_args();
    let mut view = GamesView::new(&args.url)?;

    // Initial, unfiltered load.
    let token = view.current_token();
    println!("Loading games...");
    view.run_query(token).await;
    render(&view);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let term = line.trim();

        let token = if term.is_empty() {
            match view.state() {
                ViewState::Error(_) => view.retry(),
                _ => view.clear_search(),
            }
        } else {
            view.set_search(term)
        };

        println!("Loading games...");
        view.run_query(token).await;
        render(&view);
    }

    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// render:
// ---------------------------------------------------------------------------
/** Print the current view state, one of Loading, Error or Success. */
fn render(view: &GamesView) {
    match view.state() {
        ViewState::Loading => println!("Loading games..."),
        ViewState::Error(msg) => {
            println!("Error loading games: {}", msg);
            println!("Press Enter to retry.");
        },
        ViewState::Success(games) => {
            if games.is_empty() {
                println!("No games found matching your search.");
                println!("Press Enter to clear the search.");
            } else {
                println!("Found {} game(s)", games.len());
                for game in games {
                    println!();
                    println!("  {}", game.name);
                    println!("    Developer:    {}", game.developer);
                    println!("    Platform:     {}", game.platform);
                    println!("    Release Year: {}", game.release_year);
                    println!("    Rating:       {}/10", game.rating);
                }
            }
        },
    }
    print!("\nsearch> ");
    let _ = io::stdout().flush();
}
