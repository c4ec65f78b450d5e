use anyhow::Result;
use clap::{Parser, Subcommand};
use movie_client::command::{Command, HELP};
use movie_client::render::Renderer;
use movie_client::{App, MovieClient};
use std::io::{IsTerminal, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "movie-client")]
#[command(about = "Browse the movie catalog from a terminal", long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:3001")]
    base_url: String,
    /// Disable colors and screen clearing
    #[arg(long, default_value_t = false)]
    no_color: bool,
    /// Request timeout seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive list/detail browser (default)
    Browse,
    /// Print the movie grid once
    List,
    /// Print one movie's details
    Show {
        /// Movie id as stored in the snapshot
        id: String,
    },
    /// Check the server is up
    Ping,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let client = MovieClient::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))?;
    let renderer = Renderer::new(!cli.no_color && std::io::stdout().is_terminal());

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => browse(&client, renderer).await,
        Commands::List => {
            let mut app = App::new();
            app.on_list_loaded(client.list().await);
            print!("{}", renderer.render(&app));
            Ok(())
        }
        Commands::Show { id } => {
            let mut app = App::idle();
            if app.on_detail_loaded(client.detail(&id).await) {
                print!("{}", renderer.render(&app));
            }
            Ok(())
        }
        Commands::Ping => {
            println!("{}", client.ping().await?);
            Ok(())
        }
    }
}

async fn browse(client: &MovieClient, renderer: Renderer) -> Result<()> {
    let mut app = App::new();
    print!("{}", renderer.render(&app));
    app.on_list_loaded(client.list().await);
    draw(renderer, &app, true)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else { break };

        let mut clear = false;
        match line.parse::<Command>()? {
            Command::Quit => break,
            Command::Back => {
                app.back();
                clear = true;
            }
            Command::Reload => {
                app.begin_loading();
                app.on_list_loaded(client.list().await);
                clear = true;
            }
            Command::Open(id) => clear = app.on_detail_loaded(client.detail(&id).await),
            Command::Pick(n) => match app.card_id(n) {
                Some(id) => clear = app.on_detail_loaded(client.detail(&id).await),
                None => {
                    println!("no card {n} on this screen");
                    continue;
                }
            },
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Unknown(s) => {
                println!("unknown command {s:?}, try `help`");
                continue;
            }
        }
        draw(renderer, &app, clear)?;
    }
    Ok(())
}

fn draw(renderer: Renderer, app: &App, clear: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    if clear {
        stdout.write_all(renderer.scroll_to_top().as_bytes())?;
    }
    stdout.write_all(renderer.render(app).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
