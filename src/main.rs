use std::{error::Error, io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use tokio::fs;
use tracing_subscriber::{
    layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

use helpdesk::{
    auth,
    screen::{Details, Home, Notice, Register, SignIn},
    store, ticket, Config, Session, TicketStore,
};

#[derive(Debug, Parser)]
#[command(name = "helpdesk", about = "Support ticket client", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[arg(long, env = "HELPDESK_EMAIL")]
    email: String,

    /// Prefer the environment variable; argv is visible to other users
    #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tickets in the given status
    List {
        #[arg(long, value_enum, default_value_t = Filter::Open)]
        status: Filter,
    },
    /// Show a single ticket
    Show { id: String },
    /// Close a ticket with a solution
    Close { id: String, solution: String },
    /// Register a new ticket
    New {
        #[arg(long)]
        patrimony: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Filter {
    Open,
    Closed,
}

impl From<Filter> for ticket::Status {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Open => Self::Open,
            Filter::Closed => Self::Closed,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = fs::read_to_string(&cli.config).await?;
    let config = toml::from_str::<Config>(&config)?;

    let http = config.http.client()?;
    let auth = auth::Client::new(http.clone(), config.identity);
    let store = store::Client::new(http, config.store);

    let session = match SignIn::new(&auth)
        .submit(&cli.email, &cli.password)
        .await
    {
        Ok(session) => session,
        Err(notice) => {
            eprintln!("{notice}");
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::info!(user = %session.user_id, "signed in");

    match run(cli.command, &store, &session).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(notice) => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(
    command: Command,
    store: &store::Client,
    session: &Session,
) -> Result<(), Notice> {
    match command {
        Command::List { status } => {
            let mut home = Home::new(store, session);
            home.select(status.into()).await?;
            for row in home.rows() {
                println!("{row}");
            }
        }
        Command::Show { id } => {
            let details =
                Details::load(store, session, &ticket::Id::from(id)).await?;
            print_details(&details);
        }
        Command::Close { id, solution } => {
            let mut details =
                Details::load(store, session, &ticket::Id::from(id)).await?;
            println!("{}", details.close(&solution).await?);
            print_details(&details);
        }
        Command::New {
            patrimony,
            description,
        } => {
            let (ticket, notice) = Register::new(store, session)
                .submit(&patrimony, &description)
                .await?;
            println!("{notice}");
            println!("{}", ticket.id());
        }
    }
    Ok(())
}

fn print_details<S: TicketStore>(details: &Details<'_, S>) {
    println!("{}", details.status_label().to_uppercase());
    for card in details.cards() {
        println!();
        println!("{}", card.title.to_uppercase());
        println!("{}", card.body);
        if let Some(footer) = card.footer {
            println!("{footer}");
        }
    }
}
