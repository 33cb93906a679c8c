use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

use items_client::Item;

#[derive(Parser)]
#[command(name = "items-cli")]
#[command(about = "Command line client for the items client service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8081")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all items
    List {
        /// Use the exchange-style route
        #[arg(long)]
        exchange: bool,
    },
    /// Fetch one item by id
    Get {
        id: String,
        #[arg(long)]
        exchange: bool,
    },
    /// Create an item
    Create {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Replace an item
    Update {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete an item
    Delete { id: String },
    /// Call the error demonstration route
    Fail {
        #[arg(long)]
        exchange: bool,
    },
}

fn style(exchange: bool) -> &'static str {
    if exchange {
        "exchange"
    } else {
        "retrieve"
    }
}

/// `{service}/items/client/<segments..>`, each segment encoded on its own.
fn endpoint(service: &Url, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = service.clone();
    url.path_segments_mut()
        .map_err(|_| format!("service url cannot be a base: {}", service))?
        .pop_if_empty()
        .extend(["items", "client"])
        .extend(segments);
    Ok(url)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let service = Url::parse(&cli.url)?;

    let res = match cli.command {
        Commands::List { exchange } => {
            client
                .get(endpoint(&service, &[style(exchange)])?)
                .send()
                .await?
        }
        Commands::Get { id, exchange } => {
            client
                .get(endpoint(&service, &[style(exchange), id.as_str()])?)
                .send()
                .await?
        }
        Commands::Create { id, description, price } => {
            client
                .post(endpoint(&service, &[])?)
                .json(&Item::new(id, description, price))
                .send()
                .await?
        }
        Commands::Update { id, description, price } => {
            client
                .put(endpoint(&service, &[id.as_str()])?)
                .json(&Item::new(Some(id.clone()), description, price))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(endpoint(&service, &[id.as_str()])?).send().await?,
        Commands::Fail { exchange } => {
            client
                .get(endpoint(&service, &[style(exchange), "exception", "occurred"])?)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if text.is_empty() {
        println!("{}", status);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
