// ABOUTME: CLI binary for web rich object extraction.
// ABOUTME: Fetches a URL and prints its core fields, or the full record as JSON.

use std::process::ExitCode;

use clap::Parser;
use web_rich_object::{Client, RichObject};

#[derive(Parser, Debug)]
#[command(name = "wro")]
#[command(about = "Fetch a URL and print its rich object metadata")]
struct Args {
    /// URL to fetch
    #[arg()]
    url: Option<String>,

    /// Output the full resolved record as JSON
    #[arg(long = "json")]
    json_output: bool,

    /// User-Agent to send instead of the default
    #[arg(long = "user-agent")]
    user_agent: Option<String>,
}

/// The human-readable summary: the four headline fields, aligned.
async fn print_summary(obj: &RichObject) {
    let title = obj.title().unwrap_or_default().to_string();
    let image = obj.image().await.unwrap_or_default().to_string();
    for (key, value) in [
        ("title", title.as_str()),
        ("type", obj.object_type()),
        ("url", obj.url().unwrap_or_default()),
        ("image", image.as_str()),
    ] {
        println!("{:<15} => {}", key, value);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let Some(url) = args.url else {
        eprintln!("You must specify a URL");
        return ExitCode::from(1);
    };

    let mut builder = Client::builder();
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(user_agent);
    }
    let client = builder.build();

    let obj = match client.fetch(&url).await {
        Ok(obj) => obj,
        Err(e) => {
            eprintln!("error fetching {}: {}", url, e);
            return ExitCode::from(1);
        }
    };

    if args.json_output {
        let snapshot = obj.snapshot().await;
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error serializing result: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        print_summary(&obj).await;
    }

    ExitCode::SUCCESS
}
