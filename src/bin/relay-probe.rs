use clap::{Parser, Subcommand};

use cors_relay::probe::{probe_status, send_prompt, PromptBody, PROMPT_PATH};

#[derive(Parser)]
#[command(name = "relay-probe")]
#[command(about = "Check the prompt API directly or through the CORS relay", long_about = None)]
struct Cli {
    /// Base URL: the relay (default) or the upstream itself.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the prompt endpoint with OPTIONS then GET
    Status,
    /// Send one prompt and print the reply
    Prompt {
        /// Prompt text
        #[arg(default_value = "Test message from relay-probe")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().no_proxy().build()?;
    let endpoint = format!("{}{}", cli.url.trim_end_matches('/'), PROMPT_PATH);

    match cli.command {
        Commands::Status => {
            let status = probe_status(&client, &endpoint).await;
            println!("{}: {}", endpoint, status);
        }
        Commands::Prompt { text } => {
            println!("Sending test request to {}...", endpoint);
            let reply = match send_prompt(&client, &endpoint, &text).await {
                Ok(reply) => reply,
                Err(e) => {
                    eprintln!("Problem with request: {}", e);
                    eprintln!("API connection failed");
                    std::process::exit(1);
                }
            };

            println!("STATUS: {}", reply.status);
            match &reply.body {
                PromptBody::Json(value) => println!("{}", serde_json::to_string_pretty(value)?),
                PromptBody::Text(text) => println!("{}", text),
            }

            if reply.status.is_success() {
                println!("API is working correctly");
            } else {
                eprintln!("API returned an error status code");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
