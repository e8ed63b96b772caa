//! Interactive writing assistant: chat with the AI or ask for suggestions.
//!
//! Run with: cargo run -p orchestrator --example writing_assistant
//!
//! Commands:
//!   <text>              - Chat with the assistant
//!   /suggest <text>     - Ask for a suggestion on <text>
//!   /quit               - Exit
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key for authentication

use std::io::{self, BufRead, Write};

use orchestrator::{DocumentSnapshot, WritingAssistant};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orchestrator=info,gemini_transport=info".into()),
        )
        .init();

    let mut assistant = WritingAssistant::from_env()?;
    info!("Writing assistant ready");

    for turn in assistant.chat.transcript() {
        println!("AI: {}", turn.text());
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line == "/quit" {
            break;
        }

        if let Some(text) = line.strip_prefix("/suggest") {
            let doc = DocumentSnapshot::new(text.trim());
            println!("[{}]", assistant.editor.button_label());
            match assistant.editor.request_suggestion(&doc).await {
                Some(suggestion) => println!("AI Suggestion:\n{}", suggestion),
                None => match assistant.editor.error() {
                    Some(error) => println!("Error: {}", error),
                    None => println!("No output produced"),
                },
            }
            continue;
        }

        if let Some(reply) = assistant.chat.send_message(line).await {
            println!("AI: {}", reply.text());
        }
    }

    Ok(())
}
