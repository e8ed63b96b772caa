//! Simple test for a single Gemini generateContent round trip.
//!
//! Run with: cargo run -p gemini-transport --example test_chat
//! Or with a custom message: cargo run -p gemini-transport --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key for authentication

use gemini_transport::{build_request, extract, GeminiTransport, RequestMode, Transport, Turn};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Get message from command line args or use default
    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hello! Please respond with a short greeting.".to_string()
    };

    println!("Initializing GeminiTransport...");
    let transport = GeminiTransport::from_env()?;

    println!("Transport initialized: {}", transport.name());
    println!("Endpoint: {}", transport.config().endpoint_url());
    println!();

    let history = vec![Turn::assistant(
        "Hello! I'm your AI writing assistant. Ask me anything! 🚀",
    )];
    let request = build_request(RequestMode::Conversational { history: &history }, &message_text);

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    let response = transport.send(&request).await?;

    println!("=== Response ===");
    match extract(&response) {
        Ok(text) => println!("{}", text),
        Err(failure) => println!("⚠️ {}", failure),
    }
    println!("================");

    Ok(())
}
