//! Send one prompt to the configured Ollama server.
//!
//! Run with: cargo run -p ollama-brain --example test_chat
//! Or with a custom prompt: cargo run -p ollama-brain --example test_chat -- "Your prompt"
//!
//! Reads OLLAMA_HOST, OLLAMA_MODEL and OLLAMA_TEMPERATURE from the environment or .env.

use ollama_brain::{ChatMessage, OllamaBrain, TextGenerator};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let prompt = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Suggest one evening activity in Da Nang in two sentences.".to_string()
    };

    let brain = OllamaBrain::from_env()?;
    println!("Host: {}", brain.config().host);
    println!("Model: {}", brain.config().model);
    println!("Sending: \"{}\"\n", prompt);

    match brain.generate(&[ChatMessage::user(prompt)]).await {
        Ok(reply) => println!("=== Response ===\n{}\n================", reply),
        Err(err) => println!("{}", err.inline()),
    }

    Ok(())
}
