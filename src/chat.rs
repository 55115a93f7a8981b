// Interactive terminal chat session against a running relay server.
// The browser page in templates/ drives the same state machine in JS; this
// module is the terminal rendering of it.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use crate::session::{ChatSession, Message, Origin};

/// Posts one message to the relay and extracts the reply text. Any failure
/// (transport, status, shape) collapses to `None` so the session settles
/// with the fallback.
async fn request_reply(client: &Client, relay_url: &str, message: &str) -> Option<String> {
    let api_url = format!("{}/api/chat", relay_url.trim_end_matches('/'));

    let result = client
        .post(&api_url)
        .json(&json!({ "message": message }))
        .send()
        .await;

    let response = match result {
        Ok(resp) => resp,
        Err(e) => {
            debug!("Relay request failed: {}", e);
            return None;
        }
    };

    // The relay puts displayable text in `response` on both 200 and 500
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("response")
            .and_then(|r| r.as_str())
            .map(|r| r.to_string()),
        Err(e) => {
            debug!("Failed to parse relay response: {}", e);
            None
        }
    }
}

fn format_message(message: &Message) -> String {
    let who = match message.origin {
        Origin::User => "you",
        Origin::System => "assistant",
    };
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%H:%M:%S"),
        who,
        message.text
    )
}

fn render(message: &Message) {
    println!("{}", format_message(message));
}

pub async fn run_chat(relay_url: &str) -> Result<()> {
    info!("Starting chat session against {}", relay_url);

    let client = Client::new();
    let mut session = ChatSession::new();

    println!("Connected to {} (type /quit to exit)", relay_url);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?
            == 0
        {
            break; // EOF
        }

        if line.trim() == "/quit" {
            break;
        }

        session.set_input(line);
        let Some(text) = session.submit() else {
            // Empty input; nothing to send
            continue;
        };

        // Echo the optimistic user entry with its origin tag
        if let Some(message) = session.messages().last() {
            render(message);
        }

        println!("assistant is typing...");
        let reply = request_reply(&client, relay_url, &text).await;
        session.settle(reply);

        if let Some(message) = session.messages().last() {
            render(message);
        }
    }

    info!("Chat session finished after {} messages", session.messages().len());
    Ok(())
}
