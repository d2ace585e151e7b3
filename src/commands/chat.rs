use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use llm_console::{
    api::BackendClient, config::Config, error::ClientError, stream::GenerationStream,
};

struct ChatMessage {
    role: &'static str,
    text: String,
}

pub async fn execute(cfg: &Config, model: Option<String>) -> Result<()> {
    let client = BackendClient::new(&cfg.backend);

    // Confirm the model exists before entering the loop, and surface the
    // available ones when it does not.
    let configs = client.get_model_configs().await?;
    let model = match super::resolve_model(cfg, model) {
        Ok(m) => m,
        Err(e) => {
            let mut names: Vec<_> = configs.keys().cloned().collect();
            names.sort();
            anyhow::bail!("{e}; available models: {}", names.join(", "));
        }
    };
    if !configs.contains_key(&model) {
        let mut names: Vec<_> = configs.keys().cloned().collect();
        names.sort();
        anyhow::bail!(
            "model '{}' is not configured; available models: {}",
            model,
            names.join(", ")
        );
    }

    println!(
        "{} model {} — empty line or Ctrl-D to leave",
        "Chat session".bold(),
        model.green()
    );

    let mut transcript: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", ">".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let prompt = line.trim();
        if prompt.is_empty() {
            break;
        }

        transcript.push(ChatMessage {
            role: "user",
            text: prompt.to_string(),
        });

        match stream_reply(&client, &model, prompt).await {
            Ok(reply) => {
                transcript.push(ChatMessage {
                    role: "assistant",
                    text: reply,
                });
            }
            Err(ClientError::StreamInterrupted { partial, message }) => {
                // Keep whatever arrived before the failure in the transcript
                println!();
                eprintln!("{} {}", "stream interrupted:".red(), message);
                transcript.push(ChatMessage {
                    role: "assistant",
                    text: partial,
                });
            }
            Err(e) => {
                eprintln!("{} {}", "generation failed:".red(), e);
            }
        }
    }

    info!(messages = transcript.len(), "chat session ended");
    Ok(())
}

/// Stream one reply, rendering the new text of every update as it arrives.
async fn stream_reply(
    client: &BackendClient,
    model: &str,
    prompt: &str,
) -> Result<String, ClientError> {
    let response = client.stream_generate(model, prompt).await?;
    let mut stream = GenerationStream::spawn(response);

    // Updates are cumulative; printing only the suffix past what was
    // already shown turns them back into deltas.
    let mut printed = 0;
    while let Some(cumulative) = stream.updates.recv().await {
        print!("{}", &cumulative[printed..]);
        let _ = std::io::stdout().flush();
        printed = cumulative.len();
    }

    let full = stream.finish().await?;
    println!();
    Ok(full)
}
