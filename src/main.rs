use anyhow::Context;
use clap::Parser;
use praga_client::config::cli::{Command, EmailCommand};
use praga_client::utils::logger::{self, LogFormat};
use praga_client::{AppState, CliConfig, ClientError, HttpApiClient};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(cli.verbose, format);

    let exit_code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("❌ {:#}", e);
            if let Some(client_error) = e.downcast_ref::<ClientError>() {
                eprintln!("💡 {}", client_error.recovery_suggestion());
            }
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &CliConfig) -> anyhow::Result<i32> {
    let settings = cli.settings()?;
    tracing::debug!("Client settings: {:?}", settings);

    let client = Arc::new(HttpApiClient::new(&settings)?);
    let state = AppState::new(client.clone());

    match &cli.command {
        Command::Config => {
            state.refresh_config().await?;
            let config = state.config().get();
            if cli.json {
                print_json(&config)?;
            } else if let Some(config) = config {
                println!("Title:   {}", config.title);
                println!("Brand:   {}", config.brand);
                println!("Support: {}", config.support);
            }
            Ok(0)
        }
        Command::VerifyToken => {
            let valid = state.client().verify_token().await?;
            if cli.json {
                print_json(&serde_json::json!({ "valid": valid }))?;
            } else if valid {
                println!("✅ Session is valid");
            } else {
                println!("❌ Session is not valid");
            }
            Ok(if valid { 0 } else { 1 })
        }
        Command::Email {
            action: EmailCommand::Send { email },
        } => {
            state.client().email_send(email).await?;
            if cli.json {
                print_json(&sent_report())?;
            } else {
                // The backend answers the same way for unknown addresses.
                println!("📧 If {} may sign in, a code is on its way", email);
            }
            Ok(0)
        }
        Command::Email {
            action: EmailCommand::Verify { email, code },
        } => {
            let accepted = verify(&state, &client, email, code, cli.json).await?;
            Ok(if accepted { 0 } else { 1 })
        }
        Command::Login { email, code } => {
            state.verified().subscribe(|verified| {
                if *verified {
                    tracing::info!("✅ Verified");
                }
            });

            state.refresh_config().await?;
            if let Some(config) = state.config().get() {
                eprintln!("🔐 {} ({})", config.title, config.brand);
            }

            state.client().email_send(email).await?;

            let code = match code {
                Some(code) => code.clone(),
                None => prompt_code(email)?,
            };

            let accepted = verify(&state, &client, email, &code, cli.json).await?;
            if !accepted {
                if let Some(config) = state.config().get() {
                    eprintln!("💡 Still stuck? Contact {}", config.support);
                }
            }
            Ok(if accepted { 0 } else { 1 })
        }
    }
}

async fn verify(
    state: &AppState,
    client: &HttpApiClient,
    email: &str,
    code: &str,
    json: bool,
) -> anyhow::Result<bool> {
    let accepted = state.client().email_verify(email, code).await?;
    if accepted {
        state.verified().set(true);
    }

    let session = client.session_cookie();
    if json {
        print_json(&serde_json::json!({
            "verified": accepted,
            "session_token": session,
        }))?;
    } else if accepted {
        println!("✅ Code accepted");
        if let Some(token) = session {
            println!("PRAGA_SESSION_TOKEN={}", token);
        }
    } else {
        println!("❌ Code rejected");
    }
    Ok(accepted)
}

fn prompt_code(email: &str) -> anyhow::Result<String> {
    eprint!("Enter the code sent to {}: ", email);
    std::io::stderr().flush().context("Failed to write prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read code from stdin")?;

    // Codes are issued in upper case.
    Ok(line.trim().to_uppercase())
}

fn exit_code_for(e: &anyhow::Error) -> i32 {
    e.downcast_ref::<ClientError>()
        .map(ClientError::exit_code)
        .unwrap_or(2)
}

fn sent_report() -> serde_json::Value {
    serde_json::json!({ "sent": true })
}

fn print_json<T: Serialize>(value: &T) -> praga_client::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
