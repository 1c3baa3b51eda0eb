//! # AccessGrid CLI
//!
//! Command-line utilities for signing, debugging and calling the AccessGrid API.

use accessgrid_client::core::{build_payload, sign, HttpMethod, SecretKey};
use accessgrid_client::encoding::{decode_query_component, encode_query_component};
use accessgrid_client::models::{AccessPassState, ListKeysRequest};
use accessgrid_client::AccessGridClient;
use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "sign" => {
            let payload = required(&args, 2, "sign <payload>");
            let secret = env::var("ACCESSGRID_SECRET_KEY")
                .context("ACCESSGRID_SECRET_KEY is not set")?;
            println!("{}", sign(payload, &SecretKey::new(secret)));
        }
        "payload" => {
            let usage = "payload <METHOD> <path> [json-body]";
            let method: HttpMethod = required(&args, 2, usage)
                .to_ascii_uppercase()
                .parse()
                .context("Invalid method")?;
            let path = required(&args, 3, usage);
            let body = args.get(4).map(String::as_str);

            let payload = build_payload(method, path, body);
            println!("payload:     {}", payload.as_str());
            if let Some(mirror) = payload.sig_payload() {
                println!("sig_payload: {mirror}");
                println!("encoded:     {}", encode_query_component(mirror));
            }
        }
        "decode" => {
            let encoded = required(&args, 2, "decode <query-value>");
            let decoded = decode_query_component(encoded).context("Failed to decode")?;
            println!("{decoded}");
        }
        "list-cards" => {
            let usage = "list-cards <template-id> [state]";
            let mut request = ListKeysRequest::for_template(required(&args, 2, usage));
            if let Some(state) = args.get(3) {
                let state: AccessPassState = state.parse().context("Invalid state")?;
                request = request.with_state(state);
            }
            let cards = client()?.access_cards().list(&request).await?;
            tracing::info!(count = cards.len(), "Listed cards");
            print_json(&cards)?;
        }
        "get-card" => {
            let card_id = required(&args, 2, "get-card <card-id>");
            let card = client()?.access_cards().get(card_id).await?;
            print_json(&card)?;
        }
        action @ ("suspend" | "resume" | "unlink" | "delete") => {
            let card_id = required(&args, 2, &format!("{action} <card-id>"));
            let client = client()?;
            let cards = client.access_cards();
            let card = match action {
                "suspend" => cards.suspend(card_id).await,
                "resume" => cards.resume(card_id).await,
                "unlink" => cards.unlink(card_id).await,
                _ => cards.delete(card_id).await,
            }
            .with_context(|| format!("Failed to {action} card {card_id}"))?;
            tracing::info!(card_id, action, "Card updated");
            print_json(&card)?;
        }
        "read-template" => {
            let template_id = required(&args, 2, "read-template <template-id>");
            let template = client()?.console().read_template(template_id).await?;
            print_json(&template)?;
        }
        "event-log" => {
            let template_id = required(&args, 2, "event-log <template-id>");
            let events = client()?.console().event_log(template_id, None).await?;
            print_json(&events)?;
        }
        "help" | "--help" | "-h" => {
            print_help();
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn required<'a>(args: &'a [String], index: usize, usage: &str) -> &'a str {
    match args.get(index) {
        Some(arg) => arg,
        None => {
            eprintln!("Usage: accessgrid {usage}");
            std::process::exit(1);
        }
    }
}

fn client() -> Result<AccessGridClient> {
    AccessGridClient::from_env().context("Failed to configure client from ACCESSGRID_* variables")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_help() {
    println!(
        r#"AccessGrid CLI

USAGE:
    accessgrid <COMMAND> [ARGS]

COMMANDS:
    sign <payload>                        Sign a payload with ACCESSGRID_SECRET_KEY
    payload <METHOD> <path> [json-body]   Show the canonical payload for a request
    decode <query-value>                  Percent-decode a query value, e.g. sig_payload
    list-cards <template-id> [state]      List cards issued from a template
    get-card <card-id>                    Show one card
    suspend|resume|unlink|delete <id>     Change a card's state
    read-template <template-id>           Show a card template
    event-log <template-id>               Show a template's event log
    help                                  Show this help message

ENVIRONMENT:
    ACCESSGRID_ACCOUNT_ID, ACCESSGRID_SECRET_KEY   Credentials
    ACCESSGRID_BASE_URL                            API endpoint (optional)
    ACCESSGRID_TIMEOUT_SECS                        Request timeout (optional)
    ACCESSGRID_CA_CERT                             Extra CA certificate, PEM (optional)
    RUST_LOG                                       Log filter (default: info)

EXAMPLES:
    accessgrid payload POST /v1/key-cards/abc123/suspend
    accessgrid sign '{{}}'
    accessgrid decode '%7B%22id%22%3A%20%22abc123%22%7D'
    accessgrid list-cards 0xd3adb00b5 active
"#
    );
}
