//! Command line front end for the marker.
//!
//! Usage:
//! ```text
//! cargo run --example mark -- mark <solutions.json> <answer.json>   # print the chosen response
//! cargo run --example mark -- generate <answer.json>                # print a matching specification
//! ```
//!
//! `answer.json` is either a sketched graph or an answer envelope (`{"type": "graphChoice",
//! "value": "..."}`). Set `GRAPHMARK_SETTINGS` to a JSON object to override tolerances.

use std::error::Error;
use std::fs;

use graphmark::operations::{GenerateSpec, Mark};
use graphmark::wire::{AnswerEnvelope, AnswerResponse, GraphAnswer, GraphSolutions};
use graphmark::Settings;

fn read_answer(path: &str) -> Result<GraphAnswer, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    if let Ok(envelope) = serde_json::from_str::<AnswerEnvelope>(&text) {
        return Ok(envelope.graph_answer()?);
    }
    Ok(GraphAnswer::from_json(&text)?)
}

fn settings() -> Result<Settings, Box<dyn Error>> {
    match std::env::var("GRAPHMARK_SETTINGS") {
        Ok(json) => Ok(Settings::from_json(&json)?),
        Err(_) => Ok(Settings::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for graphmark.
    // Override with RUST_LOG env var (e.g. RUST_LOG=graphmark=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("graphmark=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = settings()?;
    match args.as_slice() {
        [command, solutions, answer] if command == "mark" => {
            let solutions: GraphSolutions<AnswerResponse> =
                serde_json::from_str(&fs::read_to_string(solutions)?)?;
            let answer = read_answer(answer)?;
            let response = Mark::new(&solutions, &settings).execute(&answer)?;
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        [command, answer] if command == "generate" => {
            let answer = read_answer(answer)?;
            println!("{}", GenerateSpec::new(&settings).execute(&answer));
        }
        _ => {
            eprintln!("usage: mark <solutions.json> <answer.json> | generate <answer.json>");
            std::process::exit(2);
        }
    }
    Ok(())
}
