//! sel2pw
//!
//! Command-line front end for the Selenium → Playwright converter.
//!
//! ```text
//! sel2pw convert [--strategy deterministic|generative] [--model M]
//!                [--timeout SECS] [--save NAME] [FILE]
//! sel2pw serve
//! ```

use anyhow::{bail, Context, Result};
use std::io::{self, Read};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sel2pw::server::{run_server, AppState};
use sel2pw::{ConversionEngine, ConversionRequest, EngineConfig, OutputStore, Strategy};

const USAGE: &str = "\
Usage:
  sel2pw convert [--strategy deterministic|generative] [--model M] [--timeout SECS] [--save NAME] [FILE]
  sel2pw serve

Reads Selenium Java from FILE (or stdin) and prints Playwright TypeScript.
--save writes the result as NAME inside SEL2PW_OUTPUT_DIR instead.
Configuration: SEL2PW_OLLAMA_URL, SEL2PW_MODEL, SEL2PW_TIMEOUT_SECS,
SEL2PW_STRIP_NARRATION, SEL2PW_OUTPUT_DIR, SEL2PW_BIND.";

// ──────────────────────────────────────────────────────────────────────────────
// ARGUMENTS
// ──────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ConvertArgs {
    strategy: Strategy,
    model: Option<String>,
    timeout: Option<Duration>,
    save: Option<String>,
    input: Option<String>,
}

fn parse_convert_args(args: &[String]) -> Result<ConvertArgs> {
    let mut parsed = ConvertArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .with_context(|| format!("{} requires a value", flag))
        };
        match arg.as_str() {
            "--strategy" | "-s" => {
                parsed.strategy = value(arg.as_str())?.parse().map_err(anyhow::Error::msg)?;
            }
            "--model" | "-m" => parsed.model = Some(value(arg.as_str())?),
            "--timeout" => {
                let secs: u64 = value(arg.as_str())?.parse().context("--timeout expects whole seconds")?;
                parsed.timeout = Some(Duration::from_secs(secs));
            }
            "--save" => parsed.save = Some(value(arg.as_str())?),
            flag if flag.starts_with('-') && flag != "-" => bail!("unknown option '{}'\n\n{}", flag, USAGE),
            path => {
                if parsed.input.replace(path.to_string()).is_some() {
                    bail!("only one input file may be given");
                }
            }
        }
    }

    Ok(parsed)
}

fn read_source(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) if path != "-" => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// COMMANDS
// ──────────────────────────────────────────────────────────────────────────────

async fn convert(config: &EngineConfig, args: &[String]) -> Result<()> {
    let args = parse_convert_args(args)?;
    let source = read_source(args.input.as_deref())?;

    let mut request = ConversionRequest {
        source_text: source,
        strategy: args.strategy,
        model: None,
        timeout: args.timeout,
    };
    if let Some(model) = args.model {
        request = request.with_model(model);
    }

    let engine = ConversionEngine::from_config(config);
    let output = engine.convert(&request).await?;

    match args.save {
        Some(filename) => {
            let store = OutputStore::new(config.output_dir.clone());
            let path = store.save(&filename, &output.output_text).await?;
            println!("Saved to {}", path.display());
        }
        None => println!("{}", output.output_text),
    }
    Ok(())
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so converted code on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sel2pw=info,tower_http=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = EngineConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("convert") => convert(&config, &args[1..]).await,
        Some("serve") => {
            info!(
                "Generative backend: {} (default model {})",
                config.ollama_url, config.default_model
            );
            run_server(AppState::from_config(&config), &config.bind_addr).await
        }
        Some("-h") | Some("--help") | Some("help") => {
            println!("{}", USAGE);
            Ok(())
        }
        _ => bail!("{}", USAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_convert_args() {
        let parsed = parse_convert_args(&args(&["-s", "generative", "--model", "codellama", "--timeout", "5", "Login.java"])).unwrap();
        assert_eq!(parsed.strategy, Strategy::Generative);
        assert_eq!(parsed.model.as_deref(), Some("codellama"));
        assert_eq!(parsed.timeout, Some(Duration::from_secs(5)));
        assert_eq!(parsed.input.as_deref(), Some("Login.java"));
    }

    #[test]
    fn test_parse_convert_args_save_name() {
        let parsed = parse_convert_args(&args(&["--save", "LoginTest.spec.ts", "-"])).unwrap();
        assert_eq!(parsed.save.as_deref(), Some("LoginTest.spec.ts"));
        assert_eq!(parsed.input.as_deref(), Some("-"));
        assert!(parse_convert_args(&args(&["--out", "x.ts"])).is_err());
    }

    #[test]
    fn test_parse_convert_args_defaults_to_deterministic() {
        let parsed = parse_convert_args(&[]).unwrap();
        assert_eq!(parsed.strategy, Strategy::Deterministic);
        assert!(parsed.input.is_none());
    }

    #[test]
    fn test_parse_convert_args_rejects_unknown_flag() {
        assert!(parse_convert_args(&args(&["--fast"])).is_err());
        assert!(parse_convert_args(&args(&["--model"])).is_err());
        assert!(parse_convert_args(&args(&["a.java", "b.java"])).is_err());
    }
}
