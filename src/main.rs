use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use log::info;

use webgl_loader_args::{resolve, EngineArguments, ResolvedArguments};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;
    let json = fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read arguments file {}", options.path))?;
    let arguments = EngineArguments::from_json_str(&json)
        .with_context(|| format!("failed to parse {}", options.path))?;
    let resolved = resolve(&arguments).context("arguments are incomplete")?;
    info!("loaded engine arguments from {}", options.path);

    if options.print_json {
        println!("{}", arguments.to_json_string()?);
    } else {
        print_summary(&resolved);
    }

    for url in &options.cache_urls {
        println!("cache {url}: {}", resolved.cache_mode(url));
    }
    Ok(())
}

fn print_summary(resolved: &ResolvedArguments) {
    println!("Data: {}", resolved.data_url);
    println!("Framework: {}", resolved.framework_url);
    println!("Code: {}", resolved.code_url);
    println!("Streaming assets: {}", resolved.streaming_assets_url);
    if !resolved.memory_url.is_empty() {
        println!("Memory: {}", resolved.memory_url);
    }
    if !resolved.symbols_url.is_empty() {
        println!("Symbols: {}", resolved.symbols_url);
    }
    println!(
        "Product: {} / {} {}",
        resolved.company_name, resolved.product_name, resolved.product_version
    );
    println!("Device pixel ratio: {}", resolved.device_pixel_ratio);
    println!(
        "Match WebGL to canvas size: {}",
        resolved.match_webgl_to_canvas_size
    );
    println!(
        "Disabled canvas events: {}",
        resolved.disabled_canvas_events.join(", ")
    );
}

struct CliOptions {
    path: String,
    print_json: bool,
    cache_urls: Vec<String>,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let Some(path) = args.next() else {
            return Err(anyhow!(
                "Usage: webgl-loader-args <arguments.json> [--json] [--cache-policy <url>]..."
            ));
        };
        let mut print_json = false;
        let mut cache_urls = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => print_json = true,
                "--cache-policy" => {
                    let url = args
                        .next()
                        .ok_or_else(|| anyhow!("--cache-policy expects a URL"))?;
                    cache_urls.push(url);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --json or --cache-policy <url>"
                    ));
                }
            }
        }
        Ok(Self {
            path,
            print_json,
            cache_urls,
        })
    }
}
