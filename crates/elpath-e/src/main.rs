use clap::Parser as ClapParser;
use elpath_e::WebDriverClient;
use elpath_engine::config::loader::ConfigLoader;
use elpath_engine::definitions::DefinitionLoader;
use elpath_engine::{PathResolver, ResolveError, ResolverOptions};
use std::path::PathBuf;
use tracing::{error, info};

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the WebDriver server. Falls back to the config file, then localhost:4444.
    #[arg(short, long)]
    webdriver_url: Option<String>,

    /// Config file. Defaults to ./elpath.yaml or ~/.elpath/config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Definition tree (YAML)
    #[arg(short, long)]
    definitions: Option<PathBuf>,

    /// Page to open before resolving. Without it the session's current page is used.
    #[arg(short, long)]
    url: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Locator paths, e.g. "#2 of list > title"
    #[arg(required = true)]
    paths: Vec<String>,
}

/// Driver failures are prefixed with their error code.
fn describe(err: &ResolveError) -> String {
    match err {
        ResolveError::Driver(driver) => format!("[{}] {}", driver.code(), driver),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from(path).await?,
        None => ConfigLoader::load_default().await?,
    };

    let Some(definitions) = args.definitions.or_else(|| config.definitions.clone()) else {
        error!("No definition file given. Pass --definitions or set `definitions` in the config.");
        std::process::exit(1);
    };
    let registry = DefinitionLoader::load_from(&definitions).await?;
    info!("Loaded {} definitions from {}", registry.len(), definitions.display());

    let webdriver_url = args
        .webdriver_url
        .or_else(|| config.webdriver_url.clone())
        .unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string());
    let client = WebDriverClient::connect(&webdriver_url, None).await?;
    if let Some(url) = &args.url
        && let Err(e) = client.goto(url).await
    {
        error!("{}", e);
        client.close().await?;
        std::process::exit(1);
    }

    let resolver =
        PathResolver::new(client, registry).with_options(ResolverOptions::from_config(&config));

    let mut failed = false;
    for path in &args.paths {
        match resolver.text_of(path).await {
            Ok(texts) => {
                println!("{}:", path);
                for text in texts {
                    println!("  {}", text);
                }
            }
            Err(e) => {
                error!("{}: {}", path, describe(&e));
                failed = true;
            }
        }
    }

    resolver.into_driver().close().await?;
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elpath_engine::DriverError;

    #[test]
    fn test_describe_driver_error_with_code() {
        let err = ResolveError::Driver(DriverError::StaleElement("node 6".into()));
        assert_eq!(
            describe(&err),
            "[STALE_ELEMENT] Element is stale (removed from DOM): node 6"
        );
    }

    #[test]
    fn test_describe_other_errors_plain() {
        let err = ResolveError::NoMatch {
            filter: "#Fourth".into(),
        };
        assert_eq!(describe(&err), "No element matches #Fourth");
    }
}
