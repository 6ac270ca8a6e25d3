use anyhow::{Result, anyhow};
use github_v2::{DEFAULT_BASE_URL, HttpTransport, UserClient};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(clap::Parser, Debug)]
struct Options {
    #[clap(long, env = "GITHUB_V2_LOGIN")]
    login: Option<String>,
    #[clap(long, env = "GITHUB_V2_TOKEN", hide_env_values = true)]
    token: Option<SecretString>,
    #[clap(long, default_value = DEFAULT_BASE_URL)]
    base_url: Url,
    #[clap(subcommand)]
    request: Request,
}

#[derive(clap::Subcommand, Debug)]
enum Request {
    Search {
        username: String,
    },
    Show {
        username: String,
    },
    /// Update user attributes, passed as `key=value` pairs.
    Update {
        username: String,
        attributes: Vec<String>,
    },
    Following {
        username: String,
    },
    Followers {
        username: String,
    },
    Follow {
        username: String,
    },
    Unfollow {
        username: String,
    },
    WatchedRepos {
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    use clap::Parser;

    init_tracing();

    let options = Options::parse();

    let mut transport = HttpTransport::new(Client::new(), options.base_url);
    if let (Some(login), Some(token)) = (options.login, options.token) {
        transport = transport.with_auth(login, token.expose_secret());
    }

    let client = UserClient::new(transport);

    match options.request {
        Request::Search { username } => {
            println!("{:#?}", client.search(&username).await?);
        }
        Request::Show { username } => {
            println!("{:#?}", client.show(&username).await?);
        }
        Request::Update {
            username,
            attributes,
        } => {
            let mut values = Map::new();
            for pair in attributes {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected key=value, got \"{pair}\""))?;
                values.insert(key.into(), Value::String(value.into()));
            }

            println!("{:#?}", client.update(&username, values).await?);
        }
        Request::Following { username } => {
            println!("{:#?}", client.following(&username).await?);
        }
        Request::Followers { username } => {
            println!("{:#?}", client.followers(&username).await?);
        }
        Request::Follow { username } => {
            println!("{:#?}", client.follow(&username).await?);
        }
        Request::Unfollow { username } => {
            println!("{:#?}", client.unfollow(&username).await?);
        }
        Request::WatchedRepos { username } => {
            println!("{:#?}", client.watched_repos(&username).await?);
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();
}
