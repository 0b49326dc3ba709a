use clap::{Parser, Subcommand};

const DEFAULT_PUSH_URL: &str = "http://localhost:80/message-push";

#[derive(Parser)]
#[command(name = "msgpush")]
#[command(about = "Message push responder CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Run the gateway serving POST /message-push.
    Gateway {
        /// Config file path (default: MSGPUSH_CONFIG_PATH or ~/.msgpush/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// HTTP port (default from config or 80)
        #[arg(long, short)]
        port: Option<u16>,

        /// Bind address (default from config or 127.0.0.1)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Send one sample message to a running gateway and print the reply.
    Push {
        /// Endpoint to POST to.
        #[arg(long, default_value = DEFAULT_PUSH_URL)]
        url: String,

        /// MsgType of the sample message (text, image, voice, video, location, link, ...).
        #[arg(long, default_value = "text")]
        msg_type: String,

        /// Content of the sample message.
        #[arg(long, default_value = "Hello World")]
        content: String,

        /// ToUserName (the official account).
        #[arg(long, default_value = "gh_1234567890")]
        to_user: String,

        /// FromUserName (the sender).
        #[arg(long, default_value = "o_abcdefghijklmnop")]
        from_user: String,

        /// MsgId of the sample message.
        #[arg(long, default_value_t = 12345678901234567)]
        msg_id: i64,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("msgpush {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Gateway { config, port, bind }) => {
            if let Err(e) = run_gateway(config, port, bind).await {
                log::error!("gateway failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Push {
            url,
            msg_type,
            content,
            to_user,
            from_user,
            msg_id,
        }) => {
            let message = serde_json::json!({
                "ToUserName": to_user,
                "FromUserName": from_user,
                "CreateTime": 1640995200,
                "MsgType": msg_type,
                "Content": content,
                "MsgId": msg_id,
            });
            if let Err(e) = run_push(&url, &message).await {
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

async fn run_gateway(
    config_path: Option<std::path::PathBuf>,
    port: Option<u16>,
    bind: Option<String>,
) -> anyhow::Result<()> {
    let (mut config, path) = lib::config::load_config(config_path)?;
    log::debug!("using config {}", path.display());
    if let Some(p) = port {
        config.gateway.port = p;
    }
    if let Some(b) = bind {
        config.gateway.bind = b;
    }
    log::info!("starting gateway on {}", config.gateway.bind_addr());
    lib::gateway::run_gateway(config).await
}

/// POST the message as JSON and print the status line and body.
async fn run_push(url: &str, message: &serde_json::Value) -> anyhow::Result<()> {
    let (status, text) = send_push(url, message).await?;
    println!("Response Status: {}", status);
    println!("Response Body:\n{}", text);
    Ok(())
}

async fn send_push(
    url: &str,
    message: &serde_json::Value,
) -> anyhow::Result<(reqwest::StatusCode, String)> {
    use anyhow::Context;

    let resp = reqwest::Client::new()
        .post(url)
        .json(message)
        .send()
        .await
        .context("Error sending request")?;

    let status = resp.status();
    let text = resp.text().await.context("Error reading response")?;
    Ok((status, text))
}
