// src/main.rs - command-line driver for the Souline catalog and timeline client
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};

use souline_client::config::{mask_secret, validate_base_url, ClientConfig};
use souline_client::dtos::resource_dtos::ResourceFields;
use souline_client::dtos::timeline_dtos::{CommentForm, ImageUpload, PostForm};
use souline_client::handlers::catalog_handlers::{CatalogEvent, CatalogHandlers};
use souline_client::handlers::timeline_handlers::{TimelineEvent, TimelineHandlers};
use souline_client::models::post::Post;
use souline_client::models::resource::Level;
use souline_client::repositories::api_client::ApiClient;
use souline_client::services::catalog_services::CatalogService;
use souline_client::services::timeline_services::TimelineService;
use souline_client::services::Outcome;

#[derive(Parser)]
#[command(name = "souline")]
#[command(about = "Souline resource catalog and timeline client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend base URL
    #[arg(long, env = "SOULINE_BASE_URL")]
    base_url: Option<String>,

    /// Raw cookie string (sessionid=..; csrftoken=..)
    #[arg(long, env = "SOULINE_COOKIE", hide_env_values = true)]
    cookie: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Video resource catalog
    Resources {
        #[command(subcommand)]
        action: ResourceCommand,
    },
    /// Social timeline
    Timeline {
        #[command(subcommand)]
        action: TimelineCommand,
    },
}

#[derive(Subcommand)]
enum ResourceCommand {
    /// Fetch and render every resource card
    List,
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        link: String,
        #[arg(long, default_value = "beginner")]
        level: Level,
    },
    /// Replace a resource's fields; an empty title aborts
    Edit {
        id: i64,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        link: String,
        #[arg(long, default_value = "beginner")]
        level: Level,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
enum TimelineCommand {
    Post {
        text: String,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Like {
        id: i64,
    },
    Comment {
        id: i64,
        text: String,
    },
    Edit {
        id: i64,
        text: String,
    },
    Delete {
        id: i64,
        /// Skip the confirmation question
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("loading client configuration")?;
    if let Some(base_url) = cli.base_url {
        let base_url = validate_base_url(&base_url).context("--base-url")?;
        config.base_url = ClientConfig::new(base_url).base_url;
    }
    if let Some(cookie) = cli.cookie {
        config.session_cookie = Some(cookie);
    }

    info!("Souline backend: {}", config.base_url);
    if let Some(ref cookie) = config.session_cookie {
        info!("Session cookie: {}", mask_secret(cookie));
    }

    let api = ApiClient::new(&config).context("building http client")?;

    let outcome = match cli.command {
        Commands::Resources { action } => run_resources(api, action).await?,
        Commands::Timeline { action } => run_timeline(api, action).await?,
    };

    if outcome == Outcome::Failed {
        error!("action failed");
        std::process::exit(1);
    }
    Ok(())
}

async fn run_resources(api: ApiClient, action: ResourceCommand) -> Result<Outcome> {
    let handlers = CatalogHandlers::attach(Arc::new(CatalogService::new(api)));

    let event = match action {
        ResourceCommand::List => CatalogEvent::Load,
        ResourceCommand::Add { title, description, link, level } => CatalogEvent::Add(ResourceFields {
            title,
            description,
            youtube_link: link,
            level,
        }),
        ResourceCommand::Edit { id, title, description, link, level } => CatalogEvent::Edit {
            id,
            fields: ResourceFields { title, description, youtube_link: link, level },
        },
        ResourceCommand::Delete { id } => CatalogEvent::Delete(id),
    };

    let outcome = handlers.handle(event).await;
    println!("{}", handlers.service().render().await);
    Ok(outcome)
}

fn ask(message: &str) -> bool {
    print!("{} [y/N] ", message);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn assume_yes(_: &str) -> bool {
    true
}

async fn run_timeline(api: ApiClient, action: TimelineCommand) -> Result<Outcome> {
    // The CLI has no rendered page, so the target post is seeded as a bare node
    let seed = match action {
        TimelineCommand::Post { .. } => Vec::new(),
        TimelineCommand::Like { id }
        | TimelineCommand::Comment { id, .. }
        | TimelineCommand::Delete { id, .. } => vec![Post::new(id, "")],
        TimelineCommand::Edit { id, .. } => vec![Post::new(id, "").owned()],
    };
    let confirm: fn(&str) -> bool = match action {
        TimelineCommand::Delete { yes: true, .. } => assume_yes,
        _ => ask,
    };
    let handlers = TimelineHandlers::attach(Arc::new(TimelineService::new(api, seed)), confirm);

    let outcome = match action {
        TimelineCommand::Post { text, video_url, image } => {
            let mut form = PostForm::new(text);
            form.video_url = video_url;
            if let Some(path) = image {
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("reading image {}", path.display()))?;
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload".to_string());
                form = form.with_image(ImageUpload { file_name, bytes });
            }
            handlers.handle(TimelineEvent::SubmitPost(form)).await
        }
        TimelineCommand::Like { id } => handlers.handle(TimelineEvent::ToggleLike(id)).await,
        TimelineCommand::Comment { id, text } => {
            handlers.handle(TimelineEvent::SubmitComment(CommentForm::new(id, text))).await
        }
        TimelineCommand::Edit { id, text } => {
            handlers.handle(TimelineEvent::BeginEdit(id)).await;
            handlers.handle(TimelineEvent::EditInput { post_id: id, text }).await;
            handlers.handle(TimelineEvent::SaveEdit(id)).await
        }
        TimelineCommand::Delete { id, .. } => handlers.handle(TimelineEvent::DeletePost(id)).await,
    };

    let service = handlers.service();
    let changes = service.view().await.drain_changes();
    for change in changes {
        if let Some(html) = service.view().await.render_post(change.post_id()) {
            println!("{}", html);
        }
    }
    if let Some(toast) = service.last_toast().await {
        println!("{:?}: {}", toast.kind, toast.message);
    }
    Ok(outcome)
}
