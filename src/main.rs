use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ewcrouter::prelude::*;
use ewcrouter::runtime_config::DispatchConfig;
use ewcrouter::telemetry::{init_logging_with_config, LogConfig};
use serde_json::{json, Value};
use std::path::PathBuf;

const DEMO_APP: &str = "demo";

/// Resolve requests against a built-in demo application.
#[derive(Parser)]
#[command(name = "ewcrouter")]
#[command(about = "Embeddable web component dispatcher", long_about = None)]
struct Cli {
    /// Dispatch configuration file (.yaml, .yml or .toml)
    #[arg(short, long, global = true, env = "EWC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path and print the final response as JSON
    Resolve {
        /// Request path, e.g. /posts/show/1
        path: String,

        /// Application root the path is relative to
        #[arg(long)]
        app_root: Option<String>,
    },
    /// List the demo components and their exported actions
    Components,
}

struct Posts;

impl Resource for Posts {
    fn list(&self, _ctx: &RequestContext) -> Result<Vec<Value>> {
        Ok(vec![
            json!({ "id": "1", "title": "Embedding components" }),
            json!({ "id": "2", "title": "Redirects" }),
        ])
    }

    fn fetch(&self, ctx: &RequestContext, id: &str) -> Result<Option<Value>> {
        Ok(self.list(ctx)?.into_iter().find(|p| p["id"] == id))
    }
}

fn demo_registry() -> Result<Registry> {
    Registry::builder()
        .component(
            ComponentDescriptor::builder("home")
                .action("index", 1, |_| {
                    Ok(Ewc::list([
                        Ewc::component("nav", "index", Vec::<String>::new()),
                        Ewc::component("posts", "index", Vec::<String>::new()),
                    ])
                    .into())
                })
                .view("index", |_, inner| {
                    let body = match inner {
                        Output::List(parts) => parts
                            .iter()
                            .filter_map(Output::as_text)
                            .collect::<Vec<_>>()
                            .join("\n"),
                        other => other.as_text().unwrap_or_default().to_string(),
                    };
                    Ok(Output::markup(format!("<html><body>\n{body}\n</body></html>")))
                }),
        )
        .component(
            ComponentDescriptor::builder("nav")
                .private()
                .action("index", 1, |_| Ok(ActionResult::Data(json!(["home", "posts"]))))
                .view("index", |args, out| {
                    let links = match out {
                        Output::Value(Value::Array(items)) => items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(|c| format!("<a href=\"{}/{c}\">{c}</a>", args.ctx.app_root().trim_end_matches('/')))
                            .collect::<String>(),
                        _ => String::new(),
                    };
                    Ok(Output::markup(format!("<nav>{links}</nav>")))
                }),
        )
        .component(
            ComponentDescriptor::builder("posts")
                .scaffold(Posts)
                .view("index", |_, out| {
                    let items = match &out {
                        Output::Value(v) => v["items"]
                            .as_array()
                            .map(|posts| {
                                posts
                                    .iter()
                                    .map(|p| format!("<li>{}</li>", p["title"].as_str().unwrap_or_default()))
                                    .collect::<String>()
                            })
                            .unwrap_or_default(),
                        _ => String::new(),
                    };
                    Ok(Output::markup(format!("<ul>{items}</ul>")))
                }),
        )
        .component(
            ComponentDescriptor::builder("login")
                .action("index", 1, |args| Ok(args.redirect_to("form").into()))
                .action("form", 1, |_| Ok(ActionResult::Data(json!("<form></form>")))),
        )
        .build()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging_with_config(&LogConfig::from_env())?;

    let config = DispatchConfig::load(cli.config.as_deref())?;
    let dispatcher = Dispatcher::new(config);
    dispatcher.publish(DEMO_APP, demo_registry().context("demo registry is invalid")?);

    match cli.command {
        Commands::Resolve { path, app_root } => {
            let mut request = Request::new(DEMO_APP, path);
            if let Some(root) = app_root {
                request = request.with_app_root(root);
            }
            let response = dispatcher.handle(request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Components => {
            let registry = dispatcher.apps().snapshot(DEMO_APP)?;
            for name in registry.component_names() {
                if let Some(component) = registry.lookup(name) {
                    let actions: Vec<String> = component
                        .controller()
                        .exports()
                        .into_iter()
                        .map(|(action, arity)| format!("{action}/{arity}"))
                        .collect();
                    let visibility = if component.is_private() { " (private)" } else { "" };
                    println!("{name}{visibility}: {}", actions.join(", "));
                }
            }
        }
    }

    Ok(())
}
