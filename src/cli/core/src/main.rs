/* src/cli/core/src/main.rs */

mod check;
mod serve;
mod site;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "hashpage", about = "hashpage site tooling")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve a site directory over HTTP
  Serve {
    /// Site directory containing index.html and site.toml
    #[arg(short, long, default_value = "site")]
    dir: PathBuf,
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
  },
  /// Load every route from a running server and report broken fragments
  Check {
    /// Base URL of the server
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,
    /// Site directory containing site.toml
    #[arg(short, long, default_value = "site")]
    dir: PathBuf,
  },
  /// Print the route table
  Routes {
    /// Site directory containing site.toml
    #[arg(short, long, default_value = "site")]
    dir: PathBuf,
  },
}

fn print_routes(site: &hashpage_core::Site) {
  let default_key = site.routes.default_key();
  for (key, page) in site.routes.iter() {
    let mut flags = Vec::new();
    if key == default_key {
      flags.push("default");
    }
    if page.form {
      flags.push("form");
    }
    let suffix = if flags.is_empty() { String::new() } else { format!(" [{}]", flags.join(", ")) };
    ui::arrow(&format!("#{key}{suffix}"));
    ui::detail(&format!("{} <- {}", page.title, page.fragment_path));
  }
  ui::detail(&format!("header <- {}", site.header_path));
  ui::detail(&format!("footer <- {}", site.footer_path));
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Serve { dir, port } => {
      ui::banner("serve");
      serve::serve(dir, port).await?;
    }
    Command::Check { url, dir } => {
      ui::banner("check");
      let site = site::load_site(&dir)?;
      debug!(dir = %dir.display(), "site loaded");
      check::run_check(site, &url).await?;
    }
    Command::Routes { dir } => {
      ui::banner("routes");
      let site = site::load_site(&dir)?;
      print_routes(&site);
    }
  }

  Ok(())
}
