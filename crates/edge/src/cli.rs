// crates/edge/src/cli.rs

use crate::router;
use crate::state::AppState;
use crate::store;
use crate::Error;
use axum::Router;
use chrono::Utc;
use clap::{builder::ValueHint, Parser, Subcommand};
use domain::setting::Settings;
use serve::render::Renderer;
use serve::store::ContentStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, Error>;

/// zettel CLI entry point.
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(start) => do_start(start).await,
    };

    result.map_or_else(
        |e| {
            error!("Failed to start zettel: {}", e);
            ExitCode::FAILURE
        },
        |_| {
            info!("zettel stopped");
            ExitCode::SUCCESS
        },
    )
}

#[tracing::instrument(skip_all)]
async fn do_start(start: StartCmd) -> Result<()> {
    // parse settings file -> does the settings file exist? If yes, parse it
    let then = Utc::now();
    let process = StartProcess::<CommandIssued>::parse_settings_file(start)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // open the content stores (primary + optional mirror)
    let then = Utc::now();
    let process = process.open_stores().await?;
    info!(
        "Stores opened in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // load the renderer; the syntax set makes this the slow stage
    let then = Utc::now();
    let process = process.load_renderer();
    info!(
        "Renderer loaded in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // build the router
    let then = Utc::now();
    let process = process.build_router();
    info!(
        "Router built in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    // serve until shutdown
    process.serve().await
}

#[derive(Parser, Debug)]
#[command(name = "zettel", version, about = "zettel notes server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start serving notes from the specified directory
    Start(StartCmd),
}

#[derive(Parser, Debug)]
pub struct StartCmd {
    /// Target directory (or set ZETTEL_DIR)
    ///
    /// Must exist, be a directory, and contain `settings.toml`.
    #[arg(
        value_name = "DIR",
        env = "ZETTEL_DIR",
        required = true,
        value_hint = ValueHint::DirPath,
        value_parser = dir_must_exist
    )]
    pub dir: PathBuf,
}

fn dir_must_exist(s: &str) -> std::result::Result<PathBuf, String> {
    let p = PathBuf::from(s);
    if !p.exists() {
        return Err(format!("Not found: {}", p.display()));
    }
    if !p.is_dir() {
        return Err(format!("Not a directory: {}", p.display()));
    }
    Ok(p)
}

// ─────────────────────────────────────────────────────────────────────────────
// Start process state machine
// ─────────────────────────────────────────────────────────────────────────────

trait ProcessState {}

struct CommandIssued;

struct SettingsLoaded {
    command: StartCmd,
    settings: Settings,
}

struct StoresOpened {
    settings: Settings,
    store: Arc<dyn ContentStore>,
    mirror: Option<Arc<dyn ContentStore>>,
}

struct RendererLoaded {
    settings: Settings,
    store: Arc<dyn ContentStore>,
    mirror: Option<Arc<dyn ContentStore>>,
    renderer: Renderer,
}

struct RouterCreated {
    settings: Settings,
    router: Router,
}

impl ProcessState for CommandIssued {}
impl ProcessState for SettingsLoaded {}
impl ProcessState for StoresOpened {}
impl ProcessState for RendererLoaded {}
impl ProcessState for RouterCreated {}

struct StartProcess<S: ProcessState> {
    state: S,
}

impl StartProcess<CommandIssued> {
    /// Load settings from `<dir>/settings.toml`.
    ///
    /// `dir` is the directory that contains `settings.toml`.
    #[tracing::instrument(skip_all)]
    fn parse_settings_file(command: StartCmd) -> Result<StartProcess<SettingsLoaded>> {
        let mut path = command.dir.clone();
        path.push("settings.toml");

        if !path.exists() {
            return Err(Error::Config(format!(
                "settings.toml not found at {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|err| Error::Config(format!("Failed reading {}: {}", path.display(), err)))?;

        let settings: Settings = toml::from_str(&text).map_err(|err| {
            Error::Config(format!(
                "Invalid settings.toml at {}: {}",
                path.display(),
                err
            ))
        })?;

        Ok(StartProcess {
            state: SettingsLoaded { command, settings },
        })
    }
}

impl StartProcess<SettingsLoaded> {
    #[tracing::instrument(skip_all)]
    async fn open_stores(self) -> Result<StartProcess<StoresOpened>> {
        let store =
            store::from_settings(&self.state.command.dir, &self.state.settings.store).await?;
        let mirror = store::mirror_from_settings(self.state.settings.mirror.as_ref());

        Ok(StartProcess {
            state: StoresOpened {
                settings: self.state.settings,
                store,
                mirror,
            },
        })
    }
}

impl StartProcess<StoresOpened> {
    #[tracing::instrument(skip_all)]
    fn load_renderer(self) -> StartProcess<RendererLoaded> {
        StartProcess {
            state: RendererLoaded {
                settings: self.state.settings,
                store: self.state.store,
                mirror: self.state.mirror,
                renderer: Renderer::new(),
            },
        }
    }
}

impl StartProcess<RendererLoaded> {
    #[tracing::instrument(skip_all)]
    fn build_router(self) -> StartProcess<RouterCreated> {
        let settings = self.state.settings;
        let app = AppState::new(
            settings.clone(),
            self.state.store,
            self.state.mirror,
            self.state.renderer,
        );

        StartProcess {
            state: RouterCreated {
                settings,
                router: router::build_router(app),
            },
        }
    }
}

impl StartProcess<RouterCreated> {
    #[tracing::instrument(skip_all)]
    async fn serve(self) -> Result<()> {
        let addr = SocketAddr::new(self.state.settings.serve.ip, self.state.settings.serve.port);
        let listener = TcpListener::bind(addr).await?;
        let local = listener.local_addr()?;
        info!("listening on http://{local}");

        axum::serve(listener, self.state.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("shutdown signal error: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::setting::StoreSettings;

    const SETTINGS: &str = r#"
[site]
name = "Notes"
fallback_domain = "notes.example"

[store]
kind = "fs"
root = "content"

[mirror]
base_url = "https://pub.notes.example"

[serve]
ip = "127.0.0.1"
port = 8080
"#;

    #[test]
    fn settings_toml_parses() {
        let settings: Settings = toml::from_str(SETTINGS).unwrap();
        assert_eq!(settings.site.name, "Notes");
        assert_eq!(settings.site.preview_suffix, ".pages.dev");
        assert!(matches!(settings.store, StoreSettings::Fs { .. }));
        assert_eq!(settings.serve.port, 8080);
        assert_eq!(
            settings.mirror.unwrap().base_url,
            "https://pub.notes.example"
        );
    }

    #[test]
    fn memory_store_kind_parses() {
        let text = SETTINGS.replace("kind = \"fs\"\nroot = \"content\"", "kind = \"memory\"");
        let settings: Settings = toml::from_str(&text).unwrap();
        assert!(matches!(settings.store, StoreSettings::Memory));
    }

    #[test]
    fn dir_must_exist_rejects_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(dir_must_exist(dir.path().to_str().unwrap()).is_ok());
        assert!(dir_must_exist(file.to_str().unwrap()).is_err());
        assert!(dir_must_exist("/definitely/not/here").is_err());
    }
}
