use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use megaprop::{
    AppConfig, CurrentUser, MegaApp, Message, Store, View,
    core::db::{
        ContractRepository, MaintenanceRepository, PaymentRepository, PropertyRepository,
        ReportRepository, SqliteStorage, TenantRepository, read_backup, write_backup,
    },
    gui::{FormKind, Pacing, Task, ToastLevel},
};

#[derive(Parser)]
#[command(name = "megaprop")]
#[command(about = "Property management: properties, tenants, contracts and payments")]
struct Cli {
    /// SQLite file holding the saved snapshot
    #[arg(long, value_name = "FILE", env = "MEGAPROP_DATA", global = true)]
    data: Option<PathBuf>,

    /// Storage key the snapshot is saved under
    #[arg(long, env = "MEGAPROP_STORAGE_KEY", global = true)]
    key: Option<String>,

    /// Name shown in the greeting and profile
    #[arg(long, env = "MEGAPROP_USER_NAME", global = true)]
    user_name: Option<String>,

    #[arg(long, env = "MEGAPROP_USER_EMAIL", global = true)]
    user_email: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a view as HTML
    Render {
        /// Route of the view, e.g. `properties` or `#contracts`
        #[arg(default_value = "dashboard")]
        view: String,

        /// Only the content region instead of the whole page
        #[arg(long)]
        fragment: bool,
    },
    /// Submit one of the record forms
    New {
        kind: Kind,

        /// Form field as `name=value`; repeatable
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// Print a collection as JSON
    List { collection: Collection },
    /// Write the snapshot as JSON
    Export {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Replace the stored data with a JSON snapshot
    Import { file: PathBuf },
    /// Write a compressed backup archive
    Backup { file: PathBuf },
    /// Replace the stored data with a backup archive
    Restore { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Property,
    Tenant,
    Contract,
}

impl From<Kind> for FormKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Property => FormKind::Property,
            Kind::Tenant => FormKind::Tenant,
            Kind::Contract => FormKind::Contract,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Properties,
    Tenants,
    Contracts,
    Payments,
    Maintenance,
    Reports,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        let mut user = CurrentUser::default();
        if let Some(name) = &self.user_name {
            user.name = name.clone();
        }
        if let Some(email) = &self.user_email {
            user.email = email.clone();
        }
        AppConfig {
            data_file: self.data.clone().unwrap_or(defaults.data_file),
            storage_key: self.key.clone().unwrap_or(defaults.storage_key),
            user,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "megaprop=debug" } else { "megaprop=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = args.config();
    info!(file = %config.data_file.display(), key = %config.storage_key, "opening storage");
    let storage = SqliteStorage::open(&config.data_file).await?;
    let store = Store::open(storage, config.storage_key.clone()).await;
    let mut app = MegaApp::new(store, config.user);

    let result = run(&mut app, args.command).await;
    app.store().storage().close().await?;
    result
}

async fn run(app: &mut MegaApp<SqliteStorage>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Render { view, fragment } => {
            let view = View::from_route(&view);
            app.run_until_idle(Task::done(Message::Navigate(view)), Pacing::Immediate)
                .await;
            let page = if fragment {
                app.render_content()
            } else {
                app.view()
            };
            println!("{}", page.into_string());
        }
        Command::New { kind, fields } => submit(app, kind.into(), &fields).await?,
        Command::List { collection } => {
            let db = app.store().database();
            let json = match collection {
                Collection::Properties => serde_json::to_string_pretty(db.properties())?,
                Collection::Tenants => serde_json::to_string_pretty(db.tenants())?,
                Collection::Contracts => serde_json::to_string_pretty(db.contracts())?,
                Collection::Payments => serde_json::to_string_pretty(db.payments())?,
                Collection::Maintenance => serde_json::to_string_pretty(db.maintenance_orders())?,
                Collection::Reports => serde_json::to_string_pretty(db.reports())?,
            };
            println!("{json}");
        }
        Command::Export { out } => {
            let json = app.store().export_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "exported");
                }
                None => println!("{json}"),
            }
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            replace(app, &raw).await?;
        }
        Command::Backup { file } => {
            let json = app.store().export_json()?;
            write_backup(&file, &json)?;
            info!(path = %file.display(), "backup written");
        }
        Command::Restore { file } => {
            let raw = read_backup(&file)?;
            replace(app, &raw).await?;
        }
    }
    Ok(())
}

async fn replace(app: &mut MegaApp<SqliteStorage>, raw: &str) -> anyhow::Result<()> {
    let decoded = app.store_mut().import_json(raw)?;
    if let Some(version) = decoded.migrated_from {
        info!(from = version, "migrated imported data");
    }
    if decoded.dropped > 0 {
        warn!(dropped = decoded.dropped, "some legacy records could not be imported");
    }
    app.store().save().await?;
    info!("data replaced");
    Ok(())
}

async fn submit(app: &mut MegaApp<SqliteStorage>, kind: FormKind, fields: &[String]) -> anyhow::Result<()> {
    app.update(Message::OpenModal(kind)).await;
    let Some(modal) = app.state().modal_for(kind).map(|m| m.id) else {
        bail!("form {} did not open", kind.as_str());
    };

    for field in fields {
        let Some((name, value)) = field.split_once('=') else {
            bail!("expected NAME=VALUE, got `{field}`");
        };
        if kind.spec().field(name).is_none() {
            bail!("form {} has no field `{name}`", kind.as_str());
        }
        let input = Message::FieldInput {
            modal,
            field: name.to_string(),
            value: value.to_string(),
        };
        app.update(input).await;
    }

    let task = app.update(Message::Save(modal)).await;
    let toast = app.state().toast.clone();

    if let Some(open) = app.state().modal(modal).filter(|m| !m.closing) {
        for (field, error) in open.errors.iter() {
            eprintln!("{field}: {error}");
        }
        bail!("form {} was not saved", kind.as_str());
    }
    app.run_until_idle(task, Pacing::Immediate).await;

    match toast {
        Some(toast) if toast.level == ToastLevel::Error => bail!("{}", toast.message),
        _ => println!("{}", kind.success_message()),
    }
    Ok(())
}
