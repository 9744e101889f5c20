mod error;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use loader::{AnyLoader, Loader, LoaderInfo};
use manager::{Catalog, LoaderManager};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use error::{Error, Result};

const CATALOG_FILE: &str = "loaders.toml";

#[derive(Parser)]
#[command(name = "crap")]
#[command(about = "Manage channel loaders and forwarders", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Loader catalog file
    #[arg(long, global = true, env = "CRAP_CATALOG", default_value = CATALOG_FILE)]
    catalog: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered loaders
    List {
        /// Show only forwarders
        #[arg(short, long)]
        forwarders_only: bool,
    },
    /// Show one loader
    Show { name: String },
    /// Print whether a loader's output is forwarded or consumed
    Route { name: String },
    /// Register a new loader
    Add {
        name: String,
        /// Register as a forwarder instead of a direct loader
        #[arg(short, long)]
        forwarder: bool,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Remove a loader
    Remove { name: String },
    /// Write a loader envelope
    Export {
        name: String,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Register a loader from an envelope file
    Import { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli, &mut io::stdout().lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let catalog = cli.catalog.as_path();

    match cli.command {
        Commands::List { forwarders_only } => cmd_list(catalog, forwarders_only, out),
        Commands::Show { name } => cmd_show(catalog, &name, out),
        Commands::Route { name } => cmd_route(catalog, &name, out),
        Commands::Add {
            name,
            forwarder,
            description,
        } => {
            let mut info = LoaderInfo::new(name);
            info.description = description;
            let loader = if forwarder {
                AnyLoader::forwarder(info)
            } else {
                AnyLoader::channel(info)
            };
            cmd_add(catalog, loader)
        }
        Commands::Remove { name } => cmd_remove(catalog, &name),
        Commands::Export { name, out: out_path } => match out_path {
            Some(path) => {
                let bytes = export_bytes(catalog, &name)?;
                std::fs::write(&path, bytes)?;
                info!(name = %name, path = %path.display(), "exported loader");
                Ok(())
            }
            None => {
                out.write_all(&export_bytes(catalog, &name)?)?;
                writeln!(out)?;
                Ok(())
            }
        },
        Commands::Import { file } => {
            let bytes = std::fs::read(&file)?;
            cmd_add(catalog, loader::decode(&bytes)?)
        }
    }
}

fn cmd_list(catalog: &Path, forwarders_only: bool, out: &mut impl Write) -> Result<()> {
    let registry = open_manager(catalog)?;

    let loaders: Vec<_> = if forwarders_only {
        registry.forwarders().collect()
    } else {
        registry.iter().collect()
    };

    if loaders.is_empty() {
        writeln!(out, "No loaders found.")?;
        return Ok(());
    }

    writeln!(out, "{:<32}  {:<10}  ROUTE", "NAME", "KIND")?;
    writeln!(out, "{}", "-".repeat(56))?;
    for loader in loaders {
        writeln!(
            out,
            "{:<32}  {:<10}  {}",
            loader.name(),
            loader.kind(),
            manager::route_for(loader)
        )?;
    }
    Ok(())
}

fn cmd_show(catalog: &Path, name: &str, out: &mut impl Write) -> Result<()> {
    let registry = open_manager(catalog)?;
    let loader = registry
        .get(name)
        .ok_or_else(|| manager::Error::NotFound(name.to_string()))?;

    writeln!(out, "Name:        {}", loader.name())?;
    writeln!(out, "Kind:        {}", loader.kind())?;
    writeln!(out, "Forwarder:   {}", loader.is_forwarder())?;
    if let Some(description) = &loader.info().description {
        writeln!(out, "Description: {description}")?;
    }
    Ok(())
}

fn cmd_route(catalog: &Path, name: &str, out: &mut impl Write) -> Result<()> {
    let registry = open_manager(catalog)?;
    writeln!(out, "{}", registry.route(name)?)?;
    Ok(())
}

fn cmd_add(catalog: &Path, loader: AnyLoader) -> Result<()> {
    let mut registry = load_or_empty(catalog)?;
    registry.register(loader)?;
    registry.to_catalog().save(catalog)?;
    Ok(())
}

fn cmd_remove(catalog: &Path, name: &str) -> Result<()> {
    let mut registry = open_manager(catalog)?;
    registry.remove(name)?;
    registry.to_catalog().save(catalog)?;
    Ok(())
}

fn export_bytes(catalog: &Path, name: &str) -> Result<Vec<u8>> {
    let registry = open_manager(catalog)?;
    let loader = registry
        .get(name)
        .ok_or_else(|| manager::Error::NotFound(name.to_string()))?;
    Ok(loader::encode(loader)?)
}

fn open_manager(catalog: &Path) -> Result<LoaderManager> {
    if !catalog.exists() {
        return Err(Error::CatalogNotFound {
            path: catalog.to_path_buf(),
        });
    }
    Ok(LoaderManager::from_catalog(Catalog::load(catalog)?)?)
}

fn load_or_empty(catalog: &Path) -> Result<LoaderManager> {
    if catalog.exists() {
        Ok(LoaderManager::from_catalog(Catalog::load(catalog)?)?)
    } else {
        Ok(LoaderManager::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("crap").chain(args.iter().copied())).unwrap();
        let mut buf = Vec::new();
        run(cli, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn path_arg(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_add_then_route() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join(CATALOG_FILE);

        cmd_add(&catalog, AnyLoader::forwarder(LoaderInfo::new("sd"))).unwrap();
        cmd_add(&catalog, AnyLoader::channel(LoaderInfo::new("disc"))).unwrap();

        assert_eq!(output(|o| cmd_route(&catalog, "sd", o)), "forward\n");
        assert_eq!(output(|o| cmd_route(&catalog, "disc", o)), "consume\n");
    }

    #[test]
    fn test_list_forwarders_only() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join(CATALOG_FILE);
        cmd_add(&catalog, AnyLoader::forwarder(LoaderInfo::new("sd"))).unwrap();
        cmd_add(&catalog, AnyLoader::channel(LoaderInfo::new("disc"))).unwrap();

        let listing = output(|o| cmd_list(&catalog, true, o));
        assert!(listing.contains("sd"));
        assert!(!listing.contains("disc"));
    }

    #[test]
    fn test_export_import_keeps_forwarder() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.toml");
        let target = dir.path().join("target.toml");
        cmd_add(&source, AnyLoader::forwarder(LoaderInfo::new("sd"))).unwrap();

        let bytes = export_bytes(&source, "sd").unwrap();
        cmd_add(&target, loader::decode(&bytes).unwrap()).unwrap();

        let shown = output(|o| cmd_show(&target, "sd", o));
        assert!(shown.contains("Kind:        forwarder"));
        assert!(shown.contains("Forwarder:   true"));
    }

    #[test]
    fn test_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join(CATALOG_FILE);
        let err = cmd_route(&catalog, "sd", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::CatalogNotFound { .. }));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join(CATALOG_FILE);
        cmd_add(&catalog, AnyLoader::forwarder(LoaderInfo::new("sd"))).unwrap();
        cmd_remove(&catalog, "sd").unwrap();

        assert_eq!(output(|o| cmd_list(&catalog, false, o)), "No loaders found.\n");
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_catalog_path() {
        if std::env::var_os("CRAP_CATALOG").is_some() {
            return;
        }
        let cli = Cli::try_parse_from(["crap", "route", "sd"]).unwrap();
        assert_eq!(cli.catalog, PathBuf::from(CATALOG_FILE));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_catalog_flag_overrides_default() {
        let cli = Cli::try_parse_from(["crap", "list", "--catalog", "/tmp/other.toml"]).unwrap();
        assert_eq!(cli.catalog, PathBuf::from("/tmp/other.toml"));

        let cli = Cli::try_parse_from(["crap", "--catalog", "first.toml", "show", "sd"]).unwrap();
        assert_eq!(cli.catalog, PathBuf::from("first.toml"));
    }

    #[test]
    fn test_run_export_to_file_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.toml");
        let target = dir.path().join("target.toml");
        let envelope = dir.path().join("sd.json");

        run_args(&["--catalog", path_arg(&source), "add", "sd", "--forwarder", "-d", "boot"])
            .unwrap();
        run_args(&["--catalog", path_arg(&source), "export", "sd", "--out", path_arg(&envelope)])
            .unwrap();
        assert!(envelope.exists());

        run_args(&["--catalog", path_arg(&target), "import", path_arg(&envelope)]).unwrap();

        let saved = std::fs::read_to_string(&target).unwrap();
        assert!(saved.contains("kind = \"forwarder\""));
        assert!(saved.contains("name = \"sd\""));
        assert_eq!(
            run_args(&["--catalog", path_arg(&target), "route", "sd"]).unwrap(),
            "forward\n"
        );

        let err = run_args(&["--catalog", path_arg(&target), "import", path_arg(&envelope)])
            .unwrap_err();
        assert!(matches!(err, Error::Manager(manager::Error::Duplicate(name)) if name == "sd"));
    }

    #[test]
    fn test_run_export_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join(CATALOG_FILE);
        run_args(&["--catalog", path_arg(&catalog), "add", "sd", "--forwarder"]).unwrap();

        let printed = run_args(&["--catalog", path_arg(&catalog), "export", "sd"]).unwrap();
        assert!(printed.ends_with('\n'));

        let restored = loader::decode(printed.trim_end().as_bytes()).unwrap();
        assert!(restored.is_forwarder());
        assert_eq!(restored.name(), "sd");
    }

    #[test]
    fn test_run_import_rejects_bad_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join(CATALOG_FILE);
        let envelope = dir.path().join("bad.json");
        std::fs::write(&envelope, r#"{"version": 9, "loader": {"kind": "forwarder", "name": "sd"}}"#)
            .unwrap();

        let err = run_args(&["--catalog", path_arg(&catalog), "import", path_arg(&envelope)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Loader(loader::Error::UnsupportedVersion { found: 9, .. })
        ));
        assert!(!catalog.exists());
    }
}
