//! dbcanon - dump a canonical MySQL schema for comparison

mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dbcanon_core::{ObjectKind, SchemaExtractor, ShowColumnsResolver, TableStructureResolver};
use dbcanon_driver_mysql::MySqlExecutor;

use crate::config::{Config, ConnectionConfig};

#[derive(Parser)]
#[command(name = "dbcanon", version, about = "Canonical schema extraction for MySQL")]
struct Cli {
    /// Config file (defaults to <config dir>/dbcanon/config.toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Password, overriding the config file
    #[arg(long, env = "DBCANON_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write scripts and comments for every configured kind as JSON
    Snapshot {
        /// Output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Also resolve table column structures
        #[arg(long)]
        with_tables: bool,
    },
    /// List object names of one kind
    List {
        kind: ObjectKind,
        #[arg(long, default_value = "")]
        include: String,
        #[arg(long, default_value = "")]
        exclude: String,
    },
    /// Print the canonical script of one object
    Script { kind: ObjectKind, name: String },
    /// Print the comment of one object
    Comment { kind: ObjectKind, name: String },
    /// Print table column structures as JSON
    Tables {
        #[arg(long, default_value = "")]
        include: String,
        #[arg(long, default_value = "")]
        exclude: String,
    },
}

fn connect(connection: &ConnectionConfig) -> Result<MySqlExecutor> {
    let executor = match &connection.url {
        Some(url) => MySqlExecutor::connect_url(url)?,
        None => MySqlExecutor::connect(
            &connection.host,
            connection.port,
            connection.database.as_deref(),
            connection.user.as_deref(),
            connection.password.as_deref(),
        )?,
    };
    Ok(executor)
}

fn write_output(output: Option<&PathBuf>, text: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, format!("{}\n", text))
            .with_context(|| format!("Failed to write {:?}", path)),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_file()?,
    };
    let mut config = Config::load(&config_path)?;
    if let Some(password) = cli.password {
        config.connection.password = Some(password);
    }

    let executor = connect(&config.connection)?;
    let extractor = SchemaExtractor::new(&executor);

    match cli.command {
        Command::Snapshot {
            output,
            with_tables,
        } => {
            let resolver = ShowColumnsResolver::new(&executor);
            let resolver: Option<&dyn TableStructureResolver> =
                if with_tables { Some(&resolver) } else { None };
            let snapshot = extractor.snapshot(&config.filters, resolver)?;
            write_output(output.as_ref(), &snapshot.to_json()?)?;
            tracing::info!(
                database = executor.database_name().unwrap_or_default(),
                objects = snapshot.object_count(),
                "snapshot written"
            );
        }
        Command::List {
            kind,
            include,
            exclude,
        } => {
            for name in extractor.list_objects(kind, &include, &exclude)? {
                println!("{}", name);
            }
        }
        Command::Script { kind, name } => {
            println!("{}", extractor.get_script(kind, &name)?);
        }
        Command::Comment { kind, name } => {
            println!("{}", extractor.get_comment(kind, &name));
        }
        Command::Tables { include, exclude } => {
            let resolver = ShowColumnsResolver::new(&executor);
            let tables = extractor.get_table_list(&resolver, &include, &exclude)?;
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
    }

    executor.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "dbcanon failed");
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_script_command() {
        let cli = Cli::try_parse_from(["dbcanon", "script", "Views", "active_users"]).unwrap();
        match cli.command {
            Command::Script { kind, name } => {
                assert_eq!(kind, ObjectKind::View);
                assert_eq!(name, "active_users");
            }
            _ => panic!("expected script command"),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(Cli::try_parse_from(["dbcanon", "list", "sequence"]).is_err());
    }
}
