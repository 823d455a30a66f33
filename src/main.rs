//! appdb CLI application
//!
//! Command-line interface for creating and checking application databases.

use appdb::{AppDb, AppDescriptor, Fingerprint};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "appdb")]
#[command(about = "Create, open and validate application-owned SQLite databases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Application identity, either from a descriptor file or from flags
#[derive(Args)]
struct AppArgs {
    /// JSON application descriptor (app_name, schema_version, schema)
    #[arg(short, long, conflicts_with_all = ["app", "schema_version"])]
    descriptor: Option<PathBuf>,

    /// Application name
    #[arg(short, long, requires = "schema_version")]
    app: Option<String>,

    /// Schema version (0-255)
    #[arg(short, long)]
    schema_version: Option<u8>,
}

impl AppArgs {
    fn resolve(self) -> appdb::Result<AppDescriptor> {
        match (self.descriptor, self.app, self.schema_version) {
            (Some(path), _, _) => AppDescriptor::from_file(path),
            (None, Some(app), Some(version)) => Ok(AppDescriptor::new(app, version)),
            _ => Err(appdb::AppDbError::Config(
                "either --descriptor or --app with --schema-version is required".to_string(),
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fingerprint for an application name and schema version
    Fingerprint {
        #[command(flatten)]
        app: AppArgs,
    },

    /// Create a database (or validate it if it already exists)
    Init {
        /// Database file
        path: PathBuf,

        #[command(flatten)]
        app: AppArgs,

        /// Schema statement to run on creation (repeatable, in order)
        #[arg(long = "statement")]
        statements: Vec<String>,
    },

    /// Validate an existing database against an application
    Check {
        /// Database file
        path: PathBuf,

        #[command(flatten)]
        app: AppArgs,
    },

    /// Show the fingerprint stored in a database without validating it
    Inspect {
        /// Database file
        path: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fingerprint { app } => {
            let descriptor = app.resolve()?;
            print_fingerprint(&descriptor.fingerprint());
        }
        Commands::Init {
            path,
            app,
            statements,
        } => {
            let mut descriptor = app.resolve()?;
            descriptor.schema.extend(statements);
            descriptor.validate()?;

            let existed = path.exists();
            let db = AppDb::init_with(&path, &descriptor)?;
            if existed {
                println!("✅ {} already exists and is valid", path.display());
            } else {
                println!(
                    "✅ Created {} ({} schema statements)",
                    path.display(),
                    descriptor.schema.len()
                );
            }
            print_fingerprint(&db.fingerprint()?);
            db.close()?;
        }
        Commands::Check { path, app } => {
            let descriptor = app.resolve()?;
            let db = AppDb::open_with(&path, &descriptor)?;
            println!(
                "✅ {} belongs to {} at schema version {}",
                path.display(),
                descriptor.app_name,
                descriptor.schema_version
            );
            db.close()?;
        }
        Commands::Inspect { path, json } => {
            let fingerprint = appdb::inspect(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&fingerprint)?);
            } else {
                println!("📄 {}", path.display());
                print_fingerprint(&fingerprint);
            }
        }
    }

    Ok(())
}

fn print_fingerprint(fingerprint: &Fingerprint) {
    println!("   Fingerprint:    {:#010x}", fingerprint.pack());
    println!("   App id:         {}", fingerprint.app_id);
    println!("   Schema version: {}", fingerprint.schema_version);
}
