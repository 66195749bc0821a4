//! Operator CLI over the edit-session engine.
//!
//! # Responsibility
//! - Manage a user's documents from the shell: create, copy, import,
//!   export and list them.
//! - Inspect and prune dataset-level lists without a web front end.

use clap::{Parser, Subcommand, ValueEnum};
use emledit_core::builder::{EntityKind, PartyRole};
use emledit_core::service::collection::Collection;
use emledit_core::service::list_service::{ListAction, ListSubmission};
use emledit_core::{
    init_logging, init_logging_for, DocumentService, EngineConfig, FileDocumentRepository,
    ListService, NodeRef,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "emledit", version, about = "Edit EML metadata documents")]
struct Cli {
    /// JSON engine configuration; flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,
    #[arg(long, global = true, default_value = "anonymous")]
    user: String,
    /// Absolute log directory; defaults to `<data-root>/.logs`.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an empty document.
    Create {
        package: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the rows of a dataset-level list.
    List {
        package: String,
        collection: CollectionArg,
    },
    /// Print the EML XML export.
    Export { package: String },
    /// Store an EML XML file as a new document.
    Import { xml_file: PathBuf, package: String },
    SaveAs { old: String, new: String },
    /// List the user's documents.
    Documents,
    /// Remove one row of a dataset-level list.
    Remove {
        package: String,
        collection: CollectionArg,
        row: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollectionArg {
    Creators,
    MetadataProviders,
    AssociatedParties,
    Contacts,
    Personnel,
    GeographicCoverage,
    TemporalCoverage,
    TaxonomicCoverage,
    Methods,
    Keywords,
    Access,
    DataTables,
    OtherEntities,
}

impl CollectionArg {
    fn kind(self) -> EntityKind {
        match self {
            Self::Creators => EntityKind::Party(PartyRole::Creator),
            Self::MetadataProviders => EntityKind::Party(PartyRole::MetadataProvider),
            Self::AssociatedParties => EntityKind::Party(PartyRole::AssociatedParty),
            Self::Contacts => EntityKind::Party(PartyRole::Contact),
            Self::Personnel => EntityKind::Party(PartyRole::Personnel),
            Self::GeographicCoverage => EntityKind::GeographicCoverage,
            Self::TemporalCoverage => EntityKind::TemporalCoverage,
            Self::TaxonomicCoverage => EntityKind::TaxonomicCoverage,
            Self::Methods => EntityKind::MethodStep,
            Self::Keywords => EntityKind::Keyword,
            Self::Access => EntityKind::AccessRule,
            Self::DataTables => EntityKind::DataTable,
            Self::OtherEntities => EntityKind::OtherEntity,
        }
    }

    fn collection(self) -> Collection {
        Collection::dataset(self.kind())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={}", err);
            eprintln!("emledit: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(data_root) = cli.data_root {
        config.data_root = data_root;
    }
    if let Some(level) = cli.log_level {
        config.log_level = Some(level);
    }
    config.validate()?;

    // The CLI still works when the log folder is not writable.
    let logging = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(
            config
                .log_level
                .as_deref()
                .unwrap_or_else(|| emledit_core::default_log_level()),
            dir,
        ),
        None => init_logging_for(&config),
    };
    if let Err(err) = logging {
        eprintln!("emledit: logging disabled: {err}");
    }

    let repo = FileDocumentRepository::open(&config, &cli.user)?;
    let documents = DocumentService::new(&repo, config.clone());
    let lists = ListService::new(&repo);

    match cli.command {
        Command::Create { package, title } => {
            documents.create(&package, title.as_deref(), &cli.user)?;
            println!("created {package}");
        }
        Command::List {
            package,
            collection,
        } => {
            let view = lists.view(&package, &collection.collection())?;
            for row in view.rows {
                println!("{}\t{}", row.id, row.label);
            }
        }
        Command::Export { package } => {
            print!("{}", documents.export_xml(&package)?);
        }
        Command::Import { xml_file, package } => {
            let xml = std::fs::read_to_string(&xml_file)?;
            let doc = documents.import_xml(&package, &xml)?;
            println!("imported {package} nodes={}", doc.len());
        }
        Command::SaveAs { old, new } => {
            documents.save_as(&old, &new)?;
            println!("saved {old} as {new}");
        }
        Command::Documents => {
            for package in documents.documents()? {
                println!("{package}");
            }
        }
        Command::Remove {
            package,
            collection,
            row,
        } => {
            let row = NodeRef::parse(&row)?;
            let submission = ListSubmission::new(ListAction::Remove, Some(row));
            lists.handle(&package, &collection.collection(), &submission)?;
            println!("removed {row}");
        }
    }
    Ok(())
}
