//! FAIRDOM-SEEK CLI binary.
//!
//! A command-line interface for interacting with the FAIRDOM-SEEK API.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use seekapi::cli::{Cli, Command};
use seekapi::{
    ClientConfig, CreateFallback, Operation, PrettyPrint, Resource, ResourceRegistry, SeekClient,
    SeekError,
};
use serde::Serialize;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    // Listing the known types needs neither a server nor a login
    if let Command::Types = cli.command {
        return match print_types(&ResourceRegistry::seek(), cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let mut client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set SEEK_API_URL or pass --url");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = client.login(cli.token.as_deref()).await {
        eprintln!("Error: login failed: {e}");
        return ExitCode::FAILURE;
    }

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> seekapi::Result<SeekClient> {
    let url = cli.url.as_deref().ok_or_else(|| {
        SeekError::ConfigMissing("SEEK_API_URL environment variable not set".to_string())
    })?;

    let mut config = ClientConfig::new(url)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_ipv6(!cli.no_ipv6);

    if let Command::FetchOrCreate {
        only_if_missing: true,
        ..
    } = cli.command
    {
        config = config.with_fallback(CreateFallback::NotFoundOnly);
    }

    SeekClient::with_config(config)
}

async fn run(client: &SeekClient, cli: Cli) -> seekapi::Result<()> {
    match cli.command {
        Command::Whoami => match client.current_user() {
            Some(me) => output_single(me, cli.json),
            None => {
                println!("Logged in with a token; the server reported no identity.");
                Ok(())
            }
        },
        Command::Types => print_types(client.registry(), cli.json),
        Command::List { object_type } => {
            let resources = client.list(&object_type).await?;
            output_list(&resources, cli.json)
        }
        Command::Get { object_type, id } => {
            let resource = client.fetch(&object_type, &id).await?;
            output_single(&resource, cli.json)
        }
        Command::Create { object_type, body } => {
            let (attributes, relationships) = body.parse()?;
            let resource = client
                .create(&object_type, attributes, relationships)
                .await?;
            output_single(&resource, cli.json)
        }
        Command::Update {
            object_type,
            id,
            body,
        } => {
            let (attributes, relationships) = body.parse()?;
            let resource = client
                .update(&object_type, &id, attributes, relationships)
                .await?;
            output_single(&resource, cli.json)
        }
        Command::Delete { object_type, id } => {
            client.delete(&object_type, &id).await?;
            if !cli.json {
                println!("{object_type} {id} deleted successfully.");
            }
            Ok(())
        }
        Command::FetchOrCreate {
            object_type,
            id,
            body,
            ..
        } => {
            let (attributes, relationships) = body.parse()?;
            let outcome = client
                .fetch_or_create(&object_type, &id, attributes, relationships)
                .await?;
            output_single(&outcome, cli.json)
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> seekapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list(resources: &[Resource], json: bool) -> seekapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(resources)?);
    } else {
        let rows: Vec<ResourceRow> = resources.iter().map(ResourceRow::from).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", resources.len());
    }
    Ok(())
}

fn print_types(registry: &ResourceRegistry, json: bool) -> seekapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(registry)?);
        return Ok(());
    }

    let rows: Vec<TypeRow> = registry
        .all_types()
        .into_iter()
        .map(|t| TypeRow::new(registry, t))
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ResourceRow {
    id: String,
    #[tabled(rename = "type")]
    resource_type: String,
    title: String,
}

impl From<&Resource> for ResourceRow {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id.clone(),
            resource_type: r.resource_type.clone(),
            title: r.title().unwrap_or_default().to_string(),
        }
    }
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "type")]
    resource_type: String,
    operations: String,
}

impl TypeRow {
    fn new(registry: &ResourceRegistry, resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            operations: registry
                .operations_for(resource_type)
                .iter()
                .map(Operation::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
