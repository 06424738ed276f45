use anyhow::{Context, Result};
use clap::Parser;
use records_client::cli::{Cli, Commands, ListArgs, UpdateArgs};
use records_client::{
    ClientConfig, ClientError, EmployeeUpdate, HttpClient, RecordView, SubmitMode, UploadSession,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .compact()
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(server) = cli.server {
        config.base_url = server;
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }

    match cli.command {
        Commands::Preview(args) => {
            let mut session = UploadSession::new();
            let count = session
                .load_file(&args.file)
                .with_context(|| format!("Failed to decode {}", args.file.display()))?;
            println!("{count} row(s) decoded from {}", args.file.display());
            print!("{}", session.preview());
        }
        Commands::Upload(args) => {
            let client = config.build_http_client()?;
            let mut session = UploadSession::new();
            session
                .load_file(&args.file)
                .with_context(|| format!("Failed to decode {}", args.file.display()))?;
            print!("{}", session.preview());

            upload(&client, &mut session, args.mode.into()).await?;
        }
        Commands::List(args) => {
            let client = config.build_http_client()?;
            list(&client, args).await?;
        }
        Commands::Update(args) => {
            let client = config.build_http_client()?;
            update(&client, args).await?;
        }
        Commands::Delete(args) => {
            let client = config.build_http_client()?;
            let records = client.list_records().await?;
            let mut view = RecordView::new(records);
            for id in &args.ids {
                view.select(id);
            }

            let report = view.delete_selected(&client).await;
            for id in &report.deleted {
                println!("deleted {id}");
            }
            for (id, err) in &report.failed {
                eprintln!("failed {id}: {err}");
            }
            if !report.failed.is_empty() {
                anyhow::bail!("{} deletion(s) failed", report.failed.len());
            }
        }
        Commands::Health => {
            let client = config.build_http_client()?;
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}

async fn upload(client: &HttpClient, session: &mut UploadSession, mode: SubmitMode) -> Result<()> {
    if mode == SubmitMode::PerRecord {
        let (report, outcome) = session.submit_per_record(client).await?;
        for (row, reason) in &report.failed {
            eprintln!("row {}: {reason}", row + 1);
        }
        return match outcome {
            Some(outcome) => {
                println!(
                    "{} record(s) uploaded, {} in store",
                    outcome.inserted,
                    outcome.records.len()
                );
                Ok(())
            }
            None => anyhow::bail!(
                "{} of {} row(s) failed",
                report.failed.len(),
                report.failed.len() + report.created.len()
            ),
        };
    }

    match session.submit(client).await {
        Ok(outcome) => {
            println!(
                "{} record(s) uploaded, {} in store",
                outcome.inserted,
                outcome.records.len()
            );
            Ok(())
        }
        Err(ClientError::Validation {
            message,
            violations,
        }) => {
            for violation in &violations {
                eprintln!("{violation}");
            }
            anyhow::bail!("Upload rejected: {message}")
        }
        Err(e) => Err(e).context("Upload failed"),
    }
}

async fn list(client: &HttpClient, args: ListArgs) -> Result<()> {
    let mut view = RecordView::new(client.list_records().await?);
    for level in &args.levels {
        view.add_filter(level);
    }
    if let Some(search) = args.search {
        view.set_query(search);
    }

    let records = view.filtered();
    for record in &records {
        println!(
            "{}  {:<24} {:<24} {}",
            record.id, record.name, record.position, record.level
        );
    }
    println!("{} of {} record(s)", records.len(), view.records().len());
    Ok(())
}

async fn update(client: &HttpClient, args: UpdateArgs) -> Result<()> {
    let patch = EmployeeUpdate {
        name: args.name,
        position: args.position,
        level: args.level,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to update: pass --name, --position or --level");
    }

    let record = client.update_record(&args.id, &patch).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
