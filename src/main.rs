use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use url2sheet::utils::{logger, validation::Validate};
use url2sheet::{
    AppendResult, CliConfig, ExportConfig, ExportTarget, ExtractClient, LocalWorkbook,
    RecordParser, RowAppender, SheetsBackend, StaticTokenProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting url2sheet");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(config: &CliConfig) -> url2sheet::Result<()> {
    let client = ExtractClient::new(config.extract_endpoint())?;

    tracing::info!("Extracting data from {}", config.url);
    let raw = client.extract(&config.url).await?;
    tracing::info!("Extraction returned {} bytes of text", raw.len());

    let record = RecordParser::parse(&raw, &config.url);
    tracing::info!("Parsed {} fields", record.len());

    match config.to {
        ExportTarget::Sheets => {
            let auth = Arc::new(StaticTokenProvider::new(config.resolved_token()));
            let mut backend = SheetsBackend::new(config, auth)?;
            let result = RowAppender::append_row(&mut backend, &record).await?;

            if let AppendResult::Remote { url } = result {
                println!("✅ Row appended");
                println!("📄 {}", url);
            }
        }
        ExportTarget::File => {
            let mut workbook = match &config.existing_file {
                Some(path) => {
                    let bytes = std::fs::read(path)?;
                    let filename = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or(&config.workbook_filename)
                        .to_string();
                    LocalWorkbook::open(&bytes, filename)?
                }
                None => LocalWorkbook::create(config.workbook_filename()),
            };

            let result = RowAppender::append_row(&mut workbook, &record).await?;
            if let AppendResult::Local { filename, bytes } = result {
                let target = Path::new(&config.output_path).join(&filename);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, bytes)?;
                println!("✅ Row appended");
                println!("📁 {}", target.display());
            }
        }
    }

    Ok(())
}
