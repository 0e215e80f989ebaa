use clap::Parser;
use sku_export::core::ConfigProvider;
use sku_export::utils::{logger, validation::Validate};
use sku_export::{
    CliConfig, EtlEngine, EtlError, LocalStorage, PostgresConnector, SkuPipeline,
};

fn fail(stage: &str, e: &EtlError) -> ! {
    tracing::debug!("{}: {:?}", stage, e);
    eprintln!("❌ {}", e);
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting sku-export");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail("Configuration failed", &e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    let connector = PostgresConnector::new(config.connection().clone());
    let pipeline = SkuPipeline::new(LocalStorage::new(), config, connector);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => println!("{}", summary),
        Err(e) => fail("SKU export failed", &e),
    }
}
