use clap::Parser;

use pitchdeck_lib::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    pitchdeck_lib::run(args).await
}
