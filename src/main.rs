use clap::Parser;
use dotenv::dotenv;
use docchunk::handler::{self, Cli};
use docchunk::read_config;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = read_config()?;
    let args = Cli::parse();
    handler::handler(args, config)?;
    Ok(())
}
