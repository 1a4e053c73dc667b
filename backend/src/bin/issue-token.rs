//! Mint a signed access token for calling the announcements API
//!
//! Usage: issue-token --role teacher [--sub ms.frizzle] [--ttl-secs 3600]
//!   Reads JWT_SECRET from the environment (or .env).

use announcements_api::services::auth::AuthService;
use clap::Parser;

#[derive(Parser)]
#[command(name = "issue-token", about = "Issue a JWT for the announcements API")]
struct Args {
    /// Role claim: student, teacher or admin
    #[arg(long)]
    role: String,

    /// Subject claim identifying the caller
    #[arg(long, default_value = "operator")]
    sub: String,

    /// Token lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl_secs: u64,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

    let token = AuthService::create_access_token(&args.sub, &args.role, &secret, args.ttl_secs)?;
    tracing::info!("Issued {} token for {} ({}s)", args.role, args.sub, args.ttl_secs);
    println!("{token}");

    Ok(())
}
