//! RelayQ Server - the `relayq` binary
//!
//! One binary, three roles:
//! - `mq`: run the broker ingestion loop
//! - `commiter`: send one commit message to a broker and exit
//! - `consumer`: reserved, currently a no-op

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use relayq_core::{Broker, UdpListener, UdpSender, DEFAULT_PORT};
use relayq_storage::{MemoryQueue, QueueStore};
use relayq_types::{wire, Message};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ==================== CLI ====================

/// Instance role
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    /// Run the broker ingestion loop
    Mq,
    /// Send one commit message and exit
    Commiter,
    /// Reserved; not implemented yet
    Consumer,
}

/// Tiny UDP message queue suite
#[derive(Debug, Parser)]
#[command(name = "relayq", version, after_help = "example: relayq --role mq")]
struct Args {
    /// Instance role
    #[arg(long, value_enum)]
    role: Option<Role>,

    /// UDP port the broker binds and the commiter targets
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Broker address the commiter sends to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// Cap on queued messages (0 = unbounded)
    #[arg(long, default_value_t = 0)]
    max_queued: usize,
}

// ==================== Roles ====================

async fn run_broker(args: &Args) -> anyhow::Result<()> {
    let queue: Arc<dyn QueueStore> = if args.max_queued > 0 {
        Arc::new(MemoryQueue::bounded(args.max_queued))
    } else {
        Arc::new(MemoryQueue::new())
    };

    // Bind failures are fatal here; everything after this point is
    // per-message and absorbed by the loop.
    let listener = UdpListener::bind(args.port).await?;
    let broker = Broker::new(listener, queue);

    tokio::select! {
        result = broker.run() => Ok(result?),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received, terminating");
            std::process::exit(1);
        }
    }
}

async fn run_commiter(args: &Args) -> anyhow::Result<()> {
    let message = Message::commit(
        "commiter",
        vec![json!({"note": "hello"}), json!({"note": "hello again"})],
    );
    let payload = wire::encode(&message)?;

    let target = SocketAddr::new(args.host, args.port);
    let reply = UdpSender::new().send_once(&payload, target).await?;
    info!(%target, %reply, "Broker replied");

    Ok(())
}

// ==================== Main ====================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "relayq_server=debug,relayq_core=debug,relayq_storage=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let Some(role) = args.role else {
        eprintln!("no role selected; choose one of: mq, commiter, consumer");
        std::process::exit(1);
    };

    match role {
        Role::Mq => run_broker(&args).await,
        Role::Commiter => run_commiter(&args).await,
        Role::Consumer => {
            info!("Consumer role is not implemented");
            Ok(())
        }
    }
}
