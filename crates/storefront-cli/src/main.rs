use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use storefront_core::orchestrator::OrderBook;
use storefront_core::order::OrderStore;
use storefront_core::resolver::{GrpcUserResolver, HttpUserResolver, ResolveUser};
use storefront_core::user::UserDirectory;

#[derive(Parser)]
#[command(
    name = "storefront",
    about = "Storefront services — user directory and order ledger",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the user directory over HTTP and gRPC
    Users {
        /// HTTP port for /user and /users
        #[arg(long, default_value = "3000", env = "STOREFRONT_USER_HTTP_PORT")]
        http_port: u16,

        /// gRPC port for UserDirectory.GetUser
        #[arg(long, default_value = "50051", env = "STOREFRONT_USER_GRPC_PORT")]
        grpc_port: u16,
    },

    /// Serve the order ledger against a user directory
    Orders {
        /// HTTP port for /orders
        #[arg(long, default_value = "3001", env = "STOREFRONT_ORDER_PORT")]
        port: u16,

        /// User service address: base URL for http, URI for grpc
        #[arg(
            long,
            default_value = "http://localhost:3000",
            env = "STOREFRONT_USER_SERVICE"
        )]
        user_service: String,

        /// Transport used to resolve users
        #[arg(long, value_enum, default_value_t = Transport::Http)]
        transport: Transport,

        /// Upstream resolution deadline in milliseconds
        #[arg(long, default_value = "1000", env = "STOREFRONT_UPSTREAM_TIMEOUT_MS")]
        upstream_timeout_ms: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Transport {
    Http,
    Grpc,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Users {
            http_port,
            grpc_port,
        } => {
            let directory = Arc::new(UserDirectory::new());
            let http = tokio::net::TcpListener::bind(("0.0.0.0", http_port)).await?;
            let grpc = tokio::net::TcpListener::bind(("0.0.0.0", grpc_port)).await?;
            let router = storefront_server::build_user_router(Arc::clone(&directory));

            tokio::try_join!(
                storefront_server::serve_http_on(router, http),
                storefront_server::serve_grpc_on(directory, grpc),
            )?;
        }
        Commands::Orders {
            port,
            user_service,
            transport,
            upstream_timeout_ms,
        } => {
            let timeout = Duration::from_millis(upstream_timeout_ms);
            let resolver: Arc<dyn ResolveUser> = match transport {
                Transport::Http => Arc::new(HttpUserResolver::new(user_service, timeout)?),
                Transport::Grpc => Arc::new(GrpcUserResolver::new(user_service, timeout)?),
            };

            let book = Arc::new(OrderBook::new(Arc::new(OrderStore::new()), resolver));
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
            storefront_server::serve_http_on(storefront_server::build_order_router(book), listener)
                .await?;
        }
    }

    Ok(())
}
