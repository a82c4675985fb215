use storefront::{AskamaRenderer, Dispatcher, Server, ServerOptions, routes::storefront_routes};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting `{}`...", env!("CARGO_BIN_NAME"));

    let options = ServerOptions::from_env()?;
    let dispatcher = Dispatcher::new(storefront_routes()?, AskamaRenderer);

    Server::bind(options)
        .await?
        .with_ctrl_c_graceful_shutdown()
        .build()
        .serve(dispatcher)
        .await
        .map_err(Into::into)
}
