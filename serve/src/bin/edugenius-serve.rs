//! Flow server binary: `cargo run -p serve --bin edugenius-serve`.

#[tokio::main]
async fn main() {
    config::init_tracing();
    if let Err(err) = serve::run_serve().await {
        tracing::error!(error = %err, "server exited with error");
        std::process::exit(1);
    }
}
