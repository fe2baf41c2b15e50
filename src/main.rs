mod api;
mod config;
mod demo;
mod entity;
mod store;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tokio::{runtime::Runtime, sync::oneshot};
use tracing::info;

fn main() -> Result<()> {
    let options = config::Options::parse();

    tracing_subscriber::fmt()
        .with_max_level(options.log_level)
        .init();

    let store = store::InMemoryBiddingStore::new_shared();

    if options.demo {
        let num_bids = demo::prefill(&*store, options.demo_items)?;
        info!(
            items = store.item_count(),
            users = store.user_count(),
            bids = num_bids,
            "store populated with demo data"
        );
    }

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let stop_tx = Mutex::new(Some(stop_tx));
    ctrlc::set_handler(move || {
        eprintln!("Stopping server...");
        if let Some(tx) = stop_tx.lock().take() {
            // receiver is gone only if the server already stopped
            let _ = tx.send(());
        }
    })?;

    let runtime = Runtime::new()?;
    runtime.block_on(api::serve(options.listen_addr, store, async {
        let _ = stop_rx.await;
    }))
}
