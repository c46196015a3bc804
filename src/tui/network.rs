// Manages background network operations for the scout TUI.
//
// One request runs at a time: the UI disables its trigger while
// `loading`, and the actor processes actions sequentially. There is no
// cancellation of an in-flight request and no deduplication.
use crate::client::ScoutClient;
use crate::config::Config;
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{Receiver, Sender};

pub async fn run_network_actor(
    config: Config,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    let client = match ScoutClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            let _ = event_tx.send(AppEvent::Error(e)).await;
            return;
        }
    };

    let _ = event_tx.send(AppEvent::Status("Ready.".to_string())).await;

    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::FetchUrls(request) => {
                let _ = event_tx
                    .send(AppEvent::Status("Fetching listings...".to_string()))
                    .await;
                match client.fetch_by_urls(&request).await {
                    Ok(listings) => {
                        let _ = event_tx.send(AppEvent::ListingsLoaded(listings)).await;
                    }
                    Err(e) => {
                        log::warn!("fetch failed: {}", e);
                        let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    }
                }
            }

            Action::Search(params) => {
                let _ = event_tx
                    .send(AppEvent::Status("Searching...".to_string()))
                    .await;
                match client.search(&params).await {
                    Ok(listings) => {
                        let _ = event_tx.send(AppEvent::ListingsLoaded(listings)).await;
                    }
                    Err(e) => {
                        log::warn!("search failed: {}", e);
                        let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    }
                }
            }
        }
    }
}
