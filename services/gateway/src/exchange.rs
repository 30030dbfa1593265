//! Exchange service: intake, per-asset book workers, event notifier
//!
//! Each configured asset gets one worker task that exclusively owns that
//! asset's `MatchingEngine`, so all book mutation for an asset is
//! serialized through its mpsc queue. Intake validation and event fan-out
//! run outside the workers and are free to proceed concurrently across
//! assets.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use matching_engine::{
    BookSnapshot, EngineEvent, Intake, IntakeError, MatchingEngine, OrderRequest,
};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};
use types::ids::{Asset, OrderId};
use types::numeric::Amount;
use types::order::Order;

/// Current wall-clock time in Unix nanoseconds
pub fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
}

/// Errors surfaced when driving the exchange
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Rejected at intake; no book mutation, no broadcast
    #[error(transparent)]
    Rejected(#[from] IntakeError),

    /// The asset's book worker is gone (shutdown or crashed)
    #[error("book worker for {0} is unavailable")]
    Unavailable(Asset),
}

/// Commands accepted by a per-asset book worker
#[derive(Debug)]
enum BookCommand {
    Submit {
        order: Order,
    },
    Cancel {
        order_id: OrderId,
        reply: oneshot::Sender<Option<Amount>>,
    },
    Snapshot {
        depth: usize,
        reply: oneshot::Sender<BookSnapshot>,
    },
}

/// The in-process exchange: intake + book workers + notifier
pub struct Exchange {
    intake: Intake,
    books: Arc<DashMap<Asset, mpsc::Sender<BookCommand>>>,
    events: broadcast::Sender<EngineEvent>,
}

impl Exchange {
    /// Spawn one book worker per asset and wire them to the notifier.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(assets: Vec<Asset>, event_capacity: usize, order_queue_depth: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        let books = Arc::new(DashMap::new());

        for asset in &assets {
            let (tx, rx) = mpsc::channel(order_queue_depth);
            tokio::spawn(run_book_worker(asset.clone(), rx, events.clone()));
            books.insert(asset.clone(), tx);
        }

        Self {
            intake: Intake::new(assets),
            books,
            events,
        }
    }

    /// Subscribe to the engine event stream
    ///
    /// Every subscriber sees every event; delivery is best-effort and a
    /// lagging subscriber only loses its own backlog.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    /// Validate and admit an order, broadcast `order_received`, and hand
    /// the order to its asset's book worker for matching.
    pub async fn submit_order(&self, request: OrderRequest) -> Result<Order, ExchangeError> {
        let order = match self.intake.admit(request, now_nanos()) {
            Ok(order) => order,
            Err(error) => {
                warn!(%error, "order rejected at intake");
                return Err(error.into());
            }
        };

        let sender = self.book_sender(&order.asset)?;

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            asset = %order.asset,
            "order received"
        );
        // No subscribers is fine; send only fails when nobody listens
        let _ = self.events.send(EngineEvent::order_received(&order));

        sender
            .send(BookCommand::Submit {
                order: order.clone(),
            })
            .await
            .map_err(|_| ExchangeError::Unavailable(order.asset.clone()))?;

        Ok(order)
    }

    /// Cancel a resting order
    ///
    /// Returns the remaining amount removed from the book, or None if the
    /// order was not resting.
    pub async fn cancel_order(
        &self,
        asset: &Asset,
        order_id: OrderId,
    ) -> Result<Option<Amount>, ExchangeError> {
        let sender = self.book_sender(asset)?;

        let (reply, response) = oneshot::channel();
        sender
            .send(BookCommand::Cancel { order_id, reply })
            .await
            .map_err(|_| ExchangeError::Unavailable(asset.clone()))?;

        response
            .await
            .map_err(|_| ExchangeError::Unavailable(asset.clone()))
    }

    /// Depth snapshot for an asset's book
    pub async fn snapshot(&self, asset: &Asset, depth: usize) -> Result<BookSnapshot, ExchangeError> {
        let sender = self.book_sender(asset)?;

        let (reply, response) = oneshot::channel();
        sender
            .send(BookCommand::Snapshot { depth, reply })
            .await
            .map_err(|_| ExchangeError::Unavailable(asset.clone()))?;

        response
            .await
            .map_err(|_| ExchangeError::Unavailable(asset.clone()))
    }

    /// The configured tradable assets
    pub fn assets(&self) -> Vec<Asset> {
        self.intake.assets().cloned().collect()
    }

    fn book_sender(&self, asset: &Asset) -> Result<mpsc::Sender<BookCommand>, ExchangeError> {
        if !self.intake.knows(asset) {
            return Err(ExchangeError::Rejected(IntakeError::UnknownAsset {
                symbol: asset.as_str().to_string(),
            }));
        }
        match self.books.get(asset) {
            Some(entry) => Ok(entry.value().clone()),
            None => Err(ExchangeError::Unavailable(asset.clone())),
        }
    }
}

/// Single owner of one asset's book; runs until the exchange is dropped
async fn run_book_worker(
    asset: Asset,
    mut commands: mpsc::Receiver<BookCommand>,
    events: broadcast::Sender<EngineEvent>,
) {
    let mut engine = MatchingEngine::new(asset.clone(), 1);
    debug!(asset = %asset, "book worker started");

    while let Some(command) = commands.recv().await {
        match command {
            BookCommand::Submit { order } => {
                let outcome = engine.submit_order(order, now_nanos());
                for fill in outcome.fills() {
                    info!(
                        asset = %asset,
                        amount = %fill.amount,
                        price = %fill.price,
                        "order matched"
                    );
                    let _ = events.send(EngineEvent::order_matched(fill));
                }
            }
            BookCommand::Cancel { order_id, reply } => {
                let cancelled = engine.cancel_order(&order_id);
                if let Some(remaining) = cancelled {
                    info!(asset = %asset, %order_id, "order cancelled");
                    let _ = events.send(EngineEvent::order_cancelled(
                        order_id,
                        asset.clone(),
                        remaining,
                    ));
                }
                let _ = reply.send(cancelled);
            }
            BookCommand::Snapshot { depth, reply } => {
                let _ = reply.send(engine.snapshot(depth));
            }
        }
    }

    debug!(asset = %asset, "book worker stopped");
}
