//! Reconstructor: the per-event dispatch loop.
//!
//! Owns the market and the pending trade/fill table, and is their only
//! writer. Each input event produces exactly one output row carrying the
//! cross-publisher top-10 of the event's instrument, taken after any
//! mutation the event caused.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::mbp::MBP_DEPTH;
use crate::{Action, Error, Market, MboEvent, MbpRow, OrderId, Side};

/// Knobs for how the reconstructor treats bad input.
#[derive(Clone, Copy, Debug)]
pub struct ReconConfig {
    /// Halt on structural errors (duplicate add id, side change on
    /// modify). When false, the corrupt event is logged and skipped,
    /// and its row is still emitted against the unchanged book.
    pub strict: bool,

    /// Bound on the pending trade/fill table. Unmatched trades and
    /// fills otherwise accumulate for the whole run; when a cap is set,
    /// the oldest entry is evicted with a warning.
    pub pending_cap: Option<usize>,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            strict: true,
            pending_cap: None,
        }
    }
}

impl ReconConfig {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_pending_cap(mut self, cap: usize) -> Self {
        self.pending_cap = Some(cap);
        self
    }
}

/// Converts an MBO event stream into MBP-10 rows.
pub struct Reconstructor {
    config: ReconConfig,
    market: Market,
    /// Most recent unconsumed Trade or Fill per order id. Keyed by bare
    /// order id, unscoped by instrument or publisher, matching the
    /// source feed's convention that ids identify globally.
    pending: FxHashMap<OrderId, MboEvent>,
    /// Insertion order of pending ids; stale entries are skipped lazily.
    pending_fifo: VecDeque<OrderId>,
    next_row: u64,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::with_config(ReconConfig::default())
    }

    pub fn with_config(config: ReconConfig) -> Self {
        Self {
            config,
            market: Market::new(),
            pending: FxHashMap::default(),
            pending_fifo: VecDeque::new(),
            next_row: 0,
        }
    }

    /// Number of rows emitted so far.
    pub fn rows_emitted(&self) -> u64 {
        self.next_row
    }

    /// Number of unconsumed pending trades/fills.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Process one event and emit its output row.
    pub fn process(&mut self, ev: MboEvent) -> Result<MbpRow, Error> {
        let depth = match self.dispatch(&ev) {
            Ok(depth) => depth,
            Err(e) if !self.config.strict => {
                log::error!("skipping corrupt event (sequence {}): {e}", ev.sequence);
                0
            }
            Err(e) => return Err(e.into()),
        };

        let bids = self.market.top_bid_levels(ev.instrument_id, MBP_DEPTH);
        let asks = self.market.top_ask_levels(ev.instrument_id, MBP_DEPTH);
        let row = MbpRow {
            index: self.next_row,
            depth,
            bids,
            asks,
            event: ev,
        };
        self.next_row += 1;
        Ok(row)
    }

    fn dispatch(&mut self, ev: &MboEvent) -> Result<u32, crate::BookError> {
        match ev.action {
            // Neutral trade: a cross-venue or off-book print. Nothing to
            // correlate, nothing to mutate.
            Action::Trade if ev.side == Side::None => Ok(0),

            Action::Trade | Action::Fill => {
                self.pend(ev.clone());
                Ok(0)
            }

            Action::Cancel => match self.pending.remove(&ev.order_id) {
                Some(pending) => {
                    // Completed trade-fill-cancel sequence: the resting
                    // side being depleted is the opposite of the side
                    // the trade/fill reported.
                    let affected = pending.side.opposite();
                    if affected == Side::None {
                        log::warn!(
                            "pending trade/fill for order {} has side None, skipping synthetic trade",
                            ev.order_id
                        );
                        return Ok(0);
                    }
                    self.market.deplete(
                        ev.instrument_id,
                        ev.publisher_id,
                        pending.price,
                        pending.size,
                        affected,
                    );
                    Ok(self
                        .market
                        .depth(ev.instrument_id, ev.publisher_id, pending.price, affected))
                }
                None => {
                    self.market.apply(ev)?;
                    Ok(self
                        .market
                        .depth(ev.instrument_id, ev.publisher_id, ev.price, ev.side))
                }
            },

            Action::Add | Action::Modify => {
                self.market.apply(ev)?;
                Ok(self
                    .market
                    .depth(ev.instrument_id, ev.publisher_id, ev.price, ev.side))
            }

            Action::Clear => {
                self.market.apply(ev)?;
                Ok(0)
            }

            Action::None => Ok(0),
        }
    }

    fn pend(&mut self, ev: MboEvent) {
        let id = ev.order_id;
        self.pending.insert(id, ev);
        self.pending_fifo.push_back(id);
        if let Some(cap) = self.config.pending_cap {
            while self.pending.len() > cap {
                let Some(oldest) = self.pending_fifo.pop_front() else {
                    break;
                };
                if self.pending.remove(&oldest).is_some() {
                    log::warn!("pending trade/fill table over capacity, evicted order {oldest}");
                }
            }
        }
    }
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new()
    }
}
