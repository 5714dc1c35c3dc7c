//! Book: the per-(instrument, publisher) limit order book.
//!
//! Combines one ladder per side with a locator index from order id to
//! `(side, price)`. The locator holds a position, not a reference, so
//! there is no shared ownership between the index and the queues.

use rustc_hash::FxHashMap;

use crate::{Action, BookError, Ladder, MboEvent, OrderId, Price, PriceLevel, Side, Size};

/// One publisher's book for one instrument.
///
/// Invariants:
/// - every resting order appears in exactly one ladder at exactly one
///   price, with a matching locator entry;
/// - a price level exists iff it has at least one resting order;
/// - orders within a level keep arrival order.
#[derive(Clone, Debug)]
pub struct Book {
    bids: Ladder,
    asks: Ladder,
    /// Order id -> (side, price) of the resting order.
    locators: FxHashMap<OrderId, (Side, Price)>,
}

impl Book {
    pub fn new() -> Self {
        Self {
            bids: Ladder::new(Side::Bid),
            asks: Ladder::new(Side::Ask),
            locators: FxHashMap::default(),
        }
    }

    /// Apply one event to this book.
    ///
    /// Trade, Fill, and None never mutate a book; they are handled (or
    /// ignored) by the dispatcher. Structural errors are raised before
    /// any state changes.
    pub fn apply(&mut self, ev: &MboEvent) -> Result<(), BookError> {
        match ev.action {
            Action::Clear => {
                self.clear();
                Ok(())
            }
            Action::Add => self.add(ev),
            Action::Cancel => {
                self.cancel(ev);
                Ok(())
            }
            Action::Modify => self.modify(ev),
            Action::Trade | Action::Fill | Action::None => Ok(()),
        }
    }

    /// FIFO-consume `size` from the queue at `(side, price)`.
    ///
    /// Translates a completed trade/fill/cancel sequence into book state.
    /// A missing level warns and changes nothing; size beyond the queue
    /// total is absorbed without touching adjacent levels.
    pub fn deplete(&mut self, price: Price, size: Size, side: Side) {
        let Some(ladder) = Self::ladder_mut(&mut self.bids, &mut self.asks, side) else {
            return;
        };
        match ladder.deplete(price, size) {
            Some(removed) => {
                for id in removed {
                    self.locators.remove(&id);
                }
            }
            None => {
                log::warn!("synthetic trade at non-existent {side} level {price}, size {size}");
            }
        }
    }

    // === Queries ===

    /// Up to `n` bid aggregates, best (highest) first.
    pub fn top_bid_levels(&self, n: usize) -> Vec<PriceLevel> {
        self.bids.top_levels(n)
    }

    /// Up to `n` ask aggregates, best (lowest) first.
    pub fn top_ask_levels(&self, n: usize) -> Vec<PriceLevel> {
        self.asks.top_levels(n)
    }

    /// Best-first rank of `price` on `side`, or `None` if absent.
    pub fn depth_of(&self, side: Side, price: Price) -> Option<usize> {
        self.ladder(side)?.depth_of(price)
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Where the order with `id` rests, if it does.
    pub fn locate(&self, id: OrderId) -> Option<(Side, Price)> {
        self.locators.get(&id).copied()
    }

    pub fn bids(&self) -> &Ladder {
        &self.bids
    }

    pub fn asks(&self) -> &Ladder {
        &self.asks
    }

    // === Mutations ===

    fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
        self.locators.clear();
    }

    fn add(&mut self, ev: &MboEvent) -> Result<(), BookError> {
        if self.locators.contains_key(&ev.order_id) {
            return Err(BookError::DuplicateOrder(ev.order_id));
        }
        let Some(ladder) = Self::ladder_mut(&mut self.bids, &mut self.asks, ev.side) else {
            return Err(BookError::MissingSide(ev.order_id));
        };
        ladder.push(ev.price, ev.order_id, ev.size);
        self.locators.insert(ev.order_id, (ev.side, ev.price));
        Ok(())
    }

    fn cancel(&mut self, ev: &MboEvent) {
        let Some(&(side, price)) = self.locators.get(&ev.order_id) else {
            log::warn!("cancel for unknown order id {}, ignoring", ev.order_id);
            return;
        };
        let ladder = Self::ladder_mut(&mut self.bids, &mut self.asks, side)
            .expect("locator never stores Side::None");
        let fully_removed = {
            let Some(order) = ladder.order_mut(price, ev.order_id) else {
                log::warn!(
                    "order {} in locator index but not at {side} level {price}",
                    ev.order_id
                );
                return;
            };
            if ev.size > order.size {
                log::warn!(
                    "cancel of {} exceeds resting size {} for order {}, removing fully",
                    ev.size,
                    order.size,
                    ev.order_id
                );
            }
            if ev.size >= order.size {
                true
            } else {
                order.size -= ev.size;
                false
            }
        };
        if fully_removed {
            ladder.remove(price, ev.order_id);
            self.locators.remove(&ev.order_id);
        }
    }

    fn modify(&mut self, ev: &MboEvent) -> Result<(), BookError> {
        let Some(&(side, prev_price)) = self.locators.get(&ev.order_id) else {
            // Modifies of unknown ids upsert, per the feed's convention.
            return self.add(ev);
        };
        if ev.side != side {
            return Err(BookError::SideChange(ev.order_id));
        }
        let ladder = Self::ladder_mut(&mut self.bids, &mut self.asks, side)
            .expect("locator never stores Side::None");
        if prev_price != ev.price {
            if !ladder.remove(prev_price, ev.order_id) {
                log::warn!(
                    "order {} in locator index but not at {side} level {prev_price}",
                    ev.order_id
                );
                return Ok(());
            }
            ladder.push(ev.price, ev.order_id, ev.size);
            self.locators.insert(ev.order_id, (side, ev.price));
        } else if !ladder.resize(ev.price, ev.order_id, ev.size) {
            log::warn!(
                "order {} in locator index but not at {side} level {prev_price}",
                ev.order_id
            );
        }
        Ok(())
    }

    fn ladder_mut<'a>(bids: &'a mut Ladder, asks: &'a mut Ladder, side: Side) -> Option<&'a mut Ladder> {
        match side {
            Side::Bid => Some(bids),
            Side::Ask => Some(asks),
            Side::None => None,
        }
    }

    fn ladder(&self, side: Side) -> Option<&Ladder> {
        match side {
            Side::Bid => Some(&self.bids),
            Side::Ask => Some(&self.asks),
            Side::None => None,
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}
