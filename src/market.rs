//! Market: all books, keyed by (instrument, publisher), plus the
//! cross-publisher aggregation that feeds the MBP-10 output.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::{
    Book, BookError, InstrumentId, MboEvent, Price, PriceLevel, PublisherId, Side, Size,
};

/// Owns every book in the run. Books are created lazily on the first
/// event for their (instrument, publisher) pair and never destroyed;
/// a Clear merely empties one book's contents.
#[derive(Clone, Debug, Default)]
pub struct Market {
    books: FxHashMap<InstrumentId, FxHashMap<PublisherId, Book>>,
}

impl Market {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an event to its book, creating the book on demand.
    pub fn apply(&mut self, ev: &MboEvent) -> Result<(), BookError> {
        self.books
            .entry(ev.instrument_id)
            .or_default()
            .entry(ev.publisher_id)
            .or_default()
            .apply(ev)
    }

    /// Route a synthetic depletion to an existing book.
    ///
    /// A missing book means a trade for a market this run never saw;
    /// that is logged and dropped rather than conjuring a book.
    pub fn deplete(
        &mut self,
        instrument_id: InstrumentId,
        publisher_id: PublisherId,
        price: Price,
        size: Size,
        side: Side,
    ) {
        match self
            .books
            .get_mut(&instrument_id)
            .and_then(|books| books.get_mut(&publisher_id))
        {
            Some(book) => book.deplete(price, size, side),
            None => log::error!(
                "synthetic trade for non-existent book (instrument {instrument_id}, publisher {publisher_id}), ignoring"
            ),
        }
    }

    /// Cross-publisher top-`n` bid aggregation, best (highest) first.
    ///
    /// Each publisher book contributes its own top-`n`; levels sharing a
    /// price merge by summing size and count. Consulting only per-book
    /// top-`n` bounds per-row work and is exact as long as no publisher
    /// hides interesting levels below its own best `n`.
    pub fn top_bid_levels(&self, instrument_id: InstrumentId, n: usize) -> Vec<PriceLevel> {
        let merged = self.merge_levels(instrument_id, |book| book.top_bid_levels(n));
        merged.into_values().rev().take(n).collect()
    }

    /// Cross-publisher top-`n` ask aggregation, best (lowest) first.
    pub fn top_ask_levels(&self, instrument_id: InstrumentId, n: usize) -> Vec<PriceLevel> {
        let merged = self.merge_levels(instrument_id, |book| book.top_ask_levels(n));
        merged.into_values().take(n).collect()
    }

    /// Depth of `price` in one publisher's book; 0 when the book or the
    /// level does not exist.
    pub fn depth(
        &self,
        instrument_id: InstrumentId,
        publisher_id: PublisherId,
        price: Price,
        side: Side,
    ) -> u32 {
        self.books
            .get(&instrument_id)
            .and_then(|books| books.get(&publisher_id))
            .and_then(|book| book.depth_of(side, price))
            .unwrap_or(0) as u32
    }

    /// Number of books created so far, across all instruments.
    pub fn book_count(&self) -> usize {
        self.books.values().map(|books| books.len()).sum()
    }

    fn merge_levels(
        &self,
        instrument_id: InstrumentId,
        per_book: impl Fn(&Book) -> Vec<PriceLevel>,
    ) -> BTreeMap<Price, PriceLevel> {
        let mut merged = BTreeMap::new();
        if let Some(books) = self.books.get(&instrument_id) {
            for book in books.values() {
                for level in per_book(book) {
                    merged
                        .entry(level.price)
                        .and_modify(|agg: &mut PriceLevel| {
                            agg.size += level.size;
                            agg.count += level.count;
                        })
                        .or_insert(level);
                }
            }
        }
        merged
    }
}
