//! MBP-10 output rows and their CSV rendering.
//!
//! The writer mirrors the feed's fixed layout: a leading unnamed row
//! index column, the echoed event fields, the computed depth, then ten
//! (bid_px, bid_sz, bid_ct, ask_px, ask_sz, ask_ct) groups, the symbol,
//! and the order id. Empty slots render an empty price and `0,0`.

use std::io::{self, Write};

use crate::{MboEvent, PriceLevel};

/// Number of price levels per side in the output.
pub const MBP_DEPTH: usize = 10;

/// Record type tag of MBP-10 rows on the wire.
const MBP_RTYPE: u8 = 10;

/// One output row: the triggering event plus the cross-publisher top-10
/// snapshot of its instrument.
#[derive(Clone, Debug)]
pub struct MbpRow {
    /// Dense zero-based row index.
    pub index: u64,
    /// The input event this row echoes.
    pub event: MboEvent,
    /// Best-first rank of the affected price level, 0 when not applicable.
    pub depth: u32,
    /// Bid aggregates, best (highest) first. At most [`MBP_DEPTH`].
    pub bids: Vec<PriceLevel>,
    /// Ask aggregates, best (lowest) first. At most [`MBP_DEPTH`].
    pub asks: Vec<PriceLevel>,
}

/// Write the MBP column header.
pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    write!(
        out,
        ",ts_recv,ts_event,rtype,publisher_id,instrument_id,action,side,depth,price,size,flags,ts_in_delta,sequence,"
    )?;
    for i in 0..MBP_DEPTH {
        write!(
            out,
            "bid_px_{i:02},bid_sz_{i:02},bid_ct_{i:02},ask_px_{i:02},ask_sz_{i:02},ask_ct_{i:02}"
        )?;
        if i < MBP_DEPTH - 1 {
            write!(out, ",")?;
        }
    }
    writeln!(out, ",symbol,order_id")
}

/// Write one MBP row.
pub fn write_row<W: Write>(out: &mut W, row: &MbpRow) -> io::Result<()> {
    let ev = &row.event;
    write!(
        out,
        "{},{},{},{},{},{},{},{},{},",
        row.index,
        ev.ts_recv,
        ev.ts_event,
        MBP_RTYPE,
        ev.publisher_id,
        ev.instrument_id,
        ev.action.as_char(),
        ev.side.as_char(),
        row.depth
    )?;
    // Price displays empty when undefined.
    write!(
        out,
        "{},{},{},{},{},",
        ev.price, ev.size, ev.flags, ev.ts_in_delta, ev.sequence
    )?;
    for i in 0..MBP_DEPTH {
        match row.bids.get(i) {
            Some(level) => write!(out, "{},{},{},", level.price, level.size, level.count)?,
            None => write!(out, ",0,0,")?,
        }
        match row.asks.get(i) {
            Some(level) => write!(out, "{},{},{}", level.price, level.size, level.count)?,
            None => write!(out, ",0,0")?,
        }
        if i < MBP_DEPTH - 1 {
            write!(out, ",")?;
        }
    }
    writeln!(out, ",{},{}", ev.symbol, ev.order_id)
}
