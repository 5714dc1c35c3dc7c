//! # decibook
//!
//! A deterministic Market-By-Order to Market-By-Price top-10 (MBP-10)
//! reconstruction engine.
//!
//! ## Features
//!
//! - **Per-publisher books**: one limit order book per
//!   (instrument, publisher) pair, with price-time priority
//! - **Cross-publisher depth**: per-row top-10 aggregation across all
//!   publishers of an instrument
//! - **Trade correlation**: trade → fill → cancel sequences become
//!   synthetic depletions of the resting side
//! - **Fixed-point prices**: integer 10⁻⁹ units end to end, floats
//!   never leave the I/O boundary
//! - **Deterministic replay**: single-threaded, driven purely by the
//!   input sequence
//!
//! ## Quick Start
//!
//! ```
//! use decibook::{Action, MboEvent, OrderId, Price, Reconstructor, Side};
//!
//! let mut recon = Reconstructor::new();
//!
//! let add = MboEvent {
//!     instrument_id: 7,
//!     publisher_id: 3,
//!     action: Action::Add,
//!     side: Side::Bid,
//!     price: Price(100 * Price::SCALE),
//!     size: 5,
//!     order_id: OrderId(1),
//!     ..MboEvent::default()
//! };
//!
//! let row = recon.process(add).unwrap();
//! assert_eq!(row.depth, 0);
//! assert_eq!(row.bids[0].price, Price(100 * Price::SCALE));
//! assert_eq!(row.bids[0].size, 5);
//! assert_eq!(row.bids[0].count, 1);
//! assert!(row.asks.is_empty());
//! ```
//!
//! ## Price Representation
//!
//! Prices are [`i64`] values in 10⁻⁹ units of the quote currency and
//! render as fixed-point with nine fractional digits:
//!
//! ```
//! use decibook::Price;
//!
//! let price = Price(100_500_000_000); // 100.5
//! assert_eq!(format!("{price}"), "100.500000000");
//! assert_eq!(format!("{}", Price::UNDEFINED), "");
//! ```
//!
//! ## Pipeline
//!
//! [`MboReader`] parses records, [`Reconstructor`] applies them and
//! emits one [`MbpRow`] per event, [`write_row`] renders rows:
//!
//! ```
//! use decibook::{MboReader, Reconstructor, write_header, write_row};
//!
//! let input = "\
//! header
//! t1,t2,160,3,7,A,B,100,5,0,1,130,100,42,XYZ
//! ";
//! let mut reader = MboReader::new(input.as_bytes());
//! reader.skip_first_line().unwrap();
//!
//! let mut recon = Reconstructor::new();
//! let mut out = Vec::new();
//! write_header(&mut out).unwrap();
//! while let Some(ev) = reader.next_event().unwrap() {
//!     let row = recon.process(ev).unwrap();
//!     write_row(&mut out, &row).unwrap();
//! }
//! assert_eq!(recon.rows_emitted(), 1);
//! ```

mod action;
mod book;
mod error;
mod event;
mod feed;
mod ladder;
mod level;
mod market;
mod mbp;
mod recon;
mod side;
mod types;

// Re-export public API
pub use action::Action;
pub use book::Book;
pub use error::{BookError, Error, Result};
pub use event::MboEvent;
pub use feed::{parse_price, parse_record, MboReader};
pub use ladder::Ladder;
pub use level::{Level, PriceLevel, RestingOrder};
pub use market::Market;
pub use mbp::{write_header, write_row, MbpRow, MBP_DEPTH};
pub use recon::{ReconConfig, Reconstructor};
pub use side::Side;
pub use types::{InstrumentId, OrderId, Price, PublisherId, Size};
