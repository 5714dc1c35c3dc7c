//! The Market-By-Order input record

use crate::{Action, InstrumentId, OrderId, Price, PublisherId, Side, Size};

/// One parsed Market-By-Order record.
///
/// All fields are carried through to the output row; only action, side,
/// price, size, and order id drive book state. Timestamps are opaque
/// strings that are echoed, never interpreted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MboEvent {
    pub ts_recv: String,
    pub ts_event: String,
    pub rtype: u8,
    pub publisher_id: PublisherId,
    pub instrument_id: InstrumentId,
    pub action: Action,
    pub side: Side,
    pub price: Price,
    pub size: Size,
    pub channel_id: u8,
    pub order_id: OrderId,
    pub flags: u8,
    pub ts_in_delta: i32,
    pub sequence: u32,
    pub symbol: String,
}

impl Default for MboEvent {
    fn default() -> Self {
        Self {
            ts_recv: String::new(),
            ts_event: String::new(),
            rtype: 0,
            publisher_id: 0,
            instrument_id: 0,
            action: Action::None,
            side: Side::None,
            price: Price::UNDEFINED,
            size: 0,
            channel_id: 0,
            order_id: OrderId(0),
            flags: 0,
            ts_in_delta: 0,
            sequence: 0,
            symbol: String::new(),
        }
    }
}
