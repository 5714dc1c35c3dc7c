//! MBO CSV feed parsing.
//!
//! Records are comma-separated with the symbol as the fifteenth and
//! final field, which absorbs the rest of the line. Prices are parsed
//! straight from decimal text into the 10⁻⁹-scaled integer so no binary
//! floating point touches the pipeline.

use std::io::BufRead;
use std::str::FromStr;

use crate::{Action, Error, MboEvent, OrderId, Price, Side};

/// Streaming reader over MBO records.
pub struct MboReader<R> {
    reader: R,
    line: String,
    line_no: u64,
}

impl<R: BufRead> MboReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
        }
    }

    /// Discard one line unconditionally. The first input line is a
    /// header or initial clear and never dispatched.
    pub fn skip_first_line(&mut self) -> Result<(), Error> {
        self.line.clear();
        self.reader.read_line(&mut self.line)?;
        self.line_no += 1;
        Ok(())
    }

    /// Read and parse the next record. Blank lines are skipped;
    /// `Ok(None)` signals end of input.
    pub fn next_event(&mut self) -> Result<Option<MboEvent>, Error> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let record = self.line.trim_end_matches(['\r', '\n']);
            if record.is_empty() {
                continue;
            }
            return parse_record(record, self.line_no).map(Some);
        }
    }
}

/// Parse one MBO record.
pub fn parse_record(record: &str, line_no: u64) -> Result<MboEvent, Error> {
    let cols: Vec<&str> = record.splitn(15, ',').collect();
    if cols.len() < 15 {
        return Err(Error::Parse {
            line: line_no,
            msg: format!("expected 15 fields, got {}", cols.len()),
        });
    }

    let action = cols[5]
        .chars()
        .next()
        .and_then(Action::from_char)
        .ok_or_else(|| bad_field(line_no, "action", cols[5]))?;
    let side = cols[6]
        .chars()
        .next()
        .and_then(Side::from_char)
        .ok_or_else(|| bad_field(line_no, "side", cols[6]))?;
    let price = parse_price(cols[7]).ok_or_else(|| bad_field(line_no, "price", cols[7]))?;

    Ok(MboEvent {
        ts_recv: cols[0].to_string(),
        ts_event: cols[1].to_string(),
        rtype: num(cols[2], "rtype", line_no)?,
        publisher_id: num(cols[3], "publisher_id", line_no)?,
        instrument_id: num(cols[4], "instrument_id", line_no)?,
        action,
        side,
        price,
        size: num(cols[8], "size", line_no)?,
        channel_id: num(cols[9], "channel_id", line_no)?,
        order_id: OrderId(num(cols[10], "order_id", line_no)?),
        flags: num(cols[11], "flags", line_no)?,
        ts_in_delta: num(cols[12], "ts_in_delta", line_no)?,
        sequence: num(cols[13], "sequence", line_no)?,
        symbol: cols[14].to_string(),
    })
}

/// Parse decimal price text into the 10⁻⁹-scaled integer.
///
/// Empty text is the "no price" sentinel. Fraction digits beyond the
/// ninth round half-up on the tenth; digits after that are ignored.
/// Returns `None` on malformed text or overflow.
pub fn parse_price(text: &str) -> Option<Price> {
    if text.is_empty() {
        return Some(Price::UNDEFINED);
    }
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, frac) = match rest.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (rest, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }

    let mut units: i64 = 0;
    for byte in whole.bytes() {
        if !byte.is_ascii_digit() {
            return None;
        }
        units = units
            .checked_mul(10)?
            .checked_add(i64::from(byte - b'0'))?;
    }

    let mut nanos: i64 = 0;
    let mut digits = 0usize;
    for (i, byte) in frac.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return None;
        }
        if i < 9 {
            nanos = nanos * 10 + i64::from(byte - b'0');
            digits += 1;
        } else if i == 9 && byte >= b'5' {
            nanos += 1;
        }
    }
    for _ in digits..9 {
        nanos *= 10;
    }

    let value = units.checked_mul(Price::SCALE)?.checked_add(nanos)?;
    Some(Price(if negative { -value } else { value }))
}

fn num<T: FromStr>(value: &str, name: &str, line: u64) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| bad_field(line, name, value))
}

fn bad_field(line: u64, name: &str, value: &str) -> Error {
    Error::Parse {
        line,
        msg: format!("bad {name}: `{value}`"),
    }
}
