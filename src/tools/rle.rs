//! Marker based run length coding.
//!
//! One byte value, the marker, introduces escape sequences. The byte after the marker holds
//! the run length minus one:
//! - runs of 4 to 256 identical bytes become `marker, count, symbol`
//! - runs of 1 to 3 bytes are left as they are, unless the byte is the marker itself, which can
//!   never appear raw and becomes `marker, count`
//!
//! A count below RLE_THRESHOLD therefore always means "this many plus one markers".
//!

use log::trace;

/// Smallest stored count (run length - 1) worth a three byte escape.
const RLE_THRESHOLD: u8 = 3;
/// Longest run a single escape can describe.
const MAX_RUN: usize = 256;

/// Split `data` into runs of identical bytes, none longer than MAX_RUN. Calls `f` with the
/// byte and the run length.
fn for_each_run(data: &[u8], mut f: impl FnMut(u8, usize)) {
    let mut idx = 0;
    while idx < data.len() {
        let compare = data[idx];
        let run = data[idx..]
            .iter()
            .take(MAX_RUN)
            .position(|&x| x != compare)
            .unwrap_or_else(|| (data.len() - idx).min(MAX_RUN));
        f(compare, run);
        idx += run;
    }
}

/// Run length encode `data` using `marker` as the escape byte.
pub fn rle_encode(data: &[u8], marker: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + data.len() / 8);
    for_each_run(data, |symbol, run| {
        let count = (run - 1) as u8;
        if count < RLE_THRESHOLD {
            if symbol != marker {
                out.extend(std::iter::repeat(symbol).take(run));
            } else {
                out.extend_from_slice(&[marker, count]);
            }
        } else {
            out.extend_from_slice(&[marker, count, symbol]);
        }
    });
    trace!("RLE with marker {}: {} -> {} bytes", marker, data.len(), out.len());
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RleState {
    Scanning,
    ReadingCount,
    ReadingSymbol(u8),
}

/// Undo rle_encode. A sequence cut off after the marker or the count is dropped.
pub fn rle_decode(data: &[u8], marker: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut state = RleState::Scanning;
    for &val in data {
        state = match state {
            RleState::Scanning if val == marker => RleState::ReadingCount,
            RleState::Scanning => {
                out.push(val);
                RleState::Scanning
            }
            RleState::ReadingCount if val < RLE_THRESHOLD => {
                out.extend(std::iter::repeat(marker).take(val as usize + 1));
                RleState::Scanning
            }
            RleState::ReadingCount => RleState::ReadingSymbol(val),
            RleState::ReadingSymbol(count) => {
                out.extend(std::iter::repeat(val).take(count as usize + 1));
                RleState::Scanning
            }
        };
    }
    out
}

/// Pick the marker that costs the least: the byte value with the fewest runs of length one,
/// lowest value on ties. A marker byte outside of a long run costs an extra byte each time.
pub fn get_optimal_marker(data: &[u8]) -> u8 {
    let mut singles = [0_usize; 256];
    for_each_run(data, |symbol, run| {
        if run == 1 {
            singles[symbol as usize] += 1;
        }
    });
    singles
        .iter()
        .enumerate()
        .min_by_key(|&(_, count)| count)
        .map(|(marker, _)| marker as u8)
        .unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::{get_optimal_marker, rle_decode, rle_encode};

    #[test]
    fn encode_test() {
        let data = b"abbbccccddddddddz";
        assert_eq!(
            rle_encode(data, 0),
            vec![b'a', b'b', b'b', b'b', 0, 3, b'c', 0, 7, b'd', b'z']
        );
    }

    #[test]
    fn marker_escape_test() {
        // 1, 3 and 5 markers in a row
        let data = [7, 0, 7, 0, 0, 0, 7, 0, 0, 0, 0, 0];
        let encoded = rle_encode(&data, 0);
        assert_eq!(encoded, vec![7, 0, 0, 7, 0, 2, 7, 0, 4, 0]);
        assert_eq!(rle_decode(&encoded, 0), data.to_vec());
    }

    #[test]
    fn long_run_test() {
        let mut data = vec![9_u8; 600];
        data.push(1);
        let encoded = rle_encode(&data, 200);
        // 256 + 256 + 88, then the single 1
        assert_eq!(encoded, vec![200, 255, 9, 200, 255, 9, 200, 87, 9, 1]);
        assert_eq!(rle_decode(&encoded, 200), data);
    }

    #[test]
    fn round_trip_test() {
        let mut state = 0x1234_5678_u32;
        let mut data = vec![];
        for _ in 0..2000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let run = (state >> 24) as usize % 9 + 1;
            data.extend(std::iter::repeat((state % 5) as u8).take(run));
        }
        for marker in [0, 1, 4, 255] {
            assert_eq!(rle_decode(&rle_encode(&data, marker), marker), data);
        }
        let marker = get_optimal_marker(&data);
        assert_eq!(rle_decode(&rle_encode(&data, marker), marker), data);
    }

    #[test]
    fn empty_test() {
        assert!(rle_encode(&[], 0).is_empty());
        assert!(rle_decode(&[], 0).is_empty());
        assert_eq!(get_optimal_marker(&[]), 0);
    }

    #[test]
    fn optimal_marker_test() {
        // every value 0..=255 appears once except 3, which only appears in runs
        let mut data: Vec<u8> = (0..=255).filter(|&v| v != 3).collect();
        data.extend_from_slice(&[3, 3, 3, 3]);
        data.extend_from_slice(&[5, 5]);
        assert_eq!(get_optimal_marker(&data), 3);

        // values that never occur win, lowest first
        assert_eq!(get_optimal_marker(&[0, 1, 2, 0, 1]), 3);
        assert_eq!(get_optimal_marker(&[0, 0, 1]), 0);
    }
}
