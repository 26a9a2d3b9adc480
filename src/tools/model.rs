//! Adjacent value difference model.
//!
//! Neighbouring samples of an image tend to be close, so replacing every byte by its
//! difference to the previous byte moves most of the mass towards 0 and 255 and makes the
//! data friendlier to the run length and Huffman stages. Arithmetic wraps modulo 256.
//!

/// Replace each byte by its difference to the previous original byte (the first byte is
/// taken relative to 0).
pub fn encode_adj_val_diff(data: &[u8]) -> Vec<u8> {
    let mut prev = 0_u8;
    data.iter()
        .map(|&val| {
            let diff = val.wrapping_sub(prev);
            prev = val;
            diff
        })
        .collect()
}

/// Undo encode_adj_val_diff with a running sum.
pub fn decode_adj_val_diff(data: &[u8]) -> Vec<u8> {
    let mut prev = 0_u8;
    data.iter()
        .map(|&diff| {
            prev = prev.wrapping_add(diff);
            prev
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{decode_adj_val_diff, encode_adj_val_diff};

    #[test]
    fn encode_test() {
        assert_eq!(encode_adj_val_diff(&[10, 12, 12, 9, 0, 255]), vec![10, 2, 0, 253, 247, 255]);
        assert!(encode_adj_val_diff(&[]).is_empty());
    }

    #[test]
    fn decode_test() {
        assert_eq!(decode_adj_val_diff(&[10, 2, 0, 253, 247, 255]), vec![10, 12, 12, 9, 0, 255]);
    }

    #[test]
    fn gradient_test() {
        let ramp: Vec<u8> = (0..1000_u32).map(|i| (i * 3) as u8).collect();
        let diffs = encode_adj_val_diff(&ramp);
        assert!(diffs.iter().skip(1).all(|&d| d == 3));
        assert_eq!(decode_adj_val_diff(&diffs), ramp);
    }
}
