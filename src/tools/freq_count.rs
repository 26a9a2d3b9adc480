use rayon::prelude::*;

use crate::huffman_coding::canonical::SYMBOL_COUNT;

/// Inputs above this size are counted in parallel.
const PARALLEL_THRESHOLD: usize = 64_000;
const CHUNK_SIZE: usize = 16_000;

fn count_into(mut hist: Vec<u64>, data: &[u8]) -> Vec<u64> {
    data.iter().for_each(|&byte| hist[byte as usize] += 1);
    hist
}

/// Histogram of the byte values in `data`, the weights of the Huffman code.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    if data.len() <= PARALLEL_THRESHOLD {
        return count_into(vec![0; SYMBOL_COUNT], data);
    }
    data.par_chunks(CHUNK_SIZE)
        .fold(|| vec![0_u64; SYMBOL_COUNT], count_into)
        .reduce(
            || vec![0_u64; SYMBOL_COUNT],
            |mut total, part| {
                total.iter_mut().zip(part).for_each(|(t, p)| *t += p);
                total
            },
        )
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn small_test() {
        let f = freqs(b"hello");
        assert_eq!(f[b'l' as usize], 2);
        assert_eq!(f[b'h' as usize], 1);
        assert_eq!(f.iter().sum::<u64>(), 5);
    }

    #[test]
    fn parallel_test() {
        let data: Vec<u8> = (0..200_000_u32).map(|i| (i % 256) as u8).collect();
        let f = freqs(&data);
        assert_eq!(f.len(), 256);
        assert_eq!(f[0], 782);
        assert_eq!(f[255], 781);
        assert_eq!(f.iter().sum::<u64>(), 200_000);
    }
}
