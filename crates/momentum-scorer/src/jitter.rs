use sha2::{Digest, Sha256};

/// Deterministic per-symbol score jitter in [-span, +span].
///
/// Exists only to break ties between the many symbols that land on the
/// same integer score; it must be reproducible for a given symbol, so it
/// is a pure function of the symbol string.
pub fn symbol_jitter(symbol: &str, span: i64) -> i64 {
    if span <= 0 {
        return 0;
    }
    let digest = Sha256::digest(symbol.as_bytes());
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&digest[..8]);
    let n = u64::from_be_bytes(buf);
    (n % (2 * span as u64 + 1)) as i64 - span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_is_pure_in_the_symbol() {
        assert_eq!(symbol_jitter("AAPL", 5), symbol_jitter("AAPL", 5));
        assert_eq!(symbol_jitter("XYZ", 5), symbol_jitter("XYZ", 5));
    }

    #[test]
    fn jitter_stays_in_range() {
        for i in 0..500 {
            let symbol = format!("SYM{}", i);
            let j = symbol_jitter(&symbol, 5);
            assert!((-5..=5).contains(&j), "{} -> {}", symbol, j);
        }
    }

    #[test]
    fn zero_span_disables_jitter() {
        assert_eq!(symbol_jitter("AAPL", 0), 0);
    }
}
