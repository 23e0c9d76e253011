use std::collections::HashSet;

/// Broad-market and thematic ETFs we recognize by name. Sector SPDRs
/// (XLF, XLK, ...) are matched by prefix instead.
const KNOWN_ETFS: &[&str] = &[
    "SPY", "QQQ", "IWM", "DIA", "VTI", "VOO", "VEA", "VWO", "VNQ", "GLD", "SLV", "USO", "TLT",
    "IEF", "HYG", "LQD", "ARKK", "ARKG", "SMH", "SOXX", "XBI", "KRE", "JETS", "EEM", "EFA", "GDX",
];

/// Stock vs. ETF membership is a classification rule, not an intrinsic
/// property of the symbol.
#[derive(Debug, Clone)]
pub struct EtfClassifier {
    known: HashSet<&'static str>,
}

impl Default for EtfClassifier {
    fn default() -> Self {
        Self {
            known: KNOWN_ETFS.iter().copied().collect(),
        }
    }
}

impl EtfClassifier {
    pub fn is_etf(&self, symbol: &str) -> bool {
        if self.known.contains(symbol) {
            return true;
        }
        // Sector SPDR convention: XLF, XLK, XLE, ...
        symbol.len() == 3 && symbol.starts_with("XL")
    }
}
