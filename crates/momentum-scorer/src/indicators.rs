/// Mean of the trailing `period` values; None when there aren't enough
pub fn trailing_mean(data: &[f64], period: usize) -> Option<f64> {
    if period == 0 || data.len() < period {
        return None;
    }
    let sum: f64 = data[data.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// Percent change of `current` against the close `samples_back` from the
/// end (counting the last sample as 1 back). 0 when the series is too
/// short or the reference close is zero.
pub fn pct_change_from(closes: &[f64], current: f64, samples_back: usize) -> f64 {
    if samples_back == 0 || closes.len() < samples_back {
        return 0.0;
    }
    let reference = closes[closes.len() - samples_back];
    if reference == 0.0 {
        return 0.0;
    }
    (current - reference) / reference * 100.0
}

/// Recent-vs-baseline volume ratio; 1.0 whenever undefined
pub fn volume_ratio(volumes: &[f64], short: usize, long: usize) -> f64 {
    match (trailing_mean(volumes, short), trailing_mean(volumes, long)) {
        (Some(recent), Some(baseline)) if baseline > 0.0 => recent / baseline,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_mean_uses_last_window() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(trailing_mean(&data, 2), Some(4.5));
        assert_eq!(trailing_mean(&data, 5), Some(3.0));
        assert_eq!(trailing_mean(&data, 6), None);
    }

    #[test]
    fn pct_change_counts_back_from_end() {
        let closes = vec![100.0, 110.0, 120.0];
        // 3 back is the first close
        assert!((pct_change_from(&closes, 120.0, 3) - 20.0).abs() < 1e-9);
        // too short
        assert_eq!(pct_change_from(&closes, 120.0, 4), 0.0);
    }

    #[test]
    fn volume_ratio_defaults_to_one() {
        assert_eq!(volume_ratio(&[], 5, 20), 1.0);
        assert_eq!(volume_ratio(&vec![0.0; 25], 5, 20), 1.0);

        let mut volumes = vec![1.0; 15];
        volumes.extend(vec![2.0; 5]);
        // mean(last 5) = 2.0, mean(last 20) = 1.25
        assert!((volume_ratio(&volumes, 5, 20) - 1.6).abs() < 1e-9);
    }
}
