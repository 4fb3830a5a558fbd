use std::collections::VecDeque;

/// Trailing simple moving average with a minimum period of one.
///
/// Until `period` prices have been seen the mean covers however many are
/// available, so the first output equals the first price.
#[derive(Debug)]
pub struct MovingAverage {
    period: usize,
    prices: VecDeque<f64>,
}

impl MovingAverage {
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            period,
            prices: VecDeque::with_capacity(period),
        }
    }

    pub fn add(&mut self, price: f64) -> f64 {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }

        // Summing offsets from the oldest price keeps a flat window exactly flat
        let pivot = self.prices[0];
        let offset = self.prices.iter().map(|&x| x - pivot).sum::<f64>() / self.prices.len() as f64;
        pivot + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trailing_mean(values: &[f64], period: usize) -> Vec<f64> {
        let mut model = MovingAverage::new(period);
        values.iter().map(|&v| model.add(v)).collect()
    }

    #[test]
    fn test_min_period_one() {
        let ma = trailing_mean(&[10.0, 20.0, 30.0, 40.0], 3);
        assert_eq!(ma[0], 10.0);
        assert!((ma[1] - 15.0).abs() < 1e-12);
        assert!((ma[2] - 20.0).abs() < 1e-12);
        assert!((ma[3] - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_window_is_exact() {
        let ma = trailing_mean(&[0.1; 50], 7);
        assert!(ma.iter().all(|&m| m == 0.1));
    }

    #[test]
    fn test_window_of_one_tracks_price() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_eq!(trailing_mean(&values, 1), values.to_vec());
    }

    #[test]
    fn test_zero_period_treated_as_one() {
        assert_eq!(trailing_mean(&[2.0, 6.0], 0), vec![2.0, 6.0]);
    }
}
