use serde::{Deserialize, Serialize};

use crate::values::SignalPoint;

/// Decoded, trimmed and downsampled series for one product.
///
/// Each sequence is independently time-ordered; sequences do not share
/// timestamps because the feed records a point only when a field changes.
/// This is what charting consumes, and the window-based analyzers read the
/// same sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesBundle {
    pub sales_rank: Vec<SignalPoint>,
    pub buy_box_price: Vec<SignalPoint>,
    pub new_price: Vec<SignalPoint>,
    pub amazon_price: Vec<SignalPoint>,
    pub used_price: Vec<SignalPoint>,
    pub new_offer_count: Vec<SignalPoint>,
    /// Buy-box view with "no data" points and the -1 sentinel retained,
    /// so gap/availability inference can see the timeline shape
    pub buy_box_availability: Vec<SignalPoint>,
    /// Lightning-deal price while a deal is live, -1.0 sentinel otherwise
    pub lightning_deal: Vec<SignalPoint>,
}

impl SeriesBundle {
    /// Primary price series for stats, trend and promotion detection:
    /// buy box, falling back to marketplace new, then Amazon's own offer.
    pub fn primary_price(&self) -> &[SignalPoint] {
        if !self.buy_box_price.is_empty() {
            &self.buy_box_price
        } else if !self.new_price.is_empty() {
            &self.new_price
        } else {
            &self.amazon_price
        }
    }

    /// True when no sequence holds a single point
    pub fn is_empty(&self) -> bool {
        self.sales_rank.is_empty()
            && self.buy_box_price.is_empty()
            && self.new_price.is_empty()
            && self.amazon_price.is_empty()
            && self.used_price.is_empty()
            && self.new_offer_count.is_empty()
            && self.buy_box_availability.is_empty()
            && self.lightning_deal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::timestamp_from_offset;

    fn point(offset: i64, value: f64) -> SignalPoint {
        SignalPoint::new(timestamp_from_offset(offset).unwrap(), value)
    }

    #[test]
    fn test_primary_price_fallback_order() {
        let mut bundle = SeriesBundle::default();
        assert!(bundle.primary_price().is_empty());

        bundle.amazon_price = vec![point(0, 10.0)];
        assert_eq!(bundle.primary_price()[0].value, Some(10.0));

        bundle.new_price = vec![point(0, 9.0)];
        assert_eq!(bundle.primary_price()[0].value, Some(9.0));

        bundle.buy_box_price = vec![point(0, 8.0)];
        assert_eq!(bundle.primary_price()[0].value, Some(8.0));
    }

    #[test]
    fn test_is_empty() {
        let mut bundle = SeriesBundle::default();
        assert!(bundle.is_empty());

        bundle.lightning_deal = vec![point(0, -1.0)];
        assert!(!bundle.is_empty());
    }
}
