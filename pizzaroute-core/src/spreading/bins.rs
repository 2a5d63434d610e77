use serde::Serialize;

use crate::{Kilometers, Segment};

/// Contiguous sub-range of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub index: usize,
    pub start_km: Kilometers,
    pub end_km: Kilometers,
}

/// Splits the segment into `bin_count` equal-width bins.
///
/// The last bin ends exactly at the segment end so the bins cover the
/// segment once with no gap from rounding.
#[allow(clippy::cast_precision_loss)]
pub fn partition(segment: &Segment, bin_count: usize) -> Vec<Bin> {
    let width = segment.length_km() / bin_count as f64;

    (0..bin_count)
        .map(|index| Bin {
            index,
            start_km: segment.start_km() + index as f64 * width,
            end_km: if index + 1 == bin_count {
                segment.end_km()
            } else {
                segment.start_km() + (index + 1) as f64 * width
            },
        })
        .collect()
}

/// Index of the bin holding `km`, or `None` outside the bins.
///
/// A marker on a shared boundary belongs to the lower bin.
pub fn bin_index(bins: &[Bin], km: Kilometers) -> Option<usize> {
    let first = bins.first()?;
    if km < first.start_km {
        return None;
    }
    let idx = bins.partition_point(|bin| bin.end_km < km);
    (idx < bins.len()).then_some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Route;
    use approx::assert_relative_eq;

    fn segment() -> Segment {
        let route = Route::build(&[(0.0, 0.0), (0.0, 0.3)]).unwrap();
        route.segment(5.0, 15.0).unwrap()
    }

    #[test]
    fn bins_are_contiguous() {
        let bins = partition(&segment(), 4);

        assert_eq!(bins.len(), 4);
        assert_relative_eq!(bins[0].start_km, 5.0);
        assert_relative_eq!(bins[3].end_km, 15.0);
        for pair in bins.windows(2) {
            assert_eq!(pair[0].end_km, pair[1].start_km);
        }
    }

    #[test]
    fn boundary_goes_to_lower_bin() {
        let bins = partition(&segment(), 4);

        assert_eq!(bin_index(&bins, 5.0), Some(0));
        assert_eq!(bin_index(&bins, 7.5), Some(0));
        assert_eq!(bin_index(&bins, 7.6), Some(1));
        assert_eq!(bin_index(&bins, 15.0), Some(3));
    }

    #[test]
    fn outside_the_segment_has_no_bin() {
        let bins = partition(&segment(), 4);

        assert_eq!(bin_index(&bins, 4.99), None);
        assert_eq!(bin_index(&bins, 15.01), None);
    }
}
