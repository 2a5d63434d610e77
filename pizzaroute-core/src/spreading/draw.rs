use rand::Rng;

/// Draws `amount` indices out of `0..len` without replacement.
///
/// Index `r` starts with weight `len - r`, so lower indices (better ranks)
/// are proportionally more likely to be drawn. The result is sorted.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn rank_weighted_sample<R: Rng>(rng: &mut R, len: usize, amount: usize) -> Vec<usize> {
    let mut pool: Vec<(usize, f64)> = (0..len).map(|rank| (rank, (len - rank) as f64)).collect();
    let mut chosen = Vec::with_capacity(amount.min(len));

    while chosen.len() < amount && !pool.is_empty() {
        let total: f64 = pool.iter().map(|(_, weight)| weight).sum();
        let mut target = rng.random::<f64>() * total;

        let mut pick = pool.len() - 1;
        for (pos, (_, weight)) in pool.iter().enumerate() {
            if target < *weight {
                pick = pos;
                break;
            }
            target -= weight;
        }

        chosen.push(pool.remove(pick).0);
    }

    chosen.sort_unstable();
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn draws_distinct_indices() {
        let mut rng = Pcg64::seed_from_u64(7);
        let sample = rank_weighted_sample(&mut rng, 10, 4);

        assert_eq!(sample.len(), 4);
        let mut deduped = sample.clone();
        deduped.dedup();
        assert_eq!(deduped, sample);
        assert!(sample.iter().all(|&i| i < 10));
    }

    #[test]
    fn amount_larger_than_pool_returns_everything() {
        let mut rng = Pcg64::seed_from_u64(7);
        assert_eq!(rank_weighted_sample(&mut rng, 3, 5), vec![0, 1, 2]);
    }

    #[test]
    fn top_rank_is_drawn_most_often() {
        let mut rng = Pcg64::seed_from_u64(1234);
        let mut counts = [0_u32; 5];
        for _ in 0..2000 {
            for idx in rank_weighted_sample(&mut rng, 5, 1) {
                counts[idx] += 1;
            }
        }

        assert!(counts.windows(2).all(|w| w[0] > w[1]), "{counts:?}");
    }
}
