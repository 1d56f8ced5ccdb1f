use crate::Map;
use bas_core::models::{Bid, Map as ResourceMap, Resource, ResourceId};

/// Order bids by price, strictly descending. The sort is stable, so bids
/// with equal prices keep their snapshot (submission) order, which is what
/// the deterministic tie-break is defined against.
pub(crate) fn sort_bids(bids: &[Bid]) -> Vec<&Bid> {
    let mut sorted: Vec<&Bid> = bids.iter().collect();
    sorted.sort_by(|a, b| {
        b.price
            .partial_cmp(&a.price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

/// The reference winner-determination search.
///
/// Every subset of the price-sorted bid sequence is enumerated, by
/// ascending subset size and within a size in standard combination order.
/// Each subset is walked in sorted order against a fresh per-resource usage
/// counter: a bid joins the subset's induced allocation only if its whole
/// bundle still fits, otherwise it is skipped with the counters untouched.
/// A candidate replaces the incumbent only on strictly greater welfare, so
/// among equal-welfare allocations the one reached earliest in enumeration
/// order wins.
///
/// This is exponential in the number of bids. That is acceptable at the
/// bid counts this system sees; a pruned search may be substituted later
/// provided the returned (allocation, welfare) pair is identical,
/// tie-break included.
pub(crate) fn find_best_allocation<'a>(
    resources: &ResourceMap<ResourceId, Resource>,
    sorted: &[&'a Bid],
) -> (Vec<&'a Bid>, f64) {
    let mut best: Vec<&Bid> = Vec::new();
    let mut max_welfare = 0.0_f64;

    for size in 0..=sorted.len() {
        let mut subsets = Combinations::new(sorted.len(), size);
        while let Some(subset) = subsets.next() {
            let mut usage = Map::<ResourceId, u32>::default();
            let mut current: Vec<&Bid> = Vec::new();
            let mut welfare = 0.0_f64;

            for &index in subset {
                let bid = sorted[index];
                if fits(resources, &usage, bid) {
                    for resource_id in &bid.bundle {
                        *usage.entry(*resource_id).or_insert(0) += 1;
                    }
                    welfare += bid.price;
                    current.push(bid);
                }
            }

            if welfare > max_welfare {
                max_welfare = welfare;
                best = current;
            }
        }
    }

    (best, max_welfare)
}

/// Whether `bid`'s entire bundle fits on top of the current usage. The
/// check is all-or-nothing: a bid that does not fit leaves usage untouched.
fn fits(
    resources: &ResourceMap<ResourceId, Resource>,
    usage: &Map<ResourceId, u32>,
    bid: &Bid,
) -> bool {
    let mut tentative = Map::<ResourceId, u32>::default();
    for resource_id in &bid.bundle {
        let demanded = tentative.entry(*resource_id).or_insert(0);
        *demanded += 1;
        let used = usage.get(resource_id).copied().unwrap_or(0) + *demanded;
        match resources.get(resource_id) {
            Some(resource) if used <= resource.capacity => {}
            _ => return false,
        }
    }
    true
}

/// Enumerates the r-element subsets of 0..n in lexicographic order,
/// matching the standard "choose r from n, preserving relative order"
/// enumeration the reference semantics are defined against.
struct Combinations {
    n: usize,
    r: usize,
    indices: Vec<usize>,
    started: bool,
}

impl Combinations {
    fn new(n: usize, r: usize) -> Self {
        Self {
            n,
            r,
            indices: (0..r).collect(),
            started: false,
        }
    }

    // Not an Iterator impl: each yield borrows the internal index buffer.
    fn next(&mut self) -> Option<&[usize]> {
        if !self.started {
            self.started = true;
            if self.r > self.n {
                return None;
            }
            return Some(&self.indices);
        }

        // Find the rightmost index that has room to advance.
        let mut i = self.r;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.r {
                break;
            }
        }

        self.indices[i] += 1;
        for j in (i + 1)..self.r {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}
