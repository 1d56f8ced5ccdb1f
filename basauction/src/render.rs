use bas_core::models::{Bid, ClearingOutcome, Map, ProviderId, Resource, ResourceId};
use std::fmt::Write as _;

/// Render rows under headers with space-padded columns. Good enough for
/// terminal listings; anything fancier belongs to the caller's own tooling.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        let _ = write!(out, "{:<width$}  ", header, width = widths[i]);
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let _ = write!(out, "{:<width$}  ", cell, width = widths[i]);
        }
        out.push('\n');
    }
    out
}

pub(crate) fn resource_table(
    resources: &Map<ResourceId, Resource>,
    providers: &Map<ProviderId, String>,
) -> String {
    let rows: Vec<Vec<String>> = resources
        .values()
        .map(|resource| {
            let provider = providers
                .get(&resource.provider_id)
                .map(String::as_str)
                .unwrap_or("unknown");
            vec![
                resource.id.to_string(),
                resource.name.clone(),
                provider.to_owned(),
                resource.capacity.to_string(),
                format!("{:.2}", resource.base_price),
            ]
        })
        .collect();

    table(&["id", "name", "provider", "capacity", "base price"], &rows)
}

pub(crate) fn bid_table(bids: &[Bid]) -> String {
    let rows: Vec<Vec<String>> = bids
        .iter()
        .map(|bid| {
            vec![
                bid.id.to_string(),
                bid.customer.clone(),
                format!("{:.2}", bid.price),
                bundle_list(&bid.bundle, None),
            ]
        })
        .collect();

    table(&["id", "customer", "price", "bundle"], &rows)
}

/// The post-run report: welfare, accepted bids with their payments, and the
/// bids left unfilled.
pub(crate) fn outcome_report(
    outcome: &ClearingOutcome,
    resources: &Map<ResourceId, Resource>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total welfare: {}", outcome.welfare);

    let _ = writeln!(out, "accepted bids:");
    for winner in &outcome.winners {
        let _ = writeln!(
            out,
            "  {} bid {:.2} for [{}], pays {:.2}",
            winner.bid.customer,
            winner.bid.price,
            bundle_list(&winner.bid.bundle, Some(resources)),
            winner.payment,
        );
    }

    let _ = writeln!(out, "rejected bids:");
    for bid in &outcome.rejected {
        let _ = writeln!(
            out,
            "  {} bid {:.2} for [{}]",
            bid.customer,
            bid.price,
            bundle_list(&bid.bundle, Some(resources)),
        );
    }

    out
}

/// A bundle as a comma-separated list, by resource name when the ledger is
/// at hand, by id otherwise.
fn bundle_list(bundle: &[ResourceId], resources: Option<&Map<ResourceId, Resource>>) -> String {
    bundle
        .iter()
        .map(|id| {
            resources
                .and_then(|map| map.get(id))
                .map(|resource| resource.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bas_core::models::{BidId, Winner};

    fn ledger() -> Map<ResourceId, Resource> {
        std::iter::once((
            ResourceId(1),
            Resource {
                id: ResourceId(1),
                provider_id: ProviderId(1),
                name: "compute".to_owned(),
                capacity: 1,
                base_price: 10.0,
            },
        ))
        .collect()
    }

    #[test]
    fn report_names_bundles_and_payments() {
        let outcome = ClearingOutcome {
            welfare: 20.0,
            winners: vec![Winner {
                bid: Bid {
                    id: BidId(1),
                    customer: "alice".to_owned(),
                    price: 20.0,
                    bundle: vec![ResourceId(1)],
                },
                payment: 10.0,
            }],
            rejected: vec![],
            cleared_prices: std::iter::once((ResourceId(1), 10.0)).collect(),
        };

        let report = outcome_report(&outcome, &ledger());
        assert!(report.contains("total welfare: 20"));
        assert!(report.contains("alice bid 20.00 for [compute], pays 10.00"));
    }

    #[test]
    fn tables_align_columns() {
        let rendered = table(
            &["id", "name"],
            &[
                vec!["1".to_owned(), "compute".to_owned()],
                vec!["12".to_owned(), "x".to_owned()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id  "));
        assert!(lines[2].starts_with("12  x"));
    }
}
