use crate::analytics::stats;
use crate::models::{Correlation, LeadLag};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A named ordered sequence of instruments whose pairwise relationships tell
/// one macro story when rendered end to end.
#[derive(Debug, Clone, Copy)]
pub struct ImpactChain {
    pub name: &'static str,
    pub sequence: &'static [&'static str],
}

/// Impact chains shown on the correlation matrix view.
pub const IMPACT_CHAINS: &[ImpactChain] = &[
    ImpactChain {
        name: "Dollar strength",
        sequence: &["DXY", "EUR/USD", "Gold", "EEM"],
    },
    ImpactChain {
        name: "Risk-off cascade",
        sequence: &["SPY", "USD/JPY", "Gold", "US10Y"],
    },
    ImpactChain {
        name: "Inflation pass-through",
        sequence: &["WTI", "US10Y", "DXY", "SPY"],
    },
    ImpactChain {
        name: "European spillover",
        sequence: &["DAX", "EUR/USD", "FTSE", "GBP/USD"],
    },
];

/// One rendered link of an impact chain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainLink {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<Correlation>,
}

/// Rendered impact chain, ready for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedChain {
    pub name: String,
    pub links: Vec<ChainLink>,
}

/// Assembled pairwise correlations with an O(1) unordered-pair lookup.
///
/// Pure assembly over already-computed statistics: no network, no
/// randomness. A degenerate pair (mismatched or constant series) contributes
/// a neutral 0-strength record rather than failing the whole matrix.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    correlations: Vec<Correlation>,
    index: HashMap<String, usize>,
    step_minutes: u32,
}

/// Canonical key for an unordered instrument pair.
fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}|{}", a, b)
    } else {
        format!("{}|{}", b, a)
    }
}

impl CorrelationMatrix {
    /// Compute pairwise correlations and lead/lag over every unordered pair
    /// of instruments. `step_minutes` is the sampling interval of the
    /// series, used to express lags in minutes.
    pub fn build(series: &BTreeMap<String, Vec<f64>>, max_lag: usize, step_minutes: u32) -> Self {
        let symbols: Vec<&String> = series.keys().collect();
        let mut correlations = Vec::new();
        let mut index = HashMap::new();

        for i in 0..symbols.len() {
            for j in (i + 1)..symbols.len() {
                let (a, b) = (symbols[i], symbols[j]);
                let result = stats::lead_lag(&series[a], &series[b], max_lag);

                let relationship = if result.lag > 0 {
                    LeadLag::Leads
                } else if result.lag < 0 {
                    LeadLag::Lags
                } else {
                    LeadLag::Simultaneous
                };
                let lag_minutes = if result.lag == 0 {
                    None
                } else {
                    Some(result.lag.unsigned_abs() as u32 * step_minutes)
                };

                index.insert(pair_key(a, b), correlations.len());
                correlations.push(Correlation {
                    pair: (a.clone(), b.clone()),
                    strength: result.strength,
                    relationship,
                    lag_minutes,
                });
            }
        }

        Self {
            correlations,
            index,
            step_minutes,
        }
    }

    /// Look up the correlation between two instruments, in either order.
    pub fn get(&self, a: &str, b: &str) -> Option<&Correlation> {
        self.index
            .get(&pair_key(a, b))
            .map(|&i| &self.correlations[i])
    }

    /// Top-k correlations by absolute strength, strongest first.
    pub fn top_k(&self, k: usize) -> Vec<&Correlation> {
        let mut ranked: Vec<&Correlation> = self.correlations.iter().collect();
        ranked.sort_by(|a, b| {
            b.strength
                .abs()
                .partial_cmp(&a.strength.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(k);
        ranked
    }

    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    pub fn len(&self) -> usize {
        self.correlations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correlations.is_empty()
    }

    /// Resolve one impact chain against the matrix. Links whose pair was not
    /// part of the input series render without a correlation.
    pub fn render_chain(&self, chain: &ImpactChain) -> RenderedChain {
        let links = chain
            .sequence
            .windows(2)
            .map(|pair| ChainLink {
                from: pair[0].to_string(),
                to: pair[1].to_string(),
                correlation: self.get(pair[0], pair[1]).cloned(),
            })
            .collect();
        RenderedChain {
            name: chain.name.to_string(),
            links,
        }
    }

    /// Render every named impact chain.
    pub fn render_chains(&self) -> Vec<RenderedChain> {
        IMPACT_CHAINS
            .iter()
            .map(|chain| self.render_chain(chain))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> BTreeMap<String, Vec<f64>> {
        let mut series = BTreeMap::new();
        let base = vec![1.0, 2.0, 1.5, 3.0, 2.5, 4.0, 3.5, 5.0];
        let inverse: Vec<f64> = base.iter().map(|v| -v).collect();
        series.insert("SPY".to_string(), base.clone());
        series.insert("Gold".to_string(), inverse);
        series.insert("DXY".to_string(), base.iter().map(|v| v * 2.0).collect());
        series
    }

    #[test]
    fn test_pair_lookup_is_order_insensitive() {
        let matrix = CorrelationMatrix::build(&sample_series(), 2, 60);
        let forward = matrix.get("SPY", "Gold").unwrap();
        let backward = matrix.get("Gold", "SPY").unwrap();
        assert_eq!(forward, backward);
        assert!((forward.strength - (-1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_top_k_ranked_by_absolute_strength() {
        let matrix = CorrelationMatrix::build(&sample_series(), 2, 60);
        let top = matrix.top_k(2);
        assert_eq!(top.len(), 2);
        assert!(top[0].strength.abs() >= top[1].strength.abs());
    }

    #[test]
    fn test_degenerate_series_yield_neutral_record() {
        let mut series = sample_series();
        series.insert("Flat".to_string(), vec![1.0; 8]);
        let matrix = CorrelationMatrix::build(&series, 2, 60);
        let flat = matrix.get("Flat", "SPY").unwrap();
        assert_eq!(flat.strength, 0.0);
        assert_eq!(flat.relationship, LeadLag::Simultaneous);
        assert_eq!(flat.lag_minutes, None);
    }

    #[test]
    fn test_chain_renders_missing_pairs_without_correlation() {
        let matrix = CorrelationMatrix::build(&sample_series(), 2, 60);
        let chain = matrix.render_chain(&ImpactChain {
            name: "test",
            sequence: &["SPY", "Gold", "Nikkei"],
        });
        assert_eq!(chain.links.len(), 2);
        assert!(chain.links[0].correlation.is_some());
        assert!(chain.links[1].correlation.is_none());
    }

    #[test]
    fn test_lagged_pair_classified() {
        let mut series = BTreeMap::new();
        let x = vec![1.0, 4.0, 2.0, 8.0, 3.0, 9.0, 5.0, 7.0];
        let mut y = vec![0.0, 0.0];
        y.extend_from_slice(&x[..x.len() - 2]);
        // "A" sorts before "B" so the pair is (A, B) = (x, y): x leads
        series.insert("A".to_string(), x);
        series.insert("B".to_string(), y);
        let matrix = CorrelationMatrix::build(&series, 3, 60);
        let correlation = matrix.get("A", "B").unwrap();
        assert_eq!(correlation.relationship, LeadLag::Leads);
        assert_eq!(correlation.lag_minutes, Some(120));
    }
}
