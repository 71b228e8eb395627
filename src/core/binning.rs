use crate::error::{ChartError, ChartResult};

/// Checks that bin edges are finite, strictly increasing and describe at
/// least one bin.
pub fn validate_edges(edges: &[f64]) -> ChartResult<()> {
    if edges.len() < 2 {
        return Err(ChartError::InvalidData(
            "bin edges must describe at least one bin".to_owned(),
        ));
    }
    if edges.iter().any(|edge| !edge.is_finite()) {
        return Err(ChartError::InvalidData(
            "bin edges must be finite".to_owned(),
        ));
    }
    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ChartError::InvalidData(
            "bin edges must be strictly increasing".to_owned(),
        ));
    }
    Ok(())
}

/// Counts samples per bin.
///
/// Bins are half-open `[lo, hi)` except the last one, which also includes
/// its upper edge. Samples outside `[first, last]` and NaN samples are
/// ignored.
pub fn bin_counts(samples: &[f64], edges: &[f64]) -> ChartResult<Vec<u64>> {
    validate_edges(edges)?;

    let bin_count = edges.len() - 1;
    let first = edges[0];
    let last = edges[bin_count];
    let mut counts = vec![0u64; bin_count];

    for &sample in samples {
        if sample.is_nan() || sample < first || sample > last {
            continue;
        }
        // Index of the first edge strictly greater than the sample.
        let upper = edges.partition_point(|edge| *edge <= sample);
        let index = upper.saturating_sub(1).min(bin_count - 1);
        counts[index] += 1;
    }

    Ok(counts)
}

/// Builds `"lo-hi"` labels for each adjacent edge pair.
pub fn bin_labels_from_edges(edges: &[f64]) -> ChartResult<Vec<String>> {
    validate_edges(edges)?;
    Ok(edges
        .windows(2)
        .map(|pair| format!("{}-{}", pair[0], pair[1]))
        .collect())
}
