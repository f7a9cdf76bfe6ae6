/// Per-column min-max normalization to `[0, 1]`.
///
/// Constant columns map to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    minimums: Vec<f64>,
    ranges: Vec<f64>
}

impl MinMaxScaler {
    /// Learns each column's minimum and range from `data`.
    pub fn fit(data: &[Vec<f64>]) -> Self {
        let columns = data.first().map_or(0, Vec::len);
        let mut minimums = vec![f64::INFINITY; columns];
        let mut maximums = vec![f64::NEG_INFINITY; columns];

        for row in data {
            for (column, value) in row.iter().enumerate().take(columns) {
                minimums[column] = minimums[column].min(*value);
                maximums[column] = maximums[column].max(*value);
            }
        }

        let ranges = minimums.iter().zip(&maximums).map(|(min, max)| max - min).collect();

        Self { minimums, ranges }
    }

    pub fn transform(&self, data: &[Vec<f64>]) -> Vec<Vec<f64>> {
        data.iter()
            .map(|row| {
                row.iter()
                    .zip(self.minimums.iter().zip(&self.ranges))
                    .map(|(value, (min, range))| {
                        if *range > 0.0 { (value - min) / range } else { 0.0 }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn fit_transform(data: &[Vec<f64>]) -> Vec<Vec<f64>> {
        Self::fit(data).transform(data)
    }
}
