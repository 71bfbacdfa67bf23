/// A running sum that tracks the low-order bits lost to rounding.
///
/// # Source
/// Neumaier's improvement of Kahan summation:
/// "Rundungsfehleranalyse einiger Verfahren zur Summation endlicher Summen"
/// by A. Neumaier
/// <https://doi.org/10.1002/zamm.19740540106>
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub(crate) fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub(crate) fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl FromIterator<f64> for CompensatedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::default();
        for value in iter {
            acc.add(value);
        }
        acc
    }
}
