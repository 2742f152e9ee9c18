//! Average-linkage agglomerative clustering over a distance matrix

/// Symmetric pairwise distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Zero matrix of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Set both `(i, j)` and `(j, i)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = value;
        self.values[j * self.n + i] = value;
    }
}

/// Merge clusters while the closest pair is strictly below `threshold`.
///
/// Cluster distance is the mean of all member-to-member distances, kept
/// current with the Lance–Williams update. Ties merge the pair with the
/// smallest indices. Returns a label per item; labels are numbered by each
/// cluster's first member, so item 0 always has label 0.
pub fn average_linkage(matrix: &DistanceMatrix, threshold: f64) -> Vec<usize> {
    let n = matrix.len();
    let mut dist = matrix.clone();
    let mut size = vec![1usize; n];
    let mut alive = vec![true; n];
    // every item points at the surviving cluster slot that holds it
    let mut owner: Vec<usize> = (0..n).collect();

    loop {
        let mut closest: Option<(usize, usize, f64)> = None;
        for p in (0..n).filter(|&p| alive[p]) {
            for q in (p + 1..n).filter(|&q| alive[q]) {
                let d = dist.get(p, q);
                if closest.map_or(true, |(_, _, best)| d < best) {
                    closest = Some((p, q, d));
                }
            }
        }

        let Some((p, q, d)) = closest else {
            break;
        };
        if d >= threshold {
            break;
        }

        let (sp, sq) = (size[p] as f64, size[q] as f64);
        for k in (0..n).filter(|&k| alive[k] && k != p && k != q) {
            let merged = (sp * dist.get(k, p) + sq * dist.get(k, q)) / (sp + sq);
            dist.set(k, p, merged);
        }
        size[p] += size[q];
        alive[q] = false;
        for o in owner.iter_mut().filter(|o| **o == q) {
            *o = p;
        }
    }

    let mut labels = vec![0usize; n];
    let mut slot_label: Vec<Option<usize>> = vec![None; n];
    let mut next = 0;
    for item in 0..n {
        let slot = owner[item];
        let label = *slot_label[slot].get_or_insert_with(|| {
            next += 1;
            next - 1
        });
        labels[item] = label;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[f64]]) -> DistanceMatrix {
        let mut m = DistanceMatrix::new(rows.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                m.set(i, j, v);
            }
        }
        m
    }

    #[test]
    fn test_two_close_one_far() {
        let m = matrix(&[&[0.0, 1.0, 5.0], &[1.0, 0.0, 6.0], &[5.0, 6.0, 0.0]]);
        assert_eq!(average_linkage(&m, 2.0), vec![0, 0, 1]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let m = matrix(&[&[0.0, 2.0], &[2.0, 0.0]]);
        assert_eq!(average_linkage(&m, 2.0), vec![0, 1]);
        assert_eq!(average_linkage(&m, 2.1), vec![0, 0]);
    }

    #[test]
    fn test_average_not_single_linkage() {
        // 0-1 close, 2 is close to 1 but far from 0: average is 2.5
        let m = matrix(&[&[0.0, 0.5, 4.0], &[0.5, 0.0, 1.0], &[4.0, 1.0, 0.0]]);
        assert_eq!(average_linkage(&m, 2.0), vec![0, 0, 1]);
        assert_eq!(average_linkage(&m, 3.0), vec![0, 0, 0]);
    }

    #[test]
    fn test_labels_follow_first_member() {
        let m = matrix(&[
            &[0.0, 9.0, 9.0, 9.0],
            &[9.0, 0.0, 9.0, 0.1],
            &[9.0, 9.0, 0.0, 9.0],
            &[9.0, 0.1, 9.0, 0.0],
        ]);
        assert_eq!(average_linkage(&m, 1.0), vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(average_linkage(&DistanceMatrix::new(0), 2.0).is_empty());
        assert_eq!(average_linkage(&DistanceMatrix::new(1), 2.0), vec![0]);
    }
}
