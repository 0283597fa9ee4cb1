//! Small shared search helpers for the technique library.

use tinyvec::ArrayVec;

/// All `k`-subsets of `0..n`, in lexicographic order.
///
/// Subset searches (naked/hidden sets, fish bases, Sue de Coq pairings)
/// share this enumeration, which is what makes their tie-breaking
/// reproducible.
pub(crate) fn k_subsets(n: u8, k: u8) -> Vec<ArrayVec<[u8; 9]>> {
    fn rec(start: u8, n: u8, k: u8, buf: &mut ArrayVec<[u8; 9]>, out: &mut Vec<ArrayVec<[u8; 9]>>) {
        if buf.len() == k as usize {
            out.push(*buf);
            return;
        }
        let needed = k as usize - buf.len();
        for i in start..=(n - needed as u8) {
            buf.push(i);
            rec(i + 1, n, k, buf, out);
            buf.pop();
        }
    }

    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut buf = ArrayVec::new();
    rec(0, n, k, &mut buf, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_subsets_counts() {
        assert_eq!(k_subsets(9, 2).len(), 36);
        assert_eq!(k_subsets(9, 4).len(), 126);
        assert_eq!(k_subsets(3, 3).len(), 1);
        assert!(k_subsets(2, 3).is_empty());
    }

    #[test]
    fn test_k_subsets_lexicographic() {
        let subsets = k_subsets(4, 2);
        let as_vecs: Vec<Vec<u8>> = subsets.iter().map(|s| s.to_vec()).collect();
        assert_eq!(
            as_vecs,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }
}
