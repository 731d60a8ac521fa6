use crate::ranking::text::normalize;

/// Edit distance between two already-normalized strings.
///
/// Classic single-character insert/delete/substitute Levenshtein with two
/// rolling rows sized by the shorter input. Normalized text is ASCII, so the
/// byte view is the character view.
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = if b.len() <= a.len() { (a, b) } else { (b, a) };
    let a = a.as_bytes();
    let b = b.as_bytes();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Edit distance between the normalized forms of `a` and `b`
pub fn distance(a: &str, b: &str) -> usize {
    edit_distance(&normalize(a), &normalize(b))
}

/// Similarity of two already-normalized strings, in `[0, 1]`.
///
/// Both empty compare as maximally similar, which also avoids the division
/// by zero.
pub(crate) fn similarity_normalized(a: &str, b: &str) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Similarity of the normalized forms of `a` and `b`, in `[0, 1]`
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_normalized(&normalize(a), &normalize(b))
}
