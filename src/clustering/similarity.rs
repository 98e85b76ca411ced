// Fuzzy similarity policy for synonym matching.
//
// The engine only sees the SimilarityScorer trait, so the scoring formula can
// be swapped without touching the clustering loop. The default scorer is a
// partial ratio: the best InDel similarity between the shorter label and any
// alignment window of the longer one. That lets "OPC UA" match
// "OPC UA Server" at full score while "OPC UA" vs "MQTT" stays low.

use super::frequency::normalize_label;

/// Score given to identical strings.
pub const MAX_SCORE: f64 = 100.0;

/// Scores how similar a candidate label is to a leader label, 0 to 100.
///
/// Implementations must be reflexive: `score(x, x)` is `MAX_SCORE`. Symmetry
/// is not required; the engine always passes the leader first.
pub trait SimilarityScorer {
    fn score(&self, leader: &str, candidate: &str) -> f64;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> f64,
{
    fn score(&self, leader: &str, candidate: &str) -> f64 {
        self(leader, candidate)
    }
}

/// Partial-ratio scorer, the default policy.
#[derive(Debug, Clone, Copy)]
pub struct PartialRatio {
    /// Apply label cleanup (hyphens to spaces, trim) to both sides before
    /// scoring. Idempotent on labels that came through `count_labels`.
    pub normalize: bool,
}

impl Default for PartialRatio {
    fn default() -> Self {
        Self { normalize: true }
    }
}

impl PartialRatio {
    /// Score the labels exactly as given, with no cleanup.
    pub fn raw() -> Self {
        Self { normalize: false }
    }
}

impl SimilarityScorer for PartialRatio {
    fn score(&self, leader: &str, candidate: &str) -> f64 {
        if self.normalize {
            partial_ratio(&normalize_label(leader), &normalize_label(candidate))
        } else {
            partial_ratio(leader, candidate)
        }
    }
}

/// Normalized InDel similarity of two whole strings, 0 to 100.
///
/// `100 * (1 - indel_distance / (len_a + len_b))`, where the InDel distance
/// counts insertions and deletions only. Two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` between the shorter string and every alignment of it
/// against the longer one, including windows hanging off either edge.
///
/// Equal-length inputs are tried in both directions. Case-sensitive.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return MAX_SCORE;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut best = best_window_ratio(short, long);
    if short.len() == long.len() && best < MAX_SCORE {
        best = best.max(best_window_ratio(long, short));
    }
    best
}

/// Slide `needle` across `haystack` (needle no longer than haystack).
fn best_window_ratio(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let h = haystack.len();

    let prefixes = (1..n).map(|end| &haystack[..end]);
    let full = (0..=h - n).map(|start| &haystack[start..start + n]);
    let suffixes = (h - n + 1..h).map(|start| &haystack[start..]);

    let mut best = 0.0;
    for window in prefixes.chain(full).chain(suffixes) {
        let r = ratio_chars(needle, window);
        if r > best {
            best = r;
            if best >= MAX_SCORE {
                break;
            }
        }
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return MAX_SCORE;
    }
    let common = lcs_len(a, b);
    MAX_SCORE * (2 * common) as f64 / total as f64
}

/// Length of the longest common subsequence, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
