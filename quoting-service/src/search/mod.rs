//! Fuzzy matching for autocomplete. One generic routine shared by company,
//! contact and catalog item lookup.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and strip diacritics (NFD decomposition, drop combining marks).
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Levenshtein edit distance over characters.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0usize; a.len() + 1];

    for (i, bc) in b.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ac) in a.iter().enumerate() {
            curr[j + 1] = if ac == bc {
                prev[j]
            } else {
                prev[j].min(curr[j]).min(prev[j + 1]) + 1
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

/// Rank `items` against `query`, best match first.
///
/// Scoring ladder, per candidate text (best across all texts wins):
/// prefix match scores 0, substring match scores 1, otherwise the edit
/// distance between the query and the first `len(query) + 2` characters of
/// the text, plus 2 so a typo never beats a substring hit. Candidates scoring
/// above `0.6 × len(query) + 2` are dropped. An empty or whitespace-only
/// query passes through the first `max_results` items unranked.
pub fn fuzzy_search<'a, T, F>(
    query: &str,
    items: &'a [T],
    get_texts: F,
    max_results: usize,
) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<String>,
{
    if query.trim().is_empty() {
        return items.iter().take(max_results).collect();
    }

    let normalized_query = normalize(query);
    let query_chars: Vec<char> = normalized_query.chars().collect();
    let query_len = query_chars.len();

    let mut scored: Vec<(&T, f64)> = items
        .iter()
        .filter_map(|item| {
            let mut best = f64::INFINITY;

            for text in get_texts(item) {
                let normalized_text = normalize(&text);

                if normalized_text.starts_with(&normalized_query) {
                    best = 0.0;
                    break;
                }

                if normalized_text.contains(&normalized_query) {
                    best = best.min(1.0);
                    continue;
                }

                let head: Vec<char> = normalized_text.chars().take(query_len + 2).collect();
                let distance = levenshtein(&query_chars, &head);
                best = best.min(distance as f64 + 2.0);
            }

            let tolerance = 0.6 * query_len as f64 + 2.0;
            (best <= tolerance).then_some((item, best))
        })
        .collect();

    // Stable sort: equal scores keep input order.
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));

    scored
        .into_iter()
        .take(max_results)
        .map(|(item, _)| item)
        .collect()
}
