use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str};

/// Pick the candidate that best fuzzy-matches `input`, if any does.
///
/// Powers the near-miss hint for unknown tokens. Matching is fzf-style:
/// every input character must appear in order in the candidate, so unrelated
/// input yields no suggestion. Ties keep the earliest candidate.
pub fn closest_token(input: &str, candidates: &[String]) -> Option<String> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let atom = Atom::new(
        input,
        CaseMatching::Ignore,
        Normalization::Smart,
        AtomKind::Fuzzy,
        false,
    );

    let mut buf = Vec::new();
    let mut best: Option<(u16, &String)> = None;
    for candidate in candidates {
        let haystack = Utf32Str::new(candidate, &mut buf);
        if let Some(score) = atom.score(haystack, &mut matcher) {
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, candidate));
            }
        }
    }
    best.map(|(_, candidate)| candidate.clone())
}
