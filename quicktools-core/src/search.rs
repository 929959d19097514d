// quicktools-core/src/search.rs

/// Result of running the tool filter over the mounted list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Visibility per item, in document order
    pub visible: Vec<bool>,
    /// First visible match, the scroll target. None for an empty query
    /// or when nothing matches - neither case scrolls.
    pub first_match: Option<usize>,
}

/// Case-insensitive substring filter over tool labels.
///
/// The query is trimmed and lowercased first; an empty query shows
/// everything and never produces a scroll target.
pub fn filter<'a, I>(query: &str, labels: I) -> FilterOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = query.trim().to_lowercase();

    let mut visible = Vec::new();
    let mut first_match = None;

    for (i, label) in labels.into_iter().enumerate() {
        let matches = needle.is_empty() || label.to_lowercase().contains(&needle);
        if matches && !needle.is_empty() && first_match.is_none() {
            first_match = Some(i);
        }
        visible.push(matches);
    }

    FilterOutcome {
        visible,
        first_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 4] = [
        "BMI Calculator",
        "Age Calculator",
        "Password Generator",
        "Stopwatch",
    ];

    #[test]
    fn empty_query_shows_all_and_never_scrolls() {
        let out = filter("", LABELS);
        assert_eq!(out.visible, vec![true; 4]);
        assert_eq!(out.first_match, None);

        let out = filter("   ", LABELS);
        assert_eq!(out.visible, vec![true; 4]);
        assert_eq!(out.first_match, None);
    }

    #[test]
    fn unique_match_hides_the_rest_and_targets_it() {
        let out = filter("stopw", LABELS);
        assert_eq!(out.visible, vec![false, false, false, true]);
        assert_eq!(out.first_match, Some(3));
    }

    #[test]
    fn first_of_several_matches_wins() {
        let out = filter("calculator", LABELS);
        assert_eq!(out.visible, vec![true, true, false, false]);
        assert_eq!(out.first_match, Some(0));
    }

    #[test]
    fn match_is_case_insensitive_and_trimmed() {
        let out = filter("  PASSword ", LABELS);
        assert_eq!(out.visible, vec![false, false, true, false]);
        assert_eq!(out.first_match, Some(2));
    }

    #[test]
    fn no_match_means_no_target() {
        let out = filter("zzz", LABELS);
        assert_eq!(out.visible, vec![false; 4]);
        assert_eq!(out.first_match, None);
    }
}
