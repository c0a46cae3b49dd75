use crate::format::thousands;
use crate::types::{Slide, SlideKind, StatsPayload};

/// Caption used when a title has no rule set.
pub const GENERIC_CAPTION: &str = "You're sleighing it in the world of code!";

type Threshold = fn(u64) -> bool;

/// Per-title caption rules, first match wins. The last rule of each title is
/// unconditional.
const CAPTION_RULES: &[(&str, &[(Threshold, &str)])] = &[
    (
        "Lines of Code",
        &[
            (|v| v < 25_000, "That's a lot more than what Santa packs for gifts!"),
            (|v| v < 50_000, "That's enough to wrap around the North Pole twice!"),
            (|_| true, "Santa's impressed with your code!"),
        ],
    ),
    (
        "Bugs Squashed",
        &[
            (|v| v > 100, "You're the ultimate debug detective!"),
            (|_| true, "Every bug squashed is a gift to your users!"),
        ],
    ),
    (
        "Total Commits",
        &[
            (|v| v > 1000, "Your commit history is longer than Santa's naughty list!"),
            (|_| true, "Each commit is a step towards coding excellence!"),
        ],
    ),
    (
        "GitHub Contributions",
        &[
            (|v| v > 500, "Your contribution graph is greener than a Christmas tree!"),
            (|_| true, "You're spreading code cheer all year round!"),
        ],
    ),
    (
        "Stack Overflow Contributions",
        &[
            (|v| v > 50, "You're a coding Santa, delivering answers to developers in need!"),
            (|_| true, "Every answer helps light the way for fellow developers!"),
        ],
    ),
];

/// Pick the caption for a slide title and its unformatted value.
pub fn caption_for(title: &str, value: u64) -> &'static str {
    CAPTION_RULES
        .iter()
        .find(|(t, _)| *t == title)
        .and_then(|(_, rules)| rules.iter().find(|(hit, _)| hit(value)))
        .map_or(GENERIC_CAPTION, |(_, caption)| *caption)
}

/// Turn a payload into its five reveal slides, in reveal order.
pub fn derive_slides(payload: &StatsPayload) -> Vec<Slide> {
    SlideKind::ORDER
        .iter()
        .map(|&kind| {
            let numeric_value = kind.value_of(payload);
            Slide {
                kind,
                title: kind.title(),
                value: thousands(numeric_value),
                numeric_value,
                description: caption_for(kind.title(), numeric_value),
                color: kind.color(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectCategories;

    fn payload(lines: u64, bugs: u64, commits: u64, contributions: u64, so: u64) -> StatsPayload {
        StatsPayload {
            project_categories: ProjectCategories::default(),
            total_commits: commits,
            total_commits_with_bug: bugs,
            total_contributions: contributions,
            total_lines_of_code_read: lines * 10,
            total_linesize_of_code: lines,
            total_stackoverflow_contributions: so,
        }
    }

    #[test]
    fn five_slides_in_fixed_order() {
        let slides = derive_slides(&StatsPayload::fallback());
        let kinds: Vec<_> = slides.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SlideKind::ORDER);
    }

    #[test]
    fn all_zero_payload_still_five_slides() {
        let slides = derive_slides(&StatsPayload::default());
        assert_eq!(slides.len(), 5);
        assert!(slides.iter().all(|s| s.value == "0" && s.numeric_value == 0));
    }

    #[test]
    fn huge_payload_still_five_slides() {
        let p = payload(u64::MAX, u64::MAX, u64::MAX, u64::MAX, u64::MAX);
        assert_eq!(derive_slides(&p).len(), 5);
    }

    #[test]
    fn value_matches_numeric_value() {
        let slides = derive_slides(&payload(20_000, 10, 250, 75, 5));
        assert_eq!(slides[0].value, "20,000");
        assert_eq!(slides[0].numeric_value, 20_000);
        for s in &slides {
            assert_eq!(s.value.replace(',', "").parse::<u64>().unwrap(), s.numeric_value);
        }
    }

    #[test]
    fn lines_of_code_three_captions() {
        assert_eq!(
            caption_for("Lines of Code", 24_999),
            "That's a lot more than what Santa packs for gifts!"
        );
        assert_eq!(
            caption_for("Lines of Code", 25_000),
            "That's enough to wrap around the North Pole twice!"
        );
        assert_eq!(
            caption_for("Lines of Code", 50_000),
            "Santa's impressed with your code!"
        );
    }

    #[test]
    fn two_caption_titles_split_on_threshold() {
        assert_eq!(caption_for("Bugs Squashed", 101), "You're the ultimate debug detective!");
        assert_eq!(
            caption_for("Bugs Squashed", 100),
            "Every bug squashed is a gift to your users!"
        );
        assert_eq!(
            caption_for("Total Commits", 1001),
            "Your commit history is longer than Santa's naughty list!"
        );
        assert_eq!(
            caption_for("Total Commits", 1000),
            "Each commit is a step towards coding excellence!"
        );
        assert_eq!(
            caption_for("GitHub Contributions", 501),
            "Your contribution graph is greener than a Christmas tree!"
        );
        assert_eq!(
            caption_for("Stack Overflow Contributions", 50),
            "Every answer helps light the way for fellow developers!"
        );
    }

    #[test]
    fn captions_use_numeric_value_not_formatted_text() {
        // "1,500" must not be read as 1.
        let slides = derive_slides(&payload(0, 0, 1_500, 0, 0));
        assert_eq!(slides[2].value, "1,500");
        assert_eq!(
            slides[2].description,
            "Your commit history is longer than Santa's naughty list!"
        );
    }

    #[test]
    fn unknown_title_gets_generic_caption() {
        assert_eq!(caption_for("Coffee Consumed", 9_000), GENERIC_CAPTION);
    }
}
