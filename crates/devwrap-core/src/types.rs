use serde::{Deserialize, Serialize};

/// Project counts bucketed by size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectCategories {
    #[serde(default)]
    pub big: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub small: u64,
}

impl ProjectCategories {
    /// Buckets in display order, paired with their label.
    pub fn entries(&self) -> [(&'static str, u64); 3] {
        [
            ("big", self.big),
            ("medium", self.medium),
            ("small", self.small),
        ]
    }
}

/// One user's yearly developer statistics, as served by the stats endpoint.
///
/// `total_commits_with_bug <= total_commits` is expected but never enforced;
/// values are displayed exactly as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsPayload {
    #[serde(default)]
    pub project_categories: ProjectCategories,
    #[serde(default)]
    pub total_commits: u64,
    #[serde(default)]
    pub total_commits_with_bug: u64,
    #[serde(default)]
    pub total_contributions: u64,
    #[serde(default)]
    pub total_lines_of_code_read: u64,
    /// Lines written.
    #[serde(default)]
    pub total_linesize_of_code: u64,
    #[serde(default)]
    pub total_stackoverflow_contributions: u64,
}

impl StatsPayload {
    /// Fixed payload substituted when acquisition fails.
    pub fn fallback() -> Self {
        Self {
            project_categories: ProjectCategories {
                big: 3,
                medium: 7,
                small: 15,
            },
            total_commits: 250,
            total_commits_with_bug: 10,
            total_contributions: 75,
            total_lines_of_code_read: 300_000,
            total_linesize_of_code: 20_000,
            total_stackoverflow_contributions: 5,
        }
    }
}

/// The five reveal slides, in reveal order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    LinesOfCode,
    BugsSquashed,
    TotalCommits,
    GithubContributions,
    StackOverflowContributions,
}

impl SlideKind {
    pub const ORDER: [SlideKind; 5] = [
        SlideKind::LinesOfCode,
        SlideKind::BugsSquashed,
        SlideKind::TotalCommits,
        SlideKind::GithubContributions,
        SlideKind::StackOverflowContributions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SlideKind::LinesOfCode => "Lines of Code",
            SlideKind::BugsSquashed => "Bugs Squashed",
            SlideKind::TotalCommits => "Total Commits",
            SlideKind::GithubContributions => "GitHub Contributions",
            SlideKind::StackOverflowContributions => "Stack Overflow Contributions",
        }
    }

    /// Gradient token, `from-<hue> to-<hue>`.
    pub fn color(self) -> &'static str {
        match self {
            SlideKind::LinesOfCode => "from-red-500 to-green-500",
            SlideKind::BugsSquashed => "from-green-400 to-red-500",
            SlideKind::TotalCommits => "from-yellow-400 to-red-500",
            SlideKind::GithubContributions => "from-green-500 to-red-400",
            SlideKind::StackOverflowContributions => "from-red-400 to-green-500",
        }
    }

    /// The payload field this slide reveals.
    pub fn value_of(self, payload: &StatsPayload) -> u64 {
        match self {
            SlideKind::LinesOfCode => payload.total_linesize_of_code,
            SlideKind::BugsSquashed => payload.total_commits_with_bug,
            SlideKind::TotalCommits => payload.total_commits,
            SlideKind::GithubContributions => payload.total_contributions,
            SlideKind::StackOverflowContributions => payload.total_stackoverflow_contributions,
        }
    }
}

/// One timed display unit derived from a payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Slide {
    pub kind: SlideKind,
    pub title: &'static str,
    /// `numeric_value` with thousands separators.
    pub value: String,
    pub numeric_value: u64,
    pub description: &'static str,
    pub color: &'static str,
}
