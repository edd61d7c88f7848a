//! Markdown rendering of a day's summary.

use std::fmt::Write;

use crate::aggregate::{Summary, md_link};
use crate::event::PrUrl;

/// How the commented-pull-requests section lists its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Every comment text, indented under its pull request.
    Detailed,
    /// One line per pull request.
    Compact,
}

/// Renders a day's summary as markdown sections.
///
/// Sections with no entries are omitted, so an empty summary renders to an
/// empty string. The commented section appears only when a comment claimed
/// some PR's bucket slot; in detailed style it then lists the full comment
/// timeline of every PR that has one, claimed or not.
pub fn to_markdown(summary: &Summary, style: CommentStyle) -> String {
    let mut output = String::new();

    section(&mut output, "Pull Requests Opened", &summary.prs_opened);
    section(&mut output, "Pull Requests Closed", &summary.prs_closed);
    section(&mut output, "Pull Requests Reviewed", &summary.prs_reviewed);

    if !summary.commented.is_empty() {
        match style {
            CommentStyle::Compact => {
                writeln!(output, "### Commented on Pull Requests").unwrap();
                for url in &summary.commented {
                    writeln!(output, "- {}", link_for(summary, url)).unwrap();
                }
            }
            CommentStyle::Detailed => {
                writeln!(output, "### Pull Request Comments").unwrap();
                for (url, comments) in &summary.pr_comments {
                    writeln!(output, "- {}", link_for(summary, url)).unwrap();
                    for comment in comments {
                        writeln!(output, "    - {comment}").unwrap();
                    }
                }
            }
        }
    }

    section(&mut output, "General Comments", &summary.general_comments);

    output
}

fn section(output: &mut String, heading: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    writeln!(output, "### {heading}").unwrap();
    for entry in entries {
        writeln!(output, "- {entry}").unwrap();
    }
}

/// Falls back to the bare URL when no title was learned for the PR.
fn link_for(summary: &Summary, url: &PrUrl) -> String {
    match summary.titles.get(url) {
        Some(title) => md_link(title, url),
        None => md_link(url.as_str(), url),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::aggregate::summarize;
    use crate::classify::{Classified, PrAction};

    const PR_A: &str = "https://github.com/acme/widgets/pull/17";
    const PR_B: &str = "https://github.com/acme/widgets/pull/21";

    fn lifecycle(url: &str, title: &str, action: PrAction, hour: u32) -> Classified {
        Classified::PrLifecycle {
            url: PrUrl::new(url.to_string()),
            title: title.to_string(),
            action,
            at: Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap(),
        }
    }

    fn review(url: &str, title: &str, hour: u32) -> Classified {
        Classified::PrReview {
            url: PrUrl::new(url.to_string()),
            title: title.to_string(),
            at: Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap(),
        }
    }

    fn comment(url: &str, title: &str, body: &str, hour: u32) -> Classified {
        Classified::PrComment {
            url: PrUrl::new(url.to_string()),
            title: title.to_string(),
            body: body.to_string(),
            at: Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap(),
        }
    }

    fn general(body: &str, hour: u32) -> Classified {
        Classified::GeneralComment {
            body: body.to_string(),
            at: Utc.with_ymd_and_hms(2024, 1, 5, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_summary_renders_to_nothing() {
        let summary = Summary::default();
        assert_eq!(to_markdown(&summary, CommentStyle::Detailed), "");
        assert_eq!(to_markdown(&summary, CommentStyle::Compact), "");
    }

    #[test]
    fn full_day_detailed() {
        let summary = summarize(vec![
            lifecycle(PR_A, "Add CI pipeline", PrAction::Opened, 9),
            lifecycle(PR_B, "Fix flaky test", PrAction::Closed, 10),
            comment(
                "https://github.com/acme/widgets/pull/30",
                "Bump deps",
                "lgtm",
                11,
            ),
            comment(
                "https://github.com/acme/widgets/pull/30",
                "Bump deps",
                "merging now",
                12,
            ),
            general("still seeing this on main", 13),
        ]);

        insta::assert_snapshot!(to_markdown(&summary, CommentStyle::Detailed), @r"
        ### Pull Requests Opened
        - [Add CI pipeline](https://github.com/acme/widgets/pull/17)
        ### Pull Requests Closed
        - [Fix flaky test](https://github.com/acme/widgets/pull/21)
        ### Pull Request Comments
        - [Bump deps](https://github.com/acme/widgets/pull/30)
            - Comment: lgtm
            - Comment: merging now
        ### General Comments
        - Comment: still seeing this on main
        ");
    }

    #[test]
    fn full_day_compact() {
        let summary = summarize(vec![
            lifecycle(PR_A, "Add CI pipeline", PrAction::Opened, 9),
            comment(
                "https://github.com/acme/widgets/pull/30",
                "Bump deps",
                "lgtm",
                11,
            ),
            comment(
                "https://github.com/acme/widgets/pull/30",
                "Bump deps",
                "merging now",
                12,
            ),
        ]);

        insta::assert_snapshot!(to_markdown(&summary, CommentStyle::Compact), @r"
        ### Pull Requests Opened
        - [Add CI pipeline](https://github.com/acme/widgets/pull/17)
        ### Commented on Pull Requests
        - [Bump deps](https://github.com/acme/widgets/pull/30)
        ");
    }

    #[test]
    fn commented_section_requires_a_claiming_comment() {
        // Comments exist, but the open claimed the PR first.
        let summary = summarize(vec![
            lifecycle(PR_A, "Add CI pipeline", PrAction::Opened, 9),
            comment(PR_A, "Add CI pipeline", "nice", 10),
        ]);

        let rendered = to_markdown(&summary, CommentStyle::Detailed);
        assert!(rendered.contains("### Pull Requests Opened"));
        assert!(!rendered.contains("Pull Request Comments"));
        assert!(!rendered.contains("nice"));
    }

    #[test]
    fn detailed_lists_every_comment_timeline_once_claimed() {
        // PR_B's comment claims the section open; PR_A rides along ungated.
        let summary = summarize(vec![
            lifecycle(PR_A, "Add CI pipeline", PrAction::Opened, 9),
            comment(PR_A, "Add CI pipeline", "nice", 10),
            comment(PR_B, "Fix flaky test", "ship it", 11),
        ]);

        insta::assert_snapshot!(to_markdown(&summary, CommentStyle::Detailed), @r"
        ### Pull Requests Opened
        - [Add CI pipeline](https://github.com/acme/widgets/pull/17)
        ### Pull Request Comments
        - [Add CI pipeline](https://github.com/acme/widgets/pull/17)
            - Comment: nice
        - [Fix flaky test](https://github.com/acme/widgets/pull/21)
            - Comment: ship it
        ");
    }

    #[test]
    fn compact_lists_only_claiming_pull_requests() {
        let summary = summarize(vec![
            lifecycle(PR_A, "Add CI pipeline", PrAction::Opened, 9),
            comment(PR_A, "Add CI pipeline", "nice", 10),
            comment(PR_B, "Fix flaky test", "ship it", 11),
        ]);

        let rendered = to_markdown(&summary, CommentStyle::Compact);
        assert!(rendered.contains("- [Fix flaky test]"));
        assert!(!rendered.contains("Add CI pipeline](https://github.com/acme/widgets/pull/17)\n    -"));
        assert!(!rendered.contains("Comment: nice"));
    }

    #[test]
    fn untitled_pull_request_falls_back_to_its_url() {
        // A review claims PR_B without recording a title, so its later
        // comment stays ungated and the listing has only the URL to show.
        let summary = summarize(vec![
            comment(PR_A, "Add CI pipeline", "first", 9),
            review(PR_B, "Fix flaky test", 10),
            comment(PR_B, "Fix flaky test", "late reply", 11),
        ]);

        let rendered = to_markdown(&summary, CommentStyle::Detailed);
        assert!(rendered.contains(&format!("- [{PR_B}]({PR_B})")));
    }

    #[test]
    fn exact_line_format() {
        let summary = summarize(vec![comment(PR_A, "Add CI pipeline", "hi", 10)]);

        assert_eq!(
            to_markdown(&summary, CommentStyle::Detailed),
            format!(
                "### Pull Request Comments\n- [Add CI pipeline]({PR_A})\n    - Comment: hi\n"
            )
        );
    }
}
