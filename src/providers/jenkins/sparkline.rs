use crate::output::escape_html;

use super::types::{Build, Job};

pub const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
pub const BUILDING_SPARK: char = 'B';

/// Index into [`SPARKS`] for a complete build with `failures`, relative to
/// the largest failure count `max` in the window.
///
/// Passing builds map to the lowest glyph and untracked failures to the
/// highest. Positive counts scale across the glyphs in between, so the
/// worst build of a window sits at the top.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn glyph_index(failures: i64, max: i64) -> usize {
    let top = SPARKS.len() - 1;
    match failures {
        0 => 0,
        Build::UNTRACKED_FAILURE => top,
        f if f > 0 && max > 0 => {
            let ratio = f as f64 / max as f64;
            (1 + (ratio * (SPARKS.len() - 2) as f64) as usize).min(top)
        }
        _ => top,
    }
}

fn spark(build: &Build, max: i64) -> (char, String) {
    if !build.complete {
        return (BUILDING_SPARK, "building".to_string());
    }

    let title = match build.failures {
        0 => "Passed".to_string(),
        Build::UNTRACKED_FAILURE => "Failed".to_string(),
        f => format!("{f} failures"),
    };

    (SPARKS[glyph_index(build.failures, max)], title)
}

impl Job {
    /// Renders the last `count` builds as linked sparkline glyphs.
    ///
    /// Missing history is padded on the left with the lowest glyph.
    #[allow(clippy::format_push_string)]
    pub fn render_history(&self, count: usize) -> String {
        let mut out = String::new();

        let shown = count.min(self.builds.len());
        out.extend(std::iter::repeat(SPARKS[0]).take(count - shown));

        let window = &self.builds[self.builds.len() - shown..];
        let max = window
            .iter()
            .filter(|build| build.complete)
            .map(|build| build.failures)
            .fold(0, i64::max);

        for build in window {
            let (glyph, title) = spark(build, max);
            let url = escape_html(&build.url);
            out.push_str(&format!(
                "<a href=\"{url}\" title=\"{}: {url}\">{glyph}</a>",
                escape_html(&title)
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(id: i64, failures: i64, complete: bool) -> Build {
        Build {
            failures,
            complete,
            ..Build::stub(id, format!("http://ci/job/a/{id}/"))
        }
    }

    fn job(builds: Vec<Build>) -> Job {
        Job::new("a".into(), "http://ci/job/a/".into(), builds)
    }

    fn glyphs(rendered: &str) -> Vec<char> {
        // Each link ends in `>GLYPH</a>`; padding is bare glyphs.
        let mut out = Vec::new();
        let mut rest = rendered;
        while let Some(c) = rest.chars().next() {
            if c == '<' {
                let close = rest.find("</a>").unwrap();
                out.push(rest[..close].chars().last().unwrap());
                rest = &rest[close + 4..];
            } else {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        out
    }

    #[test]
    fn test_glyph_index_fixed_points() {
        assert_eq!(glyph_index(0, 0), 0);
        assert_eq!(glyph_index(0, 12), 0);
        assert_eq!(glyph_index(-1, 0), 7);
        assert_eq!(glyph_index(-1, 12), 7);
        assert_eq!(glyph_index(12, 12), 7);
    }

    #[test]
    fn test_glyph_index_range_and_monotonic() {
        for max in 1..=50 {
            let mut previous = 1;
            for f in 1..=max {
                let index = glyph_index(f, max);
                assert!((1..=7).contains(&index), "f={f} max={max} index={index}");
                assert!(index >= previous, "f={f} max={max}");
                previous = index;
            }
        }
    }

    #[test]
    fn test_glyph_index_scaling() {
        assert_eq!(glyph_index(1, 6), 2);
        assert_eq!(glyph_index(3, 6), 4);
        assert_eq!(glyph_index(1, 100), 1);
    }

    #[test]
    fn test_render_history_single_build() {
        let rendered = job(vec![build(1, 0, true)]).render_history(1);
        assert_eq!(
            rendered,
            "<a href=\"http://ci/job/a/1/\" title=\"Passed: http://ci/job/a/1/\">▁</a>"
        );
    }

    #[test]
    fn test_render_history_pads_missing_builds() {
        let rendered = job(vec![build(1, 0, true), build(2, -1, true)]).render_history(5);

        assert!(rendered.starts_with("▁▁▁<a "));
        assert_eq!(glyphs(&rendered), vec!['▁', '▁', '▁', '▁', '█']);
    }

    #[test]
    fn test_render_history_trailing_window() {
        let builds = vec![build(1, 50, true), build(2, 1, true), build(3, 2, true)];
        let rendered = job(builds).render_history(2);

        // Build 1 is outside the window, so max is 2.
        assert!(!rendered.contains("/1/"));
        assert_eq!(glyphs(&rendered), vec!['▅', '█']);
        assert!(rendered.contains("title=\"1 failures: http://ci/job/a/2/\""));
        assert!(rendered.contains("title=\"2 failures: http://ci/job/a/3/\""));
    }

    #[test]
    fn test_render_history_max_equal_and_sentinel_titles_differ() {
        let builds = vec![
            build(1, 0, true),
            build(2, 2, true),
            build(3, 0, true),
            build(4, -1, true),
        ];
        let rendered = job(builds).render_history(3);

        assert_eq!(glyphs(&rendered), vec!['█', '▁', '█']);
        assert!(rendered.contains("title=\"2 failures: http://ci/job/a/2/\""));
        assert!(rendered.contains("title=\"Passed: http://ci/job/a/3/\""));
        assert!(rendered.contains("title=\"Failed: http://ci/job/a/4/\""));
    }

    #[test]
    fn test_render_history_building_excluded_from_max() {
        let builds = vec![build(1, 2, true), build(2, 8, false), build(3, 1, true)];
        let rendered = job(builds).render_history(3);

        assert_eq!(glyphs(&rendered), vec!['█', 'B', '▅']);
        assert!(rendered.contains("title=\"building: http://ci/job/a/2/\""));
    }

    #[test]
    fn test_render_history_empty_job() {
        assert_eq!(job(vec![]).render_history(3), "▁▁▁");
        assert_eq!(job(vec![]).render_history(0), "");
    }

    #[test]
    fn test_render_history_escapes_attributes() {
        let mut b = build(1, 0, true);
        b.url = "http://ci/job/a\"b/1/?x=1&y=2".into();
        let rendered = job(vec![b]).render_history(1);

        assert!(rendered.contains("href=\"http://ci/job/a&quot;b/1/?x=1&amp;y=2\""));
    }
}
