//! History ordering and date labels.

use chrono::{DateTime, Utc};

use crate::content::model::ContentDraft;

/// Orders drafts most recent first. Equal timestamps keep their input order.
pub fn sort_newest_first(drafts: &mut [ContentDraft]) {
    drafts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Human label for when a draft was created, relative to `now`.
///
/// Whole elapsed days: "Today", "Yesterday", "N days ago" under a week,
/// otherwise the short month and day ("Oct 3").
pub fn relative_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - created_at).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => created_at.format("%b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn draft(id: &str, created_at: DateTime<Utc>) -> ContentDraft {
        ContentDraft {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            platform: "Instagram".to_string(),
            content_type: "Reel".to_string(),
            hooks: vec!["hook".to_string()],
            script: String::new(),
            caption: String::new(),
            created_at,
            posted: false,
        }
    }

    #[test]
    fn test_relative_labels() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(relative_label(now - Duration::hours(3), now), "Today");
        assert_eq!(relative_label(now - Duration::hours(30), now), "Yesterday");
        assert_eq!(relative_label(now - Duration::days(4), now), "4 days ago");
        assert_eq!(relative_label(now - Duration::days(16), now), "Oct 3");
    }

    #[test]
    fn test_sort_newest_first() {
        let base = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let mut drafts = vec![
            draft("old", base),
            draft("new", base + Duration::days(2)),
            draft("mid", base + Duration::days(1)),
        ];
        sort_newest_first(&mut drafts);
        let ids: Vec<&str> = drafts.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
