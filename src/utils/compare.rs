use crate::models::{CompareResponse, CompareSide, PhotoEntry, PhotoKind};

/// Entries that have a photo for `view`, in the order given (newest first).
pub fn candidates(entries: &[PhotoEntry], view: PhotoKind) -> Vec<&PhotoEntry> {
    entries
        .iter()
        .filter(|entry| entry.photo_url(view).is_some())
        .collect()
}

fn side(entries: &[PhotoEntry], date: &str, view: PhotoKind) -> CompareSide {
    let photo_url = entries
        .iter()
        .find(|entry| entry.date == date)
        .and_then(|entry| entry.photo_url(view))
        .map(str::to_string);

    CompareSide {
        date: date.to_string(),
        photo_url,
    }
}

/// Pick before/after dates for a side-by-side view. Without explicit dates the
/// newest candidate is "after" and the oldest is "before" (when two exist).
pub fn build_comparison(
    entries: &[PhotoEntry],
    view: PhotoKind,
    before: Option<&str>,
    after: Option<&str>,
) -> CompareResponse {
    let candidates = candidates(entries, view);

    let default_after = candidates.first().map(|e| e.date.as_str());
    let default_before = if candidates.len() >= 2 {
        candidates.last().map(|e| e.date.as_str())
    } else {
        None
    };

    let before = before
        .filter(|d| !d.is_empty())
        .or(default_before)
        .map(|date| side(entries, date, view));
    let after = after
        .filter(|d| !d.is_empty())
        .or(default_after)
        .map(|date| side(entries, date, view));

    let can_compare = match (&before, &after) {
        (Some(b), Some(a)) => b.photo_url.is_some() && a.photo_url.is_some() && b.date != a.date,
        _ => false,
    };

    CompareResponse {
        view,
        dates: candidates.iter().map(|e| e.date.clone()).collect(),
        before,
        after,
        can_compare,
    }
}
