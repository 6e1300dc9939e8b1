//! HTML rendering for the gallery page and its fragments.

use std::borrow::Cow;
use std::fmt::Write;
use std::time::Instant;

use lume_core::{AssetGroup, SearchMode, SortKey};

use super::cache::PreviewCache;
use super::preview::PLACEHOLDER;
use super::{LoadState, Progress, Session, ViewSize};

const SORT_OPTIONS: [(SortKey, &str); 3] = [
    (SortKey::Name, "Name (A-Z)"),
    (SortKey::NameDesc, "Name (Z-A)"),
    (SortKey::Size, "Size"),
];

const VIEW_OPTIONS: [(ViewSize, &str); 3] = [
    (ViewSize::Small, "Small"),
    (ViewSize::Medium, "Medium"),
    (ViewSize::Large, "Large"),
];

pub(super) fn page(
    session: &Session,
    cache: &PreviewCache,
    progress: Progress,
    now: Instant,
) -> String {
    let view = &session.view;
    let regex = view.mode == SearchMode::Regex;
    let placeholder = if regex {
        "Search icons with regex (e.g., ^arrow|calendar$)..."
    } else {
        "Search icons by name..."
    };

    let sort_options: String = SORT_OPTIONS
        .iter()
        .map(|(key, label)| option(key.as_str(), label, *key == view.sort))
        .collect();
    let view_options: String = VIEW_OPTIONS
        .iter()
        .map(|(size, label)| option(size.as_str(), label, *size == view.size))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lume Icons</title>
    <link rel="stylesheet" href="/style.css">
</head>
<body>
    <div class="container">
        <header>
            <h1>Lume Icons</h1>
        </header>

        <form id="controls" class="controls" action="/" method="get">
            <input type="search" id="searchInput" name="q" value="{query}" placeholder="{placeholder}" autocomplete="off">
            <button type="button" id="regexToggle" class="regex-toggle{regex_class}" aria-pressed="{regex}" title="Toggle regex search">.*</button>
            <input type="hidden" id="regexMode" name="regex" value="{regex}">
            <select id="sortBy" name="sort">{sort_options}</select>
            <select id="viewSize" name="view">{view_options}</select>
        </form>

        <main id="results">
{results}
        </main>
    </div>

    <script src="/app.js"></script>
</body>
</html>"##,
        query = escape(&view.query),
        regex_class = if regex { " active" } else { "" },
        results = results(session, cache, progress, now),
    )
}

pub(super) fn results(
    session: &Session,
    cache: &PreviewCache,
    progress: Progress,
    now: Instant,
) -> String {
    match session.load {
        LoadState::Failed => {
            return r#"<div class="no-results">Failed to load icons. Please make sure the icons directory exists and contains SVG files.</div>"#
                .to_string();
        }
        LoadState::Pending => return loading(progress),
        LoadState::Ready => {}
    }

    let mut html = format!(r#"<p id="stats" class="stats">{}</p>"#, stats(session));

    if session.visible.is_empty() {
        html.push_str(
            r#"<div class="no-results">No icons found matching your search criteria.</div>"#,
        );
        return html;
    }

    let _ = write!(
        html,
        r#"<div class="icons-grid" style="grid-template-columns: repeat(auto-fill, minmax({}px, 1fr))">"#,
        session.view.size.min_card_width()
    );
    for base_name in &session.visible {
        if let Some(group) = session.groups.get(base_name) {
            html.push_str(&card(group, cache, session.copied_recently(base_name, now)));
        }
    }
    html.push_str("</div>");
    html
}

/// Loading panel; the browser polls `/ui/progress` while it is on screen.
fn loading(progress: Progress) -> String {
    let percent = progress.percent();
    format!(
        r#"<div class="loading-screen" data-loading="true">
    <div class="loading-spinner"></div>
    <h2>Loading Lume Icons</h2>
    <p>Gathering the collection...</p>
    <div class="loading-progress">
        <div class="progress-bar"><div class="progress-fill" id="progressFill" style="width: {percent}%"></div></div>
        <div class="progress-text" id="progressText">{percent}% ({loaded}/{total})</div>
    </div>
</div>"#,
        loaded = progress.loaded,
        total = progress.total,
    )
}

fn stats(session: &Session) -> String {
    let total = session.groups.len();
    let showing = session.visible.len();
    if showing == total {
        format!(
            "Showing all {} icons ({} total variants)",
            total, session.asset_count
        )
    } else {
        format!(
            "Showing {} of {} icons ({} total variants)",
            showing, total, session.asset_count
        )
    }
}

/// One icon card. Preview markup comes from the cache and is never fetched here.
pub(super) fn card(group: &AssetGroup, cache: &PreviewCache, copied: bool) -> String {
    let asset = group.selected_asset();
    let base_name = escape(group.base_name());
    let preview = cache.get(asset);
    let preview = preview.as_deref().unwrap_or(PLACEHOLDER);

    let variant_options: String = group
        .variants()
        .map(|(variant, _)| {
            option(
                variant.tag(),
                variant.label(),
                variant == group.selected_variant(),
            )
        })
        .collect();

    let (copy_class, copy_label) = if copied {
        (" copied", "Copied!")
    } else {
        ("", "Copy")
    };

    format!(
        r#"<div class="icon-card" data-icon-group="{base_name}">
    <div class="icon-preview">{preview}</div>
    <div class="icon-name">{base_name}</div>
    <div class="version-selector"><select data-action="variant" aria-label="Variant">{variant_options}</select></div>
    <div class="icon-details">{dimensions} • {size} KB</div>
    <div class="icon-actions">
        <button type="button" class="btn btn-primary" data-action="download" data-url="{download_url}" data-filename="{filename}">Download</button>
        <button type="button" class="btn btn-secondary{copy_class}" data-action="copy">{copy_label}</button>
    </div>
</div>
"#,
        dimensions = escape(&asset.dimensions),
        size = size_kb(asset.size),
        download_url = escape(&asset.download_url),
        filename = escape(&asset.filename),
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{}"{}>{}</option>"#, escape(value), selected, label)
}

fn size_kb(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

/// Escape text for use in HTML content and attribute values.
fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
