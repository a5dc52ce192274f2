// * Text Normalization: markup stripping and whitespace collapse.

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

// * Elements whose subtree never contributes posting prose.
const STRIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
    "iframe", "svg", "link", "button", "select",
];

// * ARIA roles marking page chrome rather than content.
const STRIP_ROLES: &[&str] = &["navigation", "banner", "contentinfo", "complementary"];

// * Class/id fragments marking sidebar-like regions.
static CHROME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(sidebar|side-bar|breadcrumb|pagination|cookie|consent|social-share|share-buttons)")
        .expect("chrome pattern must compile")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Normalizes a raw HTML blob into clean plain prose.
///
/// Best-effort parse, then content selection (see
/// [`selector`](super::selector)) with boilerplate elements stripped and all
/// whitespace runs collapsed to a single space. Returns an empty string when
/// the markup yields no text; the caller decides whether that is fatal.
pub fn normalize_html(raw: &str, min_landmark_chars: usize) -> String {
    let document = Html::parse_document(raw);
    super::selector::select_primary_content(&document, min_landmark_chars)
}

/// Normalizes pasted plain text: whitespace collapse and trim only.
/// Content selection is skipped, it only applies to parsed markup.
pub fn normalize_text(raw: &str) -> String {
    collapse_whitespace(raw)
}

// * Collapses any whitespace run (newlines included) to one space.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").into_owned()
}

// * Extracts the visible text of an element subtree, skipping stripped
// * elements, then collapses whitespace.
pub(crate) fn visible_text(root: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_visible(*root, &mut out);
    collapse_whitespace(&out)
}

fn collect_visible(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) => {
                if !is_stripped(el) {
                    collect_visible(child, out);
                }
            }
            _ => {}
        }
    }
}

fn is_stripped(el: &Element) -> bool {
    if STRIP_TAGS.contains(&el.name()) {
        return true;
    }
    if let Some(role) = el.attr("role") {
        if STRIP_ROLES.contains(&role) {
            return true;
        }
    }
    for attr in ["class", "id"] {
        if let Some(value) = el.attr(attr) {
            if CHROME_PATTERN.is_match(value) {
                return true;
            }
        }
    }
    false
}
