// * Content Selection: prefer a primary-content landmark over the full body.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::normalizer::visible_text;

// * Landmark selectors in priority order.
static SELECTOR_MAIN: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("main, [role='main']").unwrap());
static SELECTOR_ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());

// * Common class/id patterns for job-description containers.
static SELECTOR_JOB_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        r#"[class*="job-description"], [id*="job-description"],
           [class*="jobDescription"], [id*="jobDescription"],
           [class*="job-details"], [id*="job-details"],
           [class*="posting"], [class*="description"], [id*="description"]"#,
    )
    .unwrap()
});

static SELECTOR_BODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Returns the cleaned text of the best content region in `document`.
///
/// Tries landmarks in priority order: a main-content region, an article
/// region, then common job-description class/id patterns. A landmark whose
/// cleaned text is shorter than `min_chars` is discarded (it matched but
/// holds only a teaser) and the search continues, ending at full-body text.
pub fn select_primary_content(document: &Html, min_chars: usize) -> String {
    for selector in [&*SELECTOR_MAIN, &*SELECTOR_ARTICLE, &*SELECTOR_JOB_CONTENT] {
        for region in document.select(selector) {
            let text = visible_text(region);
            if text.chars().count() >= min_chars {
                return text;
            }
        }
    }

    tracing::debug!(min_chars, "no content landmark matched, falling back to full body");
    match document.select(&SELECTOR_BODY).next() {
        Some(body) => visible_text(body),
        None => visible_text(document.root_element()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(html: &str, min_chars: usize) -> String {
        select_primary_content(&Html::parse_document(html), min_chars)
    }

    #[test]
    fn test_main_landmark_beats_body() {
        let html = r#"
            <html><body>
                <div>Unrelated navigation text that lives outside the landmark.</div>
                <main>We are hiring a Platform Engineer to own our deploy tooling.</main>
            </body></html>
        "#;

        let text = select(html, 50);
        assert_eq!(text, "We are hiring a Platform Engineer to own our deploy tooling.");
    }

    #[test]
    fn test_article_used_when_no_main() {
        let html = r#"
            <html><body>
                <article>Data Engineer role focused on our ingestion pipelines and warehouse.</article>
                <div>Footer-ish text elsewhere on the page.</div>
            </body></html>
        "#;

        let text = select(html, 50);
        assert!(text.starts_with("Data Engineer role"));
    }

    #[test]
    fn test_job_description_container_pattern() {
        let html = r#"
            <html><body>
                <div class="posting-header">Acme</div>
                <div id="jobDescriptionText">Security Engineer. You will harden our control plane and review designs.</div>
            </body></html>
        "#;

        let text = select(html, 50);
        assert!(text.contains("harden our control plane"));
        assert!(!text.contains("Acme"));
    }

    #[test]
    fn test_teaser_landmark_escalates_to_body() {
        // * <main> matches but holds only a teaser shorter than the minimum.
        let html = r#"
            <html><body>
                <main>Apply now!</main>
                <div>Full role description: Senior Backend Engineer building the billing platform, owning reliability and on-call.</div>
            </body></html>
        "#;

        let text = select(html, 50);
        assert!(text.contains("Senior Backend Engineer"));
        assert!(text.contains("Apply now!"), "body fallback keeps all visible text");
    }

    #[test]
    fn test_empty_document_yields_empty_string() {
        assert_eq!(select("<html><body></body></html>", 50), "");
    }
}
