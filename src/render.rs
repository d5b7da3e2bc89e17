//! Viewer page wrapped around the sanitized content.

/// Render the final page.
///
/// `content` must already be sanitized. `target` is escaped here, since it is
/// shown both as text and inside the back-link's `href`.
#[must_use]
pub fn render_page(content: &str, target: &str) -> String {
    let target = ammonia::clean_text(target);

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Ad-free view</title>
<style>
  body {{ max-width: 46rem; margin: 2rem auto; padding: 0 1rem; font: 18px/1.6 Georgia, serif; color: #222; }}
  .source {{ font: 14px/1.4 system-ui, sans-serif; color: #666; border-bottom: 1px solid #ddd; padding-bottom: .75rem; margin-bottom: 1.5rem; word-break: break-all; }}
  img {{ max-width: 100%; height: auto; }}
  table {{ border-collapse: collapse; }}
  td, th {{ border: 1px solid #ddd; padding: .25rem .5rem; }}
</style>
</head>
<body>
<div class="source">Source: {target} &middot; <a href="{target}" target="_blank" rel="noopener noreferrer">Open original</a></div>
<main>
{content}
</main>
</body>
</html>
"#
    )
}
