//! HTML front end for [`PageView`].

use crate::domain::page::{OutcomeView, PageView, TriggerState};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #262730; }
main { max-width: 46rem; margin: 3rem auto; padding: 0 1.5rem; }
.present { color: #09ab3b; }
.missing { color: #ff2b2b; }
button { padding: 0.5rem 1rem; border-radius: 0.5rem; border: none; background: #ff4b4b; color: #fff; font-size: 1rem; cursor: pointer; }
button:disabled { opacity: 0.6; cursor: progress; }
#outcome { margin-top: 1rem; padding: 0.75rem 1rem; border-radius: 0.5rem; }
#outcome.success { background: #dff5e3; }
#outcome.error { background: #ffe2e2; }
.caption { margin-top: 2rem; font-size: 0.85rem; color: #808495; }
"#;

// Swaps the button to its loading label while the import check runs.
const SCRIPT: &str = r#"
document.getElementById('import-check').addEventListener('submit', function () {
  var button = document.getElementById('trigger');
  button.disabled = true;
  button.dataset.state = 'loading';
  button.textContent = this.dataset.loadingLabel;
});
"#;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn state_name(state: TriggerState) -> &'static str {
    match state {
        TriggerState::Idle => "idle",
        TriggerState::Loading => "loading",
        TriggerState::Succeeded => "succeeded",
        TriggerState::Failed => "failed",
    }
}

fn render_outcome(outcome: Option<&OutcomeView>) -> String {
    match outcome {
        None => String::new(),
        Some(OutcomeView::Success { message, .. }) => {
            format!(r#"<div id="outcome" class="success">{}</div>"#, escape(message))
        }
        Some(OutcomeView::Failure { message, .. }) => format!(
            r#"<div id="outcome" class="error" role="alert"><strong>{}</strong></div>"#,
            escape(message)
        ),
    }
}

pub fn render_html(page: &PageView) -> String {
    let loading = page.trigger.state == TriggerState::Loading;
    let button_label = if loading {
        &page.trigger.loading_label
    } else {
        &page.trigger.label
    };
    let secret_class = if page.secret.present { "present" } else { "missing" };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>">
<style>{style}</style>
</head>
<body>
<main>
<h1>{heading}</h1>
<p id="description">{description}</p>
<p id="secret-status" class="{secret_class}">{secret_line}</p>
<form id="import-check" method="post" action="/check-imports" data-loading-label="{loading_label}">
<button id="trigger" type="submit" data-state="{state}"{disabled}>{button_label}</button>
</form>
{outcome}
<p class="caption">{caption}</p>
</main>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(&page.title),
        icon = escape(&page.icon),
        style = STYLE,
        heading = escape(&page.heading),
        description = escape(&page.description),
        secret_class = secret_class,
        secret_line = escape(&page.secret.line()),
        loading_label = escape(&page.trigger.loading_label),
        state = state_name(page.trigger.state),
        disabled = if loading { " disabled" } else { "" },
        button_label = escape(button_label),
        outcome = render_outcome(page.outcome.as_ref()),
        caption = escape(&page.caption),
        script = SCRIPT,
    )
}
