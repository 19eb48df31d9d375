/// Render the demo page. `sources` populates the source picker with `active`
/// preselected; everything else happens client-side against the JSON routes.
pub fn render_index(sources: &[String], active: &str) -> String {
    let options: String = sources
        .iter()
        .map(|key| {
            let selected = if key == active { " selected" } else { "" };
            format!(
                r#"<option value="{k}"{selected}>{k}</option>"#,
                k = html_escape(key)
            )
        })
        .collect();

    let content = format!(
        r#"<div class="container">
    <div class="controls">
        <label>Joke source
            <select id="source">{options}</select>
        </label>
        <label>Funniness method
            <select id="method">
                <option value="mocked">Mocked scores</option>
                <option value="direct_llm" selected>Direct LLM judge</option>
                <option value="bedrock_eval_simulation">Evaluation job (simulated)</option>
            </select>
        </label>
        <button id="next" class="action-btn">Tell me a joke</button>
    </div>
    <p id="notice" class="notice"></p>
    <div id="results"></div>
</div>
<script>
const results = document.getElementById('results');
const notice = document.getElementById('notice');
const nextBtn = document.getElementById('next');

function badge(ok, text) {{
    const span = document.createElement('span');
    span.className = 'badge ' + (ok ? 'badge-ok' : 'badge-bad');
    span.textContent = text;
    return span;
}}

function row(label, node) {{
    const div = document.createElement('div');
    div.className = 'meta-row';
    const name = document.createElement('span');
    name.textContent = label;
    div.appendChild(name);
    div.appendChild(node);
    return div;
}}

function renderEvaluation(data) {{
    const card = document.createElement('div');
    card.className = 'joke-card';
    const text = document.createElement('h3');
    text.textContent = data.joke;
    card.appendChild(text);
    card.appendChild(row('Novelty', badge(data.novelty.is_novel, data.novelty.status)));
    card.appendChild(row('Safety', badge(data.safety.is_safe, data.safety.status)));
    const f = data.funniness;
    card.appendChild(row('Funniness', badge(f.score >= 3, f.score + '/5 ' + f.source)));
    results.prepend(card);
}}

nextBtn.addEventListener('click', () => {{
    const method = document.getElementById('method').value;
    nextBtn.disabled = true;
    fetch('/evaluate_next_joke?funniness_method=' + encodeURIComponent(method))
        .then(r => r.json())
        .then(data => {{
            if (data.status === 'end_of_jokes') {{
                notice.textContent = data.message;
                return;
            }}
            notice.textContent = '';
            renderEvaluation(data);
        }})
        .finally(() => {{ nextBtn.disabled = false; }});
}});

document.getElementById('source').addEventListener('change', (e) => {{
    fetch('/switch_joke_file/' + encodeURIComponent(e.target.value))
        .then(r => r.json())
        .then(data => {{
            results.innerHTML = '';
            notice.textContent = data.status === 'success'
                ? data.message + ' (' + data.joke_count + ' jokes)'
                : data.message;
        }});
}});
</script>"#
    );

    build_page("Joke Evaluator", &content)
}

// --- Helpers ---

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} — Punchline</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;}}
.header h1{{font-size:18px;font-weight:600;}}
.container{{max-width:760px;margin:0 auto;padding:24px;}}
.controls{{display:flex;gap:16px;align-items:flex-end;flex-wrap:wrap;margin-bottom:16px;font-size:13px;color:#555;}}
.controls label{{display:flex;flex-direction:column;gap:4px;}}
.controls select{{padding:6px 8px;border:1px solid #ccc;border-radius:4px;font-size:14px;}}
.notice{{font-size:13px;color:#795548;min-height:18px;margin-bottom:12px;}}
.joke-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.joke-card h3{{font-size:16px;font-weight:500;margin-bottom:8px;}}
.badge{{display:inline-block;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;}}
.badge-ok{{background:#e8f5e9;color:#2e7d32;}}
.badge-bad{{background:#fce4ec;color:#c62828;}}
.meta-row{{display:flex;gap:12px;align-items:center;font-size:12px;color:#888;margin-top:6px;}}
.meta-row span:first-child{{width:80px;}}
.action-btn{{display:inline-block;padding:8px 16px;background:#0066cc;color:#fff;border:none;border-radius:4px;font-size:13px;font-weight:500;cursor:pointer;}}
.action-btn:hover{{background:#004499;}}
.action-btn:disabled{{background:#999;cursor:default;}}
</style>
</head>
<body>
<div class="header">
    <h1>Punchline</h1>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
