//! Server-rendered HTML. Pages are small enough to assemble by hand; every
//! user-controlled string goes through [`escape`].

use serde_json::Value;

use bcilab_types::models::StarredResult;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #0f172a; color: #e2e8f0; margin: 0; }
header { display: flex; justify-content: space-between; align-items: center; padding: 1rem 2rem; background: #1e293b; }
header a { color: #93c5fd; margin-left: 1rem; text-decoration: none; }
main { max-width: 56rem; margin: 2rem auto; padding: 0 1rem; }
.card { background: #1e293b; border-radius: 0.75rem; padding: 1.25rem; margin-bottom: 1rem; }
label { display: block; margin-top: 0.75rem; }
input, select, button { font: inherit; padding: 0.4rem 0.6rem; border-radius: 0.4rem; border: 1px solid #334155; }
button { background: #2563eb; color: white; border: none; cursor: pointer; margin-top: 0.75rem; }
button.secondary { background: #475569; }
.error { color: #fca5a5; }
dl { display: grid; grid-template-columns: max-content 1fr; gap: 0.25rem 1rem; }
dt { color: #94a3b8; }
"#;

const LOGIN_SCRIPT: &str = r#"
async function submitAuth(action) {
  const body = {
    username: document.getElementById('username').value,
    password: document.getElementById('password').value,
    action: action,
  };
  const res = await fetch('/login', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  if (res.redirected) { window.location = res.url; return; }
  const data = await res.json();
  if (data.success) { window.location = data.redirect; }
  else { document.getElementById('message').textContent = data.message; }
}
"#;

const SIMULATOR_SCRIPT: &str = r#"
let current = null;

async function loadModalities() {
  const res = await fetch('/api/modalities');
  const data = await res.json();
  const select = document.getElementById('modality');
  for (const m of data.modalities) {
    const opt = document.createElement('option');
    opt.value = m.key;
    opt.textContent = `${m.name} - ${m.tagline}`;
    opt.dataset.electrodes = m.electrode_range.default;
    select.appendChild(opt);
  }
  select.addEventListener('change', () => {
    document.getElementById('electrodes').value = select.selectedOptions[0].dataset.electrodes;
  });
  select.dispatchEvent(new Event('change'));
}

async function runSimulation() {
  const body = {
    modality: document.getElementById('modality').value,
    parameters: {
      electrodes: parseInt(document.getElementById('electrodes').value, 10),
      noise: parseFloat(document.getElementById('noise').value),
      training: parseFloat(document.getElementById('training').value),
    },
  };
  const res = await fetch('/api/simulate', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  const data = await res.json();
  const out = document.getElementById('report');
  if (!data.success) { out.innerHTML = ''; out.textContent = data.message; current = null; return; }
  current = data.report;
  const m = current.metrics;
  out.innerHTML = '';
  const dl = document.createElement('dl');
  for (const [k, v] of [
    ['Accuracy', `${m.accuracy}%`],
    ['Latency', `${m.latency} ms`],
    ['Cost', `$${m.cost.toLocaleString()} (${current.cost_tier})`],
    ['Invasiveness', `${m.invasiveness}/5`],
    ['Best for', current.best_use_case],
  ]) {
    const dt = document.createElement('dt'); dt.textContent = k;
    const dd = document.createElement('dd'); dd.textContent = v;
    dl.append(dt, dd);
  }
  out.appendChild(dl);
}

async function starCurrent() {
  if (!current) { alert('Run a simulation first'); return; }
  const name = prompt('Name this configuration',
    `${current.modality.toUpperCase()} - ${current.parameters.electrodes} electrodes`);
  if (name === null) return;
  const res = await fetch('/api/star-result', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({
      modality: current.modality,
      parameters: current.parameters,
      metrics: current.metrics,
      name: name.trim() || undefined,
    }),
  });
  const data = await res.json();
  alert(data.success ? 'Configuration starred! View it in your account.' : data.message);
}

loadModalities();
"#;

const ACCOUNT_SCRIPT: &str = r#"
async function post(url, body) {
  const res = await fetch(url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  return res.json();
}

async function renameResult(id) {
  const name = prompt('New name');
  if (!name) return;
  const data = await post('/api/update-result-name', { id, name });
  if (data.success) { window.location.reload(); } else { alert(data.message); }
}

async function unstarResult(id) {
  await post('/api/unstar-result', { id });
  window.location.reload();
}
"#;

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, nav_user: Option<&str>, body: &str, script: &str) -> String {
    let nav = match nav_user {
        Some(username) => format!(
            "<span>Signed in as <strong>{}</strong></span>\
             <nav><a href=\"/simulator\">Simulator</a><a href=\"/account\">Account</a>\
             <a href=\"/logout\">Log out</a></nav>",
            escape(username)
        ),
        None => String::new(),
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - BCI Lab</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><strong>BCI Lab</strong>{nav}</header>\n<main>\n{body}\n</main>\n\
         <script>{script}</script>\n</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn login_page() -> String {
    let body = r#"<div class="card">
<h1>Sign in</h1>
<label>Username <input id="username" autocomplete="username"></label>
<label>Password <input id="password" type="password" autocomplete="current-password"></label>
<button onclick="submitAuth('login')">Log in</button>
<button class="secondary" onclick="submitAuth('register')">Register</button>
<p id="message" class="error"></p>
</div>"#;
    layout("Sign in", None, body, LOGIN_SCRIPT)
}

pub fn simulator_page(username: &str) -> String {
    let body = format!(
        r#"<div class="card">
<h1>Welcome, {}</h1>
<p>Pick a sensing modality, tune the parameters and see how the interface would perform.</p>
<label>Modality <select id="modality"></select></label>
<label>Electrodes <input id="electrodes" type="number" min="1" value="32"></label>
<label>Noise (0-10) <input id="noise" type="number" min="0" max="10" step="0.5" value="5"></label>
<label>Training hours <input id="training" type="number" min="0" value="10"></label>
<button onclick="runSimulation()">Simulate</button>
<button class="secondary" onclick="starCurrent()">Star configuration</button>
</div>
<div class="card" id="report"></div>"#,
        escape(username)
    );
    layout("Simulator", Some(username), &body, SIMULATOR_SCRIPT)
}

fn render_mapping(map: &serde_json::Map<String, Value>) -> String {
    if map.is_empty() {
        return "<p><em>none</em></p>".to_string();
    }
    let mut out = String::from("<dl>");
    for (key, value) in map {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("<dt>{}</dt><dd>{}</dd>", escape(key), escape(&shown)));
    }
    out.push_str("</dl>");
    out
}

pub fn account_page(username: &str, results: &[StarredResult]) -> String {
    let mut body = format!(
        "<h1>{}'s starred configurations</h1>\n",
        escape(username)
    );

    if results.is_empty() {
        body.push_str(
            "<div class=\"card\"><p>No starred configurations yet. \
             <a href=\"/simulator\">Open the simulator</a> to create one.</p></div>",
        );
    }

    for result in results {
        // Ids are embedded in a JS string literal inside an attribute.
        let id = escape(&result.id.replace('\\', "\\\\").replace('\'', "\\'"));
        body.push_str(&format!(
            "<div class=\"card\">\n<h2>{name}</h2>\n<p>{modality} &middot; starred {timestamp}</p>\n\
             <h3>Parameters</h3>{parameters}\n<h3>Metrics</h3>{metrics}\n\
             <button onclick=\"renameResult('{id}')\">Rename</button>\n\
             <button class=\"secondary\" onclick=\"unstarResult('{id}')\">Unstar</button>\n</div>\n",
            name = escape(&result.name),
            modality = escape(&result.modality),
            timestamp = result.timestamp.format("%Y-%m-%d %H:%M UTC"),
            parameters = render_mapping(&result.parameters),
            metrics = render_mapping(&result.metrics),
        ));
    }

    layout("Account", Some(username), &body, ACCOUNT_SCRIPT)
}
