//! Embedded HTML/CSS/JS frontend for the campaign dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Dashboard</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --purple: #bc8cff;
  --cyan: #39d2c0;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app {
  max-width: 1400px;
  margin: 0 auto;
  padding: 24px;
}

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}

header h1 {
  font-size: 24px;
  font-weight: 600;
}

.health-badges {
  display: flex;
  gap: 8px;
}

.badge {
  display: inline-flex;
  align-items: center;
  gap: 4px;
  padding: 4px 10px;
  border-radius: 12px;
  font-size: 12px;
  font-weight: 500;
  background: var(--surface);
  border: 1px solid var(--border);
}

.badge.ok { border-color: var(--green); color: var(--green); }
.badge.warn { border-color: var(--yellow); color: var(--yellow); }

/* Status lines */
.status {
  padding: 10px 14px;
  border-radius: var(--radius);
  margin-bottom: 12px;
  border: 1px solid var(--border);
}

.status.success { border-color: var(--green); color: var(--green); }
.status.error { border-color: var(--red); color: var(--red); }

/* Controls */
.controls {
  display: flex;
  align-items: flex-end;
  gap: 12px;
  margin: 16px 0 24px;
}

.controls label {
  display: block;
  font-size: 12px;
  color: var(--text-muted);
  margin-bottom: 4px;
}

.controls select {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 6px;
  color: var(--text);
  padding: 7px 10px;
  font-size: 13px;
  min-width: 260px;
}

.controls select:focus { outline: none; border-color: var(--accent); }

h2.section {
  font-size: 18px;
  font-weight: 600;
  margin-bottom: 8px;
}

/* Cards */
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
}

.card h3 {
  font-size: 14px;
  font-weight: 600;
  margin-bottom: 12px;
  color: var(--text-muted);
}

/* Stats grid */
.stats-grid {
  display: grid;
  grid-template-columns: repeat(6, 1fr);
  gap: 16px;
  margin-bottom: 24px;
}

.stat-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  text-align: center;
}

.stat-card .value {
  font-size: 24px;
  font-weight: 700;
  font-family: var(--mono);
  color: var(--accent);
  line-height: 1.1;
  white-space: nowrap;
}

.stat-card .label {
  font-size: 12px;
  color: var(--text-muted);
  margin-top: 6px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}

/* Charts */
.charts-grid {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 16px;
}

.hchart .row {
  display: flex;
  align-items: center;
  gap: 8px;
  margin-bottom: 8px;
}

.hchart .row-label {
  flex: 0 0 120px;
  font-size: 12px;
  color: var(--text-muted);
  text-align: right;
  overflow: hidden;
  text-overflow: ellipsis;
  white-space: nowrap;
}

.hchart .row-bars { flex: 1; }

.hchart .bar {
  border-radius: 0 3px 3px 0;
  min-width: 2px;
  margin-bottom: 2px;
  position: relative;
  transition: width 0.4s;
}

.vchart {
  display: flex;
  align-items: flex-end;
  justify-content: space-around;
  gap: 8px;
  padding-top: 20px;
}

.vchart .bar-group {
  display: flex;
  flex-direction: column;
  align-items: center;
  height: 100%;
  justify-content: flex-end;
}

.vchart .stack {
  display: flex;
  flex-direction: column-reverse;
}

.vchart .bar {
  border-radius: 3px 3px 0 0;
  min-height: 2px;
  position: relative;
  transition: height 0.4s;
}

.vchart .bar-label {
  font-size: 11px;
  color: var(--text-muted);
  margin-top: 6px;
}

.axis-title {
  font-size: 11px;
  color: var(--text-muted);
  text-align: center;
  margin-top: 8px;
}

.bar:hover { opacity: 0.8; }

.chart-tooltip {
  position: absolute;
  bottom: calc(100% + 6px);
  left: 50%;
  transform: translateX(-50%);
  background: #333;
  color: #fff;
  padding: 4px 8px;
  border-radius: 4px;
  font-size: 11px;
  white-space: pre;
  pointer-events: none;
  opacity: 0;
  transition: opacity 0.15s;
  z-index: 10;
}

.bar:hover .chart-tooltip { opacity: 1; }

.legend {
  display: flex;
  flex-wrap: wrap;
  gap: 12px;
  font-size: 12px;
  color: var(--text-muted);
  margin-top: 12px;
}

.legend .swatch {
  display: inline-block;
  width: 10px;
  height: 10px;
  border-radius: 3px;
  margin-right: 4px;
  vertical-align: middle;
}

.hidden { display: none; }

/* Buttons */
.btn {
  display: inline-flex;
  align-items: center;
  gap: 6px;
  padding: 8px 16px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--surface);
  color: var(--text);
  font-size: 13px;
  cursor: pointer;
  transition: all 0.15s;
}

.btn:hover { border-color: var(--accent); color: var(--accent); }

/* Toast */
.toast {
  position: fixed;
  bottom: 24px;
  right: 24px;
  padding: 12px 20px;
  border-radius: var(--radius);
  background: var(--green);
  color: #fff;
  font-size: 13px;
  font-weight: 500;
  opacity: 0;
  transform: translateY(10px);
  transition: all 0.3s;
  pointer-events: none;
  z-index: 100;
}

.toast.show { opacity: 1; transform: translateY(0); }
.toast.error { background: var(--red); }

@media (max-width: 900px) {
  .stats-grid { grid-template-columns: repeat(3, 1fr); }
  .charts-grid { grid-template-columns: 1fr; }
}
</style>
</head>
<body>
<div class="app">
  <header>
    <h1 id="page-title">Dashboard</h1>
    <div class="health-badges" id="health-badges"></div>
  </header>

  <div id="status"></div>

  <div id="content" class="hidden">
    <div class="controls">
      <div>
        <label for="campaign-select">Selecione a campanha</label>
        <select id="campaign-select"></select>
      </div>
      <button class="btn" id="reset-btn">Redefinir Filtro</button>
    </div>

    <h2 class="section" id="section-title"></h2>
    <div class="stats-grid" id="tiles"></div>

    <div class="charts-grid" id="charts"></div>
  </div>
</div>

<div class="toast" id="toast"></div>

<script>
// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  const data = await res.json();
  if (!res.ok) throw new Error(data.error || res.statusText);
  return data;
}

function toast(msg, isError) {
  const el = document.getElementById('toast');
  el.textContent = msg;
  el.className = 'toast show' + (isError ? ' error' : '');
  setTimeout(() => el.className = 'toast', 3000);
}

function fmtNum(n) {
  return Number(n).toLocaleString('en-US', { maximumFractionDigits: 2 });
}

const PALETTE = ['#58a6ff', '#3fb950', '#bc8cff', '#d29922', '#39d2c0', '#f85149'];

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------
async function loadPage() {
  try {
    renderPage(await api('GET', '/api/page'));
  } catch (e) {
    toast('Falha ao carregar o painel: ' + e.message, true);
  }
}

async function selectCampaign(name) {
  try {
    renderPage(await api('POST', '/api/select', { campaign: name }));
  } catch (e) {
    toast('Falha ao aplicar o filtro: ' + e.message, true);
  }
}

async function resetFilter() {
  try {
    await api('POST', '/api/reset');
  } catch (e) {
    toast('Falha ao redefinir o filtro: ' + e.message, true);
    return;
  }
  location.reload();
}

function renderPage(page) {
  document.title = page.title;
  document.getElementById('page-title').textContent = page.title;

  document.getElementById('status').innerHTML = page.status
    .map(s => `<div class="status ${s.level}">${esc(s.message)}</div>`)
    .join('');

  const content = document.getElementById('content');
  const c = page.content;
  if (!c) {
    content.classList.add('hidden');
    return;
  }
  content.classList.remove('hidden');

  const select = document.getElementById('campaign-select');
  select.innerHTML = c.campaigns
    .map(name => `<option value="${esc(name)}"${name === c.selected_campaign ? ' selected' : ''}>${esc(name)}</option>`)
    .join('');

  document.getElementById('section-title').textContent = c.section_title;

  document.getElementById('tiles').innerHTML = c.tiles.map(t => `
    <div class="stat-card">
      <div class="value">${esc(t.value)}</div>
      <div class="label">${esc(t.label)}</div>
    </div>
  `).join('');

  document.getElementById('charts').innerHTML = c.charts.map(renderChart).join('');
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------
function seriesColors(data) {
  const colors = {};
  let i = 0;
  for (const d of data) {
    if (!(d.series in colors)) colors[d.series] = PALETTE[i++ % PALETTE.length];
  }
  return colors;
}

function groupByCategory(data) {
  const groups = [];
  const index = {};
  for (const d of data) {
    if (!(d.category in index)) {
      index[d.category] = groups.length;
      groups.push({ category: d.category, items: [] });
    }
    groups[index[d.category]].items.push(d);
  }
  return groups;
}

function tooltip(spec, d) {
  if (!spec.tooltip.length) return '';
  const text = spec.tooltip
    .map(t => `${t.label}: ${t.field === 'value' ? fmtNum(d.value) : d[t.field]}`)
    .join('\n');
  return `<span class="chart-tooltip">${esc(text)}</span>`;
}

function legend(spec, colors) {
  if (!spec.color.legend_title) return '';
  return `<div class="legend"><strong>${esc(spec.color.legend_title)}</strong>` +
    Object.entries(colors)
      .map(([name, color]) => `<span><span class="swatch" style="background:${color}"></span>${esc(name)}</span>`)
      .join('') +
    '</div>';
}

function renderChart(spec) {
  const colors = seriesColors(spec.data);
  const groups = groupByCategory(spec.data);
  const body = spec.mark.orientation === 'horizontal'
    ? horizontalBars(spec, groups, colors)
    : verticalBars(spec, groups, colors);
  return `
    <div class="card" style="min-width:${spec.width}px">
      <h3>${esc(spec.title)}</h3>
      ${body}
      ${legend(spec, colors)}
    </div>`;
}

function horizontalBars(spec, groups, colors) {
  const max = Math.max(1, ...spec.data.map(d => d.value));
  const rows = groups.map(g => `
    <div class="row">
      <div class="row-label" title="${esc(g.category)}">${esc(g.category)}</div>
      <div class="row-bars">
        ${g.items.map(d => `
          <div class="bar" style="width:${(d.value / max) * 100}%;height:${spec.mark.size / 2}px;background:${colors[d.series]}">
            ${tooltip(spec, d)}
          </div>`).join('')}
      </div>
    </div>`).join('');
  return `<div class="hchart">${rows}</div><div class="axis-title">${esc(spec.x.title)}</div>`;
}

function verticalBars(spec, groups, colors) {
  const totals = groups.map(g => g.items.reduce((sum, d) => sum + d.value, 0));
  const max = Math.max(1, ...totals);
  const cols = groups.map(g => `
    <div class="bar-group">
      <div class="stack">
        ${g.items.map(d => `
          <div class="bar" style="height:${(d.value / max) * spec.height}px;width:${spec.mark.size}px;background:${colors[d.series]}">
            ${tooltip(spec, d)}
          </div>`).join('')}
      </div>
      <div class="bar-label">${esc(g.category)}</div>
    </div>`).join('');
  return `
    <div class="vchart" style="height:${spec.height + 40}px">${cols}</div>
    <div class="axis-title">${esc(spec.x.title)} / ${esc(spec.y.title)}</div>`;
}

// ---------------------------------------------------------------------------
// Health badges
// ---------------------------------------------------------------------------
async function loadHealth() {
  try {
    const h = await api('GET', '/api/health');
    document.getElementById('health-badges').innerHTML = [
      badge('Planilha', h.source_exists ? 'ok' : 'warn'),
      badge('Config', h.global_config_exists || h.project_config_exists ? 'ok' : 'warn'),
    ].join('');
  } catch (e) {
    // Silently ignore health badge errors
  }
}

function badge(label, cls) {
  const dot = cls === 'ok' ? '●' : '○';
  return `<span class="badge ${cls}">${dot} ${esc(label)}</span>`;
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------
function esc(s) {
  if (s === undefined || s === null) return '';
  return String(s).replace(/&/g,'&amp;').replace(/</g,'&lt;').replace(/>/g,'&gt;').replace(/"/g,'&quot;');
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
document.getElementById('campaign-select').addEventListener('change', e => selectCampaign(e.target.value));
document.getElementById('reset-btn').addEventListener('click', resetFilter);

loadHealth();
loadPage();
</script>
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_calls_every_dashboard_endpoint() {
        for path in ["/api/page", "/api/select", "/api/reset", "/api/health"] {
            assert!(INDEX_HTML.contains(path), "frontend never calls {path}");
        }
    }

    #[test]
    fn reset_reloads_the_page() {
        assert!(INDEX_HTML.contains("Redefinir Filtro"));
        assert!(INDEX_HTML.contains("location.reload()"));
    }
}
