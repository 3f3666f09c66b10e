//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Chart.js rendering lives in `assets/js/aadt-chart.js` and is loaded at
//! runtime. It is evaluated as globals (no ES modules) and exposed via
//! `window.*`. This module provides safe Rust wrappers that serialize chart
//! configs and call those globals, plus `JsChartRenderer`, the
//! `ChartRenderer` used by the web app's `ChartSession`.

use aadt_chart::dataset::ChartSpec;
use aadt_chart::session::ChartRenderer;

// Embed the chart JS at compile time
static AADT_CHART_JS: &str = include_str!("../assets/js/aadt-chart.js");

// Waits for Chart.js, evaluates the stored chart scripts and promotes their
// functions to `window.*`.
static INIT_CHARTS_JS: &str = r#"
        (function() {
            if (window.__aadtChartsReady || window.__aadtChartsPolling) { return; }
            window.__aadtChartsPolling = true;
            var waitForChart = setInterval(function() {
                if (typeof Chart !== 'undefined') {
                    clearInterval(waitForChart);
                    (0, eval)(window.__aadtChartScripts);
                    delete window.__aadtChartScripts;
                    if (typeof renderAadtChart !== 'undefined') window.renderAadtChart = renderAadtChart;
                    if (typeof destroyAadtChart !== 'undefined') window.destroyAadtChart = destroyAadtChart;
                    (window.__aadtPendingDestroy || []).forEach(function(h) { window.destroyAadtChart(h); });
                    delete window.__aadtPendingDestroy;
                    window.__aadtChartsReady = true;
                    console.log('AADT charts initialized');
                }
            }, 100);
        })();
    "#;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('AADT JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Escape a JSON payload for embedding in a single-quoted JS string.
fn escape_single_quoted(json: &str) -> String {
    json.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "")
}

/// Initialize chart scripts with a wait-for-Chart.js polling loop.
///
/// The chart JS defines `renderAadtChart(...)` and `destroyAadtChart(...)`
/// via `function` declarations. They are evaluated at global scope via an
/// indirect `eval()` once Chart.js is ready and then promoted to `window.*`. Calling this more
/// than once is harmless.
pub fn init_charts() {
    let store_js = format!(
        "if (!window.__aadtChartsReady) {{ window.__aadtChartScripts = {}; }}",
        serde_json::to_string(AADT_CHART_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);
    let _ = js_sys::eval(INIT_CHARTS_JS);
}

/// Render a station chart into `container_id` under `handle`.
///
/// Polls until Chart.js is loaded, the chart scripts are initialized and the
/// container DOM element exists.
pub fn render_aadt_chart(container_id: &str, handle: u32, config_json: &str) {
    let escaped_config = escape_single_quoted(config_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__aadtChartsReady &&
                    typeof window.renderAadtChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderAadtChart('{container_id}', {handle}, '{escaped_config}');
                    }} catch(e) {{ console.error('[AADT] renderAadtChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy the chart registered under `handle`.
///
/// If its render is still pending, the render is cancelled instead.
pub fn destroy_aadt_chart(handle: u32) {
    call_js(&format!(
        r#"
        if (typeof window.destroyAadtChart !== 'undefined') {{
            window.destroyAadtChart({handle});
        }} else {{
            window.__aadtPendingDestroy = (window.__aadtPendingDestroy || []).concat([{handle}]);
        }}
        "#,
    ));
}

/// Show or hide the chart panel.
pub fn set_panel_visible(panel_id: &str, visible: bool) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.style.display = '{}';",
        panel_id,
        if visible { "block" } else { "none" }
    ));
}

/// Clean up any markup left in a chart container.
pub fn clear_container(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// `ChartRenderer` backed by Chart.js.
///
/// Handles are integer ids allocated here, so destroying never depends on a
/// value coming back from JS.
pub struct JsChartRenderer {
    panel_id: String,
    container_id: String,
    next_handle: u32,
}

impl JsChartRenderer {
    /// `panel_id` is the element shown/hidden with the chart, `container_id`
    /// the element the canvas is created in.
    pub fn new(panel_id: &str, container_id: &str) -> Self {
        JsChartRenderer {
            panel_id: panel_id.to_string(),
            container_id: container_id.to_string(),
            next_handle: 0,
        }
    }
}

impl ChartRenderer for JsChartRenderer {
    type Handle = u32;

    fn render(&mut self, spec: &ChartSpec) -> u32 {
        self.next_handle += 1;
        let handle = self.next_handle;
        init_charts();
        let config_json = serde_json::to_string(&spec.to_chart_config()).unwrap_or_default();
        log::info!("Rendering chart {} for '{}'", handle, spec.title);
        render_aadt_chart(&self.container_id, handle, &config_json);
        handle
    }

    fn destroy(&mut self, handle: u32) {
        log::info!("Destroying chart {}", handle);
        destroy_aadt_chart(handle);
        clear_container(&self.container_id);
    }

    fn set_visible(&mut self, visible: bool) {
        set_panel_visible(&self.panel_id, visible);
    }
}
