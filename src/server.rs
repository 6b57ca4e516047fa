use axum::{
    extract::Query,
    http::Method,
    response::{Html, IntoResponse, Json},
    routing::get,
    Extension, Router,
};
use chrono::Datelike;
use hyper::Server;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::FIRST_DISCOVERY_YEAR;
use crate::types::CanonicalMoon;
use crate::views::{cumulative_counts, moon_counts};

/// Read-only dataset shared with every handler; there is no other
/// server-side state.
pub type Dataset = Arc<Vec<CanonicalMoon>>;

#[derive(Debug, Deserialize)]
struct CountsParams {
    year: Option<i32>,
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "moondash",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Full canonical records, for the searchable table.
async fn api_moons(Extension(dataset): Extension<Dataset>) -> impl IntoResponse {
    Json(dataset.as_ref().clone())
}

/// Per-planet counts at a year cutoff, for the bar and donut charts.
async fn api_counts(
    Extension(dataset): Extension<Dataset>,
    Query(params): Query<CountsParams>,
) -> impl IntoResponse {
    let year = params.year.unwrap_or_else(|| chrono::Utc::now().year());
    Json(moon_counts(&dataset, year))
}

/// Cumulative discoveries over time, for the area chart.
async fn api_cumulative(Extension(dataset): Extension<Dataset>) -> impl IntoResponse {
    Json(cumulative_counts(&dataset))
}

/// Dashboard page (Plotly pinned from CDN; charts talk to the JSON API)
async fn index() -> impl IntoResponse {
    let page = DASHBOARD_HTML
        .replace("{{MAX_YEAR}}", &chrono::Utc::now().year().to_string())
        .replace("{{MIN_YEAR}}", &FIRST_DISCOVERY_YEAR.to_string());
    Html(page)
}

/// Create the HTTP server with all routes
pub fn create_server(dataset: Dataset) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/moons", get(api_moons))
        .route("/api/counts", get(api_counts))
        .route("/api/cumulative", get(api_cumulative))
        .layer(Extension(dataset))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(
    dataset: Dataset,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(dataset);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    println!("🚀 Dashboard running on http://localhost:{port}");
    println!("💚 Health check:     http://localhost:{port}/health");
    println!("🌙 Moons API:        http://localhost:{port}/api/moons");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>Moons of the Solar System</title>
  <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
  <style>
    body { font-family: sans-serif; margin: 0; }
    .wrap { width: 60%; margin: auto; }
    .row { display: flex; }
    .row > div { width: 50%; }
    .controls { margin: 24px 0 8px; }
    .controls input[type=range] { width: 100%; }
    table { border-collapse: collapse; width: 100%; margin: 16px 0; }
    th, td { border: 1px solid #ddd; padding: 4px 8px; text-align: left; }
    th { background: #f4f4f4; cursor: default; }
    .muted { color: #777; font-size: 0.9em; }
  </style>
</head>
<body>
  <div class="wrap">
    <div class="controls">
      <label for="year">Year of Discovery: <span id="year-label"></span></label>
      <input type="range" id="year" min="1600" max="{{MAX_YEAR}}" value="{{MIN_YEAR}}" step="1"/>
    </div>
    <div class="row">
      <div id="bar-chart"></div>
      <div id="donut-chart"></div>
    </div>
    <div id="area-chart"></div>
    <div class="controls">
      <input type="search" id="search" placeholder="Search moons..."/>
      <span id="columns" class="muted"></span>
    </div>
    <table id="moons-table"><thead></thead><tbody></tbody></table>
  </div>
  <script>
    const FIELDS = ["name","parent","numeral","discovery_year","year_announced",
                    "mean_radius_km","orbital_semi_km","sidereal_period"];
    let moons = [];
    let visible = new Set(FIELDS);

    async function fetchJson(url) {
      const res = await fetch(url);
      if (!res.ok) throw new Error(url + ": " + res.status);
      return res.json();
    }

    async function updateCharts(year) {
      const counts = await fetchJson("/api/counts?year=" + year);
      const parents = counts.map(c => c.parent);
      const values = counts.map(c => c.count);
      const colors = counts.map(c => c.color);
      Plotly.react("bar-chart", [{
        type: "bar", x: parents, y: values, text: values.map(String),
        textposition: "outside", marker: { color: colors }
      }], {
        title: "Number of Moons<br>Discovered by Parent Planet",
        yaxis: { visible: false }, showlegend: false, margin: { t: 60 }
      }, { displayModeBar: false });
      Plotly.react("donut-chart", [{
        type: "pie", labels: parents, values: values, hole: 0.5,
        textinfo: "percent+label", marker: { colors: colors }, showlegend: false
      }], {
        title: "Distribution of Moons<br>Discovered by Parent Planet",
        margin: { t: 60 }
      }, { displayModeBar: false });
    }

    async function drawCumulative() {
      const series = await fetchJson("/api/cumulative");
      Plotly.react("area-chart", [{
        x: series.map(p => p.year), y: series.map(p => p.total),
        fill: "tozeroy", mode: "lines", line: { color: "#197ad9" }
      }], {
        title: "Cumulative Moons Discovered Over Time",
        xaxis: { title: "Year" }, yaxis: { title: "Moons" }, margin: { t: 60 }
      }, { displayModeBar: false });
    }

    function renderColumnToggles() {
      const host = document.getElementById("columns");
      host.textContent = "Columns: ";
      for (const field of FIELDS) {
        const label = document.createElement("label");
        const box = document.createElement("input");
        box.type = "checkbox";
        box.checked = visible.has(field);
        box.addEventListener("change", () => {
          box.checked ? visible.add(field) : visible.delete(field);
          renderTable();
        });
        label.appendChild(box);
        label.appendChild(document.createTextNode(field + " "));
        host.appendChild(label);
      }
    }

    function renderTable() {
      const query = document.getElementById("search").value.toLowerCase();
      const cols = FIELDS.filter(f => visible.has(f));
      const thead = document.querySelector("#moons-table thead");
      const tbody = document.querySelector("#moons-table tbody");
      thead.innerHTML = "<tr>" + cols.map(c => "<th>" + c + "</th>").join("") + "</tr>";
      tbody.innerHTML = moons
        .filter(m => !query || m.name.toLowerCase().includes(query)
                            || m.parent.toLowerCase().includes(query))
        .map(m => "<tr>" + cols.map(c => {
          const v = m[c];
          return "<td>" + (v === null || v === undefined ? "" : v) + "</td>";
        }).join("") + "</tr>")
        .join("");
    }

    async function init() {
      const slider = document.getElementById("year");
      const label = document.getElementById("year-label");
      label.textContent = slider.value;
      slider.addEventListener("input", () => {
        label.textContent = slider.value;
        updateCharts(slider.value);
      });
      document.getElementById("search").addEventListener("input", renderTable);

      moons = await fetchJson("/api/moons");
      renderColumnToggles();
      renderTable();
      await updateCharts(slider.value);
      await drawCumulative();
    }
    init();
  </script>
</body>
</html>"##;
