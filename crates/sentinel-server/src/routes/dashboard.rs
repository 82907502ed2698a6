use axum::response::Html;

const DASHBOARD_HTML: &str = r#"<!doctype html>
<html>
  <head><title>API Sentinel Dashboard</title></head>
  <body>
    <h1>API Sentinel Dashboard</h1>
    <ul>
      <li><a href="/health">Health</a></li>
    </ul>
    <p>Submit incidents with <code>POST /run_incident</code>.</p>
  </body>
</html>
"#;

/// GET / — static placeholder page.
pub async fn home() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
