use axum::response::Html;

const MONITOR_PAGE: &str = include_str!("../../static/monitor.html");

/// Static dashboard that renders the live worker table from `/ws`.
pub async fn monitor() -> Html<&'static str> {
    Html(MONITOR_PAGE)
}
