//! Server-rendered HTML for the two dashboard pages.
//!
//! The pages carry the initial data; `static/dashboard.js` keeps them fresh
//! by polling the JSON endpoints and patching the elements by id.

use crate::news::NewsItem;
use crate::utils::{escape_html, format_temperature, last_updated};
use crate::weather::WeatherSummary;
use std::fmt::Write;

const PLACEHOLDER_CITY: &str = "Unknown";
const PLACEHOLDER_TEMP: f64 = 0.0;
const PLACEHOLDER_DESCRIPTION: &str = "No data";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 960px; padding: 1.5rem; background: #101418; color: #e8e8e8; }
a { color: #f3e600; }
nav a { margin-right: 1rem; }
.card { background: #1b2026; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1.5rem; }
.headlines { list-style: none; padding: 0; }
.headlines li { display: flex; gap: 1rem; align-items: center; padding: 0.5rem 0; border-bottom: 1px solid #2a3038; }
.headlines img { width: 96px; height: 64px; object-fit: cover; border-radius: 4px; }
.toolbar { display: flex; gap: 0.5rem; align-items: center; font-size: 0.9rem; }
.updating { opacity: 0.5; transition: opacity 0.3s; }
"#;

/// Home page: weather card plus the default feed's headlines.
pub fn render_home(weather: Option<&WeatherSummary>, news: Option<&[NewsItem]>) -> String {
    let (city, temp, description) = match weather {
        Some(w) => (w.city.as_str(), w.temp, w.description.as_str()),
        None => (PLACEHOLDER_CITY, PLACEHOLDER_TEMP, PLACEHOLDER_DESCRIPTION),
    };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"<section class="card" id="weather">
  <h2 id="weather-city">{city}</h2>
  <p><strong id="weather-temp">{temp}</strong> <span id="weather-description">{description}</span></p>
</section>
"#,
        city = escape_html(city),
        temp = escape_html(&format_temperature(temp)),
        description = escape_html(description),
    );
    body.push_str(&headlines_section("Headlines", news));

    layout("Weather &amp; News Dashboard", "/api/news", &body)
}

/// News page: a longer list of the default feed's headlines.
pub fn render_news(news: Option<&[NewsItem]>, endpoint: &str) -> String {
    let body = headlines_section("Latest posts", news);
    layout("News", endpoint, &body)
}

fn headlines_section(heading: &str, news: Option<&[NewsItem]>) -> String {
    let mut out = format!(
        "<section class=\"card\">\n  <h2>{}</h2>\n  <ul class=\"headlines\" id=\"news-list\">\n",
        escape_html(heading)
    );

    match news {
        Some(items) if !items.is_empty() => {
            for item in items {
                out.push_str(&headline(item));
            }
        }
        _ => out.push_str("    <li class=\"empty\">No headlines available</li>\n"),
    }

    out.push_str("  </ul>\n</section>\n");
    out
}

fn headline(item: &NewsItem) -> String {
    let image = item
        .image
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="" loading="lazy">"#, escape_html(src)))
        .unwrap_or_default();

    format!(
        "    <li>{}<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></li>\n",
        image,
        escape_html(&item.url),
        escape_html(&item.title)
    )
}

fn layout(title: &str, news_endpoint: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body data-news-endpoint="{endpoint}">
<nav><a href="/">Dashboard</a><a href="/news">News</a></nav>
<h1>{title}</h1>
<div class="toolbar">
  <button id="refresh-btn" type="button">Refresh</button>
  <button id="pause-btn" type="button">Pause</button>
  <span>Last updated: <span id="last-updated">{updated}</span></span>
</div>
{body}<script src="/static/dashboard.js"></script>
</body>
</html>
"#,
        title = title,
        style = STYLE,
        endpoint = escape_html(news_endpoint),
        updated = last_updated(),
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, image: Option<&str>) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn test_home_renders_weather_and_headlines() {
        let weather = WeatherSummary {
            city: "London".to_string(),
            temp: 18.3,
            description: "Clear sky".to_string(),
        };
        let news = vec![item("patch", Some("https://i.redd.it/a.png")), item("meme", None)];

        let html = render_home(Some(&weather), Some(news.as_slice()));

        assert!(html.contains(r#"<h2 id="weather-city">London</h2>"#));
        assert!(html.contains("18.3°C"));
        assert!(html.contains("Clear sky"));
        assert!(html.contains(r#"<img src="https://i.redd.it/a.png""#));
        assert!(html.contains(">meme</a>"));
        assert_eq!(html.matches("<img").count(), 1);
        assert!(html.contains(r#"data-news-endpoint="/api/news""#));
    }

    #[test]
    fn test_home_uses_placeholders_without_data() {
        let html = render_home(None, None);

        assert!(html.contains(">Unknown</h2>"));
        assert!(html.contains("0.0°C"));
        assert!(html.contains("No data"));
        assert!(html.contains("No headlines available"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let news = vec![NewsItem {
            title: "<b>Johnny</b> & \"V\"".to_string(),
            url: "https://example.com/?a=1&b=2".to_string(),
            image: None,
        }];

        let html = render_news(Some(news.as_slice()), "/api/news/cyberpunkgame/10");

        assert!(html.contains("&lt;b&gt;Johnny&lt;/b&gt; &amp; &quot;V&quot;"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
        assert!(!html.contains("<b>Johnny</b>"));
    }

    #[test]
    fn test_empty_feed_shows_notice() {
        let html = render_news(Some(&[][..]), "/api/news/cyberpunkgame/10");
        assert!(html.contains("No headlines available"));
        assert!(html.contains("/static/dashboard.js"));
    }
}
