//! HTML documents served by the web interface.

use crate::colour::colour_for;
use crate::reading::TemperatureSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};

/// Escape text for embedding in HTML. `&` goes first so nothing is escaped twice.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// ISO-8601 with milliseconds, e.g. `2024-01-31T12:00:00.000Z`.
pub fn iso_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Temperature page for the given snapshot.
pub fn render_temperature(snapshot: &TemperatureSnapshot) -> String {
    format!(
        r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en-GB" lang="en-GB">
<head>
<meta charset="UTF-8" />
<meta http-equiv="refresh" content="300" />
<title>Temperature - Arduino - Raspberry Pi</title>
<meta name="keywords" content="Temperature, Arduino, Raspberry Pi" />
<meta name="viewport" content="initial-scale=1.0,width=device-width" />
<link rel="alternate" type="application/json" href="temperature.json"/>
<meta name="robots" content="noindex" />
<style type="text/css">
html, body {{background:black; color:white; font-family:sans-serif; text-align:center}}
.out {{font-size:48pt}}
.r {{bottom:0; color:#AAA; left:0.5em; position:absolute; text-align:left}}
a {{color:#AAA; text-decoration:none}}
a:hover {{border-bottom:1px dashed}}
</style>
</head>
<body>
<h1>Temperature</h1>
<p><strong class="out" style="color:rgb({colour})">{value}°F</strong></p>
<p>{observed}</p>
<p class="r"><a href="./home">Arduino + Raspberry Pi</a></p>
</body>
</html>
"#,
        colour = colour_for(snapshot.temperature_f),
        value = snapshot.rounded(),
        observed = iso_timestamp(&snapshot.observed_at),
    )
}

/// Home page greeting the client.
pub fn render_home(remote_addr: &str, now: &DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en-GB" lang="en-GB">
<head>
<meta charset="UTF-8" />
<title>Temperature monitor on Raspberry Pi</title>
<meta name="robots" content="noindex" />
<meta name="viewport" content="initial-scale=1.0,width=device-width" />
</head>
<body>
<pre>
Hello {remote}!
This is temperature_pi on Raspberry Pi.
It is now {now}.
</pre>
<ul>
<li><a href="./temperature">Temperature</a></li>
<li><a href="temperature.json">Latest reading (JSON)</a></li>
</ul>
</body>
</html>
"#,
        remote = escape_html(remote_addr),
        now = iso_timestamp(now),
    )
}

/// Fixed body for malformed requests.
pub fn render_bad_request() -> &'static str {
    r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en-GB" lang="en-GB">
<head>
<meta charset="UTF-8" />
<title>400 Bad Request</title>
</head>
<body>
<h1>Bad Request</h1>
<p>Your browser sent a request that this server could not understand.</p>
</body>
</html>
"#
}

/// Not-found page; `path` comes from the client and is escaped.
pub fn render_not_found(path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en-GB" lang="en-GB">
<head>
<meta charset="UTF-8" />
<title>404 Not Found</title>
</head>
<body>
<h1>Not Found</h1>
<p>The requested <abbr title="Uniform Resource Locator">URL</abbr> <kbd>{}</kbd> was not found on this server.</p>
</body>
</html>
"#,
        escape_html(path)
    )
}
