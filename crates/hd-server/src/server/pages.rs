//! HTML pages served by the front end

use hd_core::AppRegistry;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>hostdeck - Login</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; background: #1e1e2e; color: #cdd6f4; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; }
        .card { background: #313244; padding: 2rem; border-radius: 12px; width: 320px; }
        h1 { margin-top: 0; font-size: 1.5rem; }
        label { display: block; margin-top: 1rem; font-size: 0.9rem; }
        input { width: 100%; box-sizing: border-box; padding: 0.6rem; margin-top: 0.3rem; border: none; border-radius: 6px; background: #45475a; color: #cdd6f4; }
        button { width: 100%; margin-top: 1.5rem; padding: 0.7rem; border: none; border-radius: 6px; background: #89b4fa; color: #1e1e2e; font-weight: 600; cursor: pointer; }
        .error { background: #f38ba8; color: #1e1e2e; padding: 0.6rem; border-radius: 6px; margin-bottom: 1rem; }
    </style>
</head>
<body>
    <form class="card" method="post" action="/">
        <h1>hostdeck</h1>
        <!-- ERROR -->
        <label for="username">Username</label>
        <input id="username" name="username" autocomplete="username" required>
        <label for="password">Password</label>
        <input id="password" name="password" type="password" autocomplete="current-password" required>
        <button type="submit">Log in</button>
    </form>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>hostdeck - Dashboard</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; background: #1e1e2e; color: #cdd6f4; margin: 0; padding: 2rem; }
        header { display: flex; justify-content: space-between; align-items: center; }
        a { color: #89b4fa; }
        .apps { display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 1rem; margin-top: 2rem; }
        .app { padding: 1.2rem; border: none; border-radius: 12px; background: #313244; color: #cdd6f4; font-size: 1rem; cursor: pointer; }
        .app:hover { background: #45475a; }
        #status { margin-top: 2rem; min-height: 1.5rem; }
        .ok { color: #a6e3a1; }
        .fail { color: #f38ba8; }
    </style>
</head>
<body>
    <header>
        <h1>Welcome, {{USER}}</h1>
        <a href="/logout">Log out</a>
    </header>
    <div class="apps">
{{APPS}}
    </div>
    <div id="status"></div>
    <script>
        async function openApp(name) {
            const status = document.getElementById('status');
            status.textContent = 'Opening ' + name + '...';
            status.className = '';
            try {
                const res = await fetch('/open-app', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ app_name: name }),
                });
                const data = await res.json();
                status.textContent = data.message;
                status.className = data.success ? 'ok' : 'fail';
            } catch (e) {
                status.textContent = 'Request failed: ' + e;
                status.className = 'fail';
            }
        }
    </script>
</body>
</html>
"#;

/// The login form, optionally with an error banner
pub fn login_page(error: Option<&str>) -> String {
    match error {
        Some(message) => LOGIN_HTML.replace(
            "<!-- ERROR -->",
            &format!(r#"<div class="error">{}</div>"#, escape_html(message)),
        ),
        None => LOGIN_HTML.to_string(),
    }
}

/// The dashboard for a logged-in user
pub fn dashboard_page(username: &str, registry: &AppRegistry) -> String {
    let apps: String = registry
        .entries()
        .map(|(name, target)| {
            format!(
                "        <button class=\"app\" onclick=\"openApp('{}')\">{}</button>\n",
                name,
                escape_html(target)
            )
        })
        .collect();

    DASHBOARD_HTML
        .replace("{{USER}}", &escape_html(username))
        .replace("{{APPS}}", apps.trim_end())
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
