//! Server-rendered HTML pages.

use axum::response::Html;

use crate::auth::{Flash, UserSession};
use crate::models::{StoredPrediction, UserProfile};

/// Per-request data shared by every page.
pub struct PageContext<'a> {
    pub user: Option<&'a UserSession>,
    pub flash: Option<&'a Flash>,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, ctx: &PageContext<'_>, body: &str) -> Html<String> {
    let nav_account = match ctx.user {
        Some(user) => format!(
            r#"<a href="/profile">{}</a> <a href="/logout">Logout</a>"#,
            escape(&user.username)
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    let flash = ctx
        .flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}">{}</div>"#,
                f.level.as_str(),
                escape(&f.message)
            )
        })
        .unwrap_or_default();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | CardioPredict</title>
</head>
<body>
<nav>
<a href="/home">Home</a> <a href="/index">Predict</a> <a href="/chatbot">Assistant</a> <a href="/todo">Daily Plan</a> <a href="/about">About</a>
{nav_account}
</nav>
{flash}
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

fn inline_error(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default()
}

pub fn home(ctx: &PageContext<'_>) -> Html<String> {
    let greeting = ctx
        .user
        .map(|u| format!("<p>Welcome, {}.</p>", escape(&u.username)))
        .unwrap_or_default();
    layout(
        "Home",
        ctx,
        &format!(
            r#"<h1>CardioPredict</h1>
{greeting}
<p>Enter your clinical measurements to get a heart disease prediction, an explanation of the result, precautions and a diet plan.</p>
<p><a href="/index">Start a prediction</a></p>"#
        ),
    )
}

pub fn about(ctx: &PageContext<'_>) -> Html<String> {
    layout(
        "About",
        ctx,
        r#"<h1>About CardioPredict</h1>
<p>CardioPredict classifies 13 clinical measurements into one of six categories: No Disease, Angina, Arrhythmia, Heart Failure, Myocardial Infarction or General Heart Disease.</p>
<p>Explanations, precautions and diet plans are generated by a language model. They are informational only and are not a substitute for a consultation with a cardiologist.</p>"#,
    )
}

pub fn todo(ctx: &PageContext<'_>) -> Html<String> {
    const TASKS: [&str; 6] = [
        "Take prescribed medication on time",
        "Walk or exercise for 30 minutes",
        "Check blood pressure",
        "Keep sodium intake under 2,300 mg",
        "Drink enough water",
        "Sleep 7-8 hours",
    ];
    let items: String = TASKS
        .iter()
        .enumerate()
        .map(|(i, task)| {
            format!(
                r#"<li><label><input type="checkbox" id="task-{i}"> {}</label></li>"#,
                escape(task)
            )
        })
        .collect();
    layout(
        "Daily Plan",
        ctx,
        &format!("<h1>Heart-healthy daily plan</h1>\n<ul>{items}</ul>"),
    )
}

pub fn login(ctx: &PageContext<'_>, error: Option<&str>) -> Html<String> {
    layout(
        "Login",
        ctx,
        &format!(
            r#"<h1>Login</h1>
{}
<form method="post" action="/login">
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Login</button>
</form>
<p><a href="/forgot_password">Forgot password?</a> | <a href="/register">Create an account</a></p>"#,
            inline_error(error)
        ),
    )
}

pub fn register(ctx: &PageContext<'_>, error: Option<&str>) -> Html<String> {
    layout(
        "Register",
        ctx,
        &format!(
            r#"<h1>Register</h1>
{}
<form method="post" action="/register">
<label>Username <input type="text" name="username"></label>
<label>Email <input type="email" name="email" required></label>
<label>Password <input type="password" name="password" minlength="6" required></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Login</a></p>"#,
            inline_error(error)
        ),
    )
}

pub fn forgot_password(ctx: &PageContext<'_>) -> Html<String> {
    layout(
        "Forgot Password",
        ctx,
        r#"<h1>Reset your password</h1>
<form method="post" action="/forgot_password">
<label>Email <input type="email" name="email" required></label>
<button type="submit">Send reset email</button>
</form>"#,
    )
}

const FORM_FIELDS: [(&str, &str, &str); 13] = [
    ("age", "Age (years)", "1"),
    ("sex", "Sex (1 = male, 0 = female)", "1"),
    ("cp", "Chest pain type (0-3)", "1"),
    ("trestbps", "Resting blood pressure (mmHg)", "any"),
    ("chol", "Serum cholesterol (mg/dL)", "any"),
    ("fbs", "Fasting blood sugar > 120 mg/dL (1 = yes, 0 = no)", "1"),
    ("restecg", "Resting ECG result (0-2)", "1"),
    ("thalach", "Maximum heart rate achieved", "any"),
    ("exang", "Exercise-induced angina (1 = yes, 0 = no)", "1"),
    ("oldpeak", "ST depression (oldpeak)", "any"),
    ("slope", "Slope of peak exercise ST segment (0-2)", "1"),
    ("ca", "Major vessels colored by fluoroscopy (0-3)", "any"),
    ("thal", "Thalassemia code", "1"),
];

pub fn prediction_form(ctx: &PageContext<'_>, error: Option<&str>) -> Html<String> {
    let inputs: String = FORM_FIELDS
        .iter()
        .map(|(name, label, step)| {
            format!(
                r#"<label>{} <input type="number" name="{name}" step="{step}" required></label>
"#,
                escape(label)
            )
        })
        .collect();
    let error = inline_error(error);
    layout(
        "Predict",
        ctx,
        &format!(
            r#"<h1>Heart disease prediction</h1>
{error}
<form method="post" action="/index">
{inputs}<button type="submit">Predict</button>
</form>"#
        ),
    )
}

/// Result page. `reason` is either the generated explanation or an error line.
pub fn result(
    ctx: &PageContext<'_>,
    prediction: &str,
    reason: &str,
    health_data: &[(String, String)],
) -> Html<String> {
    let rows: String = health_data
        .iter()
        .map(|(name, value)| format!("<tr><th>{}</th><td>{}</td></tr>", escape(name), escape(value)))
        .collect();
    let user_data: serde_json::Map<String, serde_json::Value> = health_data
        .iter()
        .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
        .collect();
    let request_json = serde_json::json!({ "prediction": prediction, "user_data": user_data });

    layout(
        "Result",
        ctx,
        &format!(
            r#"<h1>Prediction: {prediction_html}</h1>
<section><h2>Why this prediction</h2><div id="reason" style="white-space: pre-wrap">{reason_html}</div></section>
<section><h2>Your data</h2><table>{rows}</table></section>
<section>
<h2>Precautions</h2><button id="precautions-btn">Show precautions</button>
<div id="precautions" style="white-space: pre-wrap"></div>
</section>
<section>
<h2>Diet plan</h2>
<label>Other health issues <input type="text" id="health-issue"></label>
<button id="diet-btn">Generate diet plan</button>
<div id="diet" style="white-space: pre-wrap"></div>
</section>
<script>
const context = {context};
async function post(url, body) {{
  const res = await fetch(url, {{ method: "POST", headers: {{ "Content-Type": "application/json" }}, body: JSON.stringify(body) }});
  return res.json();
}}
document.getElementById("precautions-btn").onclick = async () => {{
  const data = await post("/get_precautions", {{ prediction: context.prediction, user_data: context.user_data }});
  document.getElementById("precautions").textContent = data.precautions;
}};
document.getElementById("diet-btn").onclick = async () => {{
  const data = await post("/generate_diet", {{ reason: document.getElementById("reason").textContent, health_issue: document.getElementById("health-issue").value }});
  document.getElementById("diet").textContent = data.diet_plan;
}};
</script>"#,
            prediction_html = escape(prediction),
            reason_html = escape(reason),
            context = script_json(&request_json),
        ),
    )
}

pub fn profile(
    ctx: &PageContext<'_>,
    profile: &UserProfile,
    history: &[StoredPrediction],
    error: Option<&str>,
) -> Html<String> {
    let history_html = if history.is_empty() {
        "<p>No predictions saved yet.</p>".to_string()
    } else {
        let rows: String = history
            .iter()
            .map(|entry| {
                let data = &entry.record.data;
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape(entry.record.prediction.label()),
                    data.age,
                    data.trestbps,
                    data.chol,
                    data.thalach
                )
            })
            .collect();
        format!(
            "<table><tr><th>Prediction</th><th>Age</th><th>Resting BP</th><th>Cholesterol</th><th>Max HR</th></tr>{rows}</table>"
        )
    };

    layout(
        "Profile",
        ctx,
        &format!(
            r#"<h1>Your profile</h1>
{}
<p>Username: {}</p>
<p>Email: {}</p>
<h2>Prediction history</h2>
{}"#,
            inline_error(error),
            escape(&profile.username),
            escape(&profile.email),
            history_html
        ),
    )
}

pub fn chatbot(ctx: &PageContext<'_>) -> Html<String> {
    layout(
        "Assistant",
        ctx,
        r#"<h1>Heart health assistant</h1>
<div id="log"></div>
<form id="chat-form">
<input type="text" id="message" autocomplete="off" placeholder="Ask about heart health, precautions or diet">
<button type="submit">Send</button>
</form>
<script>
document.getElementById("chat-form").onsubmit = async (event) => {
  event.preventDefault();
  const input = document.getElementById("message");
  const log = document.getElementById("log");
  const you = document.createElement("p");
  you.textContent = "You: " + input.value;
  log.appendChild(you);
  const res = await fetch("/chatbot", { method: "POST", headers: { "Content-Type": "application/json" }, body: JSON.stringify({ message: input.value }) });
  const data = await res.json();
  const bot = document.createElement("p");
  bot.style.whiteSpace = "pre-wrap";
  bot.textContent = "Assistant: " + data.reply;
  log.appendChild(bot);
  input.value = "";
};
</script>"#,
    )
}

/// JSON safe to embed inside a `<script>` element.
fn script_json(value: &serde_json::Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
