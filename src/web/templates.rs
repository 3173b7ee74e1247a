//! HTML pages
//!
//! Small hand-written pages; every interpolated value is entity-encoded,
//! as element text or as a double-quoted attribute.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::domain::buggy::BuggyRecord;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} | Buggy Race Editor</title>
</head>
<body>
  <nav><a href="/">Home</a> | <a href="/new">Edit buggy</a> | <a href="/buggy">Show buggy</a> | <a href="/json">JSON</a> | <a href="/info">Info</a></nav>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = encode_text(title),
    )
}

pub fn home(server_url: &str) -> String {
    let href = encode_double_quoted_attribute(server_url);
    let url = encode_text(server_url);
    layout(
        "Home",
        &format!(
            r#"    <h1>Buggy Race Editor</h1>
    <p>Configure your buggy, then enter it on the <a href="{href}">race server</a> at {url}.</p>"#
        ),
    )
}

pub fn info() -> String {
    layout(
        "Info",
        r#"    <h1>About the editor</h1>
    <p>The editor keeps a single buggy. Component costs come from the race server's
    specifications page each time the buggy is saved; if that page cannot be reached
    the buggy is not saved.</p>
    <p>The <a href="/json">JSON view</a> is what the race server reads.</p>"#,
    )
}

fn text_field(out: &mut String, name: &str, label: &str, value: &str) {
    let _ = writeln!(
        out,
        r#"      <p><label for="{name}">{label}</label> <input type="text" id="{name}" name="{name}" value="{value}"></p>"#,
        value = encode_double_quoted_attribute(value),
    );
}

/// The buggy form, pre-filled when a record is given
pub fn buggy_form(buggy: Option<&BuggyRecord>) -> String {
    let value = |get: fn(&BuggyRecord) -> String| buggy.map(get).unwrap_or_default();

    let mut fields = String::new();
    text_field(&mut fields, "qty_wheels", "Number of wheels", &value(|b| b.spec.qty_wheels.to_string()));
    text_field(&mut fields, "power_type", "Power type", &value(|b| b.spec.power_type.clone()));
    text_field(&mut fields, "power_units", "Power units", &value(|b| b.spec.power_units.to_string()));
    text_field(&mut fields, "tyres", "Tyres", &value(|b| b.spec.tyres.clone()));
    text_field(&mut fields, "qty_tyres", "Number of tyres", &value(|b| b.spec.qty_tyres.to_string()));
    text_field(&mut fields, "flag_color", "Flag colour", &value(|b| b.spec.flag_color.clone()));
    text_field(
        &mut fields,
        "flag_color_secondary",
        "Secondary flag colour",
        &value(|b| b.spec.flag_color_secondary.clone()),
    );
    text_field(&mut fields, "flag_pattern", "Flag pattern", &value(|b| b.spec.flag_pattern.clone()));
    text_field(&mut fields, "armour", "Armour", &value(|b| b.spec.armour.clone()));
    text_field(&mut fields, "attack", "Attack", &value(|b| b.spec.attack.clone()));

    layout(
        "Edit buggy",
        &format!(
            r#"    <h1>Edit buggy</h1>
    <form action="/new" method="post">
{fields}      <p><button type="submit">Save buggy</button></p>
    </form>"#
        ),
    )
}

pub fn buggy(buggy: &BuggyRecord) -> String {
    let spec = &buggy.spec;
    let rows = [
        ("Wheels", spec.qty_wheels.to_string()),
        ("Power", format!("{} × {}", spec.power_units, spec.power_type)),
        ("Tyres", format!("{} × {}", spec.qty_tyres, spec.tyres)),
        (
            "Flag",
            format!("{} / {} ({})", spec.flag_color, spec.flag_color_secondary, spec.flag_pattern),
        ),
        ("Armour", spec.armour.clone()),
        ("Attack", spec.attack.clone()),
        ("Total cost", buggy.total_cost.to_string()),
    ];

    let mut table = String::new();
    for (label, value) in rows {
        let _ = writeln!(table, "      <tr><th>{label}</th><td>{}</td></tr>", encode_text(&value));
    }

    layout(
        "Your buggy",
        &format!("    <h1>Your buggy</h1>\n    <table>\n{table}    </table>"),
    )
}

/// Result page after a submission: a message, a violation, or both
pub fn updated(msg: Option<&str>, violation: Option<&str>) -> String {
    let mut body = String::from("    <h1>Buggy update</h1>\n");
    if let Some(violation) = violation {
        let _ = writeln!(body, r#"    <p class="violation">{}</p>"#, encode_text(violation));
        body.push_str("    <p><a href=\"/new\">Back to the form</a></p>\n");
    }
    if let Some(msg) = msg {
        let _ = writeln!(body, r#"    <p class="msg">{}</p>"#, encode_text(msg));
    }
    layout("Buggy update", &body)
}

pub fn error(message: &str) -> String {
    layout(
        "Error",
        &format!("    <h1>Something went wrong</h1>\n    <p>{}</p>", encode_text(message)),
    )
}
