//! HTML rendering for result and error pages

use std::fmt::Write;

use crate::models::{GuidelineResult, Itinerary, TravelPreferences, TripPlan};

/// Escape text for use in HTML element content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap `body` in the shared page layout
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header><a href="/">Nepal Itinerary Planner</a></header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn render_itinerary(out: &mut String, itinerary: &Itinerary) {
    out.push_str("    <section class=\"itinerary\">\n      <h2>Your Itinerary</h2>\n");
    if itinerary.is_empty() {
        out.push_str(
            "      <p class=\"unavailable\">The itinerary could not be generated this time. Please try again.</p>\n",
        );
    } else {
        out.push_str("      <ol class=\"days\">\n");
        for day in &itinerary.days {
            let _ = writeln!(
                out,
                "        <li><h3>{}</h3><p>{}</p></li>",
                escape_html(&day.title),
                escape_html(&day.description)
            );
        }
        out.push_str("      </ol>\n");
    }
    out.push_str("    </section>\n");
}

fn render_guidelines(out: &mut String, guidelines: &GuidelineResult) {
    out.push_str("    <section class=\"guidelines\">\n      <h2>Guidelines for Your Visit</h2>\n");
    if !guidelines.has_content() {
        out.push_str(
            "      <p class=\"unavailable\">Travel guidelines are unavailable right now.</p>\n",
        );
        out.push_str("    </section>\n");
        return;
    }

    if !guidelines.guidelines.is_empty() {
        out.push_str("      <h3>Basic Guidelines</h3>\n      <ul>\n");
        for item in &guidelines.guidelines {
            let _ = writeln!(out, "        <li>{}</li>", escape_html(item));
        }
        out.push_str("      </ul>\n");
    }

    if !guidelines.emergency_contacts.is_empty() {
        out.push_str("      <h3>Emergency Contacts</h3>\n      <table class=\"contacts\">\n");
        for (organisation, contact) in &guidelines.emergency_contacts {
            let _ = writeln!(
                out,
                "        <tr><th>{}</th><td>{}</td></tr>",
                escape_html(organisation),
                escape_html(contact)
            );
        }
        out.push_str("      </table>\n");
    }

    if !guidelines.other.is_empty() {
        out.push_str("      <h3>More Advice</h3>\n      <dl class=\"advice\">\n");
        for (heading, text) in &guidelines.other {
            let _ = writeln!(
                out,
                "        <dt>{}</dt><dd>{}</dd>",
                escape_html(heading),
                escape_html(text)
            );
        }
        out.push_str("      </dl>\n");
    }
    out.push_str("    </section>\n");
}

/// Result page for a generated trip plan
#[must_use]
pub fn itinerary_page(prefs: &TravelPreferences, plan: &TripPlan) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "    <h1>Namaste, {}!</h1>\n    <p class=\"summary\">{} days, {} to {}, {} traveller(s)</p>",
        escape_html(&prefs.full_name),
        prefs.duration_of_visit,
        escape_html(&prefs.from_month),
        escape_html(&prefs.to_month),
        prefs.number_of_people_travelling
    );
    render_itinerary(&mut body, &plan.itinerary);
    render_guidelines(&mut body, &plan.guidelines);
    body.push_str("    <p><a href=\"/itinerary/create\">Plan another trip</a></p>");
    layout("Your Nepal Itinerary", &body)
}

/// Page shown when a request cannot be served
#[must_use]
pub fn error_page(heading: &str, message: &str) -> String {
    let body = format!(
        "    <h1>{}</h1>\n    <p class=\"error\">{}</p>\n    <p><a href=\"/itinerary/create\">Back to the form</a></p>",
        escape_html(heading),
        escape_html(message)
    );
    layout(heading, &body)
}
