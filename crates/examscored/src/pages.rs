//! HTML pages: landing page and the prediction form

use examscore_common::{PredictionResult, FEATURES};
use std::fmt::Write;

/// What the form page shows below the inputs
#[derive(Debug)]
pub enum FormView<'a> {
    Blank,
    Prediction(&'a PredictionResult),
    Error(&'a str),
}

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.75rem}input{width:100%;padding:.4rem}\
.error{color:#b00020}.result{background:#eef6ee;padding:1rem;margin-top:1rem}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

/// Landing page, optionally annotated with an error
pub fn landing_page(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Student Exam Score Predictor</h1>\n");
    if let Some(message) = error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(message));
    }
    body.push_str(
        "<p>Estimate a student's exam performance from study habits and past results.</p>\n\
         <p><a href=\"/predict_datapoint\">Start a prediction</a></p>\n",
    );
    layout("Exam Score Predictor", &body)
}

/// Form page with the five inputs and an optional result or error
pub fn form_page(view: FormView<'_>) -> String {
    let mut body = String::from(
        "<h1>Predict Exam Score</h1>\n<form action=\"/predict_datapoint\" method=\"post\">\n",
    );

    for feature in FEATURES {
        let range = feature.range();
        let value = match view {
            FormView::Prediction(result) => echo(result.inputs.get(feature)),
            _ => String::new(),
        };
        let _ = writeln!(
            body,
            "<label for=\"{name}\">{label} ({min}-{max})</label>\n\
             <input type=\"number\" step=\"any\" id=\"{name}\" name=\"{name}\" \
             min=\"{min}\" max=\"{max}\" value=\"{value}\" required>",
            name = feature.field_name(),
            label = feature.label(),
            min = range.start(),
            max = range.end(),
        );
    }
    body.push_str("<p><button type=\"submit\">Predict</button></p>\n</form>\n");

    match view {
        FormView::Blank => {}
        FormView::Error(message) => {
            let _ = writeln!(body, "<p class=\"error\">{}</p>", escape(message));
        }
        FormView::Prediction(result) => {
            let _ = writeln!(
                body,
                "<div class=\"result\">\n<h2>Predicted Score: <span id=\"prediction\">{:.2}</span></h2>\n<ul>",
                result.score
            );
            for feature in FEATURES {
                let _ = writeln!(
                    body,
                    "<li>{}: {}</li>",
                    feature.label(),
                    echo(result.inputs.get(feature))
                );
            }
            body.push_str("</ul>\n</div>\n");
        }
    }

    layout("Predict Exam Score", &body)
}

/// Echoed inputs keep a fractional part, so 5 shows as 5.0
fn echo(value: f64) -> String {
    format!("{:?}", value)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
