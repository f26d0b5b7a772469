// Server-rendered HTML pages

const GENDERS: [&str; 2] = ["female", "male"];
const ETHNICITIES: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
const EDUCATION_LEVELS: [&str; 6] = [
    "associate's degree",
    "bachelor's degree",
    "high school",
    "master's degree",
    "some college",
    "some high school",
];
const LUNCHES: [&str; 2] = ["free/reduced", "standard"];
const TEST_PREPARATION: [&str; 2] = ["none", "completed"];

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn select(name: &str, label: &str, options: &[&str]) -> String {
    let mut html = format!(
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\" required>\n<option value=\"\" disabled selected>Select {label}</option>\n"
    );
    for option in options {
        let value = escape_html(option);
        html.push_str(&format!("<option value=\"{value}\">{value}</option>\n"));
    }
    html.push_str("</select>\n");
    html
}

fn number(name: &str, label: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"0\" max=\"100\" step=\"any\" required>\n"
    )
}

pub fn index() -> String {
    layout(
        "Student Performance Indicator",
        "<h1>Student Performance Indicator</h1>\n<p>Predict a student's math score from their background and other exam scores.</p>\n<a href=\"/predictdata\">Make a prediction</a>",
    )
}

/// The prediction form, with the last result shown underneath when present.
pub fn prediction_form(result: Option<f64>) -> String {
    let mut body = String::from("<h1>Student Exam Performance Prediction</h1>\n<form action=\"/predictdata\" method=\"post\">\n");
    body.push_str(&select("gender", "Gender", &GENDERS));
    body.push_str(&select("ethnicity", "Race or Ethnicity", &ETHNICITIES));
    body.push_str(&select(
        "parental_level_of_education",
        "Parental Level of Education",
        &EDUCATION_LEVELS,
    ));
    body.push_str(&select("lunch", "Lunch Type", &LUNCHES));
    body.push_str(&select("test_preparation_course", "Test preparation Course", &TEST_PREPARATION));
    body.push_str(&number("reading_score", "Reading Score out of 100"));
    body.push_str(&number("writing_score", "Writing Score out of 100"));
    body.push_str("<input type=\"submit\" value=\"Predict your Maths Score\">\n</form>\n");
    if let Some(score) = result {
        body.push_str(&format!("<h2>The prediction is {score:.2}</h2>\n"));
    }
    layout("Student Exam Performance Prediction", &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    layout(
        title,
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/predictdata\">Back to the form</a>",
            escape_html(title),
            escape_html(message)
        ),
    )
}
