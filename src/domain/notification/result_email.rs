//! Result email composed after a response is stored.

use crate::domain::response::Response;
use crate::domain::scoring::first_matching_range;
use crate::domain::survey::{ScoreRange, Survey};

/// A result email ready to hand to a mailer.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    /// Survey-level range the total fell into, first match wins.
    pub matched_range: Option<ScoreRange>,
}

impl ResultEmail {
    /// Plans the email for a response, or `None` when nothing should be sent.
    ///
    /// Nothing is sent when email is disabled on the survey or the respondent
    /// gave no `email` identification value.
    pub fn plan(survey: &Survey, response: &Response) -> Option<Self> {
        let config = survey.email_config();
        if !config.enabled {
            return None;
        }
        let to = response.email()?.trim().to_string();

        let matched_range =
            first_matching_range(response.total_score(), &survey.result_config().ranges).cloned();
        let subject = if config.subject.trim().is_empty() {
            default_subject(survey.title())
        } else {
            config.subject.clone()
        };
        let html = render_html(survey, response, matched_range.as_ref());

        Some(Self {
            to,
            subject,
            html,
            matched_range,
        })
    }
}

/// Subject used when the survey does not configure one.
pub fn default_subject(title: &str) -> String {
    format!("Your results for \"{}\"", title)
}

fn render_html(survey: &Survey, response: &Response, range: Option<&ScoreRange>) -> String {
    let title = escape_html(survey.title());
    let config = survey.email_config();

    let body = if config.body_html.trim().is_empty() {
        format!("<p>Thank you for completing <strong>{}</strong>!</p>", title)
    } else {
        config.body_html.clone()
    };

    let score = if survey.result_config().show_score {
        format!(
            "<div style=\"text-align:center;margin:24px 0;\">\
             <p style=\"color:#6b7280;font-size:13px;text-transform:uppercase;margin:0 0 4px\">Your Score</p>\
             <p style=\"color:#f97316;font-size:48px;font-weight:900;margin:0;line-height:1\">{}</p>\
             </div>",
            response.total_score()
        )
    } else {
        String::new()
    };

    let range_html = range
        .map(|range| {
            let image = range
                .image_url
                .as_deref()
                .map(|url| {
                    format!(
                        "<img src=\"{}\" alt=\"Result\" style=\"width:100%;max-height:200px;object-fit:cover;border-radius:8px;margin-bottom:16px\"/>",
                        escape_html(url)
                    )
                })
                .unwrap_or_default();
            let message = if range.message.is_empty() {
                String::new()
            } else {
                format!(
                    "<p style=\"text-align:center;color:#374151\">{}</p>",
                    escape_html(&range.message)
                )
            };
            format!("{}{}", image, message)
        })
        .unwrap_or_default();

    let attachment = config
        .image_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| {
            format!(
                "<div style=\"text-align:center;margin-top:24px\"><img src=\"{}\" alt=\"Attachment\" style=\"max-width:100%;border-radius:8px\"/></div>",
                escape_html(url)
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"/></head>\n\
         <body style=\"font-family:sans-serif;max-width:480px;margin:0 auto;padding:24px;background:#f9fafb;\">\n\
         <div style=\"background:white;border-radius:12px;padding:32px\">\n\
         <h2 style=\"color:#111827;text-align:center\">{}</h2>\n{}\n{}\n{}\n{}\n</div>\n</body>\n</html>",
        title, body, score, range_html, attachment
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
