//! Card rendering for classified posts

use sentilyze_core::Sentiment;
use std::fmt;

/// A post paired with its predicted sentiment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub text: String,
    pub sentiment: Sentiment,
}

impl Card {
    pub fn new(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            sentiment,
        }
    }

    /// Green for positive, red for everything else
    pub fn color(&self) -> &'static str {
        match self.sentiment {
            Sentiment::Positive => "green",
            _ => "red",
        }
    }

    /// HTML snippet suitable for embedding in a page
    pub fn to_html(&self) -> String {
        format!(
            r#"<div style="background-color: {color}; padding: 10px; border-radius: 5px; margin: 10px 0;">
    <h5 style="color: white;">{sentiment} Sentiment</h5>
    <p style="color: white;">{text}</p>
</div>"#,
            color = self.color(),
            sentiment = self.sentiment,
            text = escape_html(&self.text),
        )
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.sentiment {
            Sentiment::Positive => '+',
            Sentiment::Negative => '-',
            Sentiment::NoTextProvided => ' ',
        };
        writeln!(f, "[{}] {} Sentiment", marker, self.sentiment)?;
        for line in self.text.lines() {
            writeln!(f, "    {}", line)?;
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
