//! Structured data markup (JSON-LD and microdata)

use std::collections::BTreeSet;

use scraper::Html;
use serde_json::Value;

use crate::dom;

/// Facts gathered from a page's structured data
#[derive(Debug, Default)]
pub(crate) struct SchemaMarkup {
    /// Distinct schema.org types, e.g. `Article`, `FAQPage`
    pub types: BTreeSet<String>,
    /// Number of `Question` entities
    pub question_count: usize,
    /// Named questions with their accepted answer text
    pub questions: Vec<(String, Option<String>)>,
    pub has_author: bool,
    pub has_date_published: bool,
    pub has_date_modified: bool,
}

impl SchemaMarkup {
    pub fn from_document(document: &Html) -> Self {
        let mut markup = SchemaMarkup::default();

        if let Some(selector) = dom::selector("script[type=\"application/ld+json\"]") {
            for script in document.select(&selector) {
                let raw = script.text().collect::<String>();
                match serde_json::from_str::<Value>(raw.trim()) {
                    Ok(value) => markup.visit(&value),
                    Err(e) => {
                        tracing::debug!(error = %e, "Skipping unparseable JSON-LD block");
                    }
                }
            }
        }

        if let Some(selector) = dom::selector("[itemtype]") {
            for element in document.select(&selector) {
                let Some(itemtype) = element.value().attr("itemtype") else {
                    continue;
                };
                for t in itemtype.split_whitespace() {
                    if let Some(name) = t.trim_end_matches('/').rsplit('/').next()
                        && !name.is_empty()
                    {
                        markup.add_type(name);
                    }
                }
            }
        }

        markup.has_author |= dom::count(document, "[itemprop=\"author\"]") > 0;
        markup.has_date_published |= dom::count(document, "[itemprop=\"datePublished\"]") > 0;
        markup.has_date_modified |= dom::count(document, "[itemprop=\"dateModified\"]") > 0;

        markup
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    fn add_type(&mut self, name: &str) {
        if name.eq_ignore_ascii_case("Question") {
            self.question_count += 1;
        }
        self.types.insert(name.to_string());
    }

    fn visit(&mut self, value: &Value) {
        match value {
            Value::Array(items) => items.iter().for_each(|v| self.visit(v)),
            Value::Object(map) => {
                match map.get("@type") {
                    Some(Value::String(t)) => self.add_type(t),
                    Some(Value::Array(ts)) => ts
                        .iter()
                        .filter_map(Value::as_str)
                        .for_each(|t| self.add_type(t)),
                    _ => {}
                }
                if is_question(map.get("@type"))
                    && let Some(name) = map.get("name").and_then(Value::as_str)
                {
                    let answer = map
                        .get("acceptedAnswer")
                        .and_then(|a| a.get("text"))
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    self.questions.push((name.trim().to_string(), answer));
                }
                self.has_author |= map.contains_key("author");
                self.has_date_published |= map.contains_key("datePublished");
                self.has_date_modified |= map.contains_key("dateModified");

                for (key, child) in map {
                    if key != "@type" && key != "@context" {
                        self.visit(child);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_question(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("Question"),
        Some(Value::Array(ts)) => ts
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("Question")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_ld_graph_and_nested_questions() {
        let html = r#"<html><head><script type="application/ld+json">
        {"@context":"https://schema.org","@graph":[
          {"@type":"Article","author":{"@type":"Person","name":"Jan Jansen"},"datePublished":"2025-01-02"},
          {"@type":"FAQPage","mainEntity":[
            {"@type":"Question","name":"What is it?","acceptedAnswer":{"@type":"Answer","text":"A thing."}},
            {"@type":"Question","name":"Why?","acceptedAnswer":{"@type":"Answer","text":"Because."}}
          ]}
        ]}
        </script></head><body></body></html>"#;
        let markup = SchemaMarkup::from_document(&Html::parse_document(html));

        assert!(markup.has_type("faqpage"));
        assert!(markup.has_type("Article"));
        assert_eq!(markup.question_count, 2);
        assert_eq!(markup.questions[0].0, "What is it?");
        assert_eq!(markup.questions[1].1.as_deref(), Some("Because."));
        assert!(markup.has_author);
        assert!(markup.has_date_published);
        assert!(!markup.has_date_modified);
        assert_eq!(markup.types.len(), 5); // Article, Person, FAQPage, Question, Answer
    }

    #[test]
    fn test_microdata_and_broken_json_ld() {
        let html = r#"<html><head><script type="application/ld+json">{ not json</script></head>
          <body><div itemscope itemtype="https://schema.org/Product"><span itemprop="author">X</span></div></body></html>"#;
        let markup = SchemaMarkup::from_document(&Html::parse_document(html));
        assert!(markup.has_type("Product"));
        assert!(markup.has_author);
        assert_eq!(markup.question_count, 0);
    }
}
