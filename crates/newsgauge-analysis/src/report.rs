//! Final report assembly.

use newsgauge_core::{
    Article, ComparativeScore, CoverageDifference, FinalReport, ReportedArticle,
    SentimentDistribution, Subject, TopicOverlap,
};

/// Build the public report for `subject`.
///
/// Articles are copied without their URL and content; the caller's
/// articles are left untouched.
#[must_use]
pub fn assemble(
    subject: &Subject,
    articles: &[Article],
    distribution: SentimentDistribution,
    coverage_differences: Vec<CoverageDifference>,
    overlap: TopicOverlap,
    final_sentiment: String,
) -> FinalReport {
    FinalReport {
        company: subject.as_str().to_owned(),
        articles: articles.iter().map(ReportedArticle::from).collect(),
        comparative_sentiment_score: ComparativeScore {
            sentiment_distribution: distribution,
            coverage_differences,
            topic_overlap: overlap,
            final_sentiment,
        },
    }
}

/// [`assemble`] from an already computed [`ComparativeScore`].
#[must_use]
pub fn assemble_scored(subject: &Subject, articles: &[Article], score: ComparativeScore) -> FinalReport {
    let ComparativeScore {
        sentiment_distribution,
        coverage_differences,
        topic_overlap,
        final_sentiment,
    } = score;
    assemble(
        subject,
        articles,
        sentiment_distribution,
        coverage_differences,
        topic_overlap,
        final_sentiment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsgauge_core::Sentiment;
    use serde_json::json;

    fn subject() -> Subject {
        Subject::new("Tesla").unwrap()
    }

    fn enriched(title: &str) -> Article {
        Article::new(title, format!("https://news.example/{title}"), "secret body text")
            .with_summary(format!("{title} summary"))
            .with_sentiment(Sentiment::Positive)
            .with_topics(["EV"])
    }

    #[test]
    fn report_strips_url_and_content_from_every_article() {
        let articles = vec![enriched("a"), enriched("b"), enriched("c")];
        let report = assemble(
            &subject(),
            &articles,
            SentimentDistribution::default(),
            Vec::new(),
            TopicOverlap::default(),
            String::new(),
        );

        let value = serde_json::to_value(&report).unwrap();
        let reported = value["Articles"].as_array().unwrap();
        assert_eq!(reported.len(), 3);
        for article in reported {
            let obj = article.as_object().unwrap();
            assert!(!obj.contains_key("URL"));
            assert!(!obj.contains_key("Content"));
            assert!(obj.contains_key("Title"));
        }
        assert!(!value.to_string().contains("secret body text"));
    }

    #[test]
    fn caller_articles_are_not_modified() {
        let articles = vec![enriched("a")];
        let before = articles.clone();
        let _ = assemble(
            &subject(),
            &articles,
            SentimentDistribution::default(),
            Vec::new(),
            TopicOverlap::default(),
            String::new(),
        );
        assert_eq!(articles, before);
        assert_eq!(articles[0].url, "https://news.example/a");
    }

    #[test]
    fn empty_article_set_still_produces_a_report() {
        let report = assemble(
            &subject(),
            &[],
            SentimentDistribution::default(),
            Vec::new(),
            TopicOverlap::default(),
            "No coverage.".to_owned(),
        );
        assert!(report.articles.is_empty());
        assert_eq!(report.company, "Tesla");
    }

    #[test]
    fn wire_format_matches_report_consumers() {
        let articles = vec![enriched("a")];
        let report = assemble_scored(
            &subject(),
            &articles,
            ComparativeScore {
                sentiment_distribution: SentimentDistribution {
                    positive: 1,
                    negative: 0,
                    neutral: 0,
                },
                coverage_differences: vec![CoverageDifference {
                    comparison: "Only one article".to_owned(),
                    impact: "Limited".to_owned(),
                }],
                topic_overlap: TopicOverlap {
                    common_topics: vec![],
                    unique_topics: vec![vec!["EV".to_owned()]],
                },
                final_sentiment: "Positive overall.".to_owned(),
            },
        );

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "Company": "Tesla",
                "Articles": [{
                    "Title": "a",
                    "Summary": "a summary",
                    "Sentiment": "Positive",
                    "Topics": ["EV"]
                }],
                "Comparative Sentiment Score": {
                    "Sentiment Distribution": { "Positive": 1, "Negative": 0, "Neutral": 0 },
                    "Coverage Differences": [
                        { "Comparison": "Only one article", "Impact": "Limited" }
                    ],
                    "Topic Overlap": {
                        "Common Topics": [],
                        "Unique Topics in Article 1": ["EV"]
                    },
                    "Final Sentiment": "Positive overall."
                }
            })
        );
    }
}
