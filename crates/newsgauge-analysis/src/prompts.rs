//! Prompt templates for the language-model analyzer.

/// Cut `text` to at most `max_chars` characters, on a character boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Renders summaries as a numbered list so the model can refer to
/// "Article N" in its answer.
fn numbered(summaries: &[String]) -> String {
    summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| format!("Article {}: {}\n", i + 1, summary.trim()))
        .collect()
}

pub(crate) fn article_summary(title: &str, content: &str, char_limit: usize) -> String {
    let content = truncate_chars(content, char_limit);
    format!(
        "I will give you the title and the content of a news article. Summarize the entire \
         article so that every important point is explained. The summary must be 150-160 \
         words and give a clear understanding of the news. Return the summary alone, with \
         no extra content.\n\n\
         Title: {title}\n\n\
         Content: {content}"
    )
}

pub(crate) fn sentiment(text: &str) -> String {
    format!(
        "Read the following news article and return its sentiment as a single word: \
         Positive, Negative or Neutral. Do not return anything else.\n\n\
         Article: {text}"
    )
}

pub(crate) fn topics(text: &str) -> String {
    format!(
        "Read the following news article and identify the topics it discusses. Return them \
         as a JSON array of short strings, for example [\"Electric Vehicles\", \"Stock Market\", \
         \"Innovation\"]. The example only shows the format; use the topics from this \
         article. Return only the array.\n\n\
         Article: {text}"
    )
}

pub(crate) fn comparative(subject: &str, summaries: &[String]) -> String {
    format!(
        "Given the following news article summaries about {subject}, conduct a comparative \
         sentiment analysis. Analyze every summary before comparing them.\n\n\
         Articles:\n{articles}\n\
         Based on the articles:\n\
         - Identify key topics covered across multiple articles.\n\
         - Compare sentiment variations on the same topic (for example positive versus negative coverage).\n\
         - Describe the impact of the differing coverage on public perception.\n\n\
         Respond with JSON only, in this shape:\n\
         {{\n  \"Coverage Differences\": [\n    {{\n      \"Comparison\": \"Article 1 highlights a positive \
         business move, while Article 2 discusses regulatory challenges.\",\n      \"Impact\": \"The first \
         article boosts investor confidence, while the second raises concerns over legal issues.\"\n    }}\n  ]\n}}",
        articles = numbered(summaries),
    )
}

pub(crate) fn final_sentiment(summaries: &[String]) -> String {
    format!(
        "Below are summaries of recent news articles about one company. Give the final \
         sentiment analysis for that company with its reason, in one or two short sentences, \
         for example: \"Tesla's latest news coverage is mostly positive. Potential stock \
         growth expected.\" Do not return anything else.\n\n\
         Articles:\n{articles}",
        articles = numbered(summaries),
    )
}
