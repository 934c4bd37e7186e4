//! Human-readable output for the samvaad binary.

use std::collections::HashMap;

use samvaad_core::document::{KeywordStat, ReviewDetails};
use samvaad_core::{Draft, Review, Sentiment, SentimentSummary, TrendPoint};

pub fn print_drafts(drafts: &[Draft]) {
    if drafts.is_empty() {
        println!("no drafts");
        return;
    }
    for draft in drafts {
        println!("{:>4}  {}  {}", draft.id, draft.date, draft.title);
        if !draft.description.is_empty() {
            println!("      {}", draft.description);
        }
    }
}

pub fn print_draft(draft: &Draft, summary: &SentimentSummary) {
    println!("=== {} ===", draft.title);
    println!("created: {}", draft.date);
    if !draft.description.is_empty() {
        println!("{}", draft.description);
    }
    println!();
    print_summary(summary);
}

pub fn print_summary(summary: &SentimentSummary) {
    println!("total reviews: {}", summary.total());
    for sentiment in Sentiment::ALL {
        let slice = summary.slice(sentiment);
        println!(
            "{:>10}: {:>4}  ({:>3}%)",
            sentiment, slice.count, slice.percentage
        );
    }
}

pub fn print_trend(series: &[TrendPoint]) {
    if series.is_empty() {
        println!("no reviews yet");
        return;
    }
    println!(
        "{:<12} {:>8} {:>8} {:>10}",
        "day", "positive", "negative", "suggestive"
    );
    for point in series {
        println!(
            "{:<12} {:>8} {:>8} {:>10}",
            point.day, point.positive, point.negative, point.suggestive
        );
    }
}

pub fn print_reviews(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("no reviews yet");
        return;
    }
    for review in reviews {
        println!(
            "{:>4}  {}  {:>10}  {:>5.0}  {}",
            review.id,
            review.date.format("%Y-%m-%d %H:%M"),
            review.sentiment,
            review.score,
            review.title
        );
    }
}

pub fn print_keywords(frequencies: &HashMap<String, KeywordStat>) {
    if frequencies.is_empty() {
        println!("no keywords");
        return;
    }
    // Most frequent first; ties break alphabetically.
    let mut sorted: Vec<_> = frequencies.iter().collect();
    sorted.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
    for (word, stat) in sorted {
        println!("{:>6}  {}", stat.count, word);
    }
}

pub fn print_review_details(review: &Review, details: &ReviewDetails) {
    println!("=== {} ===", review.title);
    println!("sentiment: {}  score: {}", review.sentiment, review.score);
    println!("overall score: {}", details.overall_score);
    println!();
    for comment in &details.comments {
        println!("[{:>3.0}] {}", comment.score, comment.text);
    }
}
