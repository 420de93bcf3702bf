//! Topic form handlers and the topic report view.

use askama::Template;
use axum::{
    extract::{Form, State},
    response::Html,
};
use serde::Deserialize;

use crate::charts::build_bar_chart;
use crate::errors::AppError;
use crate::models::Topic;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    topic: String,
}

#[derive(Template)]
#[template(path = "add_topic.html")]
struct AddTopicTemplate {
    message: String,
}

#[derive(Template)]
#[template(path = "delete_topic.html")]
struct DeleteTopicTemplate {
    message: String,
}

#[derive(Template)]
#[template(path = "topics.html")]
struct TopicsTemplate {
    topics: Vec<Topic>,
    chart_uri: String,
}

/// GET /addTopic/ - render the add-topic form.
pub async fn add_topic_form() -> Result<Html<String>, AppError> {
    super::render(&AddTopicTemplate {
        message: String::new(),
    })
}

/// POST /addTopic/ - insert the submitted topic.
///
/// A blank name never reaches the database; duplicates come back as an
/// inline message on the same form.
pub async fn add_topic_submit(
    State(state): State<AppState>,
    Form(form): Form<TopicForm>,
) -> Result<Html<String>, AppError> {
    let submitted = form.topic.trim();

    let message = if submitted.is_empty() {
        "No topic entered!".to_string()
    } else {
        match state.repo.insert_topic(submitted).await {
            Ok(topic) => {
                tracing::info!(topic = %topic.name, "topic added");
                format!("Added topic/concept '{}' to the topics table.", topic.name)
            }
            Err(AppError::Duplicate(message)) => message,
            Err(err) => return Err(err),
        }
    };

    super::render(&AddTopicTemplate { message })
}

/// GET /deleteTopic/ - render the delete-topic form.
pub async fn delete_topic_form() -> Result<Html<String>, AppError> {
    super::render(&DeleteTopicTemplate {
        message: String::new(),
    })
}

/// POST /deleteTopic/ - delete the submitted topic.
pub async fn delete_topic_submit(
    State(state): State<AppState>,
    Form(form): Form<TopicForm>,
) -> Result<Html<String>, AppError> {
    let submitted = form.topic.trim();

    let message = if submitted.is_empty() {
        "No topic entered!".to_string()
    } else {
        match state.repo.delete_topic(submitted).await {
            Ok(()) => {
                tracing::info!(topic = %submitted, "topic deleted");
                format!(
                    "Topic/concept '{}' has been deleted from the topics table.",
                    submitted.to_lowercase()
                )
            }
            Err(AppError::NotFound(message)) => message,
            Err(err) => return Err(err),
        }
    };

    super::render(&DeleteTopicTemplate { message })
}

/// GET /displayTopics/ - topic table plus usage chart.
pub async fn display_topics(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let topics = state.repo.list_topics().await?;

    let labels: Vec<String> = topics.iter().map(|t| t.name.clone()).collect();
    let values: Vec<i64> = topics.iter().map(|t| t.count).collect();
    let chart_uri = build_bar_chart(&labels, &values, "Topic", "Mentions", "Topics by usage")?;

    super::render(&TopicsTemplate { topics, chart_uri })
}
