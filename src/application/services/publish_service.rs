//! Publishing composed posts and notifying by email.

use std::sync::Arc;

use askama::Template;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::entities::{ComposedPost, PublishedPost};
use crate::domain::ports::{BlogPublisher, Mailer};
use crate::error::AppError;

#[derive(Template)]
#[template(path = "notification_email.html")]
struct NotificationEmailTemplate<'a> {
    title: &'a str,
    post_id: &'a str,
    video_id: &'a str,
    niche: &'a str,
}

/// Service that pushes a composed post to the blog and sends the
/// notification email.
///
/// Publishing is the fatal step; a failed notification only logs a warning
/// because the post is already live.
pub struct PublishService<B: BlogPublisher, M: Mailer> {
    publisher: Arc<B>,
    mailer: Arc<M>,
    notify_email: Option<String>,
}

impl<B: BlogPublisher, M: Mailer> PublishService<B, M> {
    pub fn new(publisher: Arc<B>, mailer: Arc<M>, notify_email: Option<String>) -> Self {
        Self {
            publisher,
            mailer,
            notify_email,
        }
    }

    /// Publishes the post and, when configured, emails the notification.
    ///
    /// # Errors
    ///
    /// Propagates publisher failures. Notification failures are swallowed
    /// after logging.
    pub async fn publish(
        &self,
        post: &ComposedPost,
        niche_key: &str,
    ) -> Result<PublishedPost, AppError> {
        let post_id = self.publisher.publish(&post.title, &post.html).await?;
        metrics::counter!("posts_published_total", "niche" => niche_key.to_string())
            .increment(1);
        info!(post_id = %post_id, title = %post.title, "Post published");

        let published = PublishedPost {
            post_id,
            title: post.title.clone(),
            video_id: post.video_id.clone(),
            published_at: Utc::now(),
        };

        if let Some(to) = &self.notify_email {
            self.notify(to, &published, niche_key).await;
        }

        Ok(published)
    }

    async fn notify(&self, to: &str, published: &PublishedPost, niche_key: &str) {
        let body = match (NotificationEmailTemplate {
            title: &published.title,
            post_id: &published.post_id,
            video_id: &published.video_id,
            niche: niche_key,
        })
        .render()
        {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to render notification email");
                return;
            }
        };

        let subject = format!("New post published: {}", published.title);
        match self.mailer.send_html(to, &subject, &body).await {
            Ok(()) => info!(to = %to, "Notification email sent"),
            Err(e) => {
                warn!(to = %to, error = %e, "Notification email failed");
            }
        }
    }
}
