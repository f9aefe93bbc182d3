//! Prompt construction and post assembly.

use std::sync::Arc;

use askama::Template;
use serde_json::json;
use tracing::{debug, info};

use crate::application::services::selection_service::QualifiedVideo;
use crate::domain::entities::{ComposedPost, Niche};
use crate::domain::ports::ContentWriter;
use crate::error::AppError;

/// Header block placed above the generated body: source attribution plus
/// the embedded player.
#[derive(Template)]
#[template(path = "post_header.html")]
struct PostHeaderTemplate<'a> {
    video_title: &'a str,
    channel_title: &'a str,
    published_date: String,
    video_id: &'a str,
}

/// Service that turns a qualified video into a ready-to-publish post.
///
/// Builds the writing prompt from the niche and transcript, asks the
/// content writer for the body, and prepends the attribution header.
pub struct ComposerService<W: ContentWriter> {
    writer: Arc<W>,
    min_blog_length: usize,
}

impl<W: ContentWriter> ComposerService<W> {
    pub fn new(writer: Arc<W>, min_blog_length: usize) -> Self {
        Self {
            writer,
            min_blog_length,
        }
    }

    /// Composes the full post for a qualified video.
    ///
    /// # Errors
    ///
    /// Propagates writer failures and returns [`AppError::Vendor`] when the
    /// writer produces an empty body.
    pub async fn compose(
        &self,
        niche: &Niche,
        qualified: &QualifiedVideo,
    ) -> Result<ComposedPost, AppError> {
        let prompt = self.build_prompt(niche, qualified);
        debug!(
            video_id = %qualified.video.video_id,
            prompt_chars = prompt.len(),
            "Requesting post body"
        );

        let body = self.writer.write_post(&prompt).await?;
        if body.trim().is_empty() {
            return Err(AppError::vendor(
                "Content writer returned an empty body",
                json!({ "video_id": qualified.video.video_id }),
            ));
        }

        let header = PostHeaderTemplate {
            video_title: &qualified.video.title,
            channel_title: &qualified.video.channel_title,
            published_date: qualified.video.published_date(),
            video_id: &qualified.video.video_id,
        }
        .render()
        .map_err(|e| {
            AppError::internal("Failed to render post header", json!({ "error": e.to_string() }))
        })?;

        let title = format!(
            "{} — Key Insights & Takeaways ({})",
            qualified.video.title,
            niche.display_name()
        );

        info!(
            video_id = %qualified.video.video_id,
            title = %title,
            body_chars = body.len(),
            "Composed post"
        );

        Ok(ComposedPost {
            title,
            html: format!("{}\n{}", header, body.trim()),
            video_id: qualified.video.video_id.clone(),
        })
    }

    /// Builds the writing prompt from niche data, video metadata, and the
    /// transcript.
    fn build_prompt(&self, niche: &Niche, qualified: &QualifiedVideo) -> String {
        let mut prompt = String::with_capacity(qualified.transcript.text.len() + 2048);

        prompt.push_str(&format!(
            "You are an experienced blogger writing for a {} audience.\n\
             Rewrite the following YouTube video transcript as an original, \
             engaging blog post in clean HTML (use <h2>, <h3>, <p>, <ul> tags, \
             no <html> or <body> wrapper).\n\n",
            niche.display_name()
        ));
        prompt.push_str(&format!(
            "Requirements:\n\
             - At least {} words.\n\
             - Do not mention that the content comes from a video or transcript.\n\
             - Keep the tone practical and conversational.\n\
             - End with a short conclusion section.\n",
            self.min_blog_length
        ));

        if !niche.offers.is_empty() {
            prompt.push_str(
                "\nWeave in at most one natural recommendation for one of these products, \
                 with its link as an HTML anchor:\n",
            );
            for offer in &niche.offers {
                prompt.push_str(&format!("- {}: {}\n", offer.name, offer.url));
            }
        }

        if !niche.soft_ctas.is_empty() {
            prompt.push_str("\nYou may close with one of these soft calls to action:\n");
            for cta in &niche.soft_ctas {
                prompt.push_str(&format!("- {}\n", cta));
            }
        }

        prompt.push_str(&format!(
            "\nVideo title: {}\nChannel: {}\nPublished: {}\n\nTranscript:\n{}\n",
            qualified.video.title,
            qualified.video.channel_title,
            qualified.video.published_date(),
            qualified.transcript.text
        ));

        prompt
    }
}
