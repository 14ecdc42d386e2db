use serenity::builder::{CreateAllowedMentions, CreateEmbed};
use thiserror::Error;

use super::giveaway::GiveawayError;

pub struct Response {
    pub content: Option<String>,
    pub embeds: Option<Vec<CreateEmbed>>,
    pub allowed_mentions: Option<CreateAllowedMentions>,
    pub ephemeral: bool,
}

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("{0}")]
    Serenity(#[from] serenity::Error),
    #[error("{0}")]
    Giveaway(#[from] GiveawayError),
    #[error("{0}")]
    Execution(&'static str, Option<String>),
}

pub type ResponseResult = Result<(), ResponseError>;

impl Response {
    pub fn new() -> Self {
        Response {
            content: None,
            embeds: None,
            allowed_mentions: None,
            ephemeral: false,
        }
    }

    pub fn content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds = Some(vec![embed]);
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    /// An ephemeral, mention-free plain text response.
    pub fn private(content: impl Into<String>) -> Self {
        Response::new()
            .content(content.into())
            .allowed_mentions(CreateAllowedMentions::new())
            .ephemeral(true)
    }

    pub fn allowed_mentions(mut self, allowed_mentions: CreateAllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }
}

impl Default for Response {
    fn default() -> Self {
        Response::new()
    }
}
