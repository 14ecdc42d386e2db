use std::sync::Arc;

use serenity::{
    all::{ChannelId, MessageId},
    builder::{CreateAllowedMentions, CreateMessage, EditMessage},
    http::Http,
};
use tracing::{debug, error};

use super::{embed::GiveawayEmbed, interaction::entry_buttons};
use crate::models::{
    giveaway::GiveawayId,
    response::{ResponseError, ResponseResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    Keep,
    Remove,
}

/// The chat operations a giveaway needs from the platform.
#[async_trait::async_trait]
pub trait Announcer: Send + Sync {
    async fn fetch_channel(&self, channel: ChannelId) -> Result<ChannelId, ResponseError>;
    async fn post(
        &self,
        channel: ChannelId,
        giveaway: GiveawayId,
        embed: GiveawayEmbed,
    ) -> Result<MessageId, ResponseError>;
    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        embed: GiveawayEmbed,
        controls: Controls,
    ) -> ResponseResult;
    async fn reply(&self, channel: ChannelId, message: MessageId, content: String)
        -> ResponseResult;
}

pub struct HttpAnnouncer {
    pub http: Arc<Http>,
}

impl HttpAnnouncer {
    pub fn new(http: Arc<Http>) -> Self {
        HttpAnnouncer { http }
    }
}

#[async_trait::async_trait]
impl Announcer for HttpAnnouncer {
    async fn fetch_channel(&self, channel: ChannelId) -> Result<ChannelId, ResponseError> {
        match self.http.get_channel(channel).await {
            Ok(channel) => Ok(channel.id()),
            Err(err) => {
                debug!("Could not fetch channel {}: {:?}", channel, err);
                Err(ResponseError::Serenity(err))
            }
        }
    }

    async fn post(
        &self,
        channel: ChannelId,
        giveaway: GiveawayId,
        embed: GiveawayEmbed,
    ) -> Result<MessageId, ResponseError> {
        match channel
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(embed.into())
                    .components(entry_buttons(giveaway)),
            )
            .await
        {
            Ok(message) => Ok(message.id),
            Err(err) => {
                error!(
                    "Could not post message for giveaway {}. Failed with error: {:?}",
                    giveaway, err
                );
                Err(ResponseError::Serenity(err))
            }
        }
    }

    async fn edit(
        &self,
        channel: ChannelId,
        message: MessageId,
        embed: GiveawayEmbed,
        controls: Controls,
    ) -> ResponseResult {
        let mut edit = EditMessage::new().embed(embed.into());
        if controls == Controls::Remove {
            edit = edit.components(vec![]);
        }
        channel.edit_message(&self.http, message, edit).await?;
        Ok(())
    }

    async fn reply(
        &self,
        channel: ChannelId,
        message: MessageId,
        content: String,
    ) -> ResponseResult {
        channel
            .send_message(
                &self.http,
                CreateMessage::new()
                    .content(content)
                    .reference_message((channel, message))
                    .allowed_mentions(CreateAllowedMentions::new().all_users(true)),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Call {
        Post(ChannelId, GiveawayEmbed),
        Edit(MessageId, GiveawayEmbed, Controls),
        Reply(MessageId, String),
    }

    /// Records every platform call and answers with fixed ids.
    #[derive(Default)]
    pub(crate) struct RecordingAnnouncer {
        pub known_channels: Vec<ChannelId>,
        pub fail_edits: AtomicBool,
        pub calls: Mutex<Vec<Call>>,
    }

    pub(crate) const POSTED_MESSAGE: u64 = 9000;

    impl RecordingAnnouncer {
        pub(crate) fn with_channel(channel: ChannelId) -> Self {
            RecordingAnnouncer {
                known_channels: vec![channel],
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait::async_trait]
    impl Announcer for RecordingAnnouncer {
        async fn fetch_channel(&self, channel: ChannelId) -> Result<ChannelId, ResponseError> {
            if self.known_channels.contains(&channel) {
                Ok(channel)
            } else {
                Err(ResponseError::Execution("Unknown channel", None))
            }
        }

        async fn post(
            &self,
            channel: ChannelId,
            _giveaway: GiveawayId,
            embed: GiveawayEmbed,
        ) -> Result<MessageId, ResponseError> {
            self.record(Call::Post(channel, embed));
            Ok(MessageId::new(POSTED_MESSAGE))
        }

        async fn edit(
            &self,
            _channel: ChannelId,
            message: MessageId,
            embed: GiveawayEmbed,
            controls: Controls,
        ) -> ResponseResult {
            if self.fail_edits.load(Ordering::Relaxed) {
                return Err(ResponseError::Execution("Unknown message", None));
            }
            self.record(Call::Edit(message, embed, controls));
            Ok(())
        }

        async fn reply(
            &self,
            _channel: ChannelId,
            message: MessageId,
            content: String,
        ) -> ResponseResult {
            self.record(Call::Reply(message, content));
            Ok(())
        }
    }
}
