use serenity::{
    all::{CommandInteraction, CommandOptionType},
    builder::{CreateCommand, CreateCommandOption},
};

use crate::models::{
    command::{Command, CommandContext},
    handler::Handler,
    response::ResponseResult,
};

pub mod announcer;
pub mod embed;
pub mod end;
pub mod interaction;
pub mod lifecycle;
pub mod new;

pub struct GiveawayCommand;

#[async_trait::async_trait]
impl Command for GiveawayCommand {
    fn name(&self) -> &'static str {
        "giveaway"
    }

    fn register(&self) -> CreateCommand {
        CreateCommand::new("giveaway")
            .description("Create a giveaway!")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "prize",
                    "Prize of the giveaway",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "duration",
                    "Duration (e.g. 10s, 5m, 1h, 1d)",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "winner",
                    "The person who will win",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "host",
                    "The person hosting the giveaway",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "channel_id",
                    "ID of the channel to post the giveaway in",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "claim_time",
                    "Claim time (e.g. 30m, 2h)",
                )
                .required(true),
            )
            .dm_permission(false)
    }

    async fn router(
        &self,
        handler: &Handler,
        ctx: &CommandContext,
        cmd: &CommandInteraction,
    ) -> ResponseResult {
        new::new(handler, ctx, cmd).await
    }
}
